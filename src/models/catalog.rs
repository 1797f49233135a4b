use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlanetRecord;

/// The full exoplanet catalog, ordered by host star name.
///
/// Built once per process from the archive response and read-only afterwards.
/// Rows that share a host keep the order the archive returned them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "CatalogRows")]
pub struct Catalog {
    records: Vec<PlanetRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Wire shape of a [`Catalog`]. Deserialized rows go through
/// [`Catalog::from_rows`] so the host ordering always holds.
#[derive(Deserialize)]
struct CatalogRows {
    records: Vec<PlanetRecord>,
    fetched_at: DateTime<Utc>,
}

impl From<CatalogRows> for Catalog {
    fn from(rows: CatalogRows) -> Self {
        Self::from_rows(rows.records, rows.fetched_at)
    }
}

impl Catalog {
    /// Build a catalog from rows in source order, sorting them by host name.
    pub fn from_rows(mut records: Vec<PlanetRecord>, fetched_at: DateTime<Utc>) -> Self {
        // slice::sort_by is stable, ties keep source order
        records.sort_by(|a, b| a.host_name.cmp(&b.host_name));
        Self {
            records,
            fetched_at,
        }
    }

    pub fn records(&self) -> &[PlanetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Unique host names in catalog order.
    pub fn host_names(&self) -> Vec<&str> {
        let mut hosts: Vec<&str> = Vec::new();
        for record in &self.records {
            // Sorted by host, so duplicates are always adjacent.
            if hosts.last() != Some(&record.host_name.as_str()) {
                hosts.push(&record.host_name);
            }
        }
        hosts
    }

    /// The host shown before the user types anything.
    pub fn default_host(&self) -> Option<&str> {
        self.records.first().map(|r| r.host_name.as_str())
    }

    pub fn contains_host(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.host_name == name)
    }
}

/// The planets of a single host star, in catalog order.
///
/// Only produced by [`crate::kepler::select_by_host`], so every record shares
/// `host_name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selection {
    pub host_name: String,
    pub records: Vec<PlanetRecord>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Kepler's third law check for one planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawCheckResult {
    pub planet_name: String,
    /// `period² / semi_major_axis³`, or `None` when either input is missing.
    pub ratio: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(host: &str, planet: &str) -> PlanetRecord {
        PlanetRecord {
            host_name: host.to_string(),
            planet_name: planet.to_string(),
            orbital_period: None,
            semi_major_axis: None,
            mass: None,
            radius: None,
        }
    }

    #[test]
    fn from_rows_sorts_by_host_and_keeps_ties_in_source_order() {
        let catalog = Catalog::from_rows(
            vec![
                record("TRAPPIST-1", "TRAPPIST-1 c"),
                record("HD 209458", "HD 209458 b"),
                record("TRAPPIST-1", "TRAPPIST-1 b"),
                record("Kepler-90", "Kepler-90 h"),
            ],
            Utc::now(),
        );

        let names: Vec<_> = catalog
            .records()
            .iter()
            .map(|r| r.planet_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["HD 209458 b", "Kepler-90 h", "TRAPPIST-1 c", "TRAPPIST-1 b"]
        );
    }

    #[test]
    fn host_names_are_unique_and_ordered() {
        let catalog = Catalog::from_rows(
            vec![
                record("b", "b1"),
                record("a", "a1"),
                record("b", "b2"),
                record("a", "a2"),
            ],
            Utc::now(),
        );
        assert_eq!(catalog.host_names(), vec!["a", "b"]);
        assert_eq!(catalog.default_host(), Some("a"));
    }

    #[test]
    fn deserializing_sorts_unordered_rows() {
        let json = serde_json::json!({
            "records": [
                serde_json::to_value(record("b", "b1")).unwrap(),
                serde_json::to_value(record("a", "a1")).unwrap(),
                serde_json::to_value(record("b", "b2")).unwrap(),
            ],
            "fetched_at": "2024-01-01T00:00:00Z"
        });

        let catalog: Catalog = serde_json::from_value(json).unwrap();

        assert_eq!(catalog.host_names(), vec!["a", "b"]);
        let names: Vec<_> = catalog
            .records()
            .iter()
            .map(|r| r.planet_name.as_str())
            .collect();
        assert_eq!(names, vec!["a1", "b1", "b2"]);
    }

    #[test]
    fn empty_catalog_has_no_default_host() {
        let catalog = Catalog::from_rows(Vec::new(), Utc::now());
        assert!(catalog.is_empty());
        assert_eq!(catalog.default_host(), None);
        assert!(catalog.host_names().is_empty());
    }
}
