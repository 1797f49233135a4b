use serde::{Deserialize, Serialize};

/// One row of the exoplanet catalog.
///
/// Field names on the wire are the archive's raw column names. Measurements
/// the archive has not determined come back as `null`, so every numeric
/// column is optional. Identity is the `(host_name, planet_name)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    #[serde(rename = "hostname")]
    pub host_name: String,
    #[serde(rename = "pl_name")]
    pub planet_name: String,
    /// Orbital period in days.
    #[serde(rename = "pl_orbper")]
    pub orbital_period: Option<f64>,
    /// Orbital semi-major axis in astronomical units.
    #[serde(rename = "pl_orbsmax")]
    pub semi_major_axis: Option<f64>,
    /// Planet mass in Earth masses.
    #[serde(rename = "pl_bmasse")]
    pub mass: Option<f64>,
    /// Planet radius in Earth radii.
    #[serde(rename = "pl_rade")]
    pub radius: Option<f64>,
}

impl PlanetRecord {
    /// Cell values in [`COLUMNS`] order, formatted for display.
    pub fn cells(&self) -> [String; 6] {
        [
            self.host_name.clone(),
            self.planet_name.clone(),
            format_measurement(self.orbital_period),
            format_measurement(self.semi_major_axis),
            format_measurement(self.mass),
            format_measurement(self.radius),
        ]
    }
}

/// A catalog column: the archive's raw field name and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
}

/// The fixed column set queried from the archive, in display order.
pub const COLUMNS: [Column; 6] = [
    Column {
        field: "hostname",
        label: "Host Star",
    },
    Column {
        field: "pl_name",
        label: "Planet",
    },
    Column {
        field: "pl_orbper",
        label: "Orbital Period [days]",
    },
    Column {
        field: "pl_orbsmax",
        label: "Semi-Major Axis [au]",
    },
    Column {
        field: "pl_bmasse",
        label: "Planet Mass [Earth masses]",
    },
    Column {
        field: "pl_rade",
        label: "Planet Radius [Earth radii]",
    },
];

/// Display label for a raw archive field, if it is one of [`COLUMNS`].
pub fn display_label(field: &str) -> Option<&'static str> {
    COLUMNS.iter().find(|c| c.field == field).map(|c| c.label)
}

/// Comma-separated field list for the archive `select` clause.
pub fn select_clause() -> String {
    COLUMNS
        .iter()
        .map(|c| c.field)
        .collect::<Vec<_>>()
        .join(",")
}

fn format_measurement(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "—".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_raw_archive_row_with_nulls() {
        let row = serde_json::json!({
            "hostname": "Kepler-11",
            "pl_name": "Kepler-11 b",
            "pl_orbper": 10.3039,
            "pl_orbsmax": 0.091,
            "pl_bmasse": null,
            "pl_rade": 1.8
        });

        let record: PlanetRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.host_name, "Kepler-11");
        assert_eq!(record.planet_name, "Kepler-11 b");
        assert_eq!(record.orbital_period, Some(10.3039));
        assert_eq!(record.mass, None);
    }

    #[test]
    fn select_clause_lists_all_fields_in_order() {
        assert_eq!(
            select_clause(),
            "hostname,pl_name,pl_orbper,pl_orbsmax,pl_bmasse,pl_rade"
        );
    }

    #[test]
    fn display_label_maps_known_fields_only() {
        assert_eq!(display_label("pl_orbsmax"), Some("Semi-Major Axis [au]"));
        assert_eq!(display_label("ra"), None);
    }

    #[test]
    fn cells_mark_missing_measurements() {
        let record = PlanetRecord {
            host_name: "Sol".to_string(),
            planet_name: "Earth".to_string(),
            orbital_period: Some(365.25),
            semi_major_axis: Some(1.0),
            mass: None,
            radius: Some(1.0),
        };
        let cells = record.cells();
        assert_eq!(cells[2], "365.25");
        assert_eq!(cells[4], "—");
    }
}
