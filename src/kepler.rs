//! Host selection and the Kepler's third law check.

use crate::error::{KeplerError, Result};
use crate::models::{Catalog, LawCheckResult, Selection};

/// Narrow the catalog to the planets of `host_name`.
///
/// Matching is exact. An unknown host is an error rather than an empty
/// selection.
pub fn select_by_host(catalog: &Catalog, host_name: &str) -> Result<Selection> {
    if !catalog.contains_host(host_name) {
        return Err(KeplerError::UnknownHost(host_name.to_string()));
    }

    let records = catalog
        .records()
        .iter()
        .filter(|r| r.host_name == host_name)
        .cloned()
        .collect();

    Ok(Selection {
        host_name: host_name.to_string(),
        records,
    })
}

/// `period² / semi_major_axis³` for every planet in the selection.
///
/// Fails on the first planet whose cubed semi-major axis is zero, which covers
/// an axis of exactly zero and one small enough to underflow. This holds even
/// when the period is missing. Otherwise missing measurements give a `None`
/// ratio.
pub fn compute_ratios(selection: &Selection) -> Result<Vec<LawCheckResult>> {
    selection
        .records
        .iter()
        .map(|record| {
            let axis_cubed = record.semi_major_axis.map(|axis| axis.powi(3));
            if axis_cubed == Some(0.0) {
                return Err(KeplerError::DivisionByZero {
                    planet: record.planet_name.clone(),
                });
            }
            let ratio = match (record.orbital_period, axis_cubed) {
                (Some(period), Some(cubed)) => Some(period.powi(2) / cubed),
                _ => None,
            };
            Ok(LawCheckResult {
                planet_name: record.planet_name.clone(),
                ratio,
            })
        })
        .collect()
}
