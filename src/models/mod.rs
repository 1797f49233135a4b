//! Domain models for the exoplanet catalog.
//!
//! - [`PlanetRecord`]: one archive row, keyed by host star and planet name.
//! - [`Catalog`]: every fetched row, sorted by host star. Immutable once built.
//! - [`Selection`]: the planets of one host star, derived per interaction.
//! - [`LawCheckResult`]: the `period² / a³` ratio of a selected planet.

mod catalog;
mod planet;

pub use catalog::*;
pub use planet::*;
