//! Exoplanet catalog dashboard for checking Kepler's third law.
//!
//! The catalog is fetched once from the NASA Exoplanet Archive
//! ([`archive`]), narrowed to one host star and checked for
//! `period² / a³` ([`kepler`]), then rendered as a dashboard page
//! ([`render`]) served over HTTP ([`api`]).

pub mod api;
pub mod archive;
pub mod error;
pub mod kepler;
pub mod models;
pub mod render;

pub use error::{KeplerError, Result};
