//! NASA Exoplanet Archive access.
//!
//! The archive is queried once through its TAP endpoint and the result is kept
//! for the rest of the process in a [`CatalogCache`].
//! Configuration is via environment variables:
//! - `EXOPLANET_ARCHIVE_URL` - TAP sync endpoint (default: [`DEFAULT_URL`])
//! - `EXOPLANET_ARCHIVE_TABLE` - table to query (default: [`DEFAULT_TABLE`])

mod cache;

pub use cache::CatalogCache;

use chrono::Utc;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::models::{select_clause, Catalog, PlanetRecord};

/// Synchronous TAP endpoint of the NASA Exoplanet Archive.
pub const DEFAULT_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";

/// Planetary Systems Composite Parameters: one row per planet.
pub const DEFAULT_TABLE: &str = "pscomppars";

/// Archive query errors.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("archive returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed archive response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// HTTP client for the archive's TAP service.
#[derive(Debug, Clone)]
pub struct ArchiveClient {
    base_url: String,
    table: String,
    client: Client,
}

impl ArchiveClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("EXOPLANET_ARCHIVE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let table =
            std::env::var("EXOPLANET_ARCHIVE_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());
        Self::new(base_url, table)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            table: table.into(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The ADQL statement sent to the archive.
    pub fn query(&self) -> String {
        format!("select {} from {}", select_clause(), self.table)
    }

    /// Fetch every row of the configured table and build a sorted catalog.
    pub async fn fetch_catalog(&self) -> Result<Catalog, ArchiveError> {
        let query = self.query();
        tracing::info!(url = %self.base_url, %query, "Querying exoplanet archive");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ArchiveError::Status { status, body });
        }

        // A body that is not a row array is `Malformed`, not `Http`.
        let body = response.bytes().await?;
        let rows: Vec<PlanetRecord> = serde_json::from_slice(&body)?;
        tracing::info!(rows = rows.len(), "Archive query complete");

        Ok(Catalog::from_rows(rows, Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_selects_fixed_columns_from_table() {
        let client = ArchiveClient::new(DEFAULT_URL, "ps");
        assert_eq!(
            client.query(),
            "select hostname,pl_name,pl_orbper,pl_orbsmax,pl_bmasse,pl_rade from ps"
        );
    }

    #[test]
    fn new_keeps_explicit_configuration() {
        let client = ArchiveClient::new("http://localhost:9999/TAP/sync", DEFAULT_TABLE);
        assert_eq!(client.base_url(), "http://localhost:9999/TAP/sync");
        assert_eq!(client.table(), "pscomppars");
    }
}
