use thiserror::Error;

use crate::archive::ArchiveError;

/// Errors raised while loading, filtering, checking or drawing the catalog.
#[derive(Debug, Error)]
pub enum KeplerError {
    /// The archive could not be reached or answered with something unusable.
    #[error("remote query failed: {0}")]
    RemoteQuery(#[from] ArchiveError),

    /// The requested host star is not in the catalog.
    #[error("host star not found in catalog: {0}")]
    UnknownHost(String),

    /// A planet's cubed semi-major axis is zero.
    #[error("semi-major axis of {planet} is zero")]
    DivisionByZero { planet: String },

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KeplerError>;
