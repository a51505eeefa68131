//! Error types for watchlens-core

use thiserror::Error;

/// Main error type for the watchlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a valid watch-history export (bad JSON or not an array)
    #[error("invalid watch-history format: {0}")]
    InvalidFormat(String),

    /// Normalization left zero usable watch events
    #[error("no valid videos found in history")]
    NoValidEvents,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for watchlens-core
pub type Result<T> = std::result::Result<T, Error>;
