//! Error types for SatFinder.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SatError {
    #[error("Enter a satellite name or NORAD catalog number.")]
    EmptyQuery,

    #[error("No encyclopedia article found for '{query}'. Try the official name or a NORAD catalog number.")]
    NotFound { query: String },

    #[error("Could not load a summary for '{query}'.")]
    SummaryUnavailable { query: String },

    #[error("Invalid language tag: '{0}'")]
    InvalidLanguage(String),

    #[error("HTTP client error: {0}")]
    Http(String),
}

impl SatError {
    /// Process exit status for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            SatError::EmptyQuery => 64,
            SatError::NotFound { .. } => 2,
            SatError::SummaryUnavailable { .. } => 3,
            SatError::InvalidLanguage(_) => 78,
            SatError::Http(_) => 1,
        }
    }
}
