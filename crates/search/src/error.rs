//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
///
/// Ranking itself never fails; only options rejected at the boundary do.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Option value with no sane interpretation
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Error code for integration with medina-core error handling.
/// Range: 11xxx for search errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorCode {
    /// Option value out of range
    InvalidOption = 11001,
}

impl SearchError {
    /// Returns the error code for this error.
    pub fn code(&self) -> SearchErrorCode {
        match self {
            SearchError::InvalidOption(_) => SearchErrorCode::InvalidOption,
        }
    }
}

impl From<SearchError> for medina_core::Error {
    fn from(err: SearchError) -> Self {
        medina_core::Error::invalid_input(err.to_string())
            .with_context(format!("Search error E{}", err.code() as u32))
    }
}
