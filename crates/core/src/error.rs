//! Errors raised while loading configuration or accepting caller input.
//!
//! Every error carries an [`ErrorCode`] so callers embedding the engine can
//! branch on the failure without parsing messages, and, where it applies, the
//! config file or key it concerns.

use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Numeric error codes, rendered as `E####`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Configuration (3xxx)
    ConfigNotFound = 3001,
    ConfigUnreadable = 3002,
    ConfigParseError = 3003,
    InvalidConfigValue = 3004,

    // Caller input (6xxx)
    InvalidInput = 6001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(self) -> u32 {
        self as u32
    }

    /// True for errors that come from a configuration file or value
    pub fn is_config(self) -> bool {
        self.code() / 1000 == 3
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error with a code, the file or key it concerns, and optional context.
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Config file path or dotted config key
    pub location: Option<String>,
    /// What the caller was doing
    pub context: Option<String>,
    /// Underlying IO or parse error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {ctx}")?;
        }
        Ok(())
    }
}

impl Error {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            context: None,
            source: None,
        }
    }

    fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    fn caused_by(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Explicitly requested configuration file does not exist
    pub fn config_not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            "Configuration file not found; create .medina-search.toml or pass an existing path",
        )
        .at(path.as_ref().display().to_string())
    }

    /// Configuration file exists but could not be read
    pub fn config_unreadable(path: impl AsRef<Path>, err: std::io::Error) -> Self {
        Self::new(ErrorCode::ConfigUnreadable, format!("Failed to read configuration: {err}"))
            .at(path.as_ref().display().to_string())
            .caused_by(err)
    }

    /// Configuration file is not valid TOML for the schema
    pub fn config_parse(path: impl AsRef<Path>, err: toml::de::Error) -> Self {
        Self::from(err).at(path.as_ref().display().to_string())
    }

    /// A configuration value is out of its accepted range
    pub fn invalid_config_value(key: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfigValue, message).at(key)
    }

    /// Caller supplied an unusable value
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err.message()))
            .caused_by(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ConfigNotFound.to_string(), "E3001");
        assert_eq!(ErrorCode::InvalidInput.to_string(), "E6001");
    }

    #[test]
    fn test_error_code_is_config() {
        assert!(ErrorCode::ConfigParseError.is_config());
        assert!(ErrorCode::InvalidConfigValue.is_config());
        assert!(!ErrorCode::InvalidInput.is_config());
    }

    #[test]
    fn test_config_not_found_names_path() {
        let err = Error::config_not_found("/etc/medina-search.toml");

        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert_eq!(err.location.as_deref(), Some("/etc/medina-search.toml"));
        assert!(err.to_string().contains("/etc/medina-search.toml"));
    }

    #[test]
    fn test_invalid_config_value_names_key() {
        let rendered = Error::invalid_config_value("search.limit", "limit must be at least 1").to_string();

        assert!(rendered.starts_with("[E3004] limit must be at least 1"));
        assert!(rendered.contains("(search.limit)"));
    }

    #[test]
    fn test_config_unreadable_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::config_unreadable("medina-search.toml", io);

        assert_eq!(err.code, ErrorCode::ConfigUnreadable);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_result_ext_adds_context() {
        let result: Result<()> = Err(Error::invalid_input("negative limit"));
        let err = result.context("While ranking listings").unwrap_err();

        assert_eq!(err.context.as_deref(), Some("While ranking listings"));
        assert!(err.to_string().ends_with("Context: While ranking listings"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("threshold = ");
        let err: Error = parse.unwrap_err().into();

        assert_eq!(err.code, ErrorCode::ConfigParseError);
        assert!(err.location.is_none());
        assert!(err.source.is_some());
    }
}
