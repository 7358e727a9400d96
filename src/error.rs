//! Error types and handling for `ClimaRisk`

use thiserror::Error;

/// Main error type for the `ClimaRisk` engine and CLI
#[derive(Error, Debug)]
pub enum RiskError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors (caller contract violations)
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Malformed request payloads
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl RiskError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RiskError {
    fn from(err: serde_json::Error) -> Self {
        RiskError::parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = RiskError::config("threshold out of range");
        assert!(matches!(config_err, RiskError::Config { .. }));

        let validation_err = RiskError::validation("temperature is NaN");
        assert!(matches!(validation_err, RiskError::Validation { .. }));

        let parse_err = RiskError::parse("missing field");
        assert!(matches!(parse_err, RiskError::Parse { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let risk_err: RiskError = io_err.into();
        assert!(matches!(risk_err, RiskError::Io { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let risk_err: RiskError = json_err.into();
        assert!(matches!(risk_err, RiskError::Parse { .. }));
        assert!(risk_err.to_string().starts_with("Parse error"));
    }
}
