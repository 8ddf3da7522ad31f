//! Configuration errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config file could not be read or written
    #[error("Config I/O error: {message}")]
    Io {
        /// Description of the I/O failure
        message: String,
    },

    /// Config file exists but could not be parsed
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Description of the parse failure
        message: String,
    },

    /// The configured timezone name is not a known tz database identifier
    #[error("Unknown timezone: {name}")]
    UnknownTimezone {
        /// The rejected timezone name
        name: String,
    },

    /// A configured value failed validation (bad URL, zero timeout, ...)
    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        /// Name of the offending field
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_timezone_display() {
        let err = ConfigError::UnknownTimezone { name: "Mars/Olympus".to_string() };
        assert!(format!("{}", err).contains("Mars/Olympus"));
    }
}
