//! Error types for declaration loading and validation.

/// Errors that can occur when loading or validating a test declaration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the declaration file.
    #[error("failed to read declaration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse declaration: {0}")]
    ParseError(String),

    /// The declaration parsed but is not a valid test case.
    #[error("invalid declaration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse_error() {
        let err = ConfigError::ParseError("expected '=' at line 3".to_string());
        assert_eq!(
            format!("{err}"),
            "failed to parse declaration: expected '=' at line 3"
        );
    }

    #[test]
    fn display_invalid() {
        let err = ConfigError::Invalid("duplicate port name 'a'".to_string());
        assert_eq!(format!("{err}"), "invalid declaration: duplicate port name 'a'");
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ConfigError::IoError(io_err);
        assert!(format!("{err}").starts_with("failed to read declaration:"));
    }
}
