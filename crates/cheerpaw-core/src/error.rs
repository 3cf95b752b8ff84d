//! Error types for Cheerpaw

use thiserror::Error;

/// Main error type for Cheerpaw operations
#[derive(Error, Debug)]
pub enum CheerError {
    /// The request never produced a response (network unreachable, aborted, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// A response body could not be decoded
    #[error("Payload error: {0}")]
    Payload(String),

    /// A control is missing a data attribute it needs
    #[error("Element is missing attribute '{0}'")]
    MissingAttribute(String),

    /// A data attribute holds a value that cannot be used
    #[error("Attribute '{name}' has invalid value '{value}'")]
    InvalidAttribute { name: String, value: String },

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for CheerError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CheerError::Status(status.as_u16()),
            None if err.is_decode() => CheerError::Payload(err.to_string()),
            None => CheerError::Transport(err.to_string()),
        }
    }
}

/// Result type alias using CheerError
pub type CheerResult<T> = Result<T, CheerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CheerError::Status(403);
        assert_eq!(format!("{}", err), "Unexpected HTTP status: 403");

        let err = CheerError::InvalidAttribute {
            name: "data-coins".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Attribute 'data-coins' has invalid value 'lots'"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CheerError = io_err.into();
        assert!(matches!(err, CheerError::Io(_)));
    }

    #[test]
    fn test_error_from_url() {
        let err: CheerError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CheerError::Url(_)));
    }
}
