use thiserror::Error;

/// The error type of the backend client.
///
/// Component entry points (`check_health`, `load_gallery`, the delete and
/// upload flows) never return it: they fold every variant into view state.
/// It surfaces only from the [`crate::api::GalleryApi`] seam, from batch
/// construction and from configuration loading.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request produced no response at all.
    #[error("network error: {0}")]
    Transport(String),
    /// A response arrived but its body is not the expected JSON.
    #[error("malformed response: {0}")]
    Decode(String),
    /// An upload was requested with zero files.
    #[error("upload batch is empty")]
    EmptyBatch,
    /// A local file could not be read for upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// A type alias for `Result<T, ClientError>`.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(ClientError::Transport("refused".into()).to_string(), "network error: refused");
        assert_eq!(ClientError::EmptyBatch.to_string(), "upload batch is empty");
        assert!(ClientError::Decode("eof".into()).to_string().starts_with("malformed response"));
    }

    #[test]
    fn test_json_error_is_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(ClientError::from(err), ClientError::Decode(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let err: ClientError = io.into();
        assert!(matches!(err, ClientError::Io(_)));
        assert!(err.to_string().contains("missing.png"));
    }
}
