//! Error types shared by the fetch layer and the controllers

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading and rendering blog content
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to fetch {path}: {message}")]
    Fetch { path: String, message: String },

    #[error("request for {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("invalid JSON in {path}: {source}")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("markdown conversion failed: {0}")]
    Convert(String),

    #[error("missing query parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected or answered with a non-success status
    NetworkOrHttpFailure,
    /// The body could not be decoded or converted
    DeserializationFailure,
    /// A required page parameter was absent
    MissingParameter,
    /// Local configuration or I/O problem
    Local,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fetch { .. } | Error::Status { .. } => ErrorKind::NetworkOrHttpFailure,
            Error::Deserialize { .. } | Error::Convert(_) => ErrorKind::DeserializationFailure,
            Error::MissingParameter(_) => ErrorKind::MissingParameter,
            Error::Config(_) | Error::Io(_) => ErrorKind::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = Error::Status {
            path: "posts/missing.md".to_string(),
            status: 404,
        };
        assert_eq!(err.kind(), ErrorKind::NetworkOrHttpFailure);
        assert_eq!(
            err.to_string(),
            "request for posts/missing.md returned HTTP 404"
        );

        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = Error::Deserialize {
            path: "posts/index.json".to_string(),
            source: json_err,
        };
        assert_eq!(err.kind(), ErrorKind::DeserializationFailure);
        assert_eq!(
            Error::MissingParameter("slug").kind(),
            ErrorKind::MissingParameter
        );
    }
}
