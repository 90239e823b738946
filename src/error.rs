//! Error handling for the professionals client
//!
//! Library errors are thiserror enums. The create path does not use these:
//! its failures are tagged as [`crate::api::CreateFailure`] so they can be
//! classified into form errors instead of propagated.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors, reported once at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid base URL '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL '{0}' cannot carry a path")]
    OpaqueBaseUrl(String),

    #[error("Invalid timeout '{value}' in {var}: expected a positive number of seconds")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors from the list and bulk endpoints
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Server responded with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Status code when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::Url(_) => None,
        }
    }
}

/// Parse errors for user-supplied names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown source '{0}': expected direct, partner or internal")]
    UnknownSource(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),
}

/// Errors reading a bulk import file
#[derive(Error, Debug)]
pub enum BulkFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Request body must be a list of profiles.")]
    NotAList,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http_error() {
        let e = ApiError::Http {
            status: 400,
            body: "bad".into(),
        };
        assert_eq!(e.to_string(), "Server responded with status 400: bad");
        assert_eq!(e.status(), Some(400));
    }

    #[test]
    fn display_unknown_source() {
        let e = ParseError::UnknownSource("web".into());
        assert_eq!(
            e.to_string(),
            "Unknown source 'web': expected direct, partner or internal"
        );
    }

    #[test]
    fn display_invalid_timeout() {
        let e = ConfigError::InvalidTimeout {
            var: "PROFESSIONALS_API_TIMEOUT_SECS",
            value: "soon".into(),
        };
        assert_eq!(
            e.to_string(),
            "Invalid timeout 'soon' in PROFESSIONALS_API_TIMEOUT_SECS: expected a positive number of seconds"
        );
    }

    #[test]
    fn decode_error_has_no_status() {
        let e = ApiError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(e.status(), None);
    }
}
