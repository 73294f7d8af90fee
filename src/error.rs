//! Error types for the relay.

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RelayError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The provider answered 200 but with a status other than OK / ZERO_RESULTS.
    #[error("Provider returned status {status}")]
    UpstreamStatus {
        status: String,
        message: Option<String>,
    },

    /// The outbound call itself failed, or came back with an HTTP error status.
    #[error("Transport error: {detail}")]
    Transport {
        status: Option<u16>,
        detail: serde_json::Value,
    },

    #[error("Translation error: {message}")]
    Translation { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl RelayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    pub fn upstream_status(status: impl Into<String>, message: Option<String>) -> Self {
        Self::UpstreamStatus {
            status: status.into(),
            message,
        }
    }

    pub fn transport(status: Option<u16>, detail: impl Into<serde_json::Value>) -> Self {
        Self::Transport {
            status,
            detail: detail.into(),
        }
    }

    pub fn translation(msg: impl Into<String>) -> Self {
        Self::Translation {
            message: msg.into(),
        }
    }

    /// HTTP status the relay answers with for this error.
    ///
    /// Transport failures reuse the upstream status when one exists and is a
    /// valid error code; everything that isn't the client's fault is a 500.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::Transport {
                status: Some(code), ..
            } if (400..=599).contains(code) => *code,
            Self::Http(e) => e
                .status()
                .map(|s| s.as_u16())
                .filter(|code| (400..=599).contains(code))
                .unwrap_or(500),
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        assert_eq!(RelayError::validation("missing latitude").status_code(), 400);
    }

    #[test]
    fn test_transport_reuses_upstream_status() {
        let err = RelayError::transport(Some(403), "denied");
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_transport_without_status_is_500() {
        let err = RelayError::transport(None, "connection refused");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_upstream_status_is_500() {
        let err = RelayError::upstream_status("INVALID_REQUEST", None);
        assert_eq!(err.status_code(), 500);
        assert!(err.to_string().contains("INVALID_REQUEST"));
    }
}
