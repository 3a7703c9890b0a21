// ── Core error types ──
//
// User-facing errors from navdash-core. Consumers never see reqwest
// errors or JSON parse failures directly: the `From<navdash_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Session errors ───────────────────────────────────────────────
    /// The server rejected the session; the store has already logged out.
    #[error("Not logged in or session expired")]
    Unauthorized,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach dashboard at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("No link at position {index} ({count} links cached)")]
    LinkNotFound { index: usize, count: usize },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Local state ──────────────────────────────────────────────────
    #[error("Failed to persist state at {path}: {message}")]
    Persistence { path: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<navdash_api::Error> for CoreError {
    fn from(err: navdash_api::Error) -> Self {
        let status = err.status();
        match err {
            navdash_api::Error::Unauthorized => CoreError::Unauthorized,
            navdash_api::Error::NoTokenReceived => CoreError::AuthenticationFailed {
                message: "server accepted the login but sent no token".into(),
            },
            navdash_api::Error::InvalidToken => CoreError::AuthenticationFailed {
                message: "stored token is not a valid header value".into(),
            },
            navdash_api::Error::Http { status, body } => CoreError::Api {
                message: if body.trim().is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.trim().to_owned()
                },
                status: Some(status),
            },
            navdash_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status,
                    }
                }
            }
            navdash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            navdash_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            navdash_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            navdash_api::Error::InvalidIconData { reason } => CoreError::Api {
                message: format!("Invalid icon data: {reason}"),
                status: None,
            },
        }
    }
}

impl CoreError {
    pub(crate) fn persistence(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Persistence {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
