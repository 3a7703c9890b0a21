use thiserror::Error;

/// Top-level error type for the `navdash-api` crate.
///
/// The first three variants are the dashboard's own response taxonomy;
/// the rest cover transport and decoding failures underneath it.
/// `navdash-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Response classification ─────────────────────────────────────
    /// The server answered 401. The shared session has already been
    /// cleared by the time the caller sees this.
    #[error("Unauthorized")]
    Unauthorized,

    /// Any other non-2xx response.
    #[error("HTTP error (status {status}){}", fmt_body(.body))]
    Http { status: u16, body: String },

    /// Login succeeded at the transport level but carried no token header.
    #[error("No token received")]
    NoTokenReceived,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The stored token cannot be encoded as a header value.
    #[error("Session token contains characters not allowed in a header")]
    InvalidToken,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The icon endpoint returned something other than a base64 data URI.
    #[error("Invalid icon data: {reason}")]
    InvalidIconData { reason: String },
}

fn fmt_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

impl Error {
    /// Returns `true` if the server rejected the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_includes_trimmed_body() {
        let err = Error::Http {
            status: 400,
            body: "Cannot remove category 'dev' that is still in use\n".into(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error (status 400): Cannot remove category 'dev' that is still in use"
        );
    }

    #[test]
    fn http_error_without_body() {
        let err = Error::Http {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP error (status 500)");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn unauthorized_reports_401() {
        assert_eq!(Error::Unauthorized.status(), Some(401));
        assert!(Error::Unauthorized.is_unauthorized());
    }
}
