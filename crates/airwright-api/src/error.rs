use thiserror::Error;

/// Top-level error type for the `airwright-api` crate.
///
/// Every endpoint call funnels through [`ApiClient::call`](crate::ApiClient::call),
/// so these variants cover the whole remote surface. `airwright-core` maps
/// them into reconciliation errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Remote ──────────────────────────────────────────────────────
    /// The remote answered with a non-success HTTP status.
    #[error("{endpoint} failed (HTTP {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Unexpected response from {endpoint}: {message}")]
    Deserialization {
        endpoint: String,
        message: String,
        body: String,
    },
}

impl Error {
    /// HTTP status of a rejected call, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the remote rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if the request never produced a response in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if the remote could not be reached.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect())
    }
}
