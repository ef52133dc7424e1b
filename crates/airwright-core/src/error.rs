// ── Core error types ──
//
// Reconciliation errors. None of them are retried: each one is a
// configuration or environment problem the caller has to fix. The
// `From<airwright_api::Error>` impl folds transport-layer failures into
// the transport variants below.

use thiserror::Error;

use crate::model::EntityKind;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Resolution ───────────────────────────────────────────────────
    #[error("No workspace exists on the remote server")]
    NoWorkspace,

    #[error("{kind} definition '{name}' not found. Is the connector available?")]
    UnknownDefinition { kind: EntityKind, name: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: EntityKind, name: String },

    // ── Transport ────────────────────────────────────────────────────
    /// The remote rejected a call with a non-success HTTP status.
    #[error("{endpoint} failed (HTTP {status}): {message}")]
    Transport {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Cannot reach server at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    Timeout { url: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// HTTP status of a rejected call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<airwright_api::Error> for CoreError {
    fn from(err: airwright_api::Error) -> Self {
        match err {
            airwright_api::Error::Api {
                endpoint,
                status,
                message,
            } => CoreError::Transport {
                endpoint,
                status,
                message,
            },
            airwright_api::Error::Transport(e) => {
                let url = e
                    .url()
                    .map_or_else(|| "<unknown>".into(), ToString::to_string);
                if e.is_timeout() {
                    CoreError::Timeout { url }
                } else if let Some(status) = e.status() {
                    CoreError::Transport {
                        endpoint: url,
                        status: status.as_u16(),
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        url,
                        reason: e.to_string(),
                    }
                }
            }
            airwright_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            airwright_api::Error::Tls(reason) => CoreError::ConnectionFailed {
                url: String::new(),
                reason,
            },
            airwright_api::Error::Deserialization {
                endpoint, message, ..
            } => CoreError::MalformedResponse { endpoint, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_rejection_becomes_transport_error() {
        let err = CoreError::from(airwright_api::Error::Api {
            endpoint: "sources/update".into(),
            status: 500,
            message: "boom".into(),
        });
        assert!(matches!(
            err,
            CoreError::Transport { ref endpoint, status: 500, .. } if endpoint == "sources/update"
        ));
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn deserialization_becomes_malformed_response() {
        let err = CoreError::from(airwright_api::Error::Deserialization {
            endpoint: "workspaces/list".into(),
            message: "expected value".into(),
            body: String::new(),
        });
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn unknown_definition_names_the_connector() {
        let err = CoreError::UnknownDefinition {
            kind: EntityKind::Destination,
            name: "BigQuery".into(),
        };
        assert_eq!(
            err.to_string(),
            "destination definition 'BigQuery' not found. Is the connector available?"
        );
    }
}
