// ── Runtime connection configuration ──
//
// Describes *how* to reach the remote server. Carries credentials and
// timeout tuning but never touches disk; the CLI builds a `RemoteConfig`
// and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use airwright_api::{ApiClient, TransportConfig};

use crate::error::CoreError;

/// HTTP basic-auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Option<SecretString>,
}

/// Configuration for talking to one remote server.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Server root (e.g., `http://localhost:8000`).
    pub url: Url,
    /// Optional basic auth.
    pub auth: Option<Credentials>,
    /// Request timeout.
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            auth: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build the API client. Headers and credentials are fixed here, once.
    pub fn build_client(&self) -> Result<ApiClient, CoreError> {
        let mut transport = TransportConfig::default().with_timeout(self.timeout);
        if let Some(ref creds) = self.auth {
            transport = transport.with_auth(creds.username.clone(), creds.password.clone());
        }
        Ok(ApiClient::new(self.url.as_str(), &transport)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn client_targets_api_root() {
        let cfg = RemoteConfig::new("http://airbyte.internal:8000".parse().unwrap());
        let client = cfg.build_client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://airbyte.internal:8000/api/v1/");
    }
}
