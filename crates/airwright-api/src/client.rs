// Async HTTP client for the Airbyte configuration API.
//
// Base path: /api/v1/
// Every endpoint is a JSON POST; endpoint wrappers live in sibling
// modules (workspaces, definitions, sources, destinations, connections)
// as inherent methods so this file stays focused on transport mechanics.

use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::{BasicAuth, TransportConfig};

// ── Error response shape from the config API ─────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Airbyte configuration API.
///
/// Holds the base URL, optional basic-auth credentials, and the shared
/// `reqwest::Client`. All of them are fixed at construction time.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    auth: Option<BasicAuth>,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a server URL and transport config.
    ///
    /// `base_url` is the server root (e.g. `http://localhost:8000`); the
    /// `/api/v1/` prefix is appended unless already present.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            auth: transport.auth.clone(),
        })
    }

    /// Wrap an existing `reqwest::Client` (no credentials attached).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            auth: None,
        })
    }

    /// The resolved API root, always ending in `/api/v1/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api/v1") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/v1/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join an endpoint name (e.g. `"sources/list"`) onto the base URL.
    fn url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    // ── Generic call ─────────────────────────────────────────────────

    /// POST `body` as JSON to `endpoint` and decode the JSON reply.
    ///
    /// A non-2xx status always fails with [`Error::Api`] carrying the
    /// status and endpoint. Nothing is retried.
    pub async fn call<T, B>(&self, endpoint: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let url = self.url(endpoint)?;
        debug!("POST {url}");

        let mut request = self.http.post(url).json(body);
        if let Some(ref auth) = self.auth {
            request = request.basic_auth(
                &auth.username,
                auth.password.as_ref().map(|p| p.expose_secret()),
            );
        }

        let resp = request.send().await?;
        Self::handle_response(endpoint, resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(endpoint, status, resp).await);
        }

        let body = resp.text().await?;
        let text = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(text).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                endpoint: endpoint.to_owned(),
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn parse_error(
        endpoint: &str,
        status: reqwest::StatusCode,
        resp: reqwest::Response,
    ) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&raw) {
            Ok(ErrorResponse {
                message: Some(message),
            }) => message,
            _ if raw.is_empty() => status.to_string(),
            _ => raw,
        };

        Error::Api {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            message,
        }
    }
}
