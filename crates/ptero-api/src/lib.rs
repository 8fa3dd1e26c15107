//! Typed Rust client for the Pterodactyl Application API.
//!
//! Covers the subset needed for provisioning hosting instances:
//! users (create) and servers (create, list).

mod types;

pub use types::*;

use serde::Deserialize;

/// Maximum number of servers requested by `list_servers`. Only the first
/// page is fetched.
pub const SERVER_PAGE_SIZE: u32 = 50;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("panel request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("panel {endpoint} returned {status}: {body}")]
    Api {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl Error {
    /// Whether the failure happened before the panel produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(e) if !e.is_decode())
    }

    /// Human-readable reason for the failure.
    ///
    /// Uses `errors[0].detail` of the panel's error body when present,
    /// falling back to the status line or the transport error text.
    pub fn detail(&self) -> String {
        match self {
            Self::Request(e) => e.to_string(),
            Self::Api { status, body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.errors.into_iter().next().and_then(|e| e.detail))
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16())),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    detail: Option<String>,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Strip the trailing path separator from a panel host.
///
/// `"https://panel.example.com/"` and `"https://panel.example.com"` both
/// normalize to `"https://panel.example.com"`.
pub fn normalize_host(host: &str) -> &str {
    host.trim_end_matches('/')
}

/// Client for the Pterodactyl Application REST API.
#[derive(Clone)]
pub struct PteroClient {
    host: String,
    key: String,
    http: reqwest::Client,
}

impl PteroClient {
    /// `host` must already be passed through [`normalize_host`]; endpoint
    /// paths are appended to it verbatim.
    pub fn new(host: impl Into<String>, key: impl Into<String>) -> Self {
        Self::with_http(host, key, reqwest::Client::new())
    }

    /// Build a client that shares an existing connection pool.
    pub fn with_http(host: impl Into<String>, key: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            host: host.into(),
            key: key.into(),
            http,
        }
    }

    /// The panel host endpoints are built from.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/application{path}", self.host)
    }

    fn auth(&self) -> String {
        format!("Bearer {}", self.key)
    }

    async fn check(resp: reqwest::Response, endpoint: &'static str) -> Result<reqwest::Response> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api { endpoint, status, body });
        }
        Ok(resp)
    }

    // ── Users ────────────────────────────────────────────────────────

    pub async fn create_user(&self, req: &CreateUserRequest) -> Result<Object<UserAttributes>> {
        let resp = self
            .http
            .post(self.url("/users"))
            .header("Authorization", self.auth())
            .header("Accept", "application/json")
            .json(req)
            .send()
            .await?;

        Self::check(resp, "create user")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    // ── Servers ──────────────────────────────────────────────────────

    pub async fn create_server(&self, req: &CreateServerRequest) -> Result<Object<ServerAttributes>> {
        let resp = self
            .http
            .post(self.url("/servers"))
            .header("Authorization", self.auth())
            .header("Accept", "application/json")
            .json(req)
            .send()
            .await?;

        Self::check(resp, "create server")
            .await?
            .json()
            .await
            .map_err(Error::from)
    }

    /// Fetch the first page of servers, including owner and allocations.
    pub async fn list_servers(&self) -> Result<List<ServerAttributes>> {
        let resp = self
            .http
            .get(self.url("/servers"))
            .query(&[
                ("include", "user,allocations".to_string()),
                ("per_page", SERVER_PAGE_SIZE.to_string()),
            ])
            .header("Authorization", self.auth())
            .header("Accept", "application/json")
            .send()
            .await?;

        let list: List<ServerAttributes> = Self::check(resp, "list servers").await?.json().await?;
        tracing::debug!(count = list.data.len(), "panel: servers listed");
        Ok(list)
    }
}
