use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Envelopes ────────────────────────────────────────────────────────

/// A single API resource: `{"object": "...", "attributes": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Object<T> {
    pub object: String,
    pub attributes: T,
}

/// A paginated resource list. Only `data` is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct List<T> {
    pub object: String,
    pub data: Vec<Object<T>>,
}

// ── User types ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub language: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserAttributes {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

// ── Server types ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CreateServerRequest {
    pub name: String,
    pub user: u64,
    pub egg: u32,
    pub docker_image: String,
    pub startup: String,
    pub environment: HashMap<String, String>,
    pub limits: ServerLimits,
    pub feature_limits: FeatureLimits,
    pub deploy: DeployConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerLimits {
    pub memory: u64,
    pub swap: i64,
    pub disk: u64,
    pub io: u32,
    pub cpu: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeatureLimits {
    pub databases: u32,
    pub backups: u32,
    pub allocations: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeployConfig {
    pub locations: Vec<u32>,
    pub dedicated_ip: bool,
    pub port_range: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerAttributes {
    pub id: u64,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    pub name: String,
    pub user: u64,
    #[serde(default)]
    pub suspended: bool,
    /// Install/restore state; `null` once the server is ready.
    #[serde(default)]
    pub status: Option<String>,
    pub limits: ServerLimits,
}
