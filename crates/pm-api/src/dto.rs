use axum::http::HeaderMap;
use pm_provision::{PlanDefinition, PlanSelector, ProvisionResult};
use pm_store::models::HistoryEntry;
use serde::{Deserialize, Serialize};

// ── Requests ───────────────────────────────────────────────────────

/// Body of `POST /api/ptero`. Every field is optional so that missing
/// ones produce the fixed "Missing parameters" reply instead of a
/// deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct PteroRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub plan: Option<PlanSelector>,
}

pub const LIST_SERVERS_ACTION: &str = "list_servers";

/// Body of `POST /api/notify`. A `key` field, if sent, is ignored.
#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
}

/// Trimmed value, or `None` when absent or blank.
pub fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Caller address as reported by a fronting proxy.
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ── Responses ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub label: String,
    pub memory_mb: u64,
    pub cpu_percent: u64,
    pub disk_mb: u64,
    pub memory_display: String,
}

impl From<&PlanDefinition> for PlanResponse {
    fn from(p: &PlanDefinition) -> Self {
        Self {
            id: p.id.to_string(),
            label: p.label.to_string(),
            memory_mb: p.memory_mb,
            cpu_percent: p.cpu_percent,
            disk_mb: p.disk_mb,
            memory_display: p.memory_display(),
        }
    }
}

pub fn history_entry(result: &ProvisionResult) -> HistoryEntry {
    HistoryEntry {
        username: result.login_name.clone(),
        email: result.email.clone(),
        password: result.password.clone(),
        login: result.panel_login_url.clone(),
        ram: result.memory_display.clone(),
        plan_name: result.plan_label.clone(),
        created_at: result.created_at,
    }
}
