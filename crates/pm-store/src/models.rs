use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── PanelConfig ─────────────────────────────────────────────────────

/// Panel address and Application API key (`plta`) entered by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub domain: String,
    pub plta: String,
}

impl PanelConfig {
    pub fn is_configured(&self) -> bool {
        !self.domain.trim().is_empty() && !self.plta.trim().is_empty()
    }
}

// ── HistoryEntry ────────────────────────────────────────────────────

/// A provisioned server's credentials as kept in local history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub username: String,
    pub email: String,
    pub password: String,
    pub login: String,
    pub ram: String,
    pub plan_name: String,
    pub created_at: DateTime<Utc>,
}
