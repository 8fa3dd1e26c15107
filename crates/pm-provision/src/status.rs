use serde::{Deserialize, Serialize};

/// Read-only projection of a panel server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteServerRecord {
    pub id: u64,
    pub name: String,
    pub owner_id: u64,
    pub memory_mb: u64,
    pub disk_mb: u64,
    pub suspended: bool,
    pub install_state: Option<String>,
}

impl From<ptero_api::ServerAttributes> for RemoteServerRecord {
    fn from(s: ptero_api::ServerAttributes) -> Self {
        Self {
            id: s.id,
            name: s.name,
            owner_id: s.user,
            memory_mb: s.limits.memory,
            disk_mb: s.limits.disk,
            suspended: s.suspended,
            install_state: s.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Running,
    Installing,
    Suspended,
}

/// Classify a server. Suspension always wins over install state; any
/// non-empty install state (`installing`, `restoring_backup`, ...) counts
/// as installing.
pub fn derive_status(record: &RemoteServerRecord) -> ServerStatus {
    if record.suspended {
        ServerStatus::Suspended
    } else if record.install_state.as_deref().is_some_and(|s| !s.is_empty()) {
        ServerStatus::Installing
    } else {
        ServerStatus::Running
    }
}

/// A listed server together with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct ServerSummary {
    #[serde(flatten)]
    pub record: RemoteServerRecord,
    pub status: ServerStatus,
}

impl From<RemoteServerRecord> for ServerSummary {
    fn from(record: RemoteServerRecord) -> Self {
        let status = derive_status(&record);
        Self { record, status }
    }
}
