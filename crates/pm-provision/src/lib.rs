//! Panel provisioning core.
//!
//! Resolves plans, generates panel credentials, drives the two-step
//! create-user-then-create-server transaction through a [`PanelBackend`],
//! and classifies listed servers.

pub mod backend;
pub mod credentials;
pub mod notify;
pub mod plans;
pub mod provision;
pub mod ptero;
pub mod status;

pub use backend::{PanelBackend, PanelConnector, PanelError};
pub use credentials::{CredentialGenerator, GeneratedCredential};
pub use notify::{ConfigEvent, Notifier, build_notifier};
pub use plans::{PLANS, PlanDefinition, PlanSelector, resolve_plan};
pub use provision::{ProvisionError, ProvisionRequest, ProvisionResult, Provisioner};
pub use status::{RemoteServerRecord, ServerStatus, ServerSummary, derive_status};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown plan: {0}")]
    UnknownPlan(String),

    #[error("display name has no usable characters: {0:?}")]
    InvalidDisplayName(String),

    #[error("missing env var: {0}")]
    MissingEnv(String),
}

pub type Result<T> = std::result::Result<T, Error>;
