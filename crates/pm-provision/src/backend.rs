use async_trait::async_trait;

use crate::credentials::GeneratedCredential;
use crate::plans::PlanDefinition;
use crate::status::RemoteServerRecord;

/// Failure talking to the panel. Both variants display the bare detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PanelError {
    /// No response from the panel (connect, TLS, timeout).
    #[error("{0}")]
    Unreachable(String),

    /// The panel answered with an error; carries its first error detail.
    #[error("{0}")]
    Rejected(String),
}

impl From<ptero_api::Error> for PanelError {
    fn from(e: ptero_api::Error) -> Self {
        if e.is_transport() {
            Self::Unreachable(e.detail())
        } else {
            Self::Rejected(e.detail())
        }
    }
}

/// The three panel operations the provisioning workflow needs.
#[async_trait]
pub trait PanelBackend: Send + Sync {
    /// Create a panel user and return its id.
    async fn create_user(
        &self,
        credential: &GeneratedCredential,
        display_name: &str,
    ) -> Result<u64, PanelError>;

    /// Create a server owned by `user_id` with the plan's limits.
    async fn create_server(
        &self,
        user_id: u64,
        plan: &PlanDefinition,
        display_name: &str,
    ) -> Result<(), PanelError>;

    /// First page of servers on the panel.
    async fn list_servers(&self) -> Result<Vec<RemoteServerRecord>, PanelError>;
}

/// Opens a [`PanelBackend`] for an operator-supplied host and key.
///
/// `host` is already normalized when this is called.
pub trait PanelConnector: Send + Sync + 'static {
    fn connect(&self, host: &str, key: &str) -> Box<dyn PanelBackend>;
}
