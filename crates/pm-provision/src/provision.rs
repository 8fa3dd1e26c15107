use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::backend::{PanelConnector, PanelError};
use crate::credentials::CredentialGenerator;
use crate::plans::{PlanDefinition, PlanSelector};
use crate::status::ServerSummary;

/// Inputs for one provisioning call.
#[derive(Debug, Clone)]
pub struct ProvisionRequest {
    pub panel_host: String,
    pub panel_key: String,
    pub display_name: String,
    pub plan: PlanSelector,
}

/// Credentials and details of a freshly provisioned server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionResult {
    #[serde(rename = "username")]
    pub login_name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "login")]
    pub panel_login_url: String,
    #[serde(rename = "plan_name")]
    pub plan_label: String,
    #[serde(rename = "ram")]
    pub memory_display: String,
    pub created_at: DateTime<Utc>,
}

/// Every variant displays a message fit to show the operator as-is.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UserCreation(PanelError),

    /// The panel user from the first step exists but has no server.
    #[error("{0}")]
    ServerCreation(PanelError),

    #[error("{0}")]
    Panel(#[from] PanelError),
}

impl From<crate::Error> for ProvisionError {
    fn from(e: crate::Error) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Drives the create-user-then-create-server transaction.
///
/// Steps run strictly in sequence with no retries. A failed server step
/// leaves the new user on the panel; nothing is rolled back.
#[derive(Clone)]
pub struct Provisioner {
    connector: Arc<dyn PanelConnector>,
    credentials: CredentialGenerator,
}

impl Provisioner {
    pub fn new(connector: Arc<dyn PanelConnector>, credentials: CredentialGenerator) -> Self {
        Self {
            connector,
            credentials,
        }
    }

    pub async fn provision(&self, req: &ProvisionRequest) -> Result<ProvisionResult, ProvisionError> {
        let (host, key) = Self::endpoint(&req.panel_host, &req.panel_key)?;
        let plan = Self::validate(req)?;
        let credential = self.credentials.generate(&req.display_name)?;

        let panel = self.connector.connect(host, key);

        let user_id = panel
            .create_user(&credential, &req.display_name)
            .await
            .map_err(|e| {
                warn!(host, username = %credential.login_name, error = %e, "user creation failed");
                ProvisionError::UserCreation(e)
            })?;

        panel
            .create_server(user_id, &plan, &req.display_name)
            .await
            .map_err(|e| {
                error!(host, user_id, error = %e, "server creation failed, panel user left without a server");
                ProvisionError::ServerCreation(e)
            })?;

        info!(host, username = %credential.login_name, plan = %plan.id, "provisioned panel server");

        Ok(ProvisionResult {
            login_name: credential.login_name,
            email: credential.email,
            password: credential.password,
            panel_login_url: host.to_string(),
            memory_display: plan.memory_display(),
            plan_label: plan.label.into_owned(),
            created_at: Utc::now(),
        })
    }

    /// List the first page of servers with their derived status.
    pub async fn list_servers(&self, host: &str, key: &str) -> Result<Vec<ServerSummary>, ProvisionError> {
        let (host, key) = Self::endpoint(host, key)?;
        let records = self.connector.connect(host, key).list_servers().await?;
        Ok(records.into_iter().map(ServerSummary::from).collect())
    }

    /// Normalize the host once and require both host and key to be
    /// non-empty afterwards. Every endpoint is built from the returned host.
    fn endpoint<'a>(host: &'a str, key: &'a str) -> Result<(&'a str, &'a str), ProvisionError> {
        let host = ptero_api::normalize_host(host.trim());
        let key = key.trim();
        if host.is_empty() || key.is_empty() {
            return Err(ProvisionError::Validation("panel host and key are required".into()));
        }
        Ok((host, key))
    }

    fn validate(req: &ProvisionRequest) -> Result<PlanDefinition, ProvisionError> {
        if req.display_name.trim().is_empty() {
            return Err(ProvisionError::Validation("display name is required".into()));
        }
        Ok(req.plan.resolve()?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::backend::PanelBackend;
    use crate::credentials::GeneratedCredential;
    use crate::status::{RemoteServerRecord, ServerStatus};

    #[derive(Default)]
    struct Calls {
        connects: AtomicUsize,
        users: AtomicUsize,
        servers: AtomicUsize,
        hosts: Mutex<Vec<String>>,
    }

    #[derive(Clone, Default)]
    struct StubConnector {
        calls: Arc<Calls>,
        user_error: Option<PanelError>,
        server_error: Option<PanelError>,
        servers: Vec<RemoteServerRecord>,
    }

    struct StubBackend(StubConnector);

    impl PanelConnector for StubConnector {
        fn connect(&self, host: &str, _key: &str) -> Box<dyn PanelBackend> {
            self.calls.connects.fetch_add(1, Ordering::SeqCst);
            self.calls.hosts.lock().unwrap().push(host.to_string());
            Box::new(StubBackend(self.clone()))
        }
    }

    #[async_trait]
    impl PanelBackend for StubBackend {
        async fn create_user(&self, _: &GeneratedCredential, _: &str) -> Result<u64, PanelError> {
            self.0.calls.users.fetch_add(1, Ordering::SeqCst);
            match &self.0.user_error {
                Some(e) => Err(e.clone()),
                None => Ok(17),
            }
        }

        async fn create_server(&self, user_id: u64, _: &PlanDefinition, _: &str) -> Result<(), PanelError> {
            assert_eq!(user_id, 17);
            self.0.calls.servers.fetch_add(1, Ordering::SeqCst);
            match &self.0.server_error {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        async fn list_servers(&self) -> Result<Vec<RemoteServerRecord>, PanelError> {
            Ok(self.0.servers.clone())
        }
    }

    fn request(display_name: &str, plan: &str) -> ProvisionRequest {
        ProvisionRequest {
            panel_host: "https://panel.example.com/".into(),
            panel_key: "ptla_secret".into(),
            display_name: display_name.into(),
            plan: PlanSelector::Id(plan.into()),
        }
    }

    fn provisioner(stub: &StubConnector) -> Provisioner {
        Provisioner::new(Arc::new(stub.clone()), CredentialGenerator::default())
    }

    #[tokio::test]
    async fn provisions_user_then_server() {
        let stub = StubConnector::default();
        let result = provisioner(&stub)
            .provision(&request("AdminGanteng", "1gb"))
            .await
            .unwrap();

        assert_eq!(result.plan_label, "Starter");
        assert_eq!(result.memory_display, "1024MB");
        assert_eq!(result.panel_login_url, "https://panel.example.com");
        assert!(result.login_name.starts_with("adminganteng"));
        assert_eq!(result.email, format!("{}@panel.zone", result.login_name));
        assert_eq!(result.password, format!("{}!!", result.login_name));
        assert_eq!(stub.calls.users.load(Ordering::SeqCst), 1);
        assert_eq!(stub.calls.servers.load(Ordering::SeqCst), 1);
        assert_eq!(*stub.calls.hosts.lock().unwrap(), vec!["https://panel.example.com"]);
    }

    #[tokio::test]
    async fn unlimited_plan_displays_unlimited() {
        let stub = StubConnector::default();
        let result = provisioner(&stub).provision(&request("Boss", "unli")).await.unwrap();
        assert_eq!(result.memory_display, "Unlimited");
        assert_eq!(result.plan_label, "God Mode");
    }

    #[tokio::test]
    async fn rejected_user_stops_before_server() {
        let stub = StubConnector {
            user_error: Some(PanelError::Rejected("User exists".into())),
            ..Default::default()
        };
        let err = provisioner(&stub)
            .provision(&request("AdminGanteng", "1gb"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::UserCreation(_)));
        assert_eq!(err.to_string(), "User exists");
        assert_eq!(stub.calls.users.load(Ordering::SeqCst), 1);
        assert_eq!(stub.calls.servers.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn server_failure_is_not_rolled_back() {
        let stub = StubConnector {
            server_error: Some(PanelError::Unreachable("connection reset".into())),
            ..Default::default()
        };
        let err = provisioner(&stub)
            .provision(&request("AdminGanteng", "2gb"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::ServerCreation(PanelError::Unreachable(_))));
        assert_eq!(err.to_string(), "connection reset");
        assert_eq!(stub.calls.users.load(Ordering::SeqCst), 1);
        assert_eq!(stub.calls.servers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invalid_requests_never_reach_the_panel() {
        let stub = StubConnector::default();
        let provisioner = provisioner(&stub);

        let mut no_host = request("AdminGanteng", "1gb");
        no_host.panel_host = "  ".into();
        let mut no_key = request("AdminGanteng", "1gb");
        no_key.panel_key = String::new();
        let mut bare_separator = request("AdminGanteng", "1gb");
        bare_separator.panel_host = "/".into();

        for req in [
            request("", "1gb"),
            request("   ", "1gb"),
            request("!!!", "1gb"),
            request("AdminGanteng", "16gb"),
            no_host,
            no_key,
            bare_separator,
        ] {
            let err = provisioner.provision(&req).await.unwrap_err();
            assert!(matches!(err, ProvisionError::Validation(_)), "{req:?}");
        }
        assert_eq!(stub.calls.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn separator_only_host_fails_validation_for_both_operations() {
        let stub = StubConnector::default();
        let provisioner = provisioner(&stub);

        let mut req = request("AdminGanteng", "1gb");
        req.panel_host = "//".into();
        let err = provisioner.provision(&req).await.unwrap_err();
        assert!(matches!(err, ProvisionError::Validation(_)));

        let err = provisioner.list_servers("/", "ptla_secret").await.unwrap_err();
        assert!(matches!(err, ProvisionError::Validation(_)));
        assert_eq!(stub.calls.connects.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let stub = StubConnector::default();
        let provisioner = provisioner(&stub);
        let req = request("AdminGanteng", "1gb");

        let (a, b) = tokio::join!(provisioner.provision(&req), provisioner.provision(&req));
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(stub.calls.users.load(Ordering::SeqCst), 2);
        assert_eq!(stub.calls.servers.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn listing_derives_status() {
        let stub = StubConnector {
            servers: vec![
                RemoteServerRecord {
                    id: 1,
                    name: "A".into(),
                    owner_id: 1,
                    memory_mb: 1024,
                    disk_mb: 1024,
                    suspended: true,
                    install_state: Some("installing".into()),
                },
                RemoteServerRecord {
                    id: 2,
                    name: "B".into(),
                    owner_id: 1,
                    memory_mb: 0,
                    disk_mb: 0,
                    suspended: false,
                    install_state: None,
                },
            ],
            ..Default::default()
        };

        let summaries = provisioner(&stub)
            .list_servers("https://panel.example.com/", "ptla_secret")
            .await
            .unwrap();
        let statuses: Vec<_> = summaries.iter().map(|s| s.status).collect();
        assert_eq!(statuses, vec![ServerStatus::Suspended, ServerStatus::Running]);
    }
}
