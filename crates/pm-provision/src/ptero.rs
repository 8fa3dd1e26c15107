use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::backend::{PanelBackend, PanelConnector, PanelError};
use crate::credentials::{GeneratedCredential, sanitize};
use crate::plans::PlanDefinition;
use crate::status::RemoteServerRecord;

/// Fixed part of every server created on the panel.
#[derive(Debug, Clone)]
pub struct DeploymentTemplate {
    pub egg: u32,
    pub location: u32,
    pub docker_image: String,
    pub startup: String,
    pub environment: HashMap<String, String>,
    pub swap_mb: i64,
    pub io_weight: u32,
}

impl Default for DeploymentTemplate {
    fn default() -> Self {
        let environment = [
            ("INST", "npm"),
            ("USER_UPLOAD", "0"),
            ("AUTO_UPDATE", "0"),
            ("CMD_RUN", "npm start"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            egg: 15,
            location: 1,
            docker_image: "ghcr.io/parkervcp/yolks:nodejs_18".into(),
            startup: "npm start".into(),
            environment,
            swap_mb: 0,
            io_weight: 500,
        }
    }
}

impl DeploymentTemplate {
    /// Defaults overridden by env vars:
    ///
    /// - `PANEL_EGG_ID` (integer)
    /// - `PANEL_LOCATION_ID` (integer)
    /// - `PANEL_DOCKER_IMAGE`
    /// - `PANEL_STARTUP` (also used as `CMD_RUN`)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut template = Self::default();
        if let Some(egg) = std::env::var("PANEL_EGG_ID").ok().and_then(|s| s.parse().ok()) {
            template.egg = egg;
        }
        if let Some(location) = std::env::var("PANEL_LOCATION_ID")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            template.location = location;
        }
        if let Ok(image) = std::env::var("PANEL_DOCKER_IMAGE") {
            template.docker_image = image;
        }
        if let Ok(startup) = std::env::var("PANEL_STARTUP") {
            template
                .environment
                .insert("CMD_RUN".into(), startup.clone());
            template.startup = startup;
        }
        template
    }

    fn server_request(
        &self,
        user_id: u64,
        plan: &PlanDefinition,
        display_name: &str,
    ) -> ptero_api::CreateServerRequest {
        ptero_api::CreateServerRequest {
            name: format!("{} SERVER", sanitize(display_name).to_uppercase()),
            user: user_id,
            egg: self.egg,
            docker_image: self.docker_image.clone(),
            startup: self.startup.clone(),
            environment: self.environment.clone(),
            limits: ptero_api::ServerLimits {
                memory: plan.memory_mb,
                swap: self.swap_mb,
                disk: plan.disk_mb,
                io: self.io_weight,
                cpu: plan.cpu_percent,
            },
            feature_limits: ptero_api::FeatureLimits {
                databases: 1,
                backups: 1,
                allocations: 1,
            },
            deploy: ptero_api::DeployConfig {
                locations: vec![self.location],
                dedicated_ip: false,
                port_range: Vec::new(),
            },
        }
    }
}

/// Connects to Pterodactyl panels, sharing one HTTP connection pool.
#[derive(Clone)]
pub struct PteroConnector {
    http: reqwest::Client,
    template: Arc<DeploymentTemplate>,
}

impl PteroConnector {
    pub fn new(template: DeploymentTemplate) -> Self {
        Self {
            http: reqwest::Client::new(),
            template: Arc::new(template),
        }
    }
}

impl PanelConnector for PteroConnector {
    fn connect(&self, host: &str, key: &str) -> Box<dyn PanelBackend> {
        Box::new(PteroBackend {
            client: ptero_api::PteroClient::with_http(host, key, self.http.clone()),
            template: self.template.clone(),
        })
    }
}

/// Pterodactyl Application API backend.
///
/// Delegates to `ptero_api::PteroClient` for all HTTP calls.
pub struct PteroBackend {
    client: ptero_api::PteroClient,
    template: Arc<DeploymentTemplate>,
}

#[async_trait]
impl PanelBackend for PteroBackend {
    async fn create_user(
        &self,
        credential: &GeneratedCredential,
        display_name: &str,
    ) -> Result<u64, PanelError> {
        let user = self
            .client
            .create_user(&ptero_api::CreateUserRequest {
                email: credential.email.clone(),
                username: credential.login_name.clone(),
                first_name: sanitize(display_name),
                last_name: "User".into(),
                language: "en".into(),
                password: credential.password.clone(),
            })
            .await?;

        info!(host = %self.client.host(), user_id = user.attributes.id, "ptero: user created");
        Ok(user.attributes.id)
    }

    async fn create_server(
        &self,
        user_id: u64,
        plan: &PlanDefinition,
        display_name: &str,
    ) -> Result<(), PanelError> {
        let req = self.template.server_request(user_id, plan, display_name);
        let server = self.client.create_server(&req).await?;

        info!(
            host = %self.client.host(),
            server_id = server.attributes.id,
            user_id,
            plan = %plan.id,
            "ptero: server created"
        );
        Ok(())
    }

    async fn list_servers(&self) -> Result<Vec<RemoteServerRecord>, PanelError> {
        let list = self.client.list_servers().await?;
        Ok(list
            .data
            .into_iter()
            .map(|s| RemoteServerRecord::from(s.attributes))
            .collect())
    }
}
