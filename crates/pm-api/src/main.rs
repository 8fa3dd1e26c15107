mod config;
mod dto;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pm_provision::ptero::{DeploymentTemplate, PteroConnector};
use pm_provision::{CredentialGenerator, Provisioner};
use pm_store::JsonFileStore;

use crate::config::AppConfig;
use crate::routes::api_router;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    // Local state
    let store = JsonFileStore::open(&config.data_dir)
        .await
        .expect("failed to open state directory");
    tracing::info!(dir = %store.dir().display(), "state store ready");

    // Panel provisioning
    let template = DeploymentTemplate::from_env();
    tracing::info!(egg = template.egg, location = template.location, image = %template.docker_image, "deployment template ready");
    let provisioner = Provisioner::new(
        Arc::new(PteroConnector::new(template)),
        CredentialGenerator::new(config.email_domain.clone()),
    );

    let state = AppState {
        provisioner,
        store: Arc::new(store),
        notifier: pm_provision::build_notifier(),
    };

    let app = api_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!(addr = %config.listen_addr, "starting panel manager API");

    axum::serve(listener, app).await.expect("server error");
}
