use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use pm_provision::credentials::DEFAULT_EMAIL_DOMAIN;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub email_domain: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            listen_addr: env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".into())
                .parse()
                .expect("LISTEN_ADDR must be a valid socket address"),
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".into())
                .into(),
            email_domain: env::var("PANEL_EMAIL_DOMAIN")
                .unwrap_or_else(|_| DEFAULT_EMAIL_DOMAIN.into()),
        }
    }
}
