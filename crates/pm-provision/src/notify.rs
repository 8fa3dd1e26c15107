use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{Error, Result};

const TELEGRAM_API: &str = "https://api.telegram.org";

/// A panel configuration was saved.
///
/// Carries only the panel domain and the caller's address. The operator's
/// panel key is never part of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEvent {
    pub domain: String,
    #[serde(default)]
    pub ip: Option<String>,
}

/// One-way side channel. Delivery is best-effort and failures are only
/// logged; callers never observe them.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, event: ConfigEvent);
}

/// Drops every event.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, event: ConfigEvent) {
        debug!(domain = %event.domain, "notifications disabled, dropping event");
    }
}

/// Relays events to a Telegram chat through the Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    api_base: String,
    token: String,
    chat_id: String,
    http: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self::with_api_base(TELEGRAM_API, token, chat_id)
    }

    pub fn with_api_base(
        api_base: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            token: token.into(),
            chat_id: chat_id.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Create from env vars: `TELEGRAM_BOT_TOKEN`, `TELEGRAM_CHAT_ID` (both required).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| Error::MissingEnv("TELEGRAM_BOT_TOKEN".into()))?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .map_err(|_| Error::MissingEnv("TELEGRAM_CHAT_ID".into()))?;

        Ok(Self::new(token, chat_id))
    }

    fn render(event: &ConfigEvent) -> String {
        format!(
            "<b>Panel configuration saved</b>\n\n\
             <b>Panel:</b> <code>{}</code>\n\
             <b>IP:</b> <code>{}</code>\n\
             <b>Time:</b> {}",
            escape_html(&event.domain),
            escape_html(event.ip.as_deref().unwrap_or("Hidden")),
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        )
    }

    async fn send(&self, event: &ConfigEvent) -> std::result::Result<(), reqwest::Error> {
        self.http
            .post(format!("{}/bot{}/sendMessage", self.api_base, self.token))
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": Self::render(event),
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, event: ConfigEvent) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(domain = %event.domain, "no async runtime, dropping notification");
            return;
        };

        let this = self.clone();
        runtime.spawn(async move {
            match this.send(&event).await {
                Ok(()) => debug!(domain = %event.domain, "notification delivered"),
                Err(e) => warn!(domain = %event.domain, error = %e.without_url(), "notification failed"),
            }
        });
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Pick the notifier configured in the environment, falling back to
/// [`NoopNotifier`].
pub fn build_notifier() -> Arc<dyn Notifier> {
    match TelegramNotifier::from_env() {
        Ok(n) => {
            info!("registered Telegram notifier");
            Arc::new(n)
        }
        Err(e) => {
            debug!("skipping Telegram notifier: {e}");
            Arc::new(NoopNotifier)
        }
    }
}
