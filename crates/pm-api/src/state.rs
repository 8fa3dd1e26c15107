use std::sync::Arc;

use pm_provision::{Notifier, Provisioner};
use pm_store::StateStore;

#[derive(Clone)]
pub struct AppState {
    pub provisioner: Provisioner,
    pub store: Arc<dyn StateStore>,
    pub notifier: Arc<dyn Notifier>,
}
