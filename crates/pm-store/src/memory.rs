use std::sync::Mutex;

use async_trait::async_trait;

use crate::models::{HistoryEntry, PanelConfig};
use crate::{Result, StateStore};

/// Process-local store; contents are lost on exit.
#[derive(Default)]
pub struct MemoryStore {
    config: Mutex<Option<PanelConfig>>,
    history: Mutex<Vec<HistoryEntry>>,
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load_config(&self) -> Result<Option<PanelConfig>> {
        Ok(self.config.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn save_config(&self, config: &PanelConfig) -> Result<()> {
        *self.config.lock().unwrap_or_else(|e| e.into_inner()) = Some(config.clone());
        Ok(())
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn save_history(&self, history: &[HistoryEntry]) -> Result<()> {
        *self.history.lock().unwrap_or_else(|e| e.into_inner()) = history.to_vec();
        Ok(())
    }
}
