pub mod models;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::models::{HistoryEntry, PanelConfig};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("state io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Local key-value state: the panel configuration and the history of
/// provisioned credentials.
///
/// Each save replaces the stored value wholesale; the last write wins.
#[async_trait]
pub trait StateStore: Send + Sync + 'static {
    async fn load_config(&self) -> Result<Option<PanelConfig>>;

    async fn save_config(&self, config: &PanelConfig) -> Result<()>;

    async fn load_history(&self) -> Result<Vec<HistoryEntry>>;

    async fn save_history(&self, history: &[HistoryEntry]) -> Result<()>;
}

/// Put `entry` at the front of the history and persist it.
pub async fn prepend_history(store: &dyn StateStore, entry: HistoryEntry) -> Result<Vec<HistoryEntry>> {
    let mut history = store.load_history().await?;
    history.insert(0, entry);
    store.save_history(&history).await?;
    Ok(history)
}

/// Remove the entry at `index` and persist the remainder.
pub async fn remove_history(store: &dyn StateStore, index: usize) -> Result<Vec<HistoryEntry>> {
    let mut history = store.load_history().await?;
    if index >= history.len() {
        return Err(Error::IndexOutOfRange {
            index,
            len: history.len(),
        });
    }
    history.remove(index);
    store.save_history(&history).await?;
    Ok(history)
}
