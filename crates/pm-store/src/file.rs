use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::models::{HistoryEntry, PanelConfig};
use crate::{Result, StateStore};

const CONFIG_FILE: &str = "panel_config.json";
const HISTORY_FILE: &str = "panel_history.json";

/// Stores each key as a JSON file under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "opened state directory");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file by writing a sibling and renaming it over.
    async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = self.dir.join(format!("{name}.tmp"));
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, self.dir.join(name)).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_config(&self) -> Result<Option<PanelConfig>> {
        self.read(CONFIG_FILE).await
    }

    async fn save_config(&self, config: &PanelConfig) -> Result<()> {
        self.write(CONFIG_FILE, config).await
    }

    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.read(HISTORY_FILE).await?.unwrap_or_default())
    }

    async fn save_history(&self, history: &[HistoryEntry]) -> Result<()> {
        self.write(HISTORY_FILE, history).await
    }
}
