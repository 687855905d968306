use anyhow::{Context, Result};
use scheduler::SessionConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_DIR: &str = ".sortviz";
pub const CONFIG_FILE: &str = "config.toml";

/// Contents of `.sortviz/config.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortvizConfig {
    #[serde(default)]
    pub session: SessionConfig,
}

impl SortvizConfig {
    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Reads the config below `project_dir`; `None` when there is no file.
    pub async fn load(project_dir: &Path) -> Result<Option<Self>> {
        let path = Self::path(project_dir);
        if !path.exists() {
            debug!(path = %path.display(), "Config file does not exist");
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "Config loaded");
        Ok(Some(config))
    }

    pub async fn write(&self, project_dir: &Path) -> Result<PathBuf> {
        let path = Self::path(project_dir);
        tokio::fs::create_dir_all(project_dir.join(CONFIG_DIR)).await?;
        tokio::fs::write(&path, toml::to_string_pretty(self)?).await?;
        Ok(path)
    }
}
