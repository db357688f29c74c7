use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::models::{AppConfig, PersistedAppConfig};

pub struct SettingsManager {
    path: PathBuf,
    data: RwLock<PersistedAppConfig>,
}

impl SettingsManager {
    pub async fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let initial = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                serde_json::from_slice::<PersistedAppConfig>(&bytes).unwrap_or_default()
            }
            _ => {
                let default = PersistedAppConfig::default();
                let json = serde_json::to_string_pretty(&default)?;
                tokio::fs::write(&path, json).await?;
                default
            }
        };

        Ok(Self {
            path,
            data: RwLock::new(initial),
        })
    }

    pub async fn get(&self) -> PersistedAppConfig {
        self.data.read().await.clone()
    }

    pub async fn update(&self, update: AppConfig) -> Result<PersistedAppConfig> {
        let mut config = self.data.write().await;

        if let Some(catalog) = update.catalog {
            config.catalog = catalog;
        }
        if let Some(auth) = update.auth {
            config.auth = auth;
        }
        if let Some(watch_list) = update.watch_list {
            config.watch_list = watch_list;
        }
        if let Some(cookie_file) = update.cookie_file {
            config.cookie_file = cookie_file;
        }

        self.save(&config).await?;
        Ok(config.clone())
    }

    async fn save(&self, config: &PersistedAppConfig) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WatchListSettings;

    #[tokio::test]
    async fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();
        assert_eq!(manager.get().await.watch_list.cookie_name, "watchList");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_partial_update_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let manager = SettingsManager::new(path.clone()).await.unwrap();
        manager
            .update(AppConfig {
                catalog: None,
                auth: None,
                watch_list: Some(WatchListSettings {
                    cookie_name: "watchList".to_string(),
                    retention_days: 14,
                }),
                cookie_file: None,
            })
            .await
            .unwrap();

        // 其他字段保持默认，重开后仍能读到更新
        let reopened = SettingsManager::new(path).await.unwrap();
        let config = reopened.get().await;
        assert_eq!(config.watch_list.retention_days, 14);
        assert_eq!(config.catalog.page_size, 15);
    }

    #[tokio::test]
    async fn test_corrupt_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{{{").await.unwrap();

        let manager = SettingsManager::new(path).await.unwrap();
        assert_eq!(manager.get().await.watch_list.retention_days, 7);
    }
}
