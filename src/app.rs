//! 应用程序初始化和启动
//!
//! 负责客户端核心的完整启动流程，包括：
//! - 日志系统初始化
//! - 配置加载
//! - Cookie 存储与观影清单初始化
//! - 目录客户端与身份服务初始化
//! - 渲染表面装配

use std::path::Path;
use std::sync::Arc;
use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use crate::auth::{AuthService, FirebaseIdentityClient, SessionStore};
use crate::catalog::CatalogClient;
use crate::cookies::FileCookieJar;
use crate::event_bus::EventBus;
use crate::logger;
use crate::settings::SettingsManager;
use crate::surfaces::{HomeSurface, IndividualSurface, WatchListSurface};
use crate::watchlist::WatchListStore;
use crate::AppState;

/// 初始化日志并装配应用状态
///
/// 步骤：
/// 1. 日志系统初始化
/// 2. 加载（或首次生成）配置文件
/// 3. 打开 Cookie 存储，构建观影清单
/// 4. 构建目录客户端和身份服务
/// 5. 装配三个渲染表面
pub async fn bootstrap(config_path: &Path) -> Result<AppState> {
    logger::init().expect("Failed to initialize logger");
    info!("初始化电影发现客户端...");
    init_state(config_path).await
}

/// 按配置文件装配应用状态（不触碰全局日志，方便测试）
pub async fn init_state(config_path: &Path) -> Result<AppState> {
    let settings = Arc::new(
        SettingsManager::new(config_path.to_path_buf())
            .await
            .context("加载配置文件失败")?,
    );
    let config = settings.get().await;

    let event_bus = Arc::new(EventBus::new(100));

    // Cookie 存储与观影清单
    let jar = Arc::new(FileCookieJar::new(&config.cookie_file));
    let watch_list = Arc::new(WatchListStore::new(
        jar.clone(),
        config.watch_list.clone(),
        event_bus.clone(),
    ));
    info!("观影清单就绪，当前 {} 部电影", watch_list.list().len());

    // 目录客户端（没有令牌无法工作）
    if config.catalog.api_token.is_empty() {
        return Err(anyhow!(
            "TMDB API Token 未配置，请编辑 {}",
            config_path.display()
        ));
    }
    let catalog = Arc::new(CatalogClient::new(config.catalog.clone())?);
    info!(
        "目录客户端就绪，地区 {}，每个分类 {} 部",
        catalog.get_config().region,
        catalog.get_config().page_size
    );

    // 身份服务可选：没有配置时目录浏览和清单仍然可用
    let auth = if config.auth.api_key.is_empty() {
        warn!("身份后端未配置，登录功能不可用");
        None
    } else {
        let provider = Arc::new(FirebaseIdentityClient::new(config.auth.clone())?);
        let session = SessionStore::new(jar.clone(), event_bus.clone());
        Some(Arc::new(AuthService::new(provider, session)))
    };

    let state = AppState {
        home: Arc::new(HomeSurface::new(catalog.clone(), watch_list.clone())),
        individual: Arc::new(IndividualSurface::new(catalog.clone())),
        watch_list_page: Arc::new(WatchListSurface::new(catalog.clone(), watch_list.clone())),
        catalog,
        watch_list,
        auth,
        settings,
        event_bus,
    };

    info!("应用状态装配完成");
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppConfig, CatalogConfig};

    #[tokio::test]
    async fn test_init_fails_without_api_token() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        // 首次运行生成的默认配置没有令牌
        let result = init_state(&config_path).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_init_with_token_builds_state() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        let settings = SettingsManager::new(config_path.clone()).await.unwrap();
        settings
            .update(AppConfig {
                catalog: Some(CatalogConfig {
                    api_token: "test-token".to_string(),
                    ..CatalogConfig::default()
                }),
                auth: None,
                watch_list: None,
                cookie_file: Some(
                    dir.path().join("cookies.json").to_string_lossy().to_string(),
                ),
            })
            .await
            .unwrap();

        let state = init_state(&config_path).await.unwrap();
        assert!(state.auth.is_none()); // 身份后端未配置
        assert!(state.watch_list.list().is_empty());

        // 清单状态对各表面立即可见
        state.watch_list.add(27205).unwrap();
        assert_eq!(state.watch_list_page.ids(), vec![27205]);
    }

    #[tokio::test]
    async fn test_update_config_persists_and_broadcasts() {
        use crate::event_bus::AppEvent;
        use crate::models::WatchListSettings;

        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        let settings = SettingsManager::new(config_path.clone()).await.unwrap();
        settings
            .update(AppConfig {
                catalog: Some(CatalogConfig {
                    api_token: "test-token".to_string(),
                    ..CatalogConfig::default()
                }),
                auth: None,
                watch_list: None,
                cookie_file: Some(
                    dir.path().join("cookies.json").to_string_lossy().to_string(),
                ),
            })
            .await
            .unwrap();

        let state = init_state(&config_path).await.unwrap();
        let mut receiver = state.event_bus.subscribe();

        let config = state
            .update_config(AppConfig {
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

        assert_eq!(config.watch_list.retention_days, 14);
        assert!(matches!(
            receiver.try_recv(),
            Ok(AppEvent::ConfigUpdated { .. })
        ));
    }
}
