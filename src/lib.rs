// 电影发现客户端核心 - 主库

// 声明模块
pub mod app;
pub mod auth;
pub mod catalog;
pub mod cookies;
pub mod event_bus;
pub mod logger;
pub mod models;
pub mod settings;
pub mod surfaces;
pub mod utils;
pub mod watchlist;

use std::sync::Arc;

use anyhow::Result;
use auth::AuthService;
use catalog::CatalogClient;
use event_bus::EventBus;
use settings::SettingsManager;
use surfaces::{HomeSurface, IndividualSurface, WatchListSurface};
use watchlist::WatchListStore;

pub use app::{bootstrap, init_state};

/// 应用状态
///
/// 启动时装配一次，各渲染表面通过引用共享同一份核心状态，
/// 不再有各处直接读写 Cookie 的隐式全局状态
/// - 目录客户端：电影元数据来源
/// - 观影清单：唯一由本系统拥有的状态
/// - 身份服务：登录/注册/会话（未配置时为 None）
/// - 事件总线：核心状态变化通知各表面
#[derive(Clone)]
pub struct AppState {
    /// 目录客户端
    pub catalog: Arc<CatalogClient>,
    /// 观影清单存储
    pub watch_list: Arc<WatchListStore>,
    /// 身份服务（身份后端未配置时为 None）
    pub auth: Option<Arc<AuthService>>,
    /// 配置管理器
    pub settings: Arc<SettingsManager>,
    /// 事件总线
    pub event_bus: Arc<EventBus>,
    /// 首页表面
    pub home: Arc<HomeSurface>,
    /// 单部电影页表面
    pub individual: Arc<IndividualSurface>,
    /// 观影清单页表面
    pub watch_list_page: Arc<WatchListSurface>,
}

impl AppState {
    /// 更新配置并广播变更事件
    ///
    /// 客户端和清单设置在下次装配时生效
    pub async fn update_config(
        &self,
        update: models::AppConfig,
    ) -> Result<models::PersistedAppConfig> {
        let config = self.settings.update(update).await?;
        tracing::info!(
            "配置已更新，通知 {} 个订阅者",
            self.event_bus.subscriber_count()
        );
        self.event_bus.publish(event_bus::AppEvent::ConfigUpdated {
            config_type: "app".to_string(),
        });
        Ok(config)
    }
}
