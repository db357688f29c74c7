// 观影清单模块 - 核心状态：已收藏电影ID的有序去重集合
//
// 序列化为 JSON 整数数组存入固定名称的 Cookie
// 每次调用都从 Cookie 重新解析，不在内存中缓存，
// 因此与存储层的当前内容始终一致

use crate::cookies::CookieJar;
use crate::event_bus::{AppEvent, EventBus};
use crate::models::WatchListSettings;
use crate::utils::validate_movie_id;
use chrono::Duration;
use std::sync::Arc;
use tracing::warn;

/// 观影清单操作错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchListError {
    /// 非法的电影ID（必须为正整数）
    InvalidId(i64),
}

impl std::fmt::Display for WatchListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchListError::InvalidId(id) => write!(f, "无效的电影 ID: {}", id),
        }
    }
}

impl std::error::Error for WatchListError {}

/// 观影清单存储
///
/// 由各渲染表面共享同一个实例（通过 Arc 传递），
/// 存储层故障一律按空清单处理，不向调用方抛出
pub struct WatchListStore {
    jar: Arc<dyn CookieJar>,
    settings: WatchListSettings,
    event_bus: Arc<EventBus>,
}

impl WatchListStore {
    /// 创建观影清单存储
    pub fn new(
        jar: Arc<dyn CookieJar>,
        settings: WatchListSettings,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            jar,
            settings,
            event_bus,
        }
    }

    /// 返回当前清单内容（按加入顺序）
    ///
    /// Cookie 缺失或无法解析为 JSON 数组时返回空清单
    pub fn list(&self) -> Vec<i64> {
        match self.jar.get(&self.settings.cookie_name) {
            Some(raw) => match serde_json::from_str::<Vec<i64>>(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!("观影清单 Cookie 无法解析，按空清单处理: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        }
    }

    /// 判断电影是否已在清单中
    pub fn contains(&self, movie_id: i64) -> bool {
        self.list().contains(&movie_id)
    }

    /// 加入清单，已存在时不做任何事（也不刷新过期时间）
    pub fn add(&self, movie_id: i64) -> Result<(), WatchListError> {
        validate_movie_id(movie_id).map_err(|_| WatchListError::InvalidId(movie_id))?;

        let mut ids = self.list();
        if !ids.contains(&movie_id) {
            ids.push(movie_id);
            self.persist(&ids);
            self.event_bus.publish(AppEvent::WatchListAdded { movie_id });
        }
        Ok(())
    }

    /// 移出清单
    ///
    /// Cookie 不存在时是空操作；存在时即使ID不在清单中
    /// 也会重写 Cookie（过期时间随之刷新，与来源行为一致）
    pub fn remove(&self, movie_id: i64) -> Result<(), WatchListError> {
        validate_movie_id(movie_id).map_err(|_| WatchListError::InvalidId(movie_id))?;

        if self.jar.get(&self.settings.cookie_name).is_none() {
            return Ok(());
        }
        let mut ids = self.list();
        let had = ids.contains(&movie_id);
        ids.retain(|id| *id != movie_id);
        self.persist(&ids);
        if had {
            self.event_bus
                .publish(AppEvent::WatchListRemoved { movie_id });
        }
        Ok(())
    }

    /// 将整个清单重新序列化写回 Cookie，并刷新保留窗口
    fn persist(&self, ids: &[i64]) {
        let json = match serde_json::to_string(ids) {
            Ok(json) => json,
            Err(e) => {
                warn!("序列化观影清单失败: {}", e);
                return;
            }
        };
        self.jar.set(
            &self.settings.cookie_name,
            &json,
            Some(Duration::days(self.settings.retention_days)),
        );
    }
}
