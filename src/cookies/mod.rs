// Cookie 存储模块 - 模拟浏览器按站点划分的键值存储
//
// 核心只依赖 CookieJar 接口；提供文件和内存两种后端
// 读写都是同步的，过期的条目在读取时视为不存在

mod file;
mod memory;

pub use file::FileCookieJar;
pub use memory::MemoryCookieJar;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 单条 Cookie 记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// 值（未经URL编码的原始文本）
    pub value: String,
    /// 路径属性，固定写 "/"
    pub path: String,
    /// 过期时间，None 表示会话级（不过期）
    pub expires_at: Option<DateTime<Utc>>,
}

impl Cookie {
    /// 创建一条记录，retention 为 None 时不设置过期时间
    pub fn new(value: &str, retention: Option<Duration>) -> Self {
        Self {
            value: value.to_string(),
            path: "/".to_string(),
            expires_at: retention.map(|d| Utc::now() + d),
        }
    }

    /// 是否已过期
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => at <= Utc::now(),
            None => false,
        }
    }
}

/// Cookie 存储接口
///
/// 所有操作都是尽力而为：存储层故障只记录日志，不向调用方传播
/// （与浏览器 document.cookie 的行为一致）
pub trait CookieJar: Send + Sync {
    /// 按名称读取值，不存在或已过期返回 None
    fn get(&self, name: &str) -> Option<String>;

    /// 写入值并刷新过期时间（now + retention）
    fn set(&self, name: &str, value: &str, retention: Option<Duration>);

    /// 删除指定名称的记录
    fn remove(&self, name: &str);
}
