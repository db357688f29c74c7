// 内存后端 - 测试和临时会话用，不落盘

use super::{Cookie, CookieJar};
use chrono::Duration;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::warn;

/// 内存 Cookie 存储
#[derive(Default)]
pub struct MemoryCookieJar {
    data: RwLock<HashMap<String, Cookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let data = match self.data.read() {
            Ok(data) => data,
            Err(e) => {
                warn!("Cookie 读锁不可用: {}", e);
                return None;
            }
        };
        data.get(name)
            .filter(|c| !c.is_expired())
            .map(|c| c.value.clone())
    }

    fn set(&self, name: &str, value: &str, retention: Option<Duration>) {
        if let Ok(mut data) = self.data.write() {
            data.retain(|_, c| !c.is_expired());
            data.insert(name.to_string(), Cookie::new(value, retention));
        }
    }

    fn remove(&self, name: &str) {
        if let Ok(mut data) = self.data.write() {
            data.remove(name);
        }
    }
}
