// 文件后端 - 将 Cookie 持久化为单个 JSON 文档

use super::{Cookie, CookieJar};
use chrono::Duration;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// 文件 Cookie 存储
///
/// 每次读取都重新解析文件，不在内存中长期缓存，
/// 因此与磁盘上的内容始终一致（多实例时后写者胜出）
pub struct FileCookieJar {
    path: PathBuf,
    // 进程内文件互斥，读写都持有，防止读到写了一半的文档
    file_lock: Mutex<()>,
}

impl FileCookieJar {
    /// 创建文件存储，必要时创建父目录
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("创建 Cookie 目录失败: {}", e);
            }
        }
        Self {
            path,
            file_lock: Mutex::new(()),
        }
    }

    /// 读取全部记录，文件缺失或损坏时视为空（不报错）
    fn read_all(&self) -> HashMap<String, Cookie> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if !text.is_empty() => match serde_json::from_str(&text) {
                Ok(map) => map,
                Err(e) => {
                    warn!("Cookie 文件损坏，按空存储处理: {}", e);
                    HashMap::new()
                }
            },
            _ => HashMap::new(),
        }
    }

    /// 写回全部记录，失败只记录日志
    fn write_all(&self, cookies: &HashMap<String, Cookie>) {
        let json = match serde_json::to_string_pretty(cookies) {
            Ok(json) => json,
            Err(e) => {
                warn!("序列化 Cookie 失败: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            warn!("写入 Cookie 文件失败: {}", e);
        }
    }
}

impl CookieJar for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let _guard = match self.file_lock.lock() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Cookie 文件锁不可用: {}", e);
                return None;
            }
        };
        let cookies = self.read_all();
        cookies
            .get(name)
            .filter(|c| !c.is_expired())
            .map(|c| c.value.clone())
    }

    fn set(&self, name: &str, value: &str, retention: Option<Duration>) {
        let _guard = match self.file_lock.lock() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Cookie 文件锁不可用: {}", e);
                return;
            }
        };
        let mut cookies = self.read_all();
        // 顺带清理已过期的记录
        cookies.retain(|_, c| !c.is_expired());
        cookies.insert(name.to_string(), Cookie::new(value, retention));
        self.write_all(&cookies);
    }

    fn remove(&self, name: &str) {
        let _guard = match self.file_lock.lock() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Cookie 文件锁不可用: {}", e);
                return;
            }
        };
        let mut cookies = self.read_all();
        if cookies.remove(name).is_some() {
            self.write_all(&cookies);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn temp_jar() -> (tempfile::TempDir, FileCookieJar) {
        let dir = tempfile::tempdir().unwrap();
        let jar = FileCookieJar::new(dir.path().join("cookies.json"));
        (dir, jar)
    }

    /// 直接读取落盘的记录（绕过过期过滤）
    fn stored_cookie(path: &std::path::Path, name: &str) -> Cookie {
        let text = std::fs::read_to_string(path).unwrap();
        let map: HashMap<String, Cookie> = serde_json::from_str(&text).unwrap();
        map.get(name).cloned().unwrap()
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, jar) = temp_jar();
        jar.set("watchList", "[27205,155]", Some(Duration::days(7)));
        assert_eq!(jar.get("watchList").as_deref(), Some("[27205,155]"));
    }

    #[test]
    fn test_missing_returns_none() {
        let (_dir, jar) = temp_jar();
        assert!(jar.get("watchList").is_none());
    }

    #[test]
    fn test_expired_cookie_invisible() {
        let (_dir, jar) = temp_jar();
        jar.set("watchList", "[1]", Some(Duration::seconds(-1)));
        assert!(jar.get("watchList").is_none());
    }

    #[test]
    fn test_rewrite_stamps_fresh_expiry() {
        // 每次写入都从当前时间重新计算过期时间，
        // 快要过期的记录被重写后，生命周期越过原来的窗口
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let jar = FileCookieJar::new(&path);

        jar.set("watchList", "[27205]", Some(Duration::seconds(30)));
        let first = stored_cookie(&path, "watchList").expires_at.unwrap();

        jar.set("watchList", "[27205,155]", Some(Duration::days(7)));
        let second = stored_cookie(&path, "watchList").expires_at.unwrap();

        assert!(second > first);
        assert!(second > Utc::now() + Duration::days(6));
        assert_eq!(jar.get("watchList").as_deref(), Some("[27205,155]"));
    }

    #[test]
    fn test_reader_never_sees_partial_document() {
        // 读写共用同一把文件锁，读取方不应观察到写了一半的文档
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let jar = Arc::new(FileCookieJar::new(dir.path().join("cookies.json")));

        let writer = {
            let jar = jar.clone();
            std::thread::spawn(move || {
                for _ in 0..200 {
                    jar.set("watchList", "[27205,155,680]", Some(Duration::days(7)));
                }
            })
        };

        for _ in 0..200 {
            if let Some(value) = jar.get("watchList") {
                assert_eq!(value, "[27205,155,680]");
            }
        }
        writer.join().unwrap();
    }

    #[test]
    fn test_session_cookie_has_no_expiry() {
        let (_dir, jar) = temp_jar();
        jar.set("loggedInUserId", "uid-1", None);
        assert_eq!(jar.get("loggedInUserId").as_deref(), Some("uid-1"));
    }

    #[test]
    fn test_corrupt_file_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        std::fs::write(&path, "not json at all {{{").unwrap();
        let jar = FileCookieJar::new(&path);
        assert!(jar.get("watchList").is_none());
        // 之后仍然可以正常写入
        jar.set("watchList", "[680]", Some(Duration::days(7)));
        assert_eq!(jar.get("watchList").as_deref(), Some("[680]"));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        {
            let jar = FileCookieJar::new(&path);
            jar.set("watchList", "[27205]", Some(Duration::days(7)));
        }
        let jar = FileCookieJar::new(&path);
        assert_eq!(jar.get("watchList").as_deref(), Some("[27205]"));
    }

    #[test]
    fn test_remove() {
        let (_dir, jar) = temp_jar();
        jar.set("watchList", "[1]", Some(Duration::days(7)));
        jar.remove("watchList");
        assert!(jar.get("watchList").is_none());
    }
}
