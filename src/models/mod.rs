// 数据模型模块 - 定义所有的数据结构

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 重新导出其他模块的类型
pub use crate::auth::UserProfile;
pub use crate::catalog::{MovieCategory, MovieGenre};

// ==================== 占位值约定 ====================
// 上游字段缺失时使用固定占位字符串，而不是错误
// （与渲染层约定一致，渲染层直接显示这些文本）

/// 未请求对应附加数据时的占位值（如未请求演职员表时的导演字段）
pub const NOT_REQUESTED: &str = "N/A";
/// 没有可用预告片时的占位值
pub const NO_TRAILER: &str = "No Trailer";
/// 没有可用海报时的占位值
pub const NO_POSTER: &str = "No Poster Available";
/// 字段未知时的占位值（导演、上映日期等）
pub const UNKNOWN: &str = "Unknown";

/// 电影详情（单部电影页面与轮播使用）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    /// TMDB 电影ID
    pub id: i64,
    /// 标题
    pub title: String,
    /// 导演姓名（未请求演职员表时为占位值）
    pub director: String,
    /// 主要演员（最多10人，逗号分隔）
    pub cast: String,
    /// 剧情简介
    pub overview: String,
    /// 平均评分（0-10）
    pub rating: f64,
    /// 海报完整URL（缺失时为占位值）
    pub poster: String,
    /// 预告片的 YouTube 播放地址（缺失时为占位值）
    pub trailer: String,
    /// 上映日期（YYYY-MM-DD，缺失时为占位值）
    pub release_date: String,
}

/// 电影摘要（分类列表/卡片使用的轻量记录）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    /// TMDB 电影ID
    pub id: i64,
    /// 标题
    pub title: String,
    /// 剧情简介
    pub overview: String,
    /// 平均评分（0-10）
    pub rating: f64,
    /// 海报完整URL（缺失时为占位值）
    pub poster: String,
    /// 上映日期（YYYY-MM-DD，缺失时为占位值）
    pub release_date: String,
}

/// 从 YYYY-MM-DD 字符串提取年份，占位值或格式错误返回 None
pub fn release_year(release_date: &str) -> Option<i32> {
    use chrono::Datelike;
    NaiveDate::parse_from_str(release_date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}

/// 评分四舍五入到一位小数（卡片显示约定）
pub fn display_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

impl MovieDetails {
    /// 上映年份（占位值返回 None）
    pub fn release_year(&self) -> Option<i32> {
        release_year(&self.release_date)
    }
}

impl MovieSummary {
    /// 上映年份（占位值返回 None）
    pub fn release_year(&self) -> Option<i32> {
        release_year(&self.release_date)
    }
}

// ==================== 配置类型 ====================

/// TMDB 目录数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API 访问令牌（Bearer）
    pub api_token: String,
    /// 地区代码（影响院线/即将上映的列表）
    pub region: String,
    /// 语言代码
    pub language: String,
    /// 每个分类返回的电影数量上限
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            region: "za".to_string(),
            language: "en-US".to_string(),
            page_size: 15,
        }
    }
}

/// 身份后端配置（Firebase）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Web API Key
    pub api_key: String,
    /// 项目ID（Firestore 用户档案所在项目）
    pub project_id: String,
}

/// 观影清单设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchListSettings {
    /// Cookie 名称
    pub cookie_name: String,
    /// 保留天数（每次写入时刷新）
    pub retention_days: i64,
}

impl Default for WatchListSettings {
    fn default() -> Self {
        Self {
            cookie_name: "watchList".to_string(),
            retention_days: 7,
        }
    }
}

/// 应用配置（部分更新，字段为 None 表示保持不变）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 目录数据源配置
    pub catalog: Option<CatalogConfig>,
    /// 身份后端配置
    pub auth: Option<AuthConfig>,
    /// 观影清单设置
    pub watch_list: Option<WatchListSettings>,
    /// Cookie 文件路径
    pub cookie_file: Option<String>,
}

/// 持久化的应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedAppConfig {
    /// 目录数据源配置
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// 身份后端配置
    #[serde(default)]
    pub auth: AuthConfig,
    /// 观影清单设置
    #[serde(default)]
    pub watch_list: WatchListSettings,
    /// Cookie 文件路径
    pub cookie_file: String,
}

impl Default for PersistedAppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            auth: AuthConfig::default(),
            watch_list: WatchListSettings::default(),
            cookie_file: "data/cookies.json".to_string(),
        }
    }
}
