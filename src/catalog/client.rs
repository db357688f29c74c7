// TMDB API 客户端
// 负责从电影元数据接口拉取详情和分类列表

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::error;

use super::MovieCategory;
use crate::models::{
    CatalogConfig, MovieDetails, MovieSummary, NOT_REQUESTED, NO_POSTER, NO_TRAILER, UNKNOWN,
};

const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
/// 海报图片的基础URL
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
/// 演员表最多取前多少人
const CAST_LIMIT: usize = 10;

// ==================== 响应报文结构 ====================
// id 和 title 是必需字段，缺失时解析直接报错；
// 其余字段缺失映射为占位值

#[derive(Debug, Deserialize)]
struct DetailsWire {
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    vote_average: f64,
    poster_path: Option<String>,
    release_date: Option<String>,
    videos: Option<VideosWire>,
    credits: Option<CreditsWire>,
}

#[derive(Debug, Deserialize)]
struct VideosWire {
    #[serde(default)]
    results: Vec<VideoWire>,
}

#[derive(Debug, Deserialize)]
struct VideoWire {
    key: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct CreditsWire {
    #[serde(default)]
    crew: Vec<CrewWire>,
    #[serde(default)]
    cast: Vec<CastWire>,
}

#[derive(Debug, Deserialize)]
struct CrewWire {
    name: String,
    job: String,
}

#[derive(Debug, Deserialize)]
struct CastWire {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ListingWire {
    #[serde(default)]
    results: Vec<ListingItemWire>,
}

#[derive(Debug, Deserialize)]
struct ListingItemWire {
    id: i64,
    title: String,
    #[serde(default)]
    overview: String,
    #[serde(default)]
    vote_average: f64,
    poster_path: Option<String>,
    release_date: Option<String>,
}

fn poster_url(poster_path: Option<&str>) -> String {
    match poster_path {
        Some(path) if !path.is_empty() => format!("{}{}", POSTER_BASE_URL, path),
        _ => NO_POSTER.to_string(),
    }
}

fn release_date_or_unknown(release_date: Option<String>) -> String {
    match release_date {
        Some(date) if !date.is_empty() => date,
        _ => UNKNOWN.to_string(),
    }
}

/// 把详情报文整理为 MovieDetails，应用占位值约定
fn details_from_wire(movie_id: i64, wire: DetailsWire, videos: bool, credits: bool) -> MovieDetails {
    let director = if credits {
        wire.credits
            .as_ref()
            .and_then(|c| c.crew.iter().find(|p| p.job == "Director"))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    } else {
        NOT_REQUESTED.to_string()
    };

    let cast = if credits {
        wire.credits
            .as_ref()
            .map(|c| {
                c.cast
                    .iter()
                    .take(CAST_LIMIT)
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    } else {
        NOT_REQUESTED.to_string()
    };

    // 第一条类型为 Trailer 的视频；未请求或没有时统一为占位值
    let trailer_key = if videos {
        wire.videos
            .as_ref()
            .and_then(|v| v.results.iter().find(|video| video.kind == "Trailer"))
            .map(|video| video.key.clone())
    } else {
        None
    };
    let trailer = match trailer_key {
        Some(key) => format!("https://www.youtube.com/watch?v={}", key),
        None => NO_TRAILER.to_string(),
    };

    MovieDetails {
        id: movie_id,
        title: wire.title,
        director,
        cast,
        overview: wire.overview,
        rating: wire.vote_average,
        poster: poster_url(wire.poster_path.as_deref()),
        trailer,
        release_date: release_date_or_unknown(wire.release_date),
    }
}

/// 把列表报文整理为摘要列表，最多取 page_size 条
fn summaries_from_wire(wire: ListingWire, page_size: usize) -> Vec<MovieSummary> {
    wire.results
        .into_iter()
        .take(page_size)
        .map(|item| MovieSummary {
            id: item.id,
            title: item.title,
            overview: item.overview,
            rating: item.vote_average,
            poster: poster_url(item.poster_path.as_deref()),
            release_date: release_date_or_unknown(item.release_date),
        })
        .collect()
}

/// TMDB 目录客户端
#[derive(Clone)]
pub struct CatalogClient {
    config: CatalogConfig,
    client: Client,
}

impl CatalogClient {
    /// 创建新的目录客户端
    pub fn new(config: CatalogConfig) -> Result<Self> {
        if config.api_token.is_empty() {
            return Err(anyhow!("TMDB API Token 不能为空"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { config, client })
    }

    /// 获取配置信息（用于调试）
    pub fn get_config(&self) -> &CatalogConfig {
        &self.config
    }

    /// 获取单部电影的详情
    ///
    /// # 参数
    /// - `movie_id`: 电影ID
    /// - `videos`: 是否附带预告片信息
    /// - `credits`: 是否附带导演/演员信息
    pub async fn movie_details(
        &self,
        movie_id: i64,
        videos: bool,
        credits: bool,
    ) -> Result<MovieDetails> {
        let mut append = Vec::new();
        if videos {
            append.push("videos");
        }
        if credits {
            append.push("credits");
        }

        let url = format!("{}/movie/{}", TMDB_API_BASE, movie_id);
        let mut request = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .bearer_auth(&self.config.api_token);
        if !append.is_empty() {
            request = request.query(&[("append_to_response", append.join(","))]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("获取电影 {} 详情失败: {} {}", movie_id, status, error_text);
            return Err(anyhow!("获取电影详情失败: {}", status));
        }

        let wire: DetailsWire = response.json().await?;
        Ok(details_from_wire(movie_id, wire, videos, credits))
    }

    /// 获取某个分类下的电影摘要列表（最多 page_size 条）
    pub async fn movies_in_category(&self, category: MovieCategory) -> Result<Vec<MovieSummary>> {
        let (path, params) =
            category.request_query(&self.config.region, &self.config.language);
        let url = format!("{}{}", TMDB_API_BASE, path);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .bearer_auth(&self.config.api_token)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "获取分类 {} 列表失败: {} {}",
                category.display_name(),
                status,
                error_text
            );
            return Err(anyhow!("获取分类列表失败: {}", status));
        }

        let wire: ListingWire = response.json().await?;
        Ok(summaries_from_wire(wire, self.config.page_size))
    }
}
