// 目录模块 - TMDB 电影数据源
//
// 分类定义在这里，HTTP 客户端在 client.rs

mod client;

pub use client::CatalogClient;

use serde::{Deserialize, Serialize};

/// 电影类型（TMDB genre）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieGenre {
    Action,
    Animation,
    Biography,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    Horror,
    SciFi,
    Thriller,
}

impl MovieGenre {
    /// 全部类型（“全部”视图按此顺序逐行展示）
    pub const ALL: [MovieGenre; 10] = [
        Self::Action,
        Self::Animation,
        Self::Biography,
        Self::Crime,
        Self::Documentary,
        Self::Drama,
        Self::Fantasy,
        Self::Horror,
        Self::SciFi,
        Self::Thriller,
    ];

    /// TMDB 的类型ID
    pub fn tmdb_id(&self) -> u32 {
        match self {
            Self::Action => 28,
            Self::Animation => 16,
            Self::Biography => 36,
            Self::Crime => 80,
            Self::Documentary => 99,
            Self::Drama => 18,
            Self::Fantasy => 14,
            Self::Horror => 27,
            Self::SciFi => 878,
            Self::Thriller => 53,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Action => "Action",
            Self::Animation => "Animation",
            Self::Biography => "Biography",
            Self::Crime => "Crime",
            Self::Documentary => "Documentary",
            Self::Drama => "Drama",
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::SciFi => "Sci-Fi",
            Self::Thriller => "Thriller",
        }
    }
}

/// 年代段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decade {
    Seventies,
    Eighties,
    Nineties,
    TwoThousands,
    TwentyTens,
    TwentyTwenties,
}

impl Decade {
    pub const ALL: [Decade; 6] = [
        Self::Seventies,
        Self::Eighties,
        Self::Nineties,
        Self::TwoThousands,
        Self::TwentyTens,
        Self::TwentyTwenties,
    ];

    /// 上映日期过滤范围（含两端）
    pub fn date_range(&self) -> (&'static str, &'static str) {
        match self {
            Self::Seventies => ("1970-01-01", "1979-12-31"),
            Self::Eighties => ("1980-01-01", "1989-12-31"),
            Self::Nineties => ("1990-01-01", "1999-12-31"),
            Self::TwoThousands => ("2000-01-01", "2009-12-31"),
            Self::TwentyTens => ("2010-01-01", "2019-12-31"),
            Self::TwentyTwenties => ("2020-01-01", "2024-12-31"),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Seventies => "1970-1979",
            Self::Eighties => "1980-1989",
            Self::Nineties => "1990-1999",
            Self::TwoThousands => "2000-2009",
            Self::TwentyTens => "2010-2019",
            Self::TwentyTwenties => "2020-2024",
        }
    }
}

/// 评分段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    /// 0-5 分
    Low,
    /// 5-10 分
    High,
}

impl RatingBand {
    /// vote_average 过滤范围
    pub fn vote_range(&self) -> (u32, u32) {
        match self {
            Self::Low => (0, 5),
            Self::High => (5, 10),
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Low => "0-5",
            Self::High => "6-10",
        }
    }
}

/// 电影分类 - 每个分类对应一次目录查询
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieCategory {
    /// 热门
    Popular,
    /// 高分
    TopRated,
    /// 即将上映
    Upcoming,
    /// 正在上映（首页轮播也用它）
    NowPlaying,
    /// 按类型
    Genre(MovieGenre),
    /// 按年代
    Decade(Decade),
    /// 按评分段
    RatingBand(RatingBand),
}

impl MovieCategory {
    /// 行标题（渲染层直接显示）
    pub fn display_name(&self) -> &str {
        match self {
            Self::Popular => "Popular",
            Self::TopRated => "Top Rated",
            Self::Upcoming => "Upcoming",
            Self::NowPlaying => "In Theatres",
            Self::Genre(genre) => genre.display_name(),
            Self::Decade(decade) => decade.display_name(),
            Self::RatingBand(band) => band.display_name(),
        }
    }

    /// 查询的路径和参数
    ///
    /// 列表接口带地区参数；discover 接口按热度排序
    pub(crate) fn request_query(
        &self,
        region: &str,
        language: &str,
    ) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            Self::Popular | Self::TopRated | Self::Upcoming | Self::NowPlaying => {
                let path = match self {
                    Self::Popular => "/movie/popular",
                    Self::TopRated => "/movie/top_rated",
                    Self::Upcoming => "/movie/upcoming",
                    Self::NowPlaying => "/movie/now_playing",
                    _ => unreachable!(),
                };
                (
                    path,
                    vec![
                        ("region", region.to_string()),
                        ("language", language.to_string()),
                        ("page", "1".to_string()),
                    ],
                )
            }
            Self::Genre(genre) => (
                "/discover/movie",
                vec![
                    ("include_adult", "false".to_string()),
                    ("include_video", "false".to_string()),
                    ("language", language.to_string()),
                    ("page", "1".to_string()),
                    ("sort_by", "popularity.desc".to_string()),
                    ("with_genres", genre.tmdb_id().to_string()),
                ],
            ),
            Self::Decade(decade) => {
                let (from, to) = decade.date_range();
                (
                    "/discover/movie",
                    vec![
                        ("include_adult", "false".to_string()),
                        ("language", language.to_string()),
                        ("sort_by", "popularity.desc".to_string()),
                        ("release_date.gte", from.to_string()),
                        ("release_date.lte", to.to_string()),
                    ],
                )
            }
            Self::RatingBand(band) => {
                let (low, high) = band.vote_range();
                (
                    "/discover/movie",
                    vec![
                        ("include_adult", "false".to_string()),
                        ("include_video", "false".to_string()),
                        ("language", language.to_string()),
                        ("page", "1".to_string()),
                        ("sort_by", "popularity.desc".to_string()),
                        ("vote_average.gte", low.to_string()),
                        ("vote_average.lte", high.to_string()),
                    ],
                )
            }
        }
    }
}
