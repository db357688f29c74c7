// 首页表面 - 轮播与分类行

use crate::catalog::{CatalogClient, MovieCategory, MovieGenre};
use crate::models::{display_rating, MovieDetails, MovieSummary};
use crate::watchlist::{WatchListError, WatchListStore};
use std::sync::Arc;
use tracing::warn;

/// 轮播展示的电影数量
const CAROUSEL_SIZE: usize = 3;

/// 首页的四个列表行（“全部”视图按此顺序）
const LISTINGS: [MovieCategory; 4] = [
    MovieCategory::Popular,
    MovieCategory::NowPlaying,
    MovieCategory::TopRated,
    MovieCategory::Upcoming,
];

/// 一张电影卡片：摘要加上清单按钮状态
#[derive(Debug, Clone)]
pub struct MovieCard {
    pub movie: MovieSummary,
    /// 是否已在观影清单中（决定按钮显示“加入”还是“移除”）
    pub in_watch_list: bool,
}

impl MovieCard {
    /// 卡片底部的评分文本，四舍五入到一位小数
    pub fn rating_label(&self) -> String {
        format!("Rating: {}", display_rating(self.movie.rating))
    }
}

/// 一行分类卡片
#[derive(Debug, Clone)]
pub struct CategoryRow {
    /// 行标题
    pub title: String,
    pub cards: Vec<MovieCard>,
    /// 是否显示完整日期（即将上映的行显示完整日期，其余只显示年份）
    pub show_full_date: bool,
}

/// 首页视图选择
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CategoryView {
    /// 单个分类一行
    One(MovieCategory),
    /// 四个列表行
    AllListings,
    /// 全部类型各一行
    AllGenres,
}

/// 摘要列表映射为卡片，按当前清单内容标注按钮状态
fn cards_for(movies: Vec<MovieSummary>, store: &WatchListStore) -> Vec<MovieCard> {
    let ids = store.list();
    movies
        .into_iter()
        .map(|movie| {
            let in_watch_list = ids.contains(&movie.id);
            MovieCard {
                movie,
                in_watch_list,
            }
        })
        .collect()
}

/// 首页表面
pub struct HomeSurface {
    catalog: Arc<CatalogClient>,
    watch_list: Arc<WatchListStore>,
}

impl HomeSurface {
    pub fn new(catalog: Arc<CatalogClient>, watch_list: Arc<WatchListStore>) -> Self {
        Self {
            catalog,
            watch_list,
        }
    }

    /// 轮播内容：正在上映的前3部的完整详情（含预告片和演职员表）
    ///
    /// 单部详情拉取失败时跳过该部，不中断整个轮播
    pub async fn carousel(&self) -> Vec<MovieDetails> {
        let premieres = match self
            .catalog
            .movies_in_category(MovieCategory::NowPlaying)
            .await
        {
            Ok(movies) => movies,
            Err(e) => {
                warn!("获取轮播列表失败: {}", e);
                return Vec::new();
            }
        };

        let mut details = Vec::new();
        for movie in premieres.into_iter().take(CAROUSEL_SIZE) {
            match self.catalog.movie_details(movie.id, true, true).await {
                Ok(d) => details.push(d),
                Err(e) => warn!("获取轮播电影 {} 详情失败: {}", movie.id, e),
            }
        }
        details
    }

    /// 按视图选择组装分类行
    ///
    /// 某个分类拉取失败时跳过该行并记录告警（页面失一行不失整页）
    pub async fn rows(&self, view: CategoryView) -> Vec<CategoryRow> {
        let categories: Vec<MovieCategory> = match view {
            CategoryView::One(category) => vec![category],
            CategoryView::AllListings => LISTINGS.to_vec(),
            CategoryView::AllGenres => MovieGenre::ALL
                .iter()
                .map(|g| MovieCategory::Genre(*g))
                .collect(),
        };

        let mut rows = Vec::new();
        for category in categories {
            match self.catalog.movies_in_category(category).await {
                Ok(movies) => rows.push(CategoryRow {
                    title: category.display_name().to_string(),
                    show_full_date: category == MovieCategory::Upcoming,
                    cards: cards_for(movies, &self.watch_list),
                }),
                Err(e) => {
                    warn!("获取分类 {} 失败，跳过该行: {}", category.display_name(), e);
                }
            }
        }
        rows
    }

    /// 切换某部电影的清单状态，返回切换后的状态（true = 已在清单中）
    pub fn toggle_watch_list(&self, movie_id: i64) -> Result<bool, WatchListError> {
        if self.watch_list.contains(movie_id) {
            self.watch_list.remove(movie_id)?;
            Ok(false)
        } else {
            self.watch_list.add(movie_id)?;
            Ok(true)
        }
    }
}
