// 观影清单页表面

use crate::catalog::CatalogClient;
use crate::models::MovieDetails;
use crate::watchlist::{WatchListError, WatchListStore};
use std::sync::Arc;
use tracing::warn;

/// 观影清单页表面
pub struct WatchListSurface {
    catalog: Arc<CatalogClient>,
    store: Arc<WatchListStore>,
}

impl WatchListSurface {
    pub fn new(catalog: Arc<CatalogClient>, store: Arc<WatchListStore>) -> Self {
        Self { catalog, store }
    }

    /// 把清单中的每个ID解析为完整详情
    ///
    /// 解析失败的条目按缺失处理：跳过并记录告警，不重试
    pub async fn movies(&self) -> Vec<MovieDetails> {
        let mut movies = Vec::new();
        for movie_id in self.store.list() {
            match self.catalog.movie_details(movie_id, true, true).await {
                Ok(details) => movies.push(details),
                Err(e) => warn!("解析清单电影 {} 失败，条目跳过: {}", movie_id, e),
            }
        }
        movies
    }

    /// 从清单移除一部电影（页面随后重新加载列表）
    pub fn remove(&self, movie_id: i64) -> Result<(), WatchListError> {
        self.store.remove(movie_id)
    }

    /// 当前清单中的电影ID
    pub fn ids(&self) -> Vec<i64> {
        self.store.list()
    }
}
