// 单部电影页表面

use crate::catalog::CatalogClient;
use crate::models::MovieDetails;
use crate::utils::validate_movie_id;
use anyhow::{anyhow, Result};
use std::sync::Arc;

/// 单部电影页表面
///
/// 页面固定需要预告片和演职员表，所以两个附加项都请求
pub struct IndividualSurface {
    catalog: Arc<CatalogClient>,
}

impl IndividualSurface {
    pub fn new(catalog: Arc<CatalogClient>) -> Self {
        Self { catalog }
    }

    /// 加载页面数据
    pub async fn movie(&self, movie_id: i64) -> Result<MovieDetails> {
        validate_movie_id(movie_id).map_err(|e| anyhow!(e))?;
        self.catalog.movie_details(movie_id, true, true).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogConfig;

    #[tokio::test]
    async fn test_rejects_invalid_id_before_network() {
        let config = CatalogConfig {
            api_token: "test-token".to_string(),
            ..CatalogConfig::default()
        };
        let surface = IndividualSurface::new(Arc::new(CatalogClient::new(config).unwrap()));
        assert!(surface.movie(-1).await.is_err());
    }
}
