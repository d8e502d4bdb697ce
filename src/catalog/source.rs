//! Where catalog data comes from. [`MockCatalog`] sleeps for the configured
//! latency and returns the fixed data set.

use super::mock;
use super::model::{Collection, Gallery, Inscription, MarketplaceStats, PriceSnapshot};
use crate::error::CatalogError;
use crate::market::CatalogConfig;
use async_trait::async_trait;
use std::time::Duration;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn inscriptions(&self) -> CatalogResult<Vec<Inscription>>;
    async fn collections(&self) -> CatalogResult<Vec<Collection>>;
    async fn galleries(&self) -> CatalogResult<Vec<Gallery>>;
    async fn stats(&self) -> CatalogResult<MarketplaceStats>;
    async fn price_snapshot(&self) -> CatalogResult<PriceSnapshot>;
}

#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    config: CatalogConfig,
}

impl MockCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }
}

async fn latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn inscriptions(&self) -> CatalogResult<Vec<Inscription>> {
        latency(self.config.inscriptions_delay).await;
        Ok(mock::inscriptions())
    }

    async fn collections(&self) -> CatalogResult<Vec<Collection>> {
        latency(self.config.collections_delay).await;
        Ok(mock::collections())
    }

    async fn galleries(&self) -> CatalogResult<Vec<Gallery>> {
        latency(self.config.galleries_delay).await;
        Ok(mock::galleries())
    }

    async fn stats(&self) -> CatalogResult<MarketplaceStats> {
        latency(self.config.stats_delay).await;
        Ok(mock::stats())
    }

    async fn price_snapshot(&self) -> CatalogResult<PriceSnapshot> {
        latency(self.config.prices_delay).await;
        Ok(mock::price_snapshot())
    }
}
