//! Market - root that owns one wallet store and one catalog store
//!
//! Startup order: silent wallet reconnect from the stored descriptor, then
//! every catalog fetch concurrently. Neither step is fatal.

mod config;

pub use config::{CatalogConfig, MarketConfig, WalletConfig};

use crate::catalog::{CatalogSource, CatalogStore, MockCatalog, Resource};
use crate::error::CatalogError;
use crate::storage::{FileStorage, SessionStorage};
use crate::wallet::{RestoreOutcome, WalletEnvironment, WalletStore};
use serde::Serialize;
use std::sync::Arc;

/// What `start` did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartReport {
    pub restore: Option<RestoreOutcome>,
    pub catalog_failures: Vec<String>,
}

pub struct Marketplace {
    config: MarketConfig,
    wallet: WalletStore,
    catalog: CatalogStore,
}

impl Marketplace {
    pub fn new(
        config: MarketConfig,
        env: Arc<dyn WalletEnvironment>,
        storage: Arc<dyn SessionStorage>,
        source: Arc<dyn CatalogSource>,
    ) -> Self {
        let wallet = WalletStore::new(config.wallet.clone(), env, storage);
        let catalog = CatalogStore::new(source);
        Self { config, wallet, catalog }
    }

    /// File storage under the app's data dir and the mock catalog.
    pub fn from_config(config: MarketConfig, env: Arc<dyn WalletEnvironment>) -> Self {
        let storage = Arc::new(FileStorage::open(&config.app));
        let source = Arc::new(MockCatalog::new(config.catalog.clone()));
        Self::new(config, env, storage, source)
    }

    pub async fn start(&self) -> StartReport {
        let restore = if self.config.restore_session {
            Some(self.wallet.restore_from_storage().await)
        } else {
            None
        };
        let failures = self.load_catalog().await;
        tracing::info!(
            "Marketplace '{}' started (wallet restore: {:?}, catalog failures: {})",
            self.config.app,
            restore,
            failures.len()
        );
        StartReport {
            restore,
            catalog_failures: failures.iter().map(|(_, e)| e.to_string()).collect(),
        }
    }

    pub async fn load_catalog(&self) -> Vec<(Resource, CatalogError)> {
        self.catalog.fetch_all().await
    }

    pub fn wallet(&self) -> &WalletStore {
        &self.wallet
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Stop every wallet timer. Stores stay readable.
    pub fn shutdown(&self) {
        self.wallet.shutdown();
        tracing::info!("Marketplace '{}' shut down", self.config.app);
    }
}
