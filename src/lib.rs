//! Bitbasel: Ordinals marketplace core. Catalog views and browser wallet
//! sessions behind explicit stores.
//!
//! # Architecture
//!
//! ```text
//! Marketplace (entry point)
//!   │
//!   ├── WalletStore
//!   │     ├── WalletAdapter × 5 (unisat, xverse, ordinals-wallet, leather, phantom)
//!   │     │     └── WalletEnvironment → InjectedProvider (extension globals)
//!   │     ├── SessionStorage ("bitbasel_wallet" descriptor)
//!   │     └── TaskHandle timers (liveness, balance refresh, error clear)
//!   │
//!   └── CatalogStore
//!         ├── CatalogSource (MockCatalog)
//!         └── CatalogView → filter_and_sort
//! ```
//!
//! # Store Topics
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | `/wallet/**` | session, balance, connecting, error, transactions |
//! | `/market/**` | inscriptions, collections, galleries, stats, prices, view, selection, status |
//!
//! # Features
//!
//! - `native` (default) - tokio stores and timers, file storage, tracing, CLI
//!
//! Without `native` the models, views, provider tags and adapters still build.
//!
//! # Usage
//!
//! ```ignore
//! use bitbasel::{MarketConfig, Marketplace, WalletProvider};
//! use bitbasel::wallet::ScriptedEnvironment;
//! use std::sync::Arc;
//!
//! let market = Marketplace::from_config(MarketConfig::from_env(), Arc::new(ScriptedEnvironment::new()));
//! market.start().await;
//!
//! market.catalog().set_search("ethereum");
//! let items = market.catalog().filtered_sorted_inscriptions();
//!
//! market.wallet().connect(WalletProvider::Unisat, true).await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod catalog;
pub mod core;
pub mod error;
pub mod storage;
pub mod wallet;

// =============================================================================
// Native-only modules (tokio, filesystem, tracing)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod market;
#[cfg(feature = "native")]
pub mod runtime;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use catalog::{Collection, Gallery, Inscription, MarketplaceStats, PriceSnapshot, SortKey};
pub use error::{CatalogError, StorageError, WalletError, WalletResult};
pub use storage::{MemoryStorage, SessionStorage};
pub use wallet::{Network, WalletProvider, WalletSession};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use catalog::{CatalogStore, MockCatalog};
#[cfg(feature = "native")]
pub use market::{CatalogConfig, MarketConfig, Marketplace, StartReport, WalletConfig};
#[cfg(feature = "native")]
pub use runtime::TaskHandle;
#[cfg(feature = "native")]
pub use storage::FileStorage;
#[cfg(feature = "native")]
pub use wallet::{DisplayedError, RestoreOutcome, WalletStore};
