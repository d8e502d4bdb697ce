//! Catalog - inscriptions, collections, galleries and market figures
//!
//! # Architecture
//!
//! ```text
//! CatalogStore
//!     │
//!     ├── CatalogSource (async) ── MockCatalog: fixed data after a simulated delay
//!     │
//!     ├── per-resource FetchStatus {loading, error}
//!     │
//!     └── CatalogView {search, sort, filter} ──► filter_and_sort(inscriptions)
//! ```
//!
//! # Topics
//!
//! | Path | Published when |
//! |------|----------------|
//! | `/market/inscriptions` | inscriptions loaded |
//! | `/market/collections` | collections (and featured) loaded |
//! | `/market/galleries` | galleries loaded |
//! | `/market/stats` | stats loaded |
//! | `/market/prices` | price snapshot loaded |
//! | `/market/view` | search, sort or filter changed |
//! | `/market/selection` | selected inscription changed |
//! | `/market/status` | a fetch started, finished or errors were cleared |

pub mod mock;
mod model;
#[cfg(feature = "native")]
mod source;
#[cfg(feature = "native")]
mod store;
mod view;

pub use model::{Collection, Gallery, Inscription, MarketplaceStats, PriceSnapshot, PriceUnit, SocialLinks};
#[cfg(feature = "native")]
pub use source::{CatalogResult, CatalogSource, MockCatalog};
#[cfg(feature = "native")]
pub use store::{CatalogStore, FetchStatus, Resource};
pub use view::{filter_and_sort, CatalogFilter, CatalogView, FilterUpdate, SortKey, DEFAULT_PRICE_RANGE};
