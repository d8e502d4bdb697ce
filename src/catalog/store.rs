//! Catalog store: loaded data, per-resource fetch status and view state

use super::model::{Collection, Gallery, Inscription, MarketplaceStats, PriceSnapshot};
use super::source::{CatalogResult, CatalogSource};
use super::view::{filter_and_sort, CatalogFilter, CatalogView, FilterUpdate, SortKey};
use crate::core::paths;
use crate::core::{Change, Watchers};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Inscriptions,
    Collections,
    Galleries,
    Stats,
    Prices,
}

impl Resource {
    pub const ALL: [Resource; 5] =
        [Resource::Inscriptions, Resource::Collections, Resource::Galleries, Resource::Stats, Resource::Prices];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Inscriptions => "inscriptions",
            Resource::Collections => "collections",
            Resource::Galleries => "galleries",
            Resource::Stats => "stats",
            Resource::Prices => "prices",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchStatus {
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct CatalogState {
    inscriptions: Vec<Inscription>,
    collections: Vec<Collection>,
    featured: Vec<Collection>,
    galleries: Vec<Gallery>,
    stats: Option<MarketplaceStats>,
    prices: Option<PriceSnapshot>,
    status: BTreeMap<Resource, FetchStatus>,
    view: CatalogView,
    selected: Option<Inscription>,
}

#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<Shared>,
}

struct Shared {
    source: Arc<dyn CatalogSource>,
    watchers: Watchers,
    state: Mutex<CatalogState>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            inner: Arc::new(Shared { source, watchers: Watchers::new(), state: Mutex::new(CatalogState::default()) }),
        }
    }

    // Fetches

    pub async fn fetch_inscriptions(&self) -> CatalogResult<()> {
        let result = self.fetch(Resource::Inscriptions, self.inner.source.inscriptions()).await?;
        self.state().inscriptions = result;
        self.notify(paths::market::INSCRIPTIONS);
        Ok(())
    }

    /// Also derives the featured (verified) collections.
    pub async fn fetch_collections(&self) -> CatalogResult<()> {
        let result = self.fetch(Resource::Collections, self.inner.source.collections()).await?;
        {
            let mut state = self.state();
            state.featured = result.iter().filter(|c| c.verified).cloned().collect();
            state.collections = result;
        }
        self.notify(paths::market::COLLECTIONS);
        Ok(())
    }

    pub async fn fetch_galleries(&self) -> CatalogResult<()> {
        let result = self.fetch(Resource::Galleries, self.inner.source.galleries()).await?;
        self.state().galleries = result;
        self.notify(paths::market::GALLERIES);
        Ok(())
    }

    pub async fn fetch_stats(&self) -> CatalogResult<()> {
        let result = self.fetch(Resource::Stats, self.inner.source.stats()).await?;
        self.state().stats = Some(result);
        self.notify(paths::market::STATS);
        Ok(())
    }

    pub async fn fetch_price_snapshot(&self) -> CatalogResult<()> {
        let result = self.fetch(Resource::Prices, self.inner.source.price_snapshot()).await?;
        self.state().prices = Some(result);
        self.notify(paths::market::PRICES);
        Ok(())
    }

    /// All five fetches concurrently; returns the failures.
    pub async fn fetch_all(&self) -> Vec<(Resource, crate::error::CatalogError)> {
        let (a, b, c, d, e) = tokio::join!(
            self.fetch_inscriptions(),
            self.fetch_collections(),
            self.fetch_galleries(),
            self.fetch_stats(),
            self.fetch_price_snapshot(),
        );
        Resource::ALL
            .into_iter()
            .zip([a, b, c, d, e])
            .filter_map(|(resource, r)| r.err().map(|e| (resource, e)))
            .collect()
    }

    async fn fetch<T, F>(&self, resource: Resource, request: F) -> CatalogResult<T>
    where
        F: std::future::Future<Output = CatalogResult<T>>,
    {
        self.set_status(resource, FetchStatus { loading: true, error: None });
        tracing::debug!("Fetching {}", resource.as_str());
        match request.await {
            Ok(value) => {
                self.set_status(resource, FetchStatus::default());
                Ok(value)
            }
            Err(e) => {
                tracing::warn!("Fetching {} failed: {}", resource.as_str(), e);
                self.set_status(resource, FetchStatus { loading: false, error: Some(e.to_string()) });
                Err(e)
            }
        }
    }

    // View actions

    pub fn set_search(&self, text: impl Into<String>) {
        self.state().view.search = text.into();
        self.notify(paths::market::VIEW);
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.state().view.sort = sort;
        self.notify(paths::market::VIEW);
    }

    pub fn set_filter(&self, update: FilterUpdate) {
        self.state().view.filter.apply(update);
        self.notify(paths::market::VIEW);
    }

    /// Select by id among the loaded inscriptions; `None` clears.
    pub fn select_inscription(&self, id: Option<&str>) -> Option<Inscription> {
        let selected = {
            let mut state = self.state();
            let found = id.and_then(|id| state.inscriptions.iter().find(|i| i.id == id).cloned());
            state.selected = found.clone();
            found
        };
        self.notify(paths::market::SELECTION);
        selected
    }

    pub fn clear_error(&self) {
        for status in self.state().status.values_mut() {
            status.error = None;
        }
        self.notify(paths::market::STATUS);
    }

    // Reads

    pub fn inscriptions(&self) -> Vec<Inscription> {
        self.state().inscriptions.clone()
    }

    pub fn collections(&self) -> Vec<Collection> {
        self.state().collections.clone()
    }

    pub fn featured_collections(&self) -> Vec<Collection> {
        self.state().featured.clone()
    }

    pub fn galleries(&self) -> Vec<Gallery> {
        self.state().galleries.clone()
    }

    pub fn stats(&self) -> Option<MarketplaceStats> {
        self.state().stats.clone()
    }

    pub fn price_snapshot(&self) -> Option<PriceSnapshot> {
        self.state().prices.clone()
    }

    pub fn view(&self) -> CatalogView {
        self.state().view.clone()
    }

    pub fn filter(&self) -> CatalogFilter {
        self.state().view.filter.clone()
    }

    pub fn selected(&self) -> Option<Inscription> {
        self.state().selected.clone()
    }

    pub fn filtered_sorted_inscriptions(&self) -> Vec<Inscription> {
        let state = self.state();
        filter_and_sort(&state.inscriptions, &state.view)
    }

    pub fn listed_inscriptions(&self) -> Vec<Inscription> {
        self.state().inscriptions.iter().filter(|i| i.listed).cloned().collect()
    }

    /// Sum of raw listing prices, units mixed as stored
    pub fn total_value(&self) -> f64 {
        self.state().inscriptions.iter().filter(|i| i.listed).map(Inscription::raw_price).sum()
    }

    pub fn status(&self, resource: Resource) -> FetchStatus {
        self.state().status.get(&resource).cloned().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.state().status.values().any(|s| s.loading)
    }

    /// First recorded error, in resource order
    pub fn error(&self) -> Option<String> {
        self.state().status.values().find_map(|s| s.error.clone())
    }

    pub fn watch(&self, pattern: &str) -> mpsc::UnboundedReceiver<Change> {
        self.inner.watchers.watch(pattern)
    }

    fn set_status(&self, resource: Resource, status: FetchStatus) {
        self.state().status.insert(resource, status);
        self.notify(paths::market::STATUS);
    }

    fn notify(&self, topic: &'static str) {
        self.inner.watchers.notify(topic);
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.inner.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
