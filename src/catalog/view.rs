//! Catalog view state and the derived filtered/sorted listing
//!
//! The listing is recomputed from the base data on every read:
//!
//! 1. search text: case-insensitive substring of title, inscription id or collection
//! 2. collection: exact name
//! 3. media type: exact
//! 4. price range: inclusive, unpriced items count as 0
//! 5. stable sort by the active key
//!
//! Price sorting compares the stored number as-is. 0.0045 BTC therefore
//! ranks below 75000 sats.

use super::model::Inscription;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRICE_RANGE: (f64, f64) = (0.0, 1_000_000.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Price,
    Rarity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Price => "price",
            SortKey::Rarity => "rarity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SortKey::Newest),
            "oldest" => Ok(SortKey::Oldest),
            "price" => Ok(SortKey::Price),
            "rarity" => Ok(SortKey::Rarity),
            other => Err(format!("unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    pub price_range: (f64, f64),
    pub collection: Option<String>,
    pub media_type: Option<String>,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self { price_range: DEFAULT_PRICE_RANGE, collection: None, media_type: None }
    }
}

/// Partial filter update. `Some(None)` clears a field, `None` keeps it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub price_range: Option<(f64, f64)>,
    pub collection: Option<Option<String>>,
    pub media_type: Option<Option<String>>,
}

impl FilterUpdate {
    pub fn price_range(mut self, min: f64, max: f64) -> Self { self.price_range = Some((min, max)); self }
    pub fn collection(mut self, name: Option<String>) -> Self { self.collection = Some(name); self }
    pub fn media_type(mut self, media: Option<String>) -> Self { self.media_type = Some(media); self }
}

impl CatalogFilter {
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(range) = update.price_range {
            self.price_range = range;
        }
        if let Some(collection) = update.collection {
            self.collection = collection;
        }
        if let Some(media_type) = update.media_type {
            self.media_type = media_type;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub search: String,
    pub sort: SortKey,
    pub filter: CatalogFilter,
}

fn matches_search(item: &Inscription, needle: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(needle);
    item.title.as_deref().map(contains).unwrap_or(false)
        || contains(&item.inscription_id)
        || item.collection.as_deref().map(contains).unwrap_or(false)
}

fn compare(sort: SortKey, a: &Inscription, b: &Inscription) -> Ordering {
    match sort {
        SortKey::Price => b.raw_price().total_cmp(&a.raw_price()),
        SortKey::Oldest => a.timestamp.cmp(&b.timestamp),
        SortKey::Newest => b.timestamp.cmp(&a.timestamp),
        SortKey::Rarity => a.inscription_number.cmp(&b.inscription_number),
    }
}

pub fn filter_and_sort(items: &[Inscription], view: &CatalogView) -> Vec<Inscription> {
    let needle = view.search.to_lowercase();
    let (min, max) = view.filter.price_range;
    // an empty name disables its filter
    let collection = view.filter.collection.as_deref().filter(|c| !c.is_empty());
    let media_type = view.filter.media_type.as_deref().filter(|m| !m.is_empty());

    let mut out: Vec<Inscription> = items
        .iter()
        .filter(|i| needle.is_empty() || matches_search(i, &needle))
        .filter(|i| collection.map_or(true, |c| i.collection.as_deref() == Some(c)))
        .filter(|i| media_type.map_or(true, |m| i.media_type == m))
        .filter(|i| {
            let price = i.raw_price();
            price >= min && price <= max
        })
        .cloned()
        .collect();

    // sort_by is stable: ties keep input order
    out.sort_by(|a, b| compare(view.sort, a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::mock;

    fn ids(items: &[Inscription]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn sort_keys_parse() {
        assert_eq!("Rarity".parse::<SortKey>().unwrap(), SortKey::Rarity);
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn partial_filter_update_keeps_other_fields() {
        let mut filter = CatalogFilter::default();
        filter.apply(FilterUpdate::default().collection(Some("Ethereum Nature".into())));
        filter.apply(FilterUpdate::default().price_range(1.0, 2.0));
        assert_eq!(filter.collection.as_deref(), Some("Ethereum Nature"));
        assert_eq!(filter.price_range, (1.0, 2.0));

        filter.apply(FilterUpdate::default().collection(None));
        assert!(filter.collection.is_none());
        assert_eq!(filter.price_range, (1.0, 2.0));
    }

    #[test]
    fn empty_collection_or_media_is_no_filter() {
        let mut view = CatalogView::default();
        view.filter.apply(FilterUpdate::default().collection(Some(String::new())).media_type(Some(String::new())));
        assert_eq!(filter_and_sort(&mock::inscriptions(), &view).len(), 8);

        view.filter.apply(FilterUpdate::default().media_type(Some("image/png".into())));
        assert_eq!(ids(&filter_and_sort(&mock::inscriptions(), &view)), ["2", "7"]);
    }

    #[test]
    fn search_matches_inscription_id() {
        let view = CatalogView { search: "H8I9J0".into(), ..Default::default() };
        let found = filter_and_sort(&mock::inscriptions(), &view);
        assert_eq!(ids(&found), ["1", "2", "3", "4", "5", "6", "7", "8"]);

        let view = CatalogView { search: "a1b2c3d4e5f6g7h8".into(), ..Default::default() };
        assert_eq!(ids(&filter_and_sort(&mock::inscriptions(), &view)), ["1"]);
    }

    #[test]
    fn unpriced_items_count_as_zero() {
        let mut items = mock::inscriptions();
        items[0].price = None;
        let view = CatalogView {
            filter: CatalogFilter { price_range: (0.0, 0.0), ..Default::default() },
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&items, &view)), ["1"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut items = mock::inscriptions();
        for item in &mut items {
            item.price = Some(1.0);
        }
        let view = CatalogView { sort: SortKey::Price, ..Default::default() };
        assert_eq!(ids(&filter_and_sort(&items, &view)), ["1", "2", "3", "4", "5", "6", "7", "8"]);
    }
}
