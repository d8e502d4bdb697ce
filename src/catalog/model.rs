//! Catalog records. Field names serialize in camelCase, the shape the
//! marketplace front end consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    Sats,
    Btc,
    Ckbtc,
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceUnit::Sats => "sats",
            PriceUnit::Btc => "BTC",
            PriceUnit::Ckbtc => "ckBTC",
        })
    }
}

/// An inscribed sat offered in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inscription {
    pub id: String,
    pub inscription_id: String,
    pub inscription_number: u64,
    pub address: String,
    pub output_value: u64,
    pub sat: u64,
    pub satpoint: String,
    pub timestamp: DateTime<Utc>,
    pub media_type: String,
    pub media_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Amount in `price_unit`; not normalised across units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<PriceUnit>,
    pub listed: bool,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl Inscription {
    /// Listing price as stored, 0 when unpriced
    pub fn raw_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn display_price(&self) -> Option<String> {
        let price = self.price?;
        Some(match self.price_unit {
            Some(unit) => format!("{} {}", price, unit),
            None => price.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub creator: String,
    pub total_items: u64,
    pub floor_price: f64,
    pub volume_24h: f64,
    pub cover_image: String,
    pub verified: bool,
    pub inscriptions: Vec<Inscription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub id: String,
    pub name: String,
    pub description: String,
    pub curator: String,
    pub collections: Vec<Collection>,
    pub featured: bool,
    pub cover_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_links: Option<SocialLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceStats {
    pub total_volume: f64,
    pub total_items: u64,
    pub total_collections: u64,
    pub active_listings: u64,
    pub floor_price: f64,
    pub average_price: f64,
}

/// USD quotes for BTC and ckBTC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub btc_price: f64,
    pub ck_btc_price: f64,
    pub last_updated: DateTime<Utc>,
}
