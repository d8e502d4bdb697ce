//! Session records: the live session, the raw adapter response it is
//! validated from, and the descriptor persisted for silent reconnection.

use crate::core::paths::storage;
use crate::error::{WalletError, WalletResult};
use crate::wallet::provider::{Network, WalletProvider};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const SATS_PER_BTC: u64 = 100_000_000;

/// Largest integer a JS number holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: String,
    pub public_key: String,
    pub balance_sats: u64,
    pub network: Network,
    pub connected: bool,
    pub provider: WalletProvider,
}

impl WalletSession {
    /// `bc1qxy...0wlh`
    pub fn short_address(&self) -> String {
        short_address(&self.address)
    }

    pub fn balance_btc(&self) -> f64 {
        self.balance_sats as f64 / SATS_PER_BTC as f64
    }
}

pub fn short_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// What an adapter hands back from `connect`, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResponse {
    pub address: String,
    pub public_key: Option<String>,
    pub balance: Option<i64>,
    pub network: Network,
    pub connected: bool,
    pub provider: WalletProvider,
}

impl SessionResponse {
    pub fn validate(self, expected: WalletProvider, enabled: &[WalletProvider]) -> WalletResult<WalletSession> {
        let invalid = |reason: String| Err(WalletError::InvalidSessionResponse(reason));
        if self.address.is_empty() {
            return invalid("empty address".into());
        }
        let Some(public_key) = self.public_key else {
            return invalid("missing public key".into());
        };
        let balance_sats = match self.balance {
            Some(b) if b >= 0 => b as u64,
            Some(b) => return invalid(format!("negative balance {}", b)),
            None => return invalid("missing balance".into()),
        };
        if self.provider != expected || !enabled.contains(&self.provider) {
            return invalid(format!("unexpected provider {}", self.provider));
        }
        Ok(WalletSession {
            address: self.address,
            public_key,
            balance_sats,
            network: self.network,
            connected: self.connected,
            provider: self.provider,
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("corrupted descriptor: {0}")]
    Corrupt(String),

    #[error("invalid descriptor: {0}")]
    Invalid(&'static str),
}

/// Stored under `bitbasel_wallet`: `{provider, address, timestamp, version}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSessionDescriptor {
    pub provider: WalletProvider,
    pub address: String,
    pub timestamp: Option<i64>,
    pub version: String,
}

impl PersistedSessionDescriptor {
    pub fn new(provider: WalletProvider, address: impl Into<String>, now_ms: i64) -> Self {
        Self {
            provider,
            address: address.into(),
            timestamp: Some(now_ms),
            version: storage::DESCRIPTOR_VERSION.to_string(),
        }
    }

    /// Structural validation of whatever storage held. A provider outside
    /// `known` is treated the same as a malformed record.
    pub fn parse(raw: &str, known: &[WalletProvider]) -> Result<Self, DescriptorError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| DescriptorError::Corrupt(e.to_string()))?;
        let obj = value.as_object().ok_or(DescriptorError::Invalid("not an object"))?;

        let provider = obj
            .get("provider")
            .and_then(Value::as_str)
            .and_then(WalletProvider::from_tag)
            .filter(|p| known.contains(p))
            .ok_or(DescriptorError::Invalid("unknown provider"))?;

        let address = obj
            .get("address")
            .and_then(Value::as_str)
            .filter(|a| !a.is_empty())
            .ok_or(DescriptorError::Invalid("missing address"))?;

        let timestamp = match obj.get("timestamp") {
            None | Some(Value::Null) => None,
            Some(v) => {
                let ms = v.as_f64().ok_or(DescriptorError::Invalid("timestamp not a number"))?;
                if !ms.is_finite() || ms.abs() > MAX_SAFE_INTEGER {
                    return Err(DescriptorError::Invalid("timestamp out of range"));
                }
                Some(ms as i64)
            }
        };

        let version = obj
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(storage::DESCRIPTOR_VERSION)
            .to_string();

        Ok(Self { provider, address: address.to_string(), timestamp, version })
    }

    /// Records without a timestamp are as old as the epoch.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp.unwrap_or(0))
    }

    pub fn is_expired(&self, now_ms: i64, max_age: Duration) -> bool {
        self.age_ms(now_ms) > max_age.as_millis() as i64
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({
            "provider": self.provider.as_str(),
            "address": self.address,
            "timestamp": self.timestamp,
            "version": self.version,
        })
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxState {
    Pending,
    Confirmed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub txid: String,
    pub status: TxState,
    pub confirmations: u32,
    pub timestamp: DateTime<Utc>,
}

impl TransactionStatus {
    pub fn pending(txid: impl Into<String>) -> Self {
        Self { txid: txid.into(), status: TxState::Pending, confirmations: 0, timestamp: Utc::now() }
    }
}
