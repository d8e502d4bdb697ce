//! Wallet adapters: one per provider, selected by [`adapter_for`].
//!
//! Capabilities are asymmetric on purpose. Only Unisat signs and sends;
//! Leather and Phantom have no balance path; only Unisat and Xverse can
//! report the account currently selected in the extension.

mod leather;
mod ordinals_wallet;
mod phantom;
mod unisat;
mod xverse;

pub use leather::LeatherAdapter;
pub use ordinals_wallet::OrdinalsWalletAdapter;
pub use phantom::PhantomAdapter;
pub use unisat::UnisatAdapter;
pub use xverse::XverseAdapter;

use crate::error::{WalletError, WalletResult};
use crate::wallet::environment::{InjectedProvider, WalletEnvironment};
use crate::wallet::provider::WalletProvider;
use crate::wallet::session::SessionResponse;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Account the extension currently has selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveAccount {
    Active(String),
    Missing,
    /// The provider offers no way to ask
    Untracked,
}

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn provider(&self) -> WalletProvider;

    fn is_installed(&self, env: &dyn WalletEnvironment) -> bool;

    async fn connect(&self, env: &dyn WalletEnvironment) -> WalletResult<SessionResponse>;

    async fn disconnect(&self, _env: &dyn WalletEnvironment) -> WalletResult<()> {
        Ok(())
    }

    async fn live_account(&self, _env: &dyn WalletEnvironment) -> WalletResult<LiveAccount> {
        Ok(LiveAccount::Untracked)
    }

    /// `Ok(None)` leaves the stored balance as it is
    async fn balance(&self, _env: &dyn WalletEnvironment) -> WalletResult<Option<i64>> {
        Ok(None)
    }

    async fn sign_message(&self, _env: &dyn WalletEnvironment, _message: &str) -> WalletResult<String> {
        Err(WalletError::UnsupportedOperation { provider: self.provider(), operation: "Signing" })
    }

    async fn send_bitcoin(&self, _env: &dyn WalletEnvironment, _to: &str, _amount_sats: u64) -> WalletResult<String> {
        Err(WalletError::UnsupportedOperation { provider: self.provider(), operation: "Transaction" })
    }
}

static UNISAT: UnisatAdapter = UnisatAdapter;
static XVERSE: XverseAdapter = XverseAdapter;
static ORDINALS_WALLET: OrdinalsWalletAdapter = OrdinalsWalletAdapter;
static LEATHER: LeatherAdapter = LeatherAdapter;
static PHANTOM: PhantomAdapter = PhantomAdapter;

pub fn adapter_for(provider: WalletProvider) -> &'static dyn WalletAdapter {
    match provider {
        WalletProvider::Unisat => &UNISAT,
        WalletProvider::Xverse => &XVERSE,
        WalletProvider::OrdinalsWallet => &ORDINALS_WALLET,
        WalletProvider::Leather => &LEATHER,
        WalletProvider::Phantom => &PHANTOM,
    }
}

fn require(env: &dyn WalletEnvironment, global: &str, provider: WalletProvider) -> WalletResult<Arc<dyn InjectedProvider>> {
    env.global(global).ok_or(WalletError::ProviderNotInstalled(provider))
}

async fn call(target: &Arc<dyn InjectedProvider>, method: &str, params: Value) -> WalletResult<Value> {
    Ok(target.call(method, params).await?)
}

fn first_str(v: &Value) -> Option<&str> {
    v.as_array().and_then(|a| a.first()).and_then(Value::as_str)
}

fn as_sats(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().map(|f| f as i64))
}

/// JS `a || b || 0` over numeric fields: zero and absent fall through.
fn sats_or_zero(v: &Value, keys: &[&str]) -> i64 {
    keys.iter()
        .filter_map(|k| v.get(*k).and_then(as_sats))
        .find(|n| *n != 0)
        .unwrap_or(0)
}

/// `result.addresses[0]` of the address-listing responses
fn first_address(v: &Value) -> Option<&Value> {
    v.get("result")?.get("addresses")?.as_array()?.first()
}
