//! Unisat: `window.unisat`. The only provider that signs and sends.

use super::{call, first_str, require, LiveAccount, WalletAdapter};
use crate::core::paths::globals;
use crate::error::{WalletError, WalletResult};
use crate::wallet::environment::WalletEnvironment;
use crate::wallet::provider::{Network, WalletProvider};
use crate::wallet::session::SessionResponse;
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct UnisatAdapter;

const PROVIDER: WalletProvider = WalletProvider::Unisat;

#[async_trait]
impl WalletAdapter for UnisatAdapter {
    fn provider(&self) -> WalletProvider {
        PROVIDER
    }

    fn is_installed(&self, env: &dyn WalletEnvironment) -> bool {
        env.has_global(globals::UNISAT)
    }

    async fn connect(&self, env: &dyn WalletEnvironment) -> WalletResult<SessionResponse> {
        let unisat = require(env, globals::UNISAT, PROVIDER)?;
        let accounts = call(&unisat, "requestAccounts", json!([])).await?;
        let public_key = call(&unisat, "getPublicKey", json!([])).await?;
        let balance = call(&unisat, "getBalance", json!([])).await?;
        let network = call(&unisat, "getNetwork", json!([])).await?;

        Ok(SessionResponse {
            address: first_str(&accounts).unwrap_or_default().to_string(),
            public_key: public_key.as_str().map(str::to_string),
            balance: balance.get("confirmed").and_then(super::as_sats),
            network: Network::from_extension(network.as_str().unwrap_or_default()),
            connected: true,
            provider: PROVIDER,
        })
    }

    async fn disconnect(&self, env: &dyn WalletEnvironment) -> WalletResult<()> {
        // Nothing to tell an extension that is already gone.
        if let Some(unisat) = env.global(globals::UNISAT) {
            call(&unisat, "disconnect", json!([])).await?;
        }
        Ok(())
    }

    async fn live_account(&self, env: &dyn WalletEnvironment) -> WalletResult<LiveAccount> {
        let Some(unisat) = env.global(globals::UNISAT) else {
            return Ok(LiveAccount::Missing);
        };
        let accounts = call(&unisat, "getAccounts", json!([])).await?;
        Ok(match first_str(&accounts) {
            Some(address) => LiveAccount::Active(address.to_string()),
            None => LiveAccount::Missing,
        })
    }

    async fn balance(&self, env: &dyn WalletEnvironment) -> WalletResult<Option<i64>> {
        let unisat = require(env, globals::UNISAT, PROVIDER)?;
        let balance = call(&unisat, "getBalance", json!([])).await?;
        Ok(balance.get("confirmed").and_then(super::as_sats))
    }

    async fn sign_message(&self, env: &dyn WalletEnvironment, message: &str) -> WalletResult<String> {
        let unisat = require(env, globals::UNISAT, PROVIDER)?;
        let signature = call(&unisat, "signMessage", json!([message])).await?;
        string_result(signature, "signature")
    }

    async fn send_bitcoin(&self, env: &dyn WalletEnvironment, to: &str, amount_sats: u64) -> WalletResult<String> {
        let unisat = require(env, globals::UNISAT, PROVIDER)?;
        let txid = call(&unisat, "sendBitcoin", json!([to, amount_sats])).await?;
        string_result(txid, "txid")
    }
}

fn string_result(value: Value, what: &str) -> WalletResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| WalletError::Provider(format!("unisat returned no {}", what)))
}
