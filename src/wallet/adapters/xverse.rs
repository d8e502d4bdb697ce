//! Xverse: needs both `window.BitcoinProvider` and `window.StacksProvider`.

use super::{call, first_address, require, sats_or_zero, LiveAccount, WalletAdapter};
use crate::core::paths::globals;
use crate::error::{WalletError, WalletResult};
use crate::wallet::environment::WalletEnvironment;
use crate::wallet::provider::{Network, WalletProvider};
use crate::wallet::session::SessionResponse;
use async_trait::async_trait;
use serde_json::json;

pub struct XverseAdapter;

const PROVIDER: WalletProvider = WalletProvider::Xverse;

#[async_trait]
impl WalletAdapter for XverseAdapter {
    fn provider(&self) -> WalletProvider {
        PROVIDER
    }

    fn is_installed(&self, env: &dyn WalletEnvironment) -> bool {
        env.has_global(globals::XVERSE_BITCOIN) && env.has_global(globals::XVERSE_STACKS)
    }

    async fn connect(&self, env: &dyn WalletEnvironment) -> WalletResult<SessionResponse> {
        if !self.is_installed(env) {
            return Err(WalletError::ProviderNotInstalled(PROVIDER));
        }
        let xverse = require(env, globals::XVERSE_BITCOIN, PROVIDER)?;
        let response = call(&xverse, "connect", json!([])).await?;
        if response.get("status").and_then(|s| s.as_str()) != Some("success") {
            return Err(WalletError::Provider("Failed to connect to Xverse wallet".into()));
        }

        let addresses = call(&xverse, "getAddresses", json!([])).await?;
        let address = first_address(&addresses)
            .ok_or_else(|| WalletError::Provider("Failed to connect to Xverse wallet".into()))?;

        Ok(SessionResponse {
            address: address["address"].as_str().unwrap_or_default().to_string(),
            public_key: Some(address["publicKey"].as_str().unwrap_or_default().to_string()),
            balance: Some(0),
            network: Network::Mainnet,
            connected: true,
            provider: PROVIDER,
        })
    }

    async fn live_account(&self, env: &dyn WalletEnvironment) -> WalletResult<LiveAccount> {
        let Some(xverse) = env.global(globals::XVERSE_BITCOIN) else {
            return Ok(LiveAccount::Missing);
        };
        let addresses = call(&xverse, "getAddresses", json!([])).await?;
        Ok(match first_address(&addresses).and_then(|a| a["address"].as_str()) {
            Some(address) => LiveAccount::Active(address.to_string()),
            None => LiveAccount::Missing,
        })
    }

    async fn balance(&self, env: &dyn WalletEnvironment) -> WalletResult<Option<i64>> {
        let xverse = require(env, globals::XVERSE_BITCOIN, PROVIDER)?;
        let response = call(&xverse, "getBalance", json!([])).await?;
        Ok(Some(sats_or_zero(&response, &["confirmed"])))
    }
}
