//! Phantom: `window.phantom.bitcoin`. No balance path.

use super::{call, require, WalletAdapter};
use crate::core::paths::globals;
use crate::error::{WalletError, WalletResult};
use crate::wallet::environment::WalletEnvironment;
use crate::wallet::provider::{Network, WalletProvider};
use crate::wallet::session::SessionResponse;
use async_trait::async_trait;
use serde_json::json;

pub struct PhantomAdapter;

const PROVIDER: WalletProvider = WalletProvider::Phantom;

#[async_trait]
impl WalletAdapter for PhantomAdapter {
    fn provider(&self) -> WalletProvider {
        PROVIDER
    }

    fn is_installed(&self, env: &dyn WalletEnvironment) -> bool {
        env.has_global(globals::PHANTOM_BITCOIN)
    }

    async fn connect(&self, env: &dyn WalletEnvironment) -> WalletResult<SessionResponse> {
        let phantom = require(env, globals::PHANTOM_BITCOIN, PROVIDER)?;
        let response = call(&phantom, "connect", json!([])).await?;
        let address = response
            .get("address")
            .and_then(|a| a.as_str())
            .filter(|a| !a.is_empty())
            .ok_or_else(|| WalletError::Provider("Failed to connect to Phantom wallet".into()))?;

        Ok(SessionResponse {
            address: address.to_string(),
            public_key: Some(response["publicKey"].as_str().unwrap_or_default().to_string()),
            balance: Some(0),
            network: Network::Mainnet,
            connected: true,
            provider: PROVIDER,
        })
    }
}
