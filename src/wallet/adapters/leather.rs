//! Leather: `window.LeatherProvider`, RPC-style `request(method)`.
//! No balance path.

use super::{call, first_address, require, WalletAdapter};
use crate::core::paths::globals;
use crate::error::{WalletError, WalletResult};
use crate::wallet::environment::WalletEnvironment;
use crate::wallet::provider::{Network, WalletProvider};
use crate::wallet::session::SessionResponse;
use async_trait::async_trait;
use serde_json::json;

pub struct LeatherAdapter;

const PROVIDER: WalletProvider = WalletProvider::Leather;

#[async_trait]
impl WalletAdapter for LeatherAdapter {
    fn provider(&self) -> WalletProvider {
        PROVIDER
    }

    fn is_installed(&self, env: &dyn WalletEnvironment) -> bool {
        env.has_global(globals::LEATHER)
    }

    async fn connect(&self, env: &dyn WalletEnvironment) -> WalletResult<SessionResponse> {
        let leather = require(env, globals::LEATHER, PROVIDER)?;
        let response = call(&leather, "request", json!(["getAddresses"])).await?;
        let address = first_address(&response)
            .ok_or_else(|| WalletError::Provider("Failed to connect to Leather wallet".into()))?;

        Ok(SessionResponse {
            address: address["address"].as_str().unwrap_or_default().to_string(),
            public_key: Some(address["publicKey"].as_str().unwrap_or_default().to_string()),
            balance: Some(0),
            network: Network::Mainnet,
            connected: true,
            provider: PROVIDER,
        })
    }
}
