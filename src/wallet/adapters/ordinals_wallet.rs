//! Ordinals Wallet: `window.ordinalsWallet`

use super::{call, first_str, require, sats_or_zero, WalletAdapter};
use crate::core::paths::globals;
use crate::error::WalletResult;
use crate::wallet::environment::WalletEnvironment;
use crate::wallet::provider::{Network, WalletProvider};
use crate::wallet::session::SessionResponse;
use async_trait::async_trait;
use serde_json::json;

pub struct OrdinalsWalletAdapter;

const PROVIDER: WalletProvider = WalletProvider::OrdinalsWallet;

#[async_trait]
impl WalletAdapter for OrdinalsWalletAdapter {
    fn provider(&self) -> WalletProvider {
        PROVIDER
    }

    fn is_installed(&self, env: &dyn WalletEnvironment) -> bool {
        env.has_global(globals::ORDINALS_WALLET)
    }

    async fn connect(&self, env: &dyn WalletEnvironment) -> WalletResult<SessionResponse> {
        let wallet = require(env, globals::ORDINALS_WALLET, PROVIDER)?;
        let accounts = call(&wallet, "requestAccounts", json!([])).await?;
        let public_key = call(&wallet, "getPublicKey", json!([])).await?;
        let network = call(&wallet, "getNetwork", json!([])).await?;

        Ok(SessionResponse {
            address: first_str(&accounts).unwrap_or_default().to_string(),
            public_key: public_key.as_str().map(str::to_string),
            balance: Some(0),
            network: Network::from_extension(network.as_str().unwrap_or_default()),
            connected: true,
            provider: PROVIDER,
        })
    }

    async fn balance(&self, env: &dyn WalletEnvironment) -> WalletResult<Option<i64>> {
        let wallet = require(env, globals::ORDINALS_WALLET, PROVIDER)?;
        let balance = call(&wallet, "getBalance", json!([])).await?;
        Ok(Some(sats_or_zero(&balance, &["confirmed", "total"])))
    }
}
