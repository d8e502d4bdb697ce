//! Market Configuration - passed from higher layers

use crate::wallet::WalletProvider;
use std::time::Duration;

/// Marketplace configuration. The CLI builds this from the environment,
/// tests build it directly.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub app: String,
    pub wallet: WalletConfig,
    pub catalog: CatalogConfig,
    /// Attempt a silent reconnect from the stored descriptor on start
    pub restore_session: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            app: "bitbasel".into(),
            wallet: WalletConfig::default(),
            catalog: CatalogConfig::default(),
            restore_session: true,
        }
    }
}

impl MarketConfig {
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into(), ..Default::default() }
    }
    pub fn with_wallet(mut self, c: WalletConfig) -> Self { self.wallet = c; self }
    pub fn with_catalog(mut self, c: CatalogConfig) -> Self { self.catalog = c; self }
    pub fn without_restore(mut self) -> Self { self.restore_session = false; self }

    /// `BITBASEL_APP`, `BITBASEL_PROVIDERS` (comma separated tags),
    /// `BITBASEL_LIVENESS_SECS`. Unknown provider tags are skipped.
    pub fn from_env() -> Self {
        let mut config = Self::new(std::env::var("BITBASEL_APP").unwrap_or_else(|_| "bitbasel".into()));
        if let Ok(raw) = std::env::var("BITBASEL_PROVIDERS") {
            config.wallet.providers = parse_providers(&raw);
        }
        if let Some(secs) = std::env::var("BITBASEL_LIVENESS_SECS").ok().and_then(|v| v.trim().parse().ok()) {
            config.wallet.liveness_interval = Duration::from_secs(secs);
        }
        config
    }
}

fn parse_providers(raw: &str) -> Vec<WalletProvider> {
    let mut providers = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match WalletProvider::from_tag(tag) {
            Some(p) if !providers.contains(&p) => providers.push(p),
            Some(_) => {}
            None => tracing::warn!("Ignoring unknown provider '{}' in BITBASEL_PROVIDERS", tag),
        }
    }
    providers
}

/// Wallet session timing and provider set
#[derive(Debug, Clone)]
pub struct WalletConfig {
    pub providers: Vec<WalletProvider>,
    pub liveness_interval: Duration,
    /// Balance refresh after a successful connect; `None` disables it
    pub refresh_delay: Option<Duration>,
    pub error_clear_delay: Duration,
    pub max_session_age: Duration,
    pub max_failed_attempts: u32,
    pub balance_attempts: u32,
    /// Sleep between balance attempts is `attempt * retry_backoff`
    pub retry_backoff: Duration,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            providers: WalletProvider::ALL.to_vec(),
            liveness_interval: Duration::from_secs(30),
            refresh_delay: Some(Duration::from_secs(1)),
            error_clear_delay: Duration::from_secs(5),
            max_session_age: Duration::from_secs(24 * 60 * 60),
            max_failed_attempts: 3,
            balance_attempts: 3,
            retry_backoff: Duration::from_secs(1),
        }
    }
}

impl WalletConfig {
    pub fn with_providers(mut self, providers: impl Into<Vec<WalletProvider>>) -> Self { self.providers = providers.into(); self }
    pub fn with_liveness_interval(mut self, d: Duration) -> Self { self.liveness_interval = d; self }
    pub fn with_refresh_delay(mut self, d: Option<Duration>) -> Self { self.refresh_delay = d; self }
    pub fn with_error_clear_delay(mut self, d: Duration) -> Self { self.error_clear_delay = d; self }
    pub fn with_max_session_age(mut self, d: Duration) -> Self { self.max_session_age = d; self }
}

/// Simulated latency of the mock catalog source
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub inscriptions_delay: Duration,
    pub collections_delay: Duration,
    pub galleries_delay: Duration,
    pub stats_delay: Duration,
    pub prices_delay: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            inscriptions_delay: Duration::from_millis(1000),
            collections_delay: Duration::from_millis(800),
            galleries_delay: Duration::from_millis(500),
            stats_delay: Duration::from_millis(300),
            prices_delay: Duration::from_millis(200),
        }
    }
}

impl CatalogConfig {
    /// No simulated latency (CLI one-shots)
    pub fn instant() -> Self {
        Self {
            inscriptions_delay: Duration::ZERO,
            collections_delay: Duration::ZERO,
            galleries_delay: Duration::ZERO,
            stats_delay: Duration::ZERO,
            prices_delay: Duration::ZERO,
        }
    }
}
