//! Wallet session store
//!
//! Owns the single [`WalletSession`], dispatches to the provider adapters,
//! persists the reconnect descriptor and runs the scheduled work:
//!
//! | Task | When | Torn down by |
//! |------|------|--------------|
//! | liveness monitor | every `liveness_interval` while connected | disconnect, reconnect, shutdown |
//! | balance refresh | `refresh_delay` after connect | disconnect, reconnect, shutdown |
//! | error auto-clear | `error_clear_delay` after a failure | next failure, clear, disconnect |
//!
//! Scheduled tasks hold a weak reference, so dropping every store handle
//! stops them. Each session carries an epoch; a balance answer that arrives
//! after a disconnect or reconnect is dropped.

use crate::core::paths;
use crate::core::{Change, Watchers};
use crate::error::{WalletError, WalletResult};
use crate::market::WalletConfig;
use crate::runtime::{spawn_after, spawn_every, TaskHandle};
use crate::storage::SessionStorage;
use crate::wallet::adapters::{adapter_for, LiveAccount};
use crate::wallet::environment::WalletEnvironment;
use crate::wallet::provider::WalletProvider;
use crate::wallet::session::{PersistedSessionDescriptor, TransactionStatus, WalletSession};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::mpsc;

/// Display category of a failed connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    UserRejected,
    ProviderNotInstalled,
    NetworkError,
    Unknown,
}

/// Error shown to the user. `id` ties it to its auto-clear timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayedError {
    pub id: u64,
    pub kind: ErrorKind,
    pub message: String,
}

impl DisplayedError {
    pub fn classify(err: &WalletError, id: u64) -> Self {
        let (kind, message) = match err {
            WalletError::UserRejected => (ErrorKind::UserRejected, err.to_string()),
            WalletError::ProviderNotInstalled(_) => (ErrorKind::ProviderNotInstalled, err.to_string()),
            WalletError::Network(_) => {
                (ErrorKind::NetworkError, "Network error. Please check your connection.".to_string())
            }
            other => (ErrorKind::Unknown, other.to_string()),
        };
        Self { id, kind, message }
    }
}

/// Result of a startup reconnect attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestoreOutcome {
    NothingStored,
    Discarded,
    Expired,
    Restored,
    Failed,
}

/// Entry of the provider picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOption {
    pub provider: WalletProvider,
    pub name: &'static str,
    pub installed: bool,
}

/// Cheap to clone; every clone drives the same session.
#[derive(Clone)]
pub struct WalletStore {
    inner: Arc<Shared>,
}

struct Shared {
    config: WalletConfig,
    env: Arc<dyn WalletEnvironment>,
    storage: Arc<dyn SessionStorage>,
    watchers: Watchers,
    state: Mutex<WalletState>,
}

#[derive(Default)]
struct WalletState {
    session: Option<WalletSession>,
    connecting: bool,
    error: Option<DisplayedError>,
    transactions: Vec<TransactionStatus>,
    failures: HashMap<WalletProvider, u32>,
    epoch: u64,
    error_seq: u64,
    monitor: Option<TaskHandle>,
    refresh: Option<TaskHandle>,
    error_clear: Option<TaskHandle>,
}

impl WalletStore {
    pub fn new(config: WalletConfig, env: Arc<dyn WalletEnvironment>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            inner: Arc::new(Shared {
                config,
                env,
                storage,
                watchers: Watchers::new(),
                state: Mutex::new(WalletState::default()),
            }),
        }
    }

    // Reads

    pub fn session(&self) -> Option<WalletSession> {
        self.state().session.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state().session.as_ref().map(|s| s.connected).unwrap_or(false)
    }

    pub fn short_address(&self) -> String {
        self.state().session.as_ref().map(WalletSession::short_address).unwrap_or_default()
    }

    pub fn balance_btc(&self) -> f64 {
        self.state().session.as_ref().map(WalletSession::balance_btc).unwrap_or(0.0)
    }

    pub fn connecting(&self) -> bool {
        self.state().connecting
    }

    pub fn error(&self) -> Option<DisplayedError> {
        self.state().error.clone()
    }

    pub fn transactions(&self) -> Vec<TransactionStatus> {
        self.state().transactions.clone()
    }

    pub fn failed_attempts(&self, provider: WalletProvider) -> u32 {
        self.state().failures.get(&provider).copied().unwrap_or(0)
    }

    pub fn available_providers(&self) -> &[WalletProvider] {
        &self.inner.config.providers
    }

    pub fn provider_options(&self) -> Vec<ProviderOption> {
        self.available_providers()
            .iter()
            .map(|&provider| ProviderOption {
                provider,
                name: provider.display_name(),
                installed: adapter_for(provider).is_installed(self.env()),
            })
            .collect()
    }

    /// Subscribe to `/wallet/...` changes, e.g. `"/wallet/**"`
    pub fn watch(&self, pattern: &str) -> mpsc::UnboundedReceiver<Change> {
        self.inner.watchers.watch(pattern)
    }

    pub fn watchers(&self) -> &Watchers {
        &self.inner.watchers
    }

    // Actions

    pub async fn connect_by_name(&self, name: &str, persist: bool) -> WalletResult<WalletSession> {
        let provider: WalletProvider = name.parse()?;
        self.connect(provider, persist).await
    }

    pub async fn connect(&self, provider: WalletProvider, persist: bool) -> WalletResult<WalletSession> {
        if !self.inner.config.providers.contains(&provider) {
            return Err(WalletError::UnknownProvider(provider.as_str().to_string()));
        }
        if self.failed_attempts(provider) >= self.inner.config.max_failed_attempts {
            tracing::warn!("Rejecting connect to {}: too many failed attempts", provider);
            let err = WalletError::TooManyAttempts(provider);
            self.show_error(&err);
            return Err(err);
        }

        {
            let mut state = self.state();
            state.connecting = true;
            state.error = None;
            state.error_clear = None;
        }
        self.notify(&[paths::wallet::CONNECTING, paths::wallet::ERROR]);
        tracing::info!("Connecting to {} wallet", provider);

        let result = match adapter_for(provider).connect(self.env()).await {
            Ok(response) => response.validate(provider, &self.inner.config.providers),
            Err(e) => Err(e),
        };

        match result {
            Ok(session) => {
                self.on_connected(session.clone(), persist);
                Ok(session)
            }
            Err(err) => {
                let failures = {
                    let mut state = self.state();
                    let count = state.failures.entry(provider).or_insert(0);
                    *count += 1;
                    *count
                };
                tracing::warn!("Connect to {} failed ({} of {}): {}", provider, failures, self.inner.config.max_failed_attempts, err);
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Always ends disconnected, whatever the adapter or storage say.
    pub async fn disconnect(&self) {
        let provider = self.state().session.as_ref().map(|s| s.provider);
        if let Some(provider) = provider {
            if let Err(e) = adapter_for(provider).disconnect(self.env()).await {
                tracing::warn!("Adapter disconnect for {} failed: {}", provider, e);
            }
        }

        let (monitor, refresh, error_clear) = {
            let mut state = self.state();
            state.session = None;
            state.error = None;
            state.connecting = false;
            state.epoch += 1;
            (state.monitor.take(), state.refresh.take(), state.error_clear.take())
        };
        if let Err(e) = self.inner.storage.remove(paths::storage::WALLET) {
            tracing::warn!("Could not remove stored wallet descriptor: {}", e);
        }
        self.notify(&[paths::wallet::SESSION, paths::wallet::ERROR, paths::wallet::CONNECTING]);
        tracing::info!("Wallet disconnected");

        // May be running inside the monitor; cancel it last.
        drop(error_clear);
        drop(refresh);
        drop(monitor);
    }

    pub async fn restore_from_storage(&self) -> RestoreOutcome {
        self.restore_from_storage_at(Utc::now().timestamp_millis()).await
    }

    pub async fn restore_from_storage_at(&self, now_ms: i64) -> RestoreOutcome {
        let raw = match self.inner.storage.get(paths::storage::WALLET) {
            Ok(Some(raw)) => raw,
            Ok(None) => return RestoreOutcome::NothingStored,
            Err(e) => {
                tracing::warn!("Stored wallet descriptor unreadable: {}", e);
                self.forget_descriptor();
                return RestoreOutcome::Discarded;
            }
        };

        let descriptor = match PersistedSessionDescriptor::parse(&raw, &self.inner.config.providers) {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Discarding stored wallet descriptor: {}", e);
                self.forget_descriptor();
                return RestoreOutcome::Discarded;
            }
        };

        if descriptor.is_expired(now_ms, self.inner.config.max_session_age) {
            tracing::info!("Stored {} session expired", descriptor.provider);
            self.forget_descriptor();
            return RestoreOutcome::Expired;
        }

        match self.connect(descriptor.provider, false).await {
            Ok(_) => RestoreOutcome::Restored,
            Err(e) => {
                tracing::debug!("Silent reconnect to {} failed: {}", descriptor.provider, e);
                RestoreOutcome::Failed
            }
        }
    }

    /// Compare the extension's selected account with the session.
    /// A mismatch disconnects; a failed query does not.
    pub async fn validate_session_live(&self) -> bool {
        let current = {
            let state = self.state();
            state.session.as_ref().map(|s| (s.provider, s.address.clone(), state.epoch))
        };
        let Some((provider, address, epoch)) = current else {
            return false;
        };

        match adapter_for(provider).live_account(self.env()).await {
            Ok(LiveAccount::Untracked) => true,
            Ok(LiveAccount::Active(live)) if live == address => true,
            Ok(_) => {
                let same_session = self.state().epoch == epoch;
                if same_session {
                    tracing::warn!("{} account no longer matches the session, disconnecting", provider);
                    self.disconnect().await;
                }
                false
            }
            Err(e) => {
                tracing::error!("Wallet state validation error: {}", e);
                false
            }
        }
    }

    /// Validate, then fetch the balance with linear backoff. Total failure
    /// keeps the last known balance.
    pub async fn refresh_balance(&self) {
        let current = {
            let state = self.state();
            state.session.as_ref().map(|s| (s.provider, state.epoch))
        };
        let Some((provider, epoch)) = current else {
            return;
        };
        if !self.validate_session_live().await {
            return;
        }

        let attempts = self.inner.config.balance_attempts.max(1);
        for attempt in 1..=attempts {
            match adapter_for(provider).balance(self.env()).await {
                Ok(balance) => {
                    self.apply_balance(epoch, balance);
                    return;
                }
                Err(e) => {
                    tracing::warn!("Balance update attempt {} failed: {}", attempt, e);
                    if attempt < attempts {
                        tokio::time::sleep(self.inner.config.retry_backoff * attempt).await;
                    }
                }
            }
        }
        tracing::error!("Failed to update balance after {} attempts", attempts);
    }

    /// Validate and, when the session went stale, reconnect without
    /// persisting. Returns whether a live session remains.
    pub async fn recover_connection(&self) -> bool {
        let Some(provider) = self.state().session.as_ref().map(|s| s.provider) else {
            return false;
        };
        if self.validate_session_live().await {
            return true;
        }
        match self.connect(provider, false).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("Connection recovery failed: {}", e);
                self.disconnect().await;
                false
            }
        }
    }

    /// `accountsChanged` from an extension. Returns true when it ended the session.
    pub async fn handle_accounts_changed(&self, provider: WalletProvider, accounts: &[String]) -> bool {
        let stale = match self.state().session.as_ref() {
            Some(s) if s.provider == provider => accounts.first().map(|a| a != &s.address).unwrap_or(true),
            _ => false,
        };
        if stale {
            tracing::warn!("Account change detected for {}", provider);
            self.disconnect().await;
        }
        stale
    }

    pub async fn sign_message(&self, message: &str) -> WalletResult<String> {
        let provider = self.active_provider()?;
        adapter_for(provider).sign_message(self.env(), message).await
    }

    pub async fn send_bitcoin(&self, to: &str, amount_sats: u64) -> WalletResult<String> {
        let provider = self.active_provider()?;
        let txid = adapter_for(provider).send_bitcoin(self.env(), to, amount_sats).await?;
        tracing::info!("Sent {} sats to {}: {}", amount_sats, to, txid);
        self.state().transactions.push(TransactionStatus::pending(txid.clone()));
        self.notify(&[paths::wallet::TRANSACTIONS]);
        Ok(txid)
    }

    pub fn clear_error(&self) {
        let handle = {
            let mut state = self.state();
            state.error = None;
            state.error_clear.take()
        };
        drop(handle);
        self.notify(&[paths::wallet::ERROR]);
    }

    /// Cancel every scheduled task; the session itself is kept.
    pub fn shutdown(&self) {
        let handles = {
            let mut state = self.state();
            [state.error_clear.take(), state.refresh.take(), state.monitor.take()]
        };
        for handle in handles.into_iter().flatten() {
            handle.cancel();
        }
    }

    // Internals

    fn on_connected(&self, session: WalletSession, persist: bool) {
        let provider = session.provider;
        if persist {
            let descriptor = PersistedSessionDescriptor::new(provider, &session.address, Utc::now().timestamp_millis());
            if let Err(e) = self.inner.storage.set(paths::storage::WALLET, &descriptor.to_json()) {
                tracing::warn!("Could not persist wallet descriptor: {}", e);
            }
        }

        let monitor = self.spawn_monitor();
        let refresh = self.inner.config.refresh_delay.map(|delay| self.spawn_refresh(delay));
        let replaced = {
            let mut state = self.state();
            state.epoch += 1;
            state.session = Some(session.clone());
            state.connecting = false;
            state.failures.remove(&provider);
            (state.monitor.replace(monitor), std::mem::replace(&mut state.refresh, refresh))
        };
        drop(replaced);

        tracing::info!("Connected {} wallet {}", provider, session.short_address());
        self.notify(&[paths::wallet::SESSION, paths::wallet::CONNECTING]);
    }

    fn apply_balance(&self, epoch: u64, balance: Option<i64>) {
        let applied = {
            let mut state = self.state();
            let current = state.epoch == epoch;
            match (state.session.as_mut(), balance) {
                (Some(session), Some(sats)) if current && sats >= 0 => {
                    session.balance_sats = sats as u64;
                    true
                }
                _ => false,
            }
        };
        if applied {
            self.notify(&[paths::wallet::BALANCE]);
        } else if balance.is_some() {
            tracing::debug!("Dropping balance answer for a stale or missing session");
        }
    }

    fn show_error(&self, err: &WalletError) {
        let weak = self.weak();
        let delay = self.inner.config.error_clear_delay;
        {
            let mut state = self.state();
            state.error_seq += 1;
            let id = state.error_seq;
            state.error = Some(DisplayedError::classify(err, id));
            state.connecting = false;
            state.error_clear = Some(spawn_after(delay, move || async move {
                if let Some(store) = WalletStore::upgrade(&weak) {
                    store.clear_error_if(id);
                }
            }));
        }
        self.notify(&[paths::wallet::ERROR, paths::wallet::CONNECTING]);
    }

    fn clear_error_if(&self, id: u64) {
        let cleared = {
            let mut state = self.state();
            if state.error.as_ref().map(|e| e.id) == Some(id) {
                state.error = None;
                true
            } else {
                false
            }
        };
        if cleared {
            self.notify(&[paths::wallet::ERROR]);
        }
    }

    fn spawn_monitor(&self) -> TaskHandle {
        let weak = self.weak();
        spawn_every(self.inner.config.liveness_interval, move || {
            let store = WalletStore::upgrade(&weak);
            async move {
                if let Some(store) = store {
                    if store.is_connected() && !store.validate_session_live().await {
                        tracing::warn!("Security: wallet state validation failed");
                    }
                }
            }
        })
    }

    fn spawn_refresh(&self, delay: std::time::Duration) -> TaskHandle {
        let weak = self.weak();
        spawn_after(delay, move || async move {
            if let Some(store) = WalletStore::upgrade(&weak) {
                store.refresh_balance().await;
            }
        })
    }

    fn forget_descriptor(&self) {
        if let Err(e) = self.inner.storage.remove(paths::storage::WALLET) {
            tracing::warn!("Could not remove stored wallet descriptor: {}", e);
        }
    }

    fn active_provider(&self) -> WalletResult<WalletProvider> {
        self.state().session.as_ref().map(|s| s.provider).ok_or(WalletError::NotConnected)
    }

    fn notify(&self, topics: &[&'static str]) {
        for &topic in topics {
            self.inner.watchers.notify(topic);
        }
    }

    fn env(&self) -> &dyn WalletEnvironment {
        self.inner.env.as_ref()
    }

    fn weak(&self) -> Weak<Shared> {
        Arc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<Shared>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    fn state(&self) -> MutexGuard<'_, WalletState> {
        self.inner.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}
