//! Wallet session store: connect, throttling, restore, liveness, balance
//! refresh and the scheduled timers.
//!
//! Time is paused, so the 1s/5s/30s timers and the retry backoff run
//! instantly and deterministically.

use bitbasel::core::paths;
use bitbasel::storage::{MemoryStorage, SessionStorage};
use bitbasel::wallet::{
    ErrorKind, PersistedSessionDescriptor, RestoreOutcome, ScriptedEnvironment, ScriptedProvider, ScriptedReply,
    TxState, WalletStore,
};
use bitbasel::{WalletConfig, WalletError, WalletProvider};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

const ADDRESS: &str = "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh";
const OTHER: &str = "bc1qab2cd3ef4gh5ij6kl7mn8op9qr0st1uv2wx3yz4";
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn ok(value: serde_json::Value) -> ScriptedReply {
    ScriptedReply::ok(value)
}

fn unisat(address: &str, balance: i64) -> ScriptedProvider {
    ScriptedProvider::new()
        .on("requestAccounts", ok(json!([address])))
        .on("getAccounts", ok(json!([address])))
        .on("getPublicKey", ok(json!("02abcdef")))
        .on("getBalance", ok(json!({"confirmed": balance, "unconfirmed": 0, "total": balance})))
        .on("getNetwork", ok(json!("livenet")))
        .on("disconnect", ok(json!(null)))
        .on("signMessage", ok(json!("H+signature")))
        .on("sendBitcoin", ok(json!("f00dtx")))
}

fn leather(address: &str) -> ScriptedProvider {
    ScriptedProvider::new().on(
        "request",
        ok(json!({"result": {"addresses": [{"address": address, "publicKey": "03ff"}]}})),
    )
}

struct Harness {
    env: Arc<ScriptedEnvironment>,
    storage: Arc<MemoryStorage>,
    store: WalletStore,
}

fn harness(config: WalletConfig) -> Harness {
    let env = Arc::new(ScriptedEnvironment::new());
    let storage = Arc::new(MemoryStorage::new());
    let store = WalletStore::new(config, env.clone(), storage.clone());
    Harness { env, storage, store }
}

/// No automatic post-connect refresh, so call counts stay exact
fn quiet() -> WalletConfig {
    WalletConfig::default().with_refresh_delay(None)
}

fn stored(h: &Harness) -> Option<String> {
    h.storage.get(paths::storage::WALLET).unwrap()
}

// =============================================================================
// Connect
// =============================================================================

#[tokio::test(start_paused = true)]
async fn connect_persists_descriptor_and_session() {
    let h = harness(quiet());
    h.env.install("unisat", unisat(ADDRESS, 15_000));

    let session = h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    assert_eq!(session.address, ADDRESS);
    assert_eq!(session.balance_sats, 15_000);
    assert!(h.store.is_connected());
    assert!(!h.store.connecting());
    assert_eq!(h.store.short_address(), "bc1qxy...0wlh");
    assert!((h.store.balance_btc() - 0.00015).abs() < 1e-12);

    let raw = stored(&h).expect("descriptor written");
    let descriptor = PersistedSessionDescriptor::parse(&raw, &WalletProvider::ALL).unwrap();
    assert_eq!(descriptor.provider, WalletProvider::Unisat);
    assert_eq!(descriptor.address, ADDRESS);
    assert_eq!(descriptor.version, "1.0");
    assert!(descriptor.timestamp.is_some());
}

#[tokio::test(start_paused = true)]
async fn non_persisting_connect_leaves_storage_alone() {
    let h = harness(quiet());
    h.env.install("LeatherProvider", leather(OTHER));

    h.store.connect(WalletProvider::Leather, false).await.unwrap();
    assert!(h.store.is_connected());
    assert_eq!(stored(&h), None);
}

#[tokio::test(start_paused = true)]
async fn unknown_provider_changes_nothing() {
    let h = harness(quiet());
    h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    let before = h.store.session();
    let stored_before = stored(&h);

    for name in ["sparrow", "metamask", "", "UNISAT"] {
        let err = h.store.connect_by_name(name, true).await.unwrap_err();
        assert_eq!(err, WalletError::UnknownProvider(name.to_string()));
    }
    assert_eq!(h.store.session(), before);
    assert_eq!(stored(&h), stored_before);
    assert!(h.store.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn missing_extension_is_classified() {
    let h = harness(quiet());
    let err = h.store.connect(WalletProvider::Phantom, true).await.unwrap_err();
    assert_eq!(err, WalletError::ProviderNotInstalled(WalletProvider::Phantom));

    let shown = h.store.error().unwrap();
    assert_eq!(shown.kind, ErrorKind::ProviderNotInstalled);
    assert_eq!(shown.message, "Phantom wallet not found. Please install the extension.");
    assert!(!h.store.connecting());
    assert_eq!(h.store.failed_attempts(WalletProvider::Phantom), 1);
}

#[tokio::test(start_paused = true)]
async fn malformed_response_is_rejected() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 10));
    provider.set("getBalance", ok(json!({"confirmed": -1})));

    let err = h.store.connect(WalletProvider::Unisat, true).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidSessionResponse(_)));
    assert!(h.store.session().is_none());
    assert_eq!(stored(&h), None);
}

// =============================================================================
// Throttling
// =============================================================================

#[tokio::test(start_paused = true)]
async fn fourth_attempt_never_reaches_the_adapter() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 10));
    provider.set("requestAccounts", ScriptedReply::err("User rejected the request."));

    for attempt in 1..=3 {
        let err = h.store.connect(WalletProvider::Unisat, true).await.unwrap_err();
        assert_eq!(err, WalletError::UserRejected);
        assert_eq!(h.store.failed_attempts(WalletProvider::Unisat), attempt);
    }
    assert_eq!(provider.calls("requestAccounts"), 3);

    let err = h.store.connect(WalletProvider::Unisat, true).await.unwrap_err();
    assert_eq!(err, WalletError::TooManyAttempts(WalletProvider::Unisat));
    assert_eq!(provider.calls("requestAccounts"), 3);

    // Other providers are counted separately
    h.env.install("LeatherProvider", leather(OTHER));
    assert!(h.store.connect(WalletProvider::Leather, false).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn success_resets_the_failure_counter() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 10));
    provider.push("requestAccounts", ScriptedReply::err("Network request failed"));
    provider.push("requestAccounts", ScriptedReply::err("Network request failed"));

    for _ in 0..2 {
        assert!(matches!(
            h.store.connect(WalletProvider::Unisat, true).await,
            Err(WalletError::Network(_))
        ));
    }
    assert_eq!(h.store.error().unwrap().kind, ErrorKind::NetworkError);
    assert_eq!(h.store.failed_attempts(WalletProvider::Unisat), 2);

    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    assert_eq!(h.store.failed_attempts(WalletProvider::Unisat), 0);
    assert!(h.store.error().is_none());
}

// =============================================================================
// Restore
// =============================================================================

fn seed_descriptor(h: &Harness, provider: WalletProvider, timestamp: i64) {
    let descriptor = PersistedSessionDescriptor::new(provider, ADDRESS, timestamp);
    h.storage.set(paths::storage::WALLET, &descriptor.to_json()).unwrap();
}

#[tokio::test(start_paused = true)]
async fn descriptor_just_under_a_day_reconnects() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 500));
    seed_descriptor(&h, WalletProvider::Unisat, 0);

    let outcome = h.store.restore_from_storage_at(DAY_MS - 1).await;
    assert_eq!(outcome, RestoreOutcome::Restored);
    assert_eq!(provider.calls("requestAccounts"), 1);
    assert_eq!(h.store.session().unwrap().address, ADDRESS);
    // silent reconnect does not rewrite the record
    let kept = PersistedSessionDescriptor::parse(&stored(&h).unwrap(), &WalletProvider::ALL).unwrap();
    assert_eq!(kept.timestamp, Some(0));
}

#[tokio::test(start_paused = true)]
async fn descriptor_just_over_a_day_is_discarded() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 500));
    seed_descriptor(&h, WalletProvider::Unisat, 0);

    let outcome = h.store.restore_from_storage_at(DAY_MS + 1).await;
    assert_eq!(outcome, RestoreOutcome::Expired);
    assert_eq!(provider.calls("requestAccounts"), 0);
    assert!(h.store.session().is_none());
    assert_eq!(stored(&h), None);
}

#[tokio::test(start_paused = true)]
async fn corrupt_or_foreign_descriptors_are_removed() {
    for raw in [
        "{not json",
        r#"{"provider":"sparrow","address":"bc1q","timestamp":1}"#,
        r#"{"provider":"unisat","address":"","timestamp":1}"#,
        r#"{"provider":"unisat","address":"bc1q","timestamp":"now"}"#,
    ] {
        let h = harness(quiet());
        let provider = h.env.install("unisat", unisat(ADDRESS, 1));
        h.storage.set(paths::storage::WALLET, raw).unwrap();

        assert_eq!(h.store.restore_from_storage_at(1_000).await, RestoreOutcome::Discarded, "{raw}");
        assert_eq!(stored(&h), None);
        assert_eq!(provider.calls("requestAccounts"), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn out_of_range_timestamps_are_discarded() {
    for raw in [
        r#"{"provider":"unisat","address":"bc1q","timestamp":-1e300}"#,
        r#"{"provider":"unisat","address":"bc1q","timestamp":1e300}"#,
    ] {
        let h = harness(quiet());
        let provider = h.env.install("unisat", unisat(ADDRESS, 1));
        h.storage.set(paths::storage::WALLET, raw).unwrap();

        assert_eq!(h.store.restore_from_storage_at(1_000).await, RestoreOutcome::Discarded, "{raw}");
        assert_eq!(stored(&h), None);
        assert_eq!(provider.calls("requestAccounts"), 0);
        assert!(h.store.session().is_none());
    }
}

#[tokio::test(start_paused = true)]
async fn failed_silent_reconnect_is_swallowed() {
    let h = harness(quiet());
    seed_descriptor(&h, WalletProvider::Unisat, 0);

    let outcome = h.store.restore_from_storage_at(1_000).await;
    assert_eq!(outcome, RestoreOutcome::Failed);
    assert!(h.store.session().is_none());
    assert_eq!(h.store.restore_from_storage_at(1_000).await, RestoreOutcome::Failed);
}

#[tokio::test(start_paused = true)]
async fn nothing_stored_is_a_no_op() {
    let h = harness(quiet());
    assert_eq!(h.store.restore_from_storage().await, RestoreOutcome::NothingStored);
}

// =============================================================================
// Disconnect
// =============================================================================

#[tokio::test(start_paused = true)]
async fn disconnect_clears_even_when_the_adapter_throws() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    provider.set("disconnect", ScriptedReply::err("extension crashed"));

    h.store.disconnect().await;
    assert_eq!(provider.calls("disconnect"), 1);
    assert!(h.store.session().is_none());
    assert!(!h.store.is_connected());
    assert_eq!(h.store.short_address(), "");
    assert_eq!(h.store.balance_btc(), 0.0);
    assert_eq!(stored(&h), None);
}

#[tokio::test(start_paused = true)]
async fn disconnect_without_extension_still_clears() {
    let h = harness(quiet());
    h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    h.env.uninstall("unisat");

    h.store.disconnect().await;
    assert!(h.store.session().is_none());
    assert_eq!(stored(&h), None);
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test(start_paused = true)]
async fn account_mismatch_disconnects_in_the_same_check() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    assert!(h.store.validate_session_live().await);

    provider.set("getAccounts", ok(json!([OTHER])));
    assert!(!h.store.validate_session_live().await);
    assert!(h.store.session().is_none());
    assert_eq!(stored(&h), None);
}

#[tokio::test(start_paused = true)]
async fn empty_account_list_disconnects() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    provider.set("getAccounts", ok(json!([])));
    assert!(!h.store.validate_session_live().await);
    assert!(h.store.session().is_none());
}

#[tokio::test(start_paused = true)]
async fn query_error_keeps_the_session() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    provider.set("getAccounts", ScriptedReply::err("extension busy"));
    assert!(!h.store.validate_session_live().await);
    assert!(h.store.session().is_some());
}

#[tokio::test(start_paused = true)]
async fn untracked_providers_are_assumed_live() {
    let h = harness(quiet());
    h.env.install("LeatherProvider", leather(OTHER));
    h.store.connect(WalletProvider::Leather, false).await.unwrap();
    assert!(h.store.validate_session_live().await);
}

#[tokio::test(start_paused = true)]
async fn monitor_runs_every_thirty_seconds() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    sleep(Duration::from_secs(29)).await;
    assert_eq!(provider.calls("getAccounts"), 0);
    sleep(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;
    assert_eq!(provider.calls("getAccounts"), 1);

    provider.set("getAccounts", ok(json!([OTHER])));
    sleep(Duration::from_secs(30)).await;
    tokio::task::yield_now().await;
    assert!(h.store.session().is_none());

    // torn down with the session
    sleep(Duration::from_secs(90)).await;
    assert_eq!(provider.calls("getAccounts"), 2);
}

// =============================================================================
// Balance refresh
// =============================================================================

#[tokio::test(start_paused = true)]
async fn balance_refresh_retries_three_times_then_gives_up() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 15_000));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    for _ in 0..3 {
        provider.push("getBalance", ScriptedReply::err("rpc timeout"));
    }

    let start = Instant::now();
    h.store.refresh_balance().await;
    let elapsed = start.elapsed();

    // connect + 3 attempts, sleeping 1s then 2s in between
    assert_eq!(provider.calls("getBalance"), 4);
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_millis(3_100), "{elapsed:?}");
    assert_eq!(h.store.session().unwrap().balance_sats, 15_000);
}

#[tokio::test(start_paused = true)]
async fn balance_refresh_recovers_on_last_attempt() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 15_000));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    provider.push("getBalance", ScriptedReply::err("rpc timeout"));
    provider.push("getBalance", ScriptedReply::err("rpc timeout"));
    provider.set("getBalance", ok(json!({"confirmed": 42_000})));

    let mut balance = h.store.watch(paths::wallet::BALANCE);
    h.store.refresh_balance().await;
    assert_eq!(h.store.session().unwrap().balance_sats, 42_000);
    assert_eq!(balance.try_recv().unwrap().path, paths::wallet::BALANCE);
}

#[tokio::test(start_paused = true)]
async fn zero_balance_applies_and_negative_is_ignored() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 15_000));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    provider.set("getBalance", ok(json!({"confirmed": -20})));
    h.store.refresh_balance().await;
    assert_eq!(h.store.session().unwrap().balance_sats, 15_000);

    provider.set("getBalance", ok(json!({"confirmed": 0})));
    h.store.refresh_balance().await;
    assert_eq!(h.store.session().unwrap().balance_sats, 0);
}

#[tokio::test(start_paused = true)]
async fn providers_without_balance_path_keep_balance() {
    let h = harness(quiet());
    h.env.install("LeatherProvider", leather(OTHER));
    h.store.connect(WalletProvider::Leather, false).await.unwrap();
    h.store.refresh_balance().await;
    assert_eq!(h.store.session().unwrap().balance_sats, 0);
}

#[tokio::test(start_paused = true)]
async fn refresh_validates_first() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 15_000));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    provider.set("getAccounts", ok(json!([OTHER])));

    h.store.refresh_balance().await;
    assert!(h.store.session().is_none());
    assert_eq!(provider.calls("getBalance"), 1);
}

#[tokio::test(start_paused = true)]
async fn refresh_runs_one_second_after_connect() {
    let h = harness(WalletConfig::default());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1_000));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    provider.set("getBalance", ok(json!({"confirmed": 2_000})));

    sleep(Duration::from_millis(900)).await;
    assert_eq!(h.store.session().unwrap().balance_sats, 1_000);
    sleep(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert_eq!(h.store.session().unwrap().balance_sats, 2_000);
}

#[tokio::test(start_paused = true)]
async fn refresh_is_a_no_op_without_session() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.refresh_balance().await;
    assert_eq!(provider.calls("getBalance"), 0);
}

// =============================================================================
// Errors
// =============================================================================

#[tokio::test(start_paused = true)]
async fn displayed_error_clears_after_five_seconds() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    provider.set("requestAccounts", ScriptedReply::err("User rejected the request."));

    let _ = h.store.connect(WalletProvider::Unisat, true).await;
    let shown = h.store.error().unwrap();
    assert_eq!(shown.kind, ErrorKind::UserRejected);
    assert_eq!(shown.message, "Connection was cancelled by user");

    sleep(Duration::from_millis(4_900)).await;
    assert!(h.store.error().is_some());
    sleep(Duration::from_millis(200)).await;
    tokio::task::yield_now().await;
    assert!(h.store.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn older_timer_does_not_clear_a_newer_error() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    provider.set("requestAccounts", ScriptedReply::err("boom"));

    let _ = h.store.connect(WalletProvider::Unisat, true).await;
    sleep(Duration::from_secs(3)).await;
    let _ = h.store.connect(WalletProvider::Unisat, true).await;
    let second = h.store.error().unwrap();

    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(h.store.error(), Some(second));
    sleep(Duration::from_millis(2_600)).await;
    tokio::task::yield_now().await;
    assert!(h.store.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn clear_error_is_immediate() {
    let h = harness(quiet());
    let _ = h.store.connect(WalletProvider::Xverse, true).await;
    assert!(h.store.error().is_some());
    h.store.clear_error();
    assert!(h.store.error().is_none());
}

// =============================================================================
// Recovery, account changes, signing, sending
// =============================================================================

#[tokio::test(start_paused = true)]
async fn recover_reconnects_to_the_new_account() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    assert!(h.store.recover_connection().await);

    provider.set("getAccounts", ok(json!([OTHER])));
    provider.set("requestAccounts", ok(json!([OTHER])));
    assert!(h.store.recover_connection().await);
    assert_eq!(h.store.session().unwrap().address, OTHER);
    assert_eq!(stored(&h), None);
}

#[tokio::test(start_paused = true)]
async fn recover_gives_up_when_reconnect_fails() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    provider.set("getAccounts", ok(json!([])));
    provider.set("requestAccounts", ScriptedReply::err("User rejected the request."));
    assert!(!h.store.recover_connection().await);
    assert!(h.store.session().is_none());
    assert!(!h.store.recover_connection().await);
}

#[tokio::test(start_paused = true)]
async fn account_change_events() {
    let h = harness(quiet());
    h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    assert!(!h.store.handle_accounts_changed(WalletProvider::Unisat, &[ADDRESS.to_string()]).await);
    assert!(!h.store.handle_accounts_changed(WalletProvider::Xverse, &[]).await);
    assert!(h.store.is_connected());

    assert!(h.store.handle_accounts_changed(WalletProvider::Unisat, &[OTHER.to_string()]).await);
    assert!(!h.store.is_connected());
}

#[tokio::test(start_paused = true)]
async fn unisat_signs_and_tracks_sends() {
    let h = harness(quiet());
    let provider = h.env.install("unisat", unisat(ADDRESS, 100_000));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();

    assert_eq!(h.store.sign_message("hello").await.unwrap(), "H+signature");
    assert_eq!(provider.call_log().iter().find(|(m, _)| m == "signMessage").unwrap().1, json!(["hello"]));

    let txid = h.store.send_bitcoin(OTHER, 5_000).await.unwrap();
    assert_eq!(txid, "f00dtx");
    let txs = h.store.transactions();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].status, TxState::Pending);
    assert_eq!(txs[0].confirmations, 0);
}

#[tokio::test(start_paused = true)]
async fn other_providers_cannot_sign_or_send() {
    let h = harness(quiet());
    h.env.install("LeatherProvider", leather(OTHER));
    h.store.connect(WalletProvider::Leather, false).await.unwrap();

    let err = h.store.sign_message("hello").await.unwrap_err();
    assert_eq!(err.to_string(), "Signing not supported for leather");
    let err = h.store.send_bitcoin(ADDRESS, 1).await.unwrap_err();
    assert_eq!(err.to_string(), "Transaction not supported for leather");
    assert!(h.store.transactions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn session_changes_are_published() {
    let h = harness(quiet());
    h.env.install("unisat", unisat(ADDRESS, 1));
    let mut session = h.store.watch(paths::wallet::SESSION);
    let mut all = h.store.watch("/wallet/**");

    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    h.store.disconnect().await;

    assert_eq!(session.try_recv().unwrap().path, paths::wallet::SESSION);
    assert_eq!(session.try_recv().unwrap().path, paths::wallet::SESSION);
    assert!(session.try_recv().is_err());
    assert!(all.try_recv().is_ok());
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_timers_but_keeps_session() {
    let h = harness(WalletConfig::default());
    let provider = h.env.install("unisat", unisat(ADDRESS, 1));
    h.store.connect(WalletProvider::Unisat, true).await.unwrap();
    h.store.shutdown();

    sleep(Duration::from_secs(120)).await;
    assert_eq!(provider.calls("getAccounts"), 0);
    assert_eq!(provider.calls("getBalance"), 1);
    assert!(h.store.is_connected());
}
