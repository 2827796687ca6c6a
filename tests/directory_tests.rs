//! Address Directory tests
//!
//! 1. Default selection on first fetch
//! 2. Selection stability across refreshes
//! 3. No connector → no-op
//! 4. Provider failures leave state untouched
//! 5. Out-of-order responses (sequence numbers)

mod common;

use common::*;
use connectbar::{
    ActiveConnector, AddressDirectory, DirectoryError, DirectorySnapshot, ProviderError,
    RefreshOutcome,
};
use async_trait::async_trait;
use connectbar::{Connector, Provider, ProviderResult, RpcRequest};
use futures::executor::block_on;
use futures::FutureExt;
use serde_json::Value;
use std::rc::Rc;
use std::task::{Context, Poll};

// ============================================================================
// 1. DEFAULT SELECTION
// ============================================================================

#[test]
fn first_fetch_selects_first_address() {
    let (directory, _, _) = memory_directory(&[ADDR_A]);
    assert!(directory.addresses().is_empty());
    assert_eq!(directory.selected(), None);

    let outcome = block_on(directory.refresh()).expect("refresh");

    assert_eq!(outcome, RefreshOutcome::Applied { sequence: 1, count: 1, defaulted: true });
    assert_eq!(directory.selected().as_deref(), Some(ADDR_A));
    assert_eq!(directory.addresses(), vec![ADDR_A]);
}

#[test]
fn provider_order_is_preserved() {
    let (directory, _, _) = memory_directory(&[ADDR_C, ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");

    assert_eq!(directory.addresses(), vec![ADDR_C, ADDR_A, ADDR_B]);
    assert_eq!(directory.selected().as_deref(), Some(ADDR_C));
}

#[test]
fn empty_list_leaves_selection_unset() {
    let (directory, provider, _) = memory_directory(&[]);
    let outcome = block_on(directory.refresh()).expect("refresh");
    assert_eq!(outcome, RefreshOutcome::Applied { sequence: 1, count: 0, defaulted: false });
    assert_eq!(directory.selected(), None);

    // Next non-empty fetch still defaults
    provider.set_accounts([ADDR_B, ADDR_A]);
    block_on(directory.refresh()).expect("refresh");
    assert_eq!(directory.selected().as_deref(), Some(ADDR_B));
}

// ============================================================================
// 2. SELECTION STABILITY
// ============================================================================

#[test]
fn refresh_never_moves_an_existing_selection() {
    let (directory, provider, _) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");
    directory.select(ADDR_B);

    provider.set_accounts([ADDR_C, ADDR_A, ADDR_B]);
    let outcome = block_on(directory.refresh()).expect("refresh");

    assert_eq!(outcome, RefreshOutcome::Applied { sequence: 2, count: 3, defaulted: false });
    assert_eq!(directory.selected().as_deref(), Some(ADDR_B));
    assert_eq!(directory.addresses(), vec![ADDR_C, ADDR_A, ADDR_B]);
}

#[test]
fn selection_survives_when_missing_from_new_list() {
    let (directory, provider, _) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");
    assert_eq!(directory.selected().as_deref(), Some(ADDR_A));

    // The user switched accounts inside the wallet
    provider.set_accounts([ADDR_C]);
    block_on(directory.refresh()).expect("refresh");

    assert_eq!(directory.addresses(), vec![ADDR_C]);
    assert_eq!(directory.selected().as_deref(), Some(ADDR_A));
}

#[test]
fn lists_are_replaced_not_merged() {
    let (directory, provider, _) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");
    provider.set_accounts([ADDR_C]);
    block_on(directory.refresh()).expect("refresh");
    assert_eq!(directory.addresses(), vec![ADDR_C]);
}

#[test]
fn select_only_touches_selection() {
    let (directory, provider, _) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");

    directory.select(ADDR_B);

    assert_eq!(directory.selected().as_deref(), Some(ADDR_B));
    assert_eq!(directory.addresses(), vec![ADDR_A, ADDR_B]);
    assert_eq!(provider.requests(), 1);
}

#[test]
fn reset_clears_everything() {
    let (directory, _, _) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");
    directory.reset();
    assert!(directory.snapshot().addresses.is_empty());
    assert_eq!(directory.selected(), None);

    // After a reset the next fetch defaults again
    block_on(directory.refresh()).expect("refresh");
    assert_eq!(directory.selected().as_deref(), Some(ADDR_A));
}

// ============================================================================
// 3. NO CONNECTOR
// ============================================================================

#[test]
fn refresh_without_connector_is_a_no_op() {
    let directory = AddressDirectory::new(Rc::new(ActiveConnector::new()));
    let mut rx = directory.watch();

    let outcome = block_on(directory.refresh()).expect("no error");

    assert_eq!(outcome, RefreshOutcome::NoActiveConnector);
    assert_eq!(directory.snapshot(), DirectorySnapshot::default());
    assert_eq!(directory.latest_sequence(), 0);
    assert!(rx.try_next().is_err(), "no change notification");
}

#[test]
fn disconnect_keeps_last_known_state() {
    let (directory, provider, connectors) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");

    connectors.clear();
    let outcome = block_on(directory.refresh()).expect("no error");

    assert_eq!(outcome, RefreshOutcome::NoActiveConnector);
    assert_eq!(directory.addresses(), vec![ADDR_A, ADDR_B]);
    assert_eq!(directory.selected().as_deref(), Some(ADDR_A));
    assert_eq!(provider.requests(), 1);
}

// ============================================================================
// 4. PROVIDER FAILURES
// ============================================================================

#[test]
fn provider_failure_leaves_state_unchanged() {
    let (directory, provider, _) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");
    let before = directory.snapshot();

    provider.set_accounts([ADDR_C]);
    provider.set_failure(Some("wallet locked"));
    let err = block_on(directory.refresh()).unwrap_err();

    match err {
        DirectoryError::ProviderQuery(ProviderError::Rpc { message, .. }) => assert_eq!(message, "wallet locked"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(directory.snapshot(), before);
}

#[test]
fn failure_before_first_fetch_keeps_selection_unset() {
    let (directory, provider, _) = memory_directory(&[ADDR_A]);
    provider.set_failure(Some("rejected"));
    assert!(block_on(directory.refresh()).is_err());
    assert_eq!(directory.selected(), None);
    assert!(directory.addresses().is_empty());
}

#[test]
fn malformed_response_is_a_query_error() {
    let (directory, provider) = deferred_directory();
    let tx = provider.expect();
    tx.send(Ok(serde_json::json!({"not": "an array"}))).expect("send");

    let err = block_on(directory.refresh()).unwrap_err();
    assert!(matches!(err, DirectoryError::ProviderQuery(ProviderError::Malformed(_))));
    assert_eq!(directory.snapshot(), DirectorySnapshot::default());
}

/// Host provider whose failures come from its own error stack
struct HostProvider;

#[async_trait(?Send)]
impl Provider for HostProvider {
    async fn request(&self, _request: RpcRequest) -> ProviderResult<Value> {
        Err(anyhow::anyhow!("keyring unavailable").into())
    }
}

struct HostConnector;

#[async_trait(?Send)]
impl Connector for HostConnector {
    fn id(&self) -> &str { "host" }

    async fn provider(&self) -> ProviderResult<Rc<dyn Provider>> {
        Ok(Rc::new(HostProvider))
    }
}

#[test]
fn host_error_surfaces_as_query_error() {
    let (directory, _, connectors) = memory_directory(&[ADDR_A, ADDR_B]);
    block_on(directory.refresh()).expect("refresh");
    let before = directory.snapshot();

    connectors.set(Rc::new(HostConnector));
    let err = block_on(directory.refresh()).unwrap_err();

    match err {
        DirectoryError::ProviderQuery(ProviderError::Other(cause)) => {
            assert_eq!(cause.to_string(), "keyring unavailable")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(directory.snapshot(), before);
}

// ============================================================================
// 5. OUT-OF-ORDER RESPONSES
// ============================================================================

#[test]
fn older_response_arriving_late_is_discarded() {
    let (directory, provider) = deferred_directory();
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    let first_tx = provider.expect();
    let second_tx = provider.expect();
    let mut first = directory.refresh();
    let mut second = directory.refresh();
    assert!(first.poll_unpin(&mut cx).is_pending());
    assert!(second.poll_unpin(&mut cx).is_pending());

    second_tx.send(accounts(&[ADDR_B, ADDR_C])).expect("send");
    match second.poll_unpin(&mut cx) {
        Poll::Ready(Ok(outcome)) => {
            assert_eq!(outcome, RefreshOutcome::Applied { sequence: 2, count: 2, defaulted: true })
        }
        other => panic!("second refresh not applied: {:?}", other),
    }

    first_tx.send(accounts(&[ADDR_A])).expect("send");
    match first.poll_unpin(&mut cx) {
        Poll::Ready(Ok(outcome)) => {
            assert_eq!(outcome, RefreshOutcome::StaleResultDiscarded { sequence: 1, latest: 2 })
        }
        other => panic!("first refresh not discarded: {:?}", other),
    }

    assert_eq!(directory.addresses(), vec![ADDR_B, ADDR_C]);
    assert_eq!(directory.selected().as_deref(), Some(ADDR_B));
    assert_eq!(provider.requests(), 2);
}

#[test]
fn only_the_latest_issued_refresh_applies() {
    let (directory, provider) = deferred_directory();
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    let first_tx = provider.expect();
    let second_tx = provider.expect();
    let mut first = directory.refresh();
    let mut second = directory.refresh();
    assert!(first.poll_unpin(&mut cx).is_pending());
    assert!(second.poll_unpin(&mut cx).is_pending());

    // In-order resolution: the older answer is still superseded
    first_tx.send(accounts(&[ADDR_A])).expect("send");
    assert!(matches!(
        first.poll_unpin(&mut cx),
        Poll::Ready(Ok(RefreshOutcome::StaleResultDiscarded { sequence: 1, latest: 2 }))
    ));
    assert!(directory.addresses().is_empty());

    second_tx.send(accounts(&[ADDR_B])).expect("send");
    assert!(matches!(second.poll_unpin(&mut cx), Poll::Ready(Ok(RefreshOutcome::Applied { sequence: 2, .. }))));
    assert_eq!(directory.selected().as_deref(), Some(ADDR_B));
}

#[test]
fn reset_drops_refresh_in_flight() {
    let (directory, provider) = deferred_directory();
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    let tx = provider.expect();
    let mut refresh = directory.refresh();
    assert!(refresh.poll_unpin(&mut cx).is_pending());

    directory.reset();
    tx.send(accounts(&[ADDR_A])).expect("send");

    assert!(matches!(
        refresh.poll_unpin(&mut cx),
        Poll::Ready(Ok(RefreshOutcome::StaleResultDiscarded { .. }))
    ));
    assert_eq!(directory.snapshot(), DirectorySnapshot::default());
}

#[test]
fn selection_made_while_in_flight_wins() {
    let (directory, provider) = deferred_directory();
    let waker = futures::task::noop_waker();
    let mut cx = Context::from_waker(&waker);

    let tx = provider.expect();
    let mut refresh = directory.refresh();
    assert!(refresh.poll_unpin(&mut cx).is_pending());

    directory.select(ADDR_B);
    tx.send(accounts(&[ADDR_A, ADDR_B])).expect("send");

    assert!(matches!(
        refresh.poll_unpin(&mut cx),
        Poll::Ready(Ok(RefreshOutcome::Applied { defaulted: false, .. }))
    ));
    assert_eq!(directory.selected().as_deref(), Some(ADDR_B));
}

// ============================================================================
// WATCH
// ============================================================================

#[test]
fn watchers_see_every_change() {
    let (directory, _, _) = memory_directory(&[ADDR_A, ADDR_B]);
    let mut rx = directory.watch();

    block_on(directory.refresh()).expect("refresh");
    directory.select(ADDR_B);

    let fetched = rx.try_next().expect("open").expect("snapshot");
    assert_eq!(fetched.selected.as_deref(), Some(ADDR_A));
    let selected = rx.try_next().expect("open").expect("snapshot");
    assert_eq!(selected.selected.as_deref(), Some(ADDR_B));
    assert_eq!(selected.addresses, vec![ADDR_A, ADDR_B]);
}
