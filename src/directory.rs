//! Address Directory - the fetched account list and the selected address
//!
//! # State
//!
//! | Field | Mutated by |
//! |-------|------------|
//! | `addresses` | a successful, non-stale [`AddressDirectory::refresh`] (replaced wholesale) |
//! | `selected` | first successful refresh while unset, [`AddressDirectory::select`], [`AddressDirectory::reset`] |
//!
//! # Ordering
//!
//! Every refresh takes a sequence number when it is issued. When the provider answers,
//! the result is applied only if no younger refresh has been issued since; otherwise it
//! is dropped as [`RefreshOutcome::StaleResultDiscarded`].
//!
//! A selected address is kept even when a later list no longer contains it.

use futures::channel::mpsc;
use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use thiserror::Error;

use crate::provider::{ConnectorSource, ProviderError};

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory errors
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Account query failed: {0}")]
    ProviderQuery(#[source] ProviderError),
}

/// What a finished refresh did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No wallet connected; nothing happened
    NoActiveConnector,
    /// A younger refresh was issued while this one was in flight
    StaleResultDiscarded { sequence: u64, latest: u64 },
    /// The list was replaced
    Applied { sequence: u64, count: usize, defaulted: bool },
}

/// Read-only copy of the directory state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorySnapshot {
    pub addresses: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Default)]
struct DirectoryState {
    addresses: Vec<String>,
    selected: Option<String>,
}

impl DirectoryState {
    fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot { addresses: self.addresses.clone(), selected: self.selected.clone() }
    }
}

/// Holds the account list of the active connector and the selected address
#[derive(Clone)]
pub struct AddressDirectory {
    connectors: Rc<dyn ConnectorSource>,
    state: Rc<RefCell<DirectoryState>>,
    issued: Rc<Cell<u64>>,
    watchers: Rc<RefCell<Vec<mpsc::UnboundedSender<DirectorySnapshot>>>>,
}

impl AddressDirectory {
    pub fn new(connectors: Rc<dyn ConnectorSource>) -> Self {
        Self {
            connectors,
            state: Rc::new(RefCell::new(DirectoryState::default())),
            issued: Rc::new(Cell::new(0)),
            watchers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Fetch the account list from the active connector's provider.
    ///
    /// The sequence number is taken now, not when the future is first polled, so the
    /// order of `refresh()` calls decides which result wins.
    pub fn refresh(&self) -> LocalBoxFuture<'static, DirectoryResult<RefreshOutcome>> {
        let Some(connector) = self.connectors.active() else {
            tracing::trace!("refresh skipped: no active connector");
            return future::ready(Ok(RefreshOutcome::NoActiveConnector)).boxed_local();
        };
        let sequence = self.issued.get() + 1;
        self.issued.set(sequence);
        let directory = self.clone();

        async move {
            tracing::debug!(connector = connector.id(), sequence, "querying accounts");
            let provider = connector.provider().await.map_err(DirectoryError::ProviderQuery)?;
            let accounts = provider.list_accounts().await.map_err(DirectoryError::ProviderQuery)?;
            Ok(directory.apply(sequence, accounts))
        }
        .boxed_local()
    }

    fn apply(&self, sequence: u64, accounts: Vec<String>) -> RefreshOutcome {
        let latest = self.issued.get();
        if sequence != latest {
            tracing::trace!(sequence, latest, "stale account list dropped");
            return RefreshOutcome::StaleResultDiscarded { sequence, latest };
        }

        let mut state = self.state.borrow_mut();
        let defaulted = state.selected.is_none() && !accounts.is_empty();
        if defaulted {
            state.selected = accounts.first().cloned();
        }
        let count = accounts.len();
        state.addresses = accounts;
        let snapshot = state.snapshot();
        drop(state); // Release borrow before notifying

        tracing::debug!(sequence, count, defaulted, "account list updated");
        self.notify(snapshot);
        RefreshOutcome::Applied { sequence, count, defaulted }
    }

    /// Make `address` the selected one. Callers pass entries from the current list.
    pub fn select(&self, address: impl Into<String>) {
        let address = address.into();
        let snapshot = {
            let mut state = self.state.borrow_mut();
            state.selected = Some(address);
            state.snapshot()
        };
        self.notify(snapshot);
    }

    /// Clear the list and the selection, and drop any refresh still in flight
    pub fn reset(&self) {
        self.issued.set(self.issued.get() + 1);
        let snapshot = {
            let mut state = self.state.borrow_mut();
            *state = DirectoryState::default();
            state.snapshot()
        };
        tracing::debug!("address directory reset");
        self.notify(snapshot);
    }

    pub fn addresses(&self) -> Vec<String> { self.state.borrow().addresses.clone() }

    pub fn selected(&self) -> Option<String> { self.state.borrow().selected.clone() }

    pub fn snapshot(&self) -> DirectorySnapshot { self.state.borrow().snapshot() }

    /// Sequence number of the most recently issued refresh
    pub fn latest_sequence(&self) -> u64 { self.issued.get() }

    /// Receive a snapshot after every state change
    pub fn watch(&self) -> mpsc::UnboundedReceiver<DirectorySnapshot> {
        let (tx, rx) = mpsc::unbounded();
        self.watchers.borrow_mut().push(tx);
        rx
    }

    fn notify(&self, snapshot: DirectorySnapshot) {
        let mut watchers = self.watchers.borrow_mut();
        watchers.retain(|tx| tx.unbounded_send(snapshot.clone()).is_ok());
    }
}
