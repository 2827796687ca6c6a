//! Selection Controller - the address picker's open/closed state
//!
//! ```text
//!            toggle (schedules one refresh)
//!   CLOSED ───────────────────────────────▶ OPEN
//!     ▲  ◀─────────────────────────────────  │
//!     │        toggle (no refresh)           │
//!     └──────── choose_address ◀─────────────┘
//! ```
//!
//! Refreshes run as fire-and-forget tasks on an injected [`Spawner`]. Their errors are
//! swallowed: a failed fetch leaves the last good list on screen.

use futures::channel::mpsc;
use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;
use futures::FutureExt;
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::directory::{AddressDirectory, RefreshOutcome};

/// Dropdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    pub fn is_open(&self) -> bool { matches!(self, DropdownState::Open) }

    pub fn toggled(&self) -> Self {
        match self {
            DropdownState::Closed => DropdownState::Open,
            DropdownState::Open => DropdownState::Closed,
        }
    }
}

/// Runs background tasks on the UI thread
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

impl Spawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawn_local(task) {
            tracing::warn!("local pool is shut down: {}", e);
        }
    }
}

/// Owns the dropdown and decides when the directory refreshes
#[derive(Clone)]
pub struct SelectionController {
    directory: AddressDirectory,
    spawner: Rc<dyn Spawner>,
    dropdown: Rc<Cell<DropdownState>>,
    watchers: Rc<RefCell<Vec<mpsc::UnboundedSender<DropdownState>>>>,
}

impl SelectionController {
    pub fn new(directory: AddressDirectory, spawner: Rc<dyn Spawner>) -> Self {
        Self {
            directory,
            spawner,
            dropdown: Rc::new(Cell::new(DropdownState::Closed)),
            watchers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Flip the dropdown. Opening schedules exactly one directory refresh.
    pub fn toggle_open(&self) -> DropdownState {
        let next = self.dropdown.get().toggled();
        self.set_dropdown(next);
        if next.is_open() {
            self.schedule_refresh();
        }
        next
    }

    /// Select `address` and close the dropdown
    pub fn choose_address(&self, address: impl Into<String>) {
        self.directory.select(address);
        self.close();
    }

    pub fn close(&self) {
        self.set_dropdown(DropdownState::Closed);
    }

    pub fn dropdown(&self) -> DropdownState { self.dropdown.get() }

    pub fn directory(&self) -> &AddressDirectory { &self.directory }

    /// Receive the dropdown state after every change
    pub fn watch(&self) -> mpsc::UnboundedReceiver<DropdownState> {
        let (tx, rx) = mpsc::unbounded();
        self.watchers.borrow_mut().push(tx);
        rx
    }

    fn set_dropdown(&self, next: DropdownState) {
        if self.dropdown.replace(next) == next {
            return;
        }
        let mut watchers = self.watchers.borrow_mut();
        watchers.retain(|tx| tx.unbounded_send(next).is_ok());
    }

    fn schedule_refresh(&self) {
        let refresh = self.directory.refresh();
        self.spawner.spawn(
            async move {
                match refresh.await {
                    Ok(RefreshOutcome::Applied { count, .. }) => {
                        tracing::trace!(count, "dropdown refresh applied")
                    }
                    Ok(outcome) => tracing::trace!(?outcome, "dropdown refresh skipped"),
                    Err(e) => tracing::debug!("dropdown refresh failed: {}", e),
                }
            }
            .boxed_local(),
        );
    }
}
