//! Connectbar: the account picker behind a wallet connect button.
//!
//! Once a wallet is connected, the picker asks the active provider which addresses it
//! exposes, keeps one of them "active" for the app, and offers the others in a dropdown.
//! Modals, chain switching and styling stay with the host's wallet connection library.
//!
//! # Architecture
//!
//! ```text
//! ConnectButton (entry point)
//!   │
//!   ├── SelectionController (dropdown: Closed ⇄ Open)
//!   │     │   toggle to Open → one refresh on the Spawner
//!   │     ▼
//!   │   AddressDirectory (addresses, selected, sequence numbers)
//!   │     │
//!   │     ▼
//!   │   ConnectorSource → Connector → Provider  (eth_accounts)
//!   │
//!   ├── WalletModals (connect / chain / account modal openers)
//!   │
//!   └── ButtonView (pure view model for the shell)
//! ```
//!
//! # Operations
//!
//! | Operation | Method | Effect |
//! |-----------|--------|--------|
//! | refresh | `directory.refresh()` | Fetch accounts; default-select the first one if unset |
//! | select | `directory.select(addr)` | Set the active address |
//! | toggle | `controller.toggle_open()` | Flip dropdown; opening refreshes |
//! | choose | `controller.choose_address(addr)` | Select and close |
//! | view | `button.view(&status)` | Build the render model |
//!
//! # Features
//!
//! - `native` - tokio local spawner, tracing subscriber, `connectbar` CLI
//! - `wasm` - `WalletPicker` JS bindings over an EIP-1193 provider
//!
//! # Usage
//!
//! ```ignore
//! use connectbar::{ActiveConnector, ConnectButton, MemoryConnector, MemoryProvider, TokioSpawner};
//! use std::rc::Rc;
//!
//! let connectors = ActiveConnector::new();
//! connectors.set(Rc::new(MemoryConnector::new("injected", MemoryProvider::with_accounts(["0xA", "0xB"]))));
//!
//! let button = ConnectButton::new(Rc::new(connectors), Rc::new(TokioSpawner), modals);
//! button.controller().toggle_open();   // schedules a refresh
//! let view = button.view(&status);     // render
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod button;
pub mod config;
pub mod controller;
pub mod core;
pub mod directory;
pub mod provider;
pub mod status;
pub mod view;

// =============================================================================
// Native-only modules (tokio, stderr logging)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod runtime;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use button::{ButtonAction, ConnectButton};
pub use config::PickerConfig;
pub use controller::{DropdownState, SelectionController, Spawner};
pub use directory::{AddressDirectory, DirectoryError, DirectoryResult, DirectorySnapshot, RefreshOutcome};
pub use provider::{
    ActiveConnector, Connector, ConnectorSource, MemoryConnector, MemoryProvider, Provider,
    ProviderError, ProviderResult, RpcRequest,
};
pub use status::{AccountInfo, AuthenticationStatus, ChainInfo, ConnectionPhase, ConnectionStatus, WalletModals};
pub use view::{AddressEntry, ButtonMode, ButtonView, ChainBadge};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use runtime::TokioSpawner;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::WalletPicker;
