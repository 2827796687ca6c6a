//! WASM module: the connect button picker in the browser
//!
//! The host page keeps its wallet connection library (the modal flow, chain switching,
//! styling) and hands this module three JS objects:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         WalletPicker (JS API)           │
//! │  setConnector, toggleOpen, chooseAddress│
//! │  render(status), dispatch, onChange     │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │     ConnectButton (core, Rc state)      │
//! │  SelectionController + AddressDirectory │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │          JS bridge objects              │
//! │  connector.getProvider()                │
//! │  provider.request({method})             │
//! │  modals.open{Connect,Chain,Account}Modal│
//! └─────────────────────────────────────────┘
//! ```

mod bridge;
mod picker;

pub use bridge::{BrowserSpawner, JsConnector, JsModals, JsProvider};
pub use picker::WalletPicker;

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
