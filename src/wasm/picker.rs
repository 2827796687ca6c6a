//! WalletPicker: the connect button picker exposed to JavaScript

use futures::StreamExt;
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use super::bridge::{BrowserSpawner, JsConnector, JsModals};
use super::log;
use crate::button::{ButtonAction, ConnectButton};
use crate::config::PickerConfig;
use crate::provider::ActiveConnector;
use crate::status::ConnectionStatus;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WalletPicker {
    connector: ActiveConnector,
    button: ConnectButton<JsModals>,
}

#[wasm_bindgen]
impl WalletPicker {
    /// `modals` is an object with `openConnectModal`, `openChainModal` and `openAccountModal`
    #[wasm_bindgen(constructor)]
    pub fn new(modals: JsValue) -> Self {
        let connector = ActiveConnector::new();
        let button = ConnectButton::new(Rc::new(connector.clone()), Rc::new(BrowserSpawner), JsModals::new(modals));
        Self { connector, button }
    }

    /// Override address truncation (defaults: 6 leading, 4 trailing characters)
    #[wasm_bindgen(js_name = "withTruncation")]
    pub fn with_truncation(self, head: usize, tail: usize) -> Self {
        let config = PickerConfig::new().with_truncation(head, tail);
        Self { connector: self.connector, button: self.button.with_config(config) }
    }

    /// Register the active connector (an object with `getProvider()`)
    #[wasm_bindgen(js_name = "setConnector")]
    pub fn set_connector(&self, connector: JsValue) {
        let connector = JsConnector::new(connector);
        log!("[WalletPicker] connector: {}", crate::provider::Connector::id(&connector));
        self.connector.set(Rc::new(connector));
    }

    /// The wallet disconnected
    #[wasm_bindgen(js_name = "clearConnector")]
    pub fn clear_connector(&self) {
        self.connector.clear();
    }

    /// Flip the dropdown; returns true when it is now open
    #[wasm_bindgen(js_name = "toggleOpen")]
    pub fn toggle_open(&self) -> bool {
        self.button.controller().toggle_open().is_open()
    }

    #[wasm_bindgen(js_name = "chooseAddress")]
    pub fn choose_address(&self, address: String) {
        self.button.controller().choose_address(address);
    }

    /// Forget the fetched list and the selection
    pub fn reset(&self) {
        self.button.controller().close();
        self.button.controller().directory().reset();
    }

    #[wasm_bindgen(getter, js_name = "selectedAddress")]
    pub fn selected_address(&self) -> Option<String> {
        self.button.controller().directory().selected()
    }

    /// Build the view model from the connection library's current status
    pub fn render(&self, status: JsValue) -> Result<JsValue, JsValue> {
        let status: ConnectionStatus = serde_wasm_bindgen::from_value(status).map_err(js_err)?;
        let view = self.button.view(&status);
        let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
        view.serialize(&serializer).map_err(js_err)
    }

    /// Forward a user action, e.g. `{type: "choose_address", address: "0x…"}`
    pub fn dispatch(&self, action: JsValue) -> Result<(), JsValue> {
        let action: ButtonAction = serde_wasm_bindgen::from_value(action).map_err(js_err)?;
        self.button.dispatch(action);
        Ok(())
    }

    /// Call `callback()` whenever the list, the selection or the dropdown changes
    #[wasm_bindgen(js_name = "onChange")]
    pub fn on_change(&self, callback: js_sys::Function) {
        let controller = self.button.controller();
        let addresses = controller.directory().watch().map(|_| ());
        let dropdown = controller.watch().map(|_| ());
        let mut changes = futures::stream::select(addresses, dropdown);

        wasm_bindgen_futures::spawn_local(async move {
            while changes.next().await.is_some() {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log!("[WalletPicker] onChange callback threw: {:?}", e);
                }
            }
        });
    }
}
