//! ConnectButton - ties the picker state to the connection library
//!
//! The shell calls [`ConnectButton::view`] to render and [`ConnectButton::dispatch`]
//! when the user clicks something.

use serde::Deserialize;
use std::rc::Rc;

use crate::config::PickerConfig;
use crate::controller::{SelectionController, Spawner};
use crate::directory::AddressDirectory;
use crate::provider::ConnectorSource;
use crate::status::{ConnectionStatus, WalletModals};
use crate::view::ButtonView;

/// User actions the shell forwards
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "address", rename_all = "snake_case")]
pub enum ButtonAction {
    OpenConnectModal,
    OpenChainModal,
    OpenAccountModal,
    ToggleDropdown,
    ChooseAddress(String),
}

pub struct ConnectButton<M: WalletModals> {
    controller: SelectionController,
    modals: M,
    config: PickerConfig,
}

impl<M: WalletModals> ConnectButton<M> {
    pub fn new(connectors: Rc<dyn ConnectorSource>, spawner: Rc<dyn Spawner>, modals: M) -> Self {
        let directory = AddressDirectory::new(connectors);
        Self { controller: SelectionController::new(directory, spawner), modals, config: PickerConfig::default() }
    }

    pub fn with_config(mut self, config: PickerConfig) -> Self { self.config = config; self }

    pub fn view(&self, status: &ConnectionStatus) -> ButtonView {
        ButtonView::build(
            status,
            &self.controller.directory().snapshot(),
            self.controller.dropdown(),
            &self.config,
        )
    }

    pub fn dispatch(&self, action: ButtonAction) {
        tracing::trace!(?action, "button action");
        match action {
            ButtonAction::OpenConnectModal => self.modals.open_connect_modal(),
            ButtonAction::OpenChainModal => self.modals.open_chain_modal(),
            ButtonAction::OpenAccountModal => self.modals.open_account_modal(),
            ButtonAction::ToggleDropdown => { self.controller.toggle_open(); }
            ButtonAction::ChooseAddress(address) => self.controller.choose_address(address),
        }
    }

    pub fn controller(&self) -> &SelectionController { &self.controller }

    pub fn config(&self) -> &PickerConfig { &self.config }
}
