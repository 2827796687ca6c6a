//! Connectbar CLI - drive the account picker from the command line
//!
//! Runs the picker over an in-memory wallet and prints one JSON line per step:
//!   connectbar simulate --accounts 0xA..,0xB.. --steps toggle,choose:0xB..
//!
//! Steps:
//!   toggle                 → flip the dropdown (opening refreshes the list)
//!   close                  → close the dropdown
//!   choose:<address>       → pick an address from the list
//!   accounts:<a>|<b>|...   → the wallet now exposes a different list
//!   fail / recover         → provider queries start / stop failing
//!   disconnect / connect   → wallet goes away / comes back
//!   reset                  → forget list and selection
//!   connect-modal, chain-modal, account-modal → dispatch modal actions
//!
//! Output format:
//!   --json     Output one JSON object per line (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use connectbar::core::display::short_address;
use connectbar::logging::init_logging;
use connectbar::{
    AccountInfo, ActiveConnector, ButtonAction, ChainInfo, ConnectButton, ConnectionStatus,
    MemoryConnector, MemoryProvider, PickerConfig, WalletModals,
};
use futures::executor::LocalPool;
use serde_json::{json, Value};
use std::cell::Cell;
use std::env;
use std::io::IsTerminal;
use std::rc::Rc;
use tracing::{debug, info};

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("connectbar {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("simulate") | Some("sim") => cmd_simulate(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = opts.pretty || (!opts.json && std::io::stdout().is_terminal());
    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", render(&line, pretty));
            }
        }
        Err(e) => {
            eprintln!("{}", render(&json!({"error": e}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    accounts: Vec<String>,
    steps: Vec<String>,
    chain_id: Option<u64>,
    chain_name: Option<String>,
    unsupported: bool,
    disconnected: bool,
    head: Option<usize>,
    tail: Option<usize>,
    // Output options
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

fn split_list(value: &str, sep: char) -> Vec<String> {
    value.split(sep).map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let next = args.get(i + 1);
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--unsupported" => opts.unsupported = true,
                "--disconnected" => opts.disconnected = true,
                "--accounts" | "-a" if next.is_some() => {
                    opts.accounts = next.map(|v| split_list(v, ',')).unwrap_or_default();
                    i += 1;
                }
                "--steps" | "-s" if next.is_some() => {
                    opts.steps = next.map(|v| split_list(v, ',')).unwrap_or_default();
                    i += 1;
                }
                "--chain-id" if next.is_some() => {
                    opts.chain_id = next.and_then(|v| v.parse().ok());
                    i += 1;
                }
                "--chain-name" if next.is_some() => {
                    opts.chain_name = next.cloned();
                    i += 1;
                }
                "--head" if next.is_some() => {
                    opts.head = next.and_then(|v| v.parse().ok());
                    i += 1;
                }
                "--tail" if next.is_some() => {
                    opts.tail = next.and_then(|v| v.parse().ok());
                    i += 1;
                }
                _ if !arg.starts_with('-') => positional.push(arg.clone()),
                _ => {} // Ignore unknown flags
            }
            i += 1;
        }

        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        // Remaining positionals are extra steps
        opts.steps.extend(positional);

        if opts.accounts.is_empty() {
            if let Ok(accounts) = env::var("CONNECTBAR_ACCOUNTS") {
                opts.accounts = split_list(&accounts, ',');
            }
        }

        opts
    }

    fn config(&self) -> PickerConfig {
        let defaults = PickerConfig::default();
        PickerConfig::new().with_truncation(
            self.head.unwrap_or(defaults.head_chars),
            self.tail.unwrap_or(defaults.tail_chars),
        )
    }
}

/// Records which modal the button asked for
#[derive(Default)]
struct RecordedModals {
    last: Rc<Cell<Option<&'static str>>>,
}

impl RecordedModals {
    fn open(&self, name: &'static str) {
        info!("opening {} modal", name);
        self.last.set(Some(name));
    }
}

impl WalletModals for RecordedModals {
    fn open_connect_modal(&self) { self.open("connect") }
    fn open_chain_modal(&self) { self.open("chain") }
    fn open_account_modal(&self) { self.open("account") }
}

struct Simulation {
    pool: LocalPool,
    connectors: ActiveConnector,
    connector: Rc<MemoryConnector>,
    button: ConnectButton<RecordedModals>,
    modal: Rc<Cell<Option<&'static str>>>,
    status: ConnectionStatus,
}

impl Simulation {
    fn new(opts: &ParsedArgs) -> Self {
        let pool = LocalPool::new();
        let provider = MemoryProvider::with_accounts(opts.accounts.iter().cloned());
        let connector = Rc::new(MemoryConnector::new("memory", provider));
        let connectors = ActiveConnector::new();

        let modals = RecordedModals::default();
        let modal = modals.last.clone();
        let button = ConnectButton::new(Rc::new(connectors.clone()), Rc::new(pool.spawner()), modals)
            .with_config(opts.config());

        let chain = ChainInfo {
            id: opts.chain_id.unwrap_or(1),
            name: Some(opts.chain_name.clone().unwrap_or_else(|| "Ethereum".into())),
            unsupported: opts.unsupported,
            ..Default::default()
        };
        let status = ConnectionStatus { mounted: true, authentication_status: None, account: None, chain: Some(chain) };

        let mut sim = Self { pool, connectors, connector, button, modal, status };
        if !opts.disconnected {
            sim.connect();
        }
        sim
    }

    fn connect(&mut self) {
        self.connectors.set(self.connector.clone());
        let address = self.connector.memory_provider().accounts().into_iter().next().unwrap_or_default();
        self.status.account = Some(AccountInfo { display_name: short_address(&address), address });
    }

    fn disconnect(&mut self) {
        self.connectors.clear();
        self.status.account = None;
    }

    fn step(&mut self, step: &str) -> Result<(), String> {
        debug!("step: {}", step);
        let provider = self.connector.memory_provider();
        match step.split_once(':') {
            Some(("choose", address)) => self.button.dispatch(ButtonAction::ChooseAddress(address.to_string())),
            Some(("accounts", list)) => provider.set_accounts(split_list(list, '|')),
            Some((other, _)) => return Err(format!("Unknown step: {}", other)),
            None => match step {
                "toggle" => self.button.dispatch(ButtonAction::ToggleDropdown),
                "close" => self.button.controller().close(),
                "fail" => provider.set_failure(Some("simulated provider failure")),
                "recover" => provider.set_failure(None),
                "disconnect" => self.disconnect(),
                "connect" => self.connect(),
                "reset" => {
                    self.button.controller().close();
                    self.button.controller().directory().reset();
                }
                "connect-modal" => self.button.dispatch(ButtonAction::OpenConnectModal),
                "chain-modal" => self.button.dispatch(ButtonAction::OpenChainModal),
                "account-modal" => self.button.dispatch(ButtonAction::OpenAccountModal),
                other => return Err(format!("Unknown step: {}", other)),
            },
        }
        // Let scheduled refreshes finish before rendering
        self.pool.run_until_stalled();
        Ok(())
    }

    fn frame(&self, step: &str) -> Value {
        let snapshot = self.button.controller().directory().snapshot();
        json!({
            "step": step,
            "addresses": snapshot.addresses,
            "selected": snapshot.selected,
            "modal": self.modal.take(),
            "view": self.button.view(&self.status),
        })
    }
}

fn cmd_simulate(opts: &ParsedArgs) -> Result<Vec<Value>, String> {
    let mut sim = Simulation::new(opts);
    let mut frames = vec![sim.frame("start")];
    for step in &opts.steps {
        sim.step(step)?;
        frames.push(sim.frame(step));
    }
    Ok(frames)
}

fn print_usage() {
    eprintln!(
        r#"connectbar - wallet connect button account picker

USAGE:
    connectbar simulate [OPTIONS] [STEPS...]

OPTIONS:
    -a, --accounts <list>   Comma-separated addresses the wallet exposes
    -s, --steps <list>      Comma-separated steps (see below)
    --chain-id <id>         Chain id reported as connected (default 1)
    --chain-name <name>     Chain name (default Ethereum)
    --unsupported           Report the chain as unsupported
    --disconnected          Start without a connected wallet
    --head <n>, --tail <n>  Address truncation (default 6 / 4)
    --json                  One JSON object per line
    --pretty                Pretty-print JSON
    -h, --help              Show this help
    -V, --version           Show version

STEPS:
    toggle, close, choose:<address>, accounts:<a>|<b>, fail, recover,
    disconnect, connect, reset, connect-modal, chain-modal, account-modal

ENVIRONMENT:
    CONNECTBAR_ACCOUNTS     Default for --accounts
    CONNECTBAR_LOG_JSON=1   JSON log lines on stderr
    RUST_LOG                Log filter (default info)
"#
    );
}
