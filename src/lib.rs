pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod resolve;

use std::time::Duration;

use clap::CommandFactory;

use api::client::BridgeClient;
use api::transport::{TlsMode, TransportConfig};
use auth::bridge_config::BridgeConfig;
use auth::credentials::credentials_from_env;
use auth::pairing::{self, OperatorPrompt, TerminalPrompt};
use auth::store::ConfigStore;
use cli::output::print_error;
use config::{OutputMode, RuntimeConfig};
use error::AppError;

pub async fn run(cli_args: cli::Cli) -> i32 {
    if cli_args.is_noop() {
        if let Err(err) = cli::Cli::command().print_help() {
            tracing::warn!(error = %err, "could not print usage");
        }
        return 0;
    }

    let config = RuntimeConfig {
        output_mode: if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Json
        },
        transport: TransportConfig {
            tls: if cli_args.verify_tls {
                TlsMode::Verify
            } else {
                TlsMode::AcceptSelfSigned
            },
            timeout: cli_args.timeout.map(Duration::from_secs),
        },
    };

    match dispatch(&cli_args, &config).await {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            err.exit_code()
        }
    }
}

async fn dispatch(cli_args: &cli::Cli, config: &RuntimeConfig) -> Result<(), AppError> {
    // Validate flags before any prompting or network traffic.
    let change = cli_args.light_change()?;

    let bridge = bridge_config(cli_args, config).await?;
    let client = BridgeClient::new(
        &bridge.address,
        Some(bridge.api_key.clone()),
        &config.transport,
    )?;

    if cli_args.list {
        cli::lights::handle_list(&client, config).await?;
        return Ok(());
    }

    if let (Some(name), Some(change)) = (&cli_args.light, change) {
        cli::lights::handle_control(&client, name, &change, config).await?;
    }

    Ok(())
}

/// Credentials for this run: environment override, or the stored config
/// (pairing first when it is incomplete or `--pair` was given).
async fn bridge_config(cli_args: &cli::Cli, config: &RuntimeConfig) -> Result<BridgeConfig, AppError> {
    if !cli_args.pair {
        if let Some(bridge) = credentials_from_env() {
            tracing::debug!(address = %bridge.address, "using bridge credentials from environment");
            return Ok(bridge);
        }
    }

    let store = match &cli_args.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::at_default_path(),
    };
    let mut bridge = store.load();

    if let Some(address) = &cli_args.bridge {
        if bridge.address != *address {
            // A key is only valid for the bridge that issued it.
            bridge.address = address.clone();
            bridge.api_key.clear();
        }
    }

    ensure_paired(
        &mut bridge,
        &store,
        &config.transport,
        &mut TerminalPrompt,
        cli_args.pair,
    )
    .await?;

    Ok(bridge)
}

/// Pair with the bridge when `bridge` lacks an address or key (or when
/// `force` is set), then persist the new credentials. Returns whether a
/// pairing took place.
pub async fn ensure_paired<P: OperatorPrompt>(
    bridge: &mut BridgeConfig,
    store: &ConfigStore,
    transport: &TransportConfig,
    prompt: &mut P,
    force: bool,
) -> Result<bool, AppError> {
    if bridge.is_complete() && !force {
        return Ok(false);
    }

    if bridge.address.is_empty() {
        bridge.address = prompt.bridge_address()?;
    }

    tracing::info!(address = %bridge.address, "pairing with bridge");
    let client = BridgeClient::new(&bridge.address, None, transport)?;
    let credential = pairing::pair(&client, prompt).await?;

    bridge.api_key = credential.username;
    store.save(bridge)?;
    eprintln!("Saved bridge credentials to {}", store.path().display());

    Ok(true)
}
