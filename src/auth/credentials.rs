use std::env;

use super::bridge_config::BridgeConfig;

pub const ENV_BRIDGE: &str = "HUE_BRIDGE";
pub const ENV_APPLICATION_KEY: &str = "HUE_APPLICATION_KEY";

/// Get bridge credentials from env vars, or None if either is unset.
/// These override the config file for one invocation and are never saved.
pub fn credentials_from_env() -> Option<BridgeConfig> {
    let address = env::var(ENV_BRIDGE).ok()?;
    let api_key = env::var(ENV_APPLICATION_KEY).ok()?;
    let config = BridgeConfig { address, api_key };
    config.is_complete().then_some(config)
}
