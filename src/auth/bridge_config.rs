use serde::{Deserialize, Serialize};

/// Persisted bridge credential: where the bridge is and the application key
/// it issued to us.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    #[serde(rename = "ip")]
    pub address: String,
    #[serde(rename = "apikey")]
    pub api_key: String,
}

impl BridgeConfig {
    pub fn is_complete(&self) -> bool {
        !self.address.is_empty() && !self.api_key.is_empty()
    }
}
