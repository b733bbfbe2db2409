// HTTP client settings for bridge connections.

use std::time::Duration;

use crate::error::AppError;

/// Certificate validation policy for bridge connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Accept any certificate (the bridge's self-issued one included).
    AcceptSelfSigned,
    /// Validate against the system certificate store.
    Verify,
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    /// Request timeout. `None` keeps the HTTP client's default (no deadline).
    pub timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::AcceptSelfSigned,
            timeout: None,
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, AppError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("hue-light/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if self.tls == TlsMode::AcceptSelfSigned {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder.build()?)
    }
}

/// Base URL for a bridge address. Bare hosts get `https://`; an address that
/// already names a scheme (emulators, local test servers) is kept as is.
pub fn base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("https://") || address.starts_with("http://") {
        address.to_string()
    } else {
        format!("https://{}", address)
    }
}
