use serde::Deserialize;

use crate::api::errors::{ERR_LINK_BUTTON_NOT_PRESSED, LINK_BUTTON_DESCRIPTION};

/// Credential handed out by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    /// Application key used in the `hue-application-key` header.
    pub username: String,
    #[serde(rename = "clientkey", default)]
    pub client_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BridgeError {
    #[serde(rename = "type")]
    pub kind: i64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

impl BridgeError {
    /// The numeric type is authoritative; the description check covers
    /// bridges that report a different type with the same message.
    pub fn is_link_button_error(&self) -> bool {
        self.kind == ERR_LINK_BUTTON_NOT_PRESSED || self.description == LINK_BUTTON_DESCRIPTION
    }
}

/// One entry of the `POST /api` response array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingResponse {
    Success(Credential),
    Error(BridgeError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairingError {
    #[error("link button not pressed")]
    LinkButtonNotPressed,

    #[error("bridge rejected registration (type {code}): {description}")]
    Rejected { code: i64, description: String },

    #[error("unexpected registration response: {0}")]
    Malformed(String),
}

pub fn parse_pairing_result(raw: &str) -> Result<Credential, PairingError> {
    let entries: Vec<PairingResponse> =
        serde_json::from_str(raw).map_err(|e| PairingError::Malformed(e.to_string()))?;

    match entries.into_iter().next() {
        Some(PairingResponse::Success(credential)) => Ok(credential),
        Some(PairingResponse::Error(error)) if error.is_link_button_error() => {
            Err(PairingError::LinkButtonNotPressed)
        }
        Some(PairingResponse::Error(error)) => Err(PairingError::Rejected {
            code: error.kind,
            description: error.description,
        }),
        None => Err(PairingError::Malformed("empty response".into())),
    }
}
