use serde_json::json;
use tracing::{debug, trace, warn};

use super::transport::{base_url, TransportConfig};
use crate::error::AppError;
use crate::models::light_state::LightState;

const PATH_REGISTER: &str = "/api";
const PATH_DEVICES: &str = "/clip/v2/resource/device";
const PATH_LIGHT: &str = "/clip/v2/resource/light";

const HEADER_APPLICATION_KEY: &str = "hue-application-key";

/// `devicetype` sent when registering; shows up in the bridge's app list.
pub const DEVICE_TYPE: &str = "hue-light#cli";

/// Thin client over the bridge's REST API. Methods return raw response
/// bodies; decoding is left to the parsers in `models`.
pub struct BridgeClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl BridgeClient {
    pub fn new(
        address: &str,
        api_key: Option<String>,
        transport: &TransportConfig,
    ) -> Result<Self, AppError> {
        Ok(Self::with_client(
            transport.build_client()?,
            base_url(address),
            api_key,
        ))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Result<&str, AppError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AppError::NotPaired)
    }

    /// Ask the bridge for a new application key.
    pub async fn register_client(&self) -> Result<String, AppError> {
        let url = format!("{}{}", self.base_url, PATH_REGISTER);
        let body = json!({
            "devicetype": DEVICE_TYPE,
            "generateclientkey": true,
        });

        debug!(%url, "POST");

        let response = self.client.post(&url).json(&body).send().await?;
        read_body(response).await
    }

    /// List all device resources registered on the bridge.
    pub async fn get_devices(&self) -> Result<String, AppError> {
        self.get(PATH_DEVICES).await
    }

    /// Fetch a single light resource.
    pub async fn get_light(&self, resource_id: &str) -> Result<String, AppError> {
        self.get(&format!("{}/{}", PATH_LIGHT, resource_id)).await
    }

    /// Push a new state to a light. The bridge's reply is not inspected
    /// beyond a diagnostic; only transport failures are returned.
    pub async fn put_light_state(
        &self,
        resource_id: &str,
        state: &LightState,
    ) -> Result<(), AppError> {
        let key = self.api_key()?;
        let url = format!("{}{}/{}", self.base_url, PATH_LIGHT, resource_id);
        let body = state.to_request_body();

        debug!(%url, %body, "PUT");

        let response = self
            .client
            .put(&url)
            .header(HEADER_APPLICATION_KEY, key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "bridge did not accept light state");
        }

        Ok(())
    }

    async fn get(&self, path: &str) -> Result<String, AppError> {
        let key = self.api_key()?;
        let url = format!("{}{}", self.base_url, path);

        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .header(HEADER_APPLICATION_KEY, key)
            .send()
            .await?;
        read_body(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, AppError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        debug!(%status, bytes = body.len(), "response");
        trace!(%body);
        Ok(body)
    } else {
        Err(AppError::Api {
            message: format!("{}: {}", status, body),
            status: Some(status.as_u16()),
        })
    }
}
