use std::collections::BTreeMap;

use serde::Deserialize;

use crate::api::response::ResourceEnvelope;

/// Service type marking a device's light service.
pub const LIGHT_RTYPE: &str = "light";

/// Light names mapped to their light resource ids, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LightsDirectory {
    lights: BTreeMap<String, String>,
}

impl LightsDirectory {
    pub fn insert(&mut self, name: String, resource_id: String) {
        self.lights.insert(name, resource_id);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.lights.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lights.iter().map(|(n, r)| (n.as_str(), r.as_str()))
    }
}

#[derive(Debug, Deserialize)]
struct Device {
    #[serde(default)]
    services: Vec<ResourceIdentifier>,
    #[serde(default)]
    metadata: DeviceMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct DeviceMetadata {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ResourceIdentifier {
    rid: String,
    rtype: String,
}

/// Build the light directory from a device resource list. Each device
/// contributes one entry per light service; a repeated name keeps the last
/// one seen. Undecodable input is logged and yields an empty directory.
pub fn parse_devices(raw: &str) -> LightsDirectory {
    let envelope: ResourceEnvelope<Device> = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "could not decode device list");
            return LightsDirectory::default();
        }
    };
    envelope.log_errors();

    let mut directory = LightsDirectory::default();
    for device in envelope.data {
        for service in device.services {
            if service.rtype == LIGHT_RTYPE {
                directory.insert(device.metadata.name.clone(), service.rid);
            }
        }
    }

    tracing::debug!(lights = directory.len(), "parsed device list");
    directory
}
