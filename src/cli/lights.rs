use serde_json::json;
use tabled::Tabled;

use crate::api::client::BridgeClient;
use crate::cli::output::{print_json, print_table};
use crate::config::{OutputMode, RuntimeConfig};
use crate::error::AppError;
use crate::models::directory::parse_devices;
use crate::models::light_state::{parse_light_state, LightChange, LightState};
use crate::resolve;

/// A light with the state read from (or pushed to) the bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct LightEntry {
    pub name: String,
    pub resource_id: String,
    pub state: LightState,
}

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ON")]
    on: String,
    #[tabled(rename = "BRIGHTNESS")]
    brightness: String,
    #[tabled(rename = "X")]
    color_x: String,
    #[tabled(rename = "Y")]
    color_y: String,
    #[tabled(rename = "RESOURCE ID")]
    resource_id: String,
}

impl From<&LightEntry> for LightRow {
    fn from(entry: &LightEntry) -> Self {
        LightRow {
            name: entry.name.clone(),
            on: if entry.state.on { "on" } else { "off" }.to_string(),
            brightness: format!("{:.1}", entry.state.brightness),
            color_x: format!("{:.4}", entry.state.color_x),
            color_y: format!("{:.4}", entry.state.color_y),
            resource_id: entry.resource_id.clone(),
        }
    }
}

fn entry_json(entry: &LightEntry) -> serde_json::Value {
    json!({
        "name": entry.name,
        "resource_id": entry.resource_id,
        "on": entry.state.on,
        "brightness": entry.state.brightness,
        "color": {"x": entry.state.color_x, "y": entry.state.color_y},
    })
}

fn print_entries(entries: &[LightEntry], mode: OutputMode) {
    match mode {
        OutputMode::Table => {
            let rows: Vec<LightRow> = entries.iter().map(LightRow::from).collect();
            print_table(&rows);
        }
        OutputMode::Json => {
            let json_lights: Vec<serde_json::Value> = entries.iter().map(entry_json).collect();
            print_json(&json!(json_lights));
        }
    }
}

/// Print every light with its current state. A failing light fetch aborts
/// the whole listing.
pub async fn handle_list(
    client: &BridgeClient,
    config: &RuntimeConfig,
) -> Result<Vec<LightEntry>, AppError> {
    let directory = parse_devices(&client.get_devices().await?);

    let mut entries = Vec::with_capacity(directory.len());
    for (name, rid) in directory.iter() {
        let state = parse_light_state(&client.get_light(rid).await?);
        entries.push(LightEntry {
            name: name.to_string(),
            resource_id: rid.to_string(),
            state,
        });
    }

    print_entries(&entries, config.output_mode);
    Ok(entries)
}

/// Merge `change` over the named light's current state and push the result.
pub async fn handle_control(
    client: &BridgeClient,
    light_name: &str,
    change: &LightChange,
    config: &RuntimeConfig,
) -> Result<LightState, AppError> {
    let directory = parse_devices(&client.get_devices().await?);
    let rid = resolve::resolve_light(&directory, light_name)?;

    let current = parse_light_state(&client.get_light(rid).await?);
    if change.is_empty() {
        tracing::info!(light = light_name, "no change requested, re-sending current state");
    }
    let merged = current.merge(change);

    tracing::debug!(light = light_name, ?current, ?merged, "setting light state");
    client.put_light_state(rid, &merged).await?;

    let entry = LightEntry {
        name: light_name.to_string(),
        resource_id: rid.to_string(),
        state: merged,
    };
    match config.output_mode {
        OutputMode::Table => print_entries(std::slice::from_ref(&entry), OutputMode::Table),
        OutputMode::Json => print_json(&entry_json(&entry)),
    }
    Ok(merged)
}
