use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::response::ResourceEnvelope;
use crate::error::AppError;

/// Command-line value meaning "keep the light's current value".
pub const UNSET: f64 = -1.0;

pub const MAX_BRIGHTNESS: f64 = 100.0;
pub const MAX_COLOR_COORDINATE: f64 = 1.0;

/// State of a light as read from, or written to, the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LightState {
    pub on: bool,
    /// Brightness in percent (0-100).
    pub brightness: f64,
    /// CIE 1931 x coordinate (0-1).
    pub color_x: f64,
    /// CIE 1931 y coordinate (0-1).
    pub color_y: f64,
}

/// Requested change to a light. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightChange {
    pub brightness: Option<f64>,
    pub color_x: Option<f64>,
    pub color_y: Option<f64>,
}

impl LightChange {
    /// Build a change from command-line values, mapping [`UNSET`] to `None`
    /// and rejecting anything out of range.
    pub fn from_flags(
        brightness: Option<f64>,
        color_x: Option<f64>,
        color_y: Option<f64>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            brightness: requested("br", brightness, MAX_BRIGHTNESS)?,
            color_x: requested("colorx", color_x, MAX_COLOR_COORDINATE)?,
            color_y: requested("colory", color_y, MAX_COLOR_COORDINATE)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.brightness.is_none() && self.color_x.is_none() && self.color_y.is_none()
    }
}

fn requested(flag: &str, value: Option<f64>, max: f64) -> Result<Option<f64>, AppError> {
    match value {
        None => Ok(None),
        Some(v) if v == UNSET => Ok(None),
        Some(v) if (0.0..=max).contains(&v) => Ok(Some(v)),
        Some(v) => Err(AppError::InvalidInput(format!(
            "--{} must be between 0 and {} (or {} to keep the current value), got {}",
            flag, max, UNSET, v
        ))),
    }
}

impl LightState {
    /// Apply `change` over this (current) state. The power flag follows the
    /// resulting brightness: on above zero, off at zero.
    pub fn merge(&self, change: &LightChange) -> LightState {
        let brightness = change.brightness.unwrap_or(self.brightness);
        LightState {
            on: brightness > 0.0,
            brightness,
            color_x: change.color_x.unwrap_or(self.color_x),
            color_y: change.color_y.unwrap_or(self.color_y),
        }
    }

    pub fn to_request_body(&self) -> serde_json::Value {
        json!({
            "on": {"on": self.on},
            "dimming": {"brightness": self.brightness},
            "color": {"xy": {"x": self.color_x, "y": self.color_y}},
        })
    }
}

#[derive(Debug, Deserialize)]
struct LightResource {
    on: Option<On>,
    dimming: Option<Dimming>,
    color: Option<Color>,
}

#[derive(Debug, Deserialize)]
struct On {
    on: bool,
}

#[derive(Debug, Deserialize)]
struct Dimming {
    brightness: f64,
}

#[derive(Debug, Deserialize)]
struct Color {
    xy: Xy,
}

#[derive(Debug, Deserialize)]
struct Xy {
    x: f64,
    y: f64,
}

/// Extract on/brightness/xy from a single light resource payload.
///
/// Lights without dimming or color support simply lack those objects and get
/// zero values. An undecodable payload is logged and yields the default state.
pub fn parse_light_state(raw: &str) -> LightState {
    let envelope: ResourceEnvelope<LightResource> = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "could not decode light resource");
            return LightState::default();
        }
    };
    envelope.log_errors();

    let Some(light) = envelope.data.into_iter().next() else {
        tracing::warn!("light resource response contained no data");
        return LightState::default();
    };

    let (color_x, color_y) = light.color.map(|c| (c.xy.x, c.xy.y)).unwrap_or_default();

    LightState {
        on: light.on.map(|o| o.on).unwrap_or_default(),
        brightness: light.dimming.map(|d| d.brightness).unwrap_or_default(),
        color_x,
        color_y,
    }
}
