pub mod lights;
pub mod output;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::auth::credentials::ENV_BRIDGE;
use crate::error::AppError;
use crate::models::light_state::LightChange;

#[derive(Parser, Debug)]
#[command(
    name = "hue-light",
    version,
    about = "Hue bridge CLI - list lights and set their brightness and color"
)]
pub struct Cli {
    /// List all registered lights with their current state
    #[arg(long)]
    pub list: bool,

    /// Name of the light to control
    #[arg(long, value_name = "NAME")]
    pub light: Option<String>,

    /// Brightness of the given light [0 - 100], -1 keeps the current value
    #[arg(long = "br", value_name = "BRIGHTNESS", allow_negative_numbers = true)]
    pub brightness: Option<f64>,

    /// X coordinate in the color diagram [0.0 - 1.0], -1 keeps the current value
    #[arg(long = "colorx", value_name = "X", allow_negative_numbers = true)]
    pub color_x: Option<f64>,

    /// Y coordinate in the color diagram [0.0 - 1.0], -1 keeps the current value
    #[arg(long = "colory", value_name = "Y", allow_negative_numbers = true)]
    pub color_y: Option<f64>,

    /// Pair with the bridge again, replacing the stored key
    #[arg(long)]
    pub pair: bool,

    /// Bridge address to use (replaces the stored one; forces pairing if it differs)
    #[arg(long, value_name = "ADDRESS", env = ENV_BRIDGE)]
    pub bridge: Option<String>,

    /// Path of the stored bridge credentials
    #[arg(long, value_name = "PATH", env = "HUE_LIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Validate the bridge's TLS certificate instead of accepting self-signed ones
    #[arg(long)]
    pub verify_tls: bool,

    /// Request timeout in seconds (default: none)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Output as human-readable table instead of JSON
    #[arg(short = 't', long = "table")]
    pub table: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// True when there is nothing to do and usage should be shown.
    pub fn is_noop(&self) -> bool {
        !self.list && self.light.is_none() && !self.pair
    }

    /// The change requested for `--light`, validated. `None` when no light is
    /// being controlled (list mode wins over `--light`).
    pub fn light_change(&self) -> Result<Option<LightChange>, AppError> {
        if self.list || self.light.is_none() {
            return Ok(None);
        }
        LightChange::from_flags(self.brightness, self.color_x, self.color_y).map(Some)
    }
}
