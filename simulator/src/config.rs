use std::path::Path;

use anyhow::{Context, Result};
use bevy::prelude::Resource;
use ocean::{vesselspecs, SeaSpec, Vec3f};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::controls::ShipControls;

#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct Config {
    pub tick_hz: f64,
    /// Simulated seconds before the app exits; `None` runs until killed.
    pub duration_s: Option<f32>,
    /// Pace ticks against the wall clock. Off by default: each update is
    /// exactly one tick, as fast as the machine allows.
    pub realtime: bool,
    /// Wave sampling threads; 0 lets rayon decide.
    pub worker_threads: usize,
    pub telemetry_interval_s: f32,
    pub seed: u64,
    /// Named sea from `ocean::builtins`. Takes precedence over `sea`.
    pub sea_preset: Option<String>,
    pub sea: SeaSpec,
    pub vessel: VesselConfig,
    /// Initial helm. `None` starts the run with no control source attached.
    pub controls: Option<ShipControls>,
    pub impacts: Vec<ScriptedImpact>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_hz: 60.0,
            duration_s: Some(120.0),
            realtime: false,
            worker_threads: 0,
            telemetry_interval_s: 1.0,
            seed: 0,
            sea_preset: None,
            sea: SeaSpec::default(),
            vessel: VesselConfig::default(),
            controls: Some(ShipControls { ignition: true, throttle: 50.0, steering: 0.0 }),
            impacts: Vec::new(),
        }
    }
}

impl Config {
    /// The sea to build: the named preset if one is set, else the inline spec.
    pub fn resolved_sea(&self) -> Result<SeaSpec> {
        match &self.sea_preset {
            Some(name) => ocean::builtins::by_name(name, self.seed)
                .with_context(|| format!("unknown sea preset `{name}`")),
            None => Ok(self.sea.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselConfig {
    pub preset: String,
    pub spawn: Vec3f,
    pub heading_deg: f32,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            preset: vesselspecs::PATROL_BOAT.to_string(),
            spawn: Vec3f::new(50.0, 0.0, 50.0),
            heading_deg: 0.0,
        }
    }
}

/// A collision injected at a fixed simulated time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptedImpact {
    pub at_s: f32,
    pub speed: f32,
    /// Contact point in the vessel frame.
    pub offset: Vec3f,
}

/// Read the run configuration. A missing file is not an error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!(?path, "No config file found; using defaults");
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
