use std::path::PathBuf;

use bevy::prelude::Resource;
use clap::Parser;
use ocean::CurrentSpec;

use crate::Config;

#[derive(Parser, Debug, Resource, Clone)]
#[command(name = "ocean-sim")]
#[command(about = "Headless floating-vessel simulation", long_about = None)]
pub struct Args {
    /// Path to the TOML run configuration
    #[arg(long, default_value = "simulator.toml")]
    pub config: PathBuf,
    /// Stop after this many simulated seconds
    #[arg(long)]
    pub duration_s: Option<f32>,
    /// Physics ticks per second
    #[arg(long)]
    pub tick_hz: Option<f64>,
    /// Seed for the current grid
    #[arg(long)]
    pub seed: Option<u64>,
    /// Pace ticks against the wall clock instead of running flat out
    #[arg(long, default_value_t = false)]
    pub realtime: bool,
}

impl Args {
    /// Layer command-line overrides on top of the file config.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(d) = self.duration_s {
            cfg.duration_s = Some(d);
        }
        if let Some(hz) = self.tick_hz {
            cfg.tick_hz = hz;
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
            if let CurrentSpec::Grid { seed: s, .. } = &mut cfg.sea.current {
                *s = seed;
            }
        }
        if self.realtime {
            cfg.realtime = true;
        }
    }
}
