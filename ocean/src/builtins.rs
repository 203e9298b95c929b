use crate::current::CurrentSpec;
use crate::waves::WaveFieldSpec;
use crate::{FluidState, SeaSpec};

/// Flat water, no current. Useful for checking trim and steady-state speed.
pub fn calm_sea() -> SeaSpec {
    SeaSpec {
        waves: WaveFieldSpec::Calm,
        current: CurrentSpec::Uniform { heading_deg: 0.0, magnitude: 0.0 },
        fluid: FluidState::default(),
    }
}

/// Full physics swell over a 10×10 cell random current grid.
pub fn open_ocean(seed: u64) -> SeaSpec {
    SeaSpec {
        waves: WaveFieldSpec::OceanSwell,
        current: CurrentSpec::Grid { size: 10.0, seed, update_interval_s: None },
        fluid: FluidState::default(),
    }
}

/// Low swell with a gentle steady set to the east, in cold water.
pub fn harbor() -> SeaSpec {
    SeaSpec {
        waves: WaveFieldSpec::RenderSwell,
        current: CurrentSpec::Uniform { heading_deg: 90.0, magnitude: 1.5 },
        fluid: FluidState { temperature_c: 8.0, ..FluidState::default() },
    }
}

pub fn by_name(name: &str, seed: u64) -> Option<SeaSpec> {
    match name {
        "calm" => Some(calm_sea()),
        "open_ocean" => Some(open_ocean(seed)),
        "harbor" => Some(harbor()),
        _ => None,
    }
}
