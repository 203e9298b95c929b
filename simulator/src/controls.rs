use bevy::prelude::*;
use ocean::VesselInputs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Helm state published by whatever drives the vessel (a UI, a script, a
/// test). May be absent; the simulation keeps going without it.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipControls {
    pub ignition: bool,
    /// -100..100
    pub throttle: f32,
    /// -80..80, positive pushes the stern to starboard
    pub steering: f32,
}

impl From<ShipControls> for VesselInputs {
    fn from(c: ShipControls) -> Self {
        VesselInputs {
            ignition: c.ignition,
            throttle: c.throttle,
            steering: c.steering,
        }
    }
}

/// What the physics actually sees. Holds the last controls that were seen
/// so a missing control source degrades to "hold course" instead of stopping.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct ControlLink {
    pub inputs: VesselInputs,
    pub degraded: bool,
    warned: bool,
}

pub fn resolve_controls(controls: Option<Res<ShipControls>>, mut link: ResMut<ControlLink>) {
    match controls {
        Some(c) => {
            let c = *c;
            if link.degraded {
                info!(controls = ?c, "Ship controls available again");
            }
            link.inputs = c.into();
            link.degraded = false;
            link.warned = false;
        }
        None => {
            if !link.warned {
                warn!(last_known = ?link.inputs, "Ship controls unavailable; holding last-known inputs");
                link.warned = true;
            }
            link.degraded = true;
        }
    }
}
