use super::types::{VesselInputs, VesselState};
use super::util::{to_world, BODY_FWD, BODY_RIGHT};
use crate::engine::AIRBORNE_THRUST_FACTOR;
use crate::{Sea, Vec3f, VesselSpec};

const STEERING_LIMIT: f32 = 80.0;
const STEERING_GAIN: f32 = 0.5;

// ----- Current drift -----

/// Current push at every wet probe. Probes outside the current grid get
/// nothing.
pub(super) fn apply_drift(sea: &Sea, state: &mut VesselState, points: &[Vec3f], depths: &[f32]) -> Vec3f {
    let mut total = Vec3f::ZERO;
    for (&p, _) in points.iter().zip(depths).filter(|&(_, &d)| d < 0.0) {
        if let Some(f) = sea.current_at(p) {
            state.accum.add_force_at(f, p, state.position);
            total += f;
        }
    }
    total
}

// ----- Propulsion -----

/// Engine thrust along the hull's forward axis, applied at each propeller.
/// A propeller above the wave surface only bites at a hundredth of its force.
pub(super) fn apply_propulsion(sea: &Sea, spec: &VesselSpec, state: &mut VesselState, time: f32) -> Vec3f {
    let forward = state.orientation * BODY_FWD;
    let mut total = Vec3f::ZERO;
    for (engine, running) in spec.engines.iter().zip(&state.engines) {
        if running.propulsion <= 0.0 {
            continue;
        }
        let mount = to_world(state.position, state.orientation, engine.mount_body);
        let mut thrust = running.propulsion;
        if mount.y > sea.wave_height(mount.x, mount.z, time) {
            thrust *= AIRBORNE_THRUST_FACTOR;
        }
        let f = forward * thrust;
        state.accum.add_force_at(f, mount, state.position);
        total += f;
    }
    total
}

// ----- Steering -----

/// Side force `(steering + trim) · speed · 0.5` at each steering point,
/// only while the ignition is commanded on.
pub(super) fn apply_steering(spec: &VesselSpec, inputs: VesselInputs, state: &mut VesselState) -> Vec3f {
    if !inputs.ignition {
        return Vec3f::ZERO;
    }
    let steering = inputs.steering.clamp(-STEERING_LIMIT, STEERING_LIMIT);
    let magnitude = (steering + spec.steering_trim) * state.speed() * STEERING_GAIN;
    if magnitude == 0.0 {
        return Vec3f::ZERO;
    }
    let right = state.orientation * BODY_RIGHT;
    let mut total = Vec3f::ZERO;
    for &local in &spec.steering_points {
        let at = to_world(state.position, state.orientation, local);
        let f = right * magnitude;
        state.accum.add_force_at(f, at, state.position);
        total += f;
    }
    total
}
