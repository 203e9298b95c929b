use super::buoyancy::{apply_buoyancy, probe_depths, world_sample_points};
use super::terms::*;
use super::types::{VesselInputs, VesselState, VesselStepDebug};
use super::util::WORLD_UP;
use crate::engine::{step_engine, EngineInputs};
use crate::flooding::{ImpactOutcome, GRAVITY};
use crate::{Quatf, Sea, Vec3f, VesselSpec};

/// Advance one vessel by `dt` seconds of simulated time.
/// See `step_vessel_dbg` for the per-term breakdown.
pub fn step_vessel(
    sea: &Sea,
    spec: &VesselSpec,
    inputs: VesselInputs,
    state: &mut VesselState,
    dt: f32,
    time: f32,
) {
    step_vessel_dbg(sea, spec, inputs, state, dt, time, None);
}

/// Variant of `step_vessel` that fills out an optional debug telemetry struct.
pub fn step_vessel_dbg(
    sea: &Sea,
    spec: &VesselSpec,
    inputs: VesselInputs,
    state: &mut VesselState,
    dt: f32,
    time: f32,
    dbg: Option<&mut VesselStepDebug>,
) {
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }
    state.accum.clear();
    let speed = state.speed();

    // Engines first; they only need speed and the tanks.
    let engine_inputs = EngineInputs {
        ignition: inputs.ignition,
        throttle: inputs.throttle,
        vessel_speed: speed,
    };
    for (engine, running) in spec.engines.iter().zip(state.engines.iter_mut()) {
        step_engine(engine, running, engine_inputs, &sea.fluid, &mut state.fuel, dt);
    }

    let points = world_sample_points(spec, state);
    let depths = probe_depths(&sea.waves, &points, time);
    let buoyancy = apply_buoyancy(spec, state, &points, &depths);
    let drift = apply_drift(sea, state, &points, &depths);
    let propulsion = apply_propulsion(sea, spec, state, time);
    let steering = apply_steering(spec, inputs, state);

    let flooded = state
        .flooding
        .step(&spec.flooding, state.position, state.orientation, sea.density(), dt);
    state.mass += flooded;

    integrate_body(spec, state, dt);

    if let Some(d) = dbg {
        *d = VesselStepDebug {
            dt,
            time,
            inputs,
            speed,
            submerged_count: state.submerged_count,
            drag_switched: buoyancy.drag_switched,
            buoyancy: buoyancy.force,
            drift,
            propulsion,
            steering,
            flooded,
            net_force: state.accum.force,
            net_torque: state.accum.torque,
        };
    }
}

/// Semi-implicit Euler over the accumulated force and torque plus gravity.
/// Drag from the active preset damps both linear and angular velocity.
pub fn integrate_body(spec: &VesselSpec, state: &mut VesselState, dt: f32) {
    let mass = state.mass.max(1e-3);
    state.accum.add_force(-WORLD_UP * GRAVITY * mass);

    state.velocity += state.accum.force / mass * dt;

    // Torque into the body frame, divide by the box inertia, back to world.
    let inertia = spec.inertia(mass).max(Vec3f::splat(1e-6));
    let torque_body = state.orientation.inverse() * state.accum.torque;
    let alpha_world = state.orientation * (torque_body / inertia);
    state.ang_vel += alpha_world * dt;

    state.velocity *= (1.0 - state.drag.linear * dt).max(0.0);
    state.ang_vel *= (1.0 - state.drag.angular * dt).max(0.0);

    state.position += state.velocity * dt;
    let spin = state.ang_vel * dt;
    if spin.length_squared() > 1e-12 {
        state.orientation = (Quatf::from_scaled_axis(spin) * state.orientation).normalize();
    }
}

/// Report a collision against the hull. `contact` is a world point; the
/// breach, if any, stays attached to the hull from then on.
pub fn register_impact(
    spec: &VesselSpec,
    state: &mut VesselState,
    impact_speed: f32,
    contact: Vec3f,
    time: f32,
) -> ImpactOutcome {
    state.flooding.register_impact(
        &spec.flooding,
        impact_speed,
        contact,
        state.position,
        state.orientation,
        time,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vesselspecs::patrol_boat_spec;
    use crate::DragPreset;

    #[test]
    fn free_fall_in_air() {
        let spec = patrol_boat_spec();
        let sea = Sea::still_water();
        let mut state = VesselState::new(&spec, Vec3f::new(0.0, 100.0, 0.0), Quatf::IDENTITY).expect("state");
        let dt = 0.1;
        for i in 0..10 {
            step_vessel(&sea, &spec, VesselInputs::default(), &mut state, dt, i as f32 * dt);
        }
        assert_eq!(state.drag, DragPreset::AIR);
        assert!(!state.submerged);
        // No air drag: v = g · t
        assert!((state.velocity.y + GRAVITY).abs() < 1e-3, "vy={}", state.velocity.y);
        assert!((state.orientation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_or_negative_dt_is_ignored() {
        let spec = patrol_boat_spec();
        let sea = Sea::still_water();
        let mut state = VesselState::new(&spec, Vec3f::new(0.0, 3.0, 0.0), Quatf::IDENTITY).expect("state");
        let before = state.position;
        step_vessel(&sea, &spec, VesselInputs::default(), &mut state, 0.0, 0.0);
        step_vessel(&sea, &spec, VesselInputs::default(), &mut state, -1.0, 0.0);
        step_vessel(&sea, &spec, VesselInputs::default(), &mut state, f32::NAN, 0.0);
        assert_eq!(state.position, before);
    }

    #[test]
    fn debug_breakdown_matches_accumulator() {
        let spec = patrol_boat_spec();
        let sea = Sea::still_water();
        let mut state = VesselState::new(&spec, Vec3f::ZERO, Quatf::IDENTITY).expect("state");
        let mut dbg = VesselStepDebug::default();
        step_vessel_dbg(&sea, &spec, VesselInputs::default(), &mut state, 1.0 / 60.0, 0.0, Some(&mut dbg));
        assert_eq!(dbg.submerged_count, 8);
        assert!(dbg.drag_switched);
        let weight = -GRAVITY * spec.mass;
        let expected = dbg.buoyancy.y + dbg.drift.y + dbg.propulsion.y + dbg.steering.y + weight;
        assert!((dbg.net_force.y - expected).abs() < 1e-3, "{} vs {}", dbg.net_force.y, expected);
    }

    #[test]
    fn pure_torque_spins_about_its_axis() {
        let spec = patrol_boat_spec();
        let mut state = VesselState::new(&spec, Vec3f::new(0.0, 50.0, 0.0), Quatf::IDENTITY).expect("state");
        state.accum.torque = Vec3f::new(0.0, 10.0, 0.0);
        integrate_body(&spec, &mut state, 0.1);
        let iyy = spec.inertia(spec.mass).y;
        let expected = 10.0 / iyy * 0.1 * (1.0 - 0.05 * 0.1);
        assert!((state.ang_vel.y - expected).abs() < 1e-6, "{:?}", state.ang_vel);
        assert!(state.ang_vel.x.abs() < 1e-9 && state.ang_vel.z.abs() < 1e-9);
    }
}
