//! Engine RPM control loop and fuel draw.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::fuel::{FuelSource, FuelType};
use crate::math::lerp_clamped;
use crate::{FluidState, Vec3f};

pub const MAX_RPM: f32 = 5000.0;
/// RPM lost per tick while the engine is not running.
pub const STALL_DECAY_PER_TICK: f32 = 100.0;
/// Torque/horsepower conversion constant.
pub const HORSEPOWER_CONSTANT: f32 = 5252.0;
pub const FUEL_USE_FACTOR: f32 = 0.06;
/// Fraction of thrust delivered while the propeller is out of the water.
pub const AIRBORNE_THRUST_FACTOR: f32 = 0.01;

const MIN_RESISTANCE: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub cylinders: u32,
    /// Displacement of a single cylinder (L).
    pub cylinder_displacement: f32,
    pub fuel: FuelType,
    /// Propeller position in the vessel frame.
    pub mount_body: Vec3f,
    pub propeller_size: f32,
    /// Seconds between fuel requests.
    #[serde(default = "default_fuel_cycle")]
    pub fuel_cycle_s: f32,
}

fn default_fuel_cycle() -> f32 {
    1.0
}

impl EngineSpec {
    /// Total swept volume (L).
    pub fn displacement(&self) -> f32 {
        self.cylinder_displacement * self.cylinders as f32
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub rpm: f32,
    /// Whether the engine is actually running (commanded on and fueled).
    pub ignition: bool,
    pub throttle: f32,
    /// Amount requested on the next fuel cycle.
    pub fuel_usage: f32,
    /// Propulsion force magnitude produced this tick (N).
    pub propulsion: f32,
    pub resistance: f32,
    fuel_timer: f32,
    fuel_denied: bool,
    last_ignition_cmd: bool,
}

impl EngineState {
    /// True once a fuel request has been refused; cleared by cycling the
    /// ignition command off and on.
    pub fn is_fuel_starved(&self) -> bool {
        self.fuel_denied
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineInputs {
    pub ignition: bool,
    /// Throttle in [-100, 100].
    pub throttle: f32,
    pub vessel_speed: f32,
}

/// Propeller load: `density / propeller_size · (1 − viscosity) · speed`.
pub fn propeller_resistance(fluid: &FluidState, propeller_size: f32, vessel_speed: f32) -> f32 {
    fluid.density() / propeller_size * (1.0 - fluid.dynamic_viscosity) * vessel_speed
}

pub fn target_rpm(throttle: f32) -> f32 {
    lerp_clamped(0.0, MAX_RPM, throttle / 100.0)
}

pub fn propulsion_force(spec: &EngineSpec, rpm: f32) -> f32 {
    spec.fuel.properties().energy_density * spec.displacement() / HORSEPOWER_CONSTANT * rpm
}

pub fn fuel_usage(spec: &EngineSpec, rpm: f32) -> f32 {
    spec.displacement() * (rpm / MAX_RPM) * FUEL_USE_FACTOR
}

/// Advance one engine by one tick.
pub fn step_engine(
    spec: &EngineSpec,
    state: &mut EngineState,
    inputs: EngineInputs,
    fluid: &FluidState,
    fuel: &mut impl FuelSource,
    dt: f32,
) {
    let throttle = inputs.throttle.clamp(-100.0, 100.0);
    state.throttle = throttle;
    state.resistance = propeller_resistance(fluid, spec.propeller_size, inputs.vessel_speed);

    if inputs.ignition && !state.last_ignition_cmd {
        // Fresh start: forget an earlier refusal and ask for fuel right away.
        state.fuel_denied = false;
        state.fuel_timer = spec.fuel_cycle_s;
    }
    state.last_ignition_cmd = inputs.ignition;

    if !inputs.ignition || state.fuel_denied {
        spin_down(state);
        return;
    }

    state.fuel_timer += dt;
    if state.fuel_timer >= spec.fuel_cycle_s {
        state.fuel_timer -= spec.fuel_cycle_s;
        if !fuel.request_fuel(state.fuel_usage).is_granted() {
            info!(requested = state.fuel_usage, rpm = state.rpm, "Fuel request denied; engine stalled");
            state.fuel_denied = true;
            spin_down(state);
            return;
        }
    }

    state.ignition = true;
    let target = target_rpm(throttle);
    if state.rpm < target {
        let load = if state.resistance > MIN_RESISTANCE {
            state.rpm / state.resistance / 10.0
        } else {
            0.0
        };
        state.rpm = (state.rpm + throttle - load).min(target);
    } else if state.rpm > target {
        let mut fall = (throttle - throttle * state.resistance).abs();
        if fall <= f32::EPSILON {
            fall = STALL_DECAY_PER_TICK;
        }
        state.rpm = (state.rpm - fall).max(target);
    }
    state.rpm = state.rpm.clamp(0.0, MAX_RPM);
    state.propulsion = propulsion_force(spec, state.rpm);
    state.fuel_usage = fuel_usage(spec, state.rpm);
}

fn spin_down(state: &mut EngineState) {
    state.ignition = false;
    state.rpm = (state.rpm - STALL_DECAY_PER_TICK).max(0.0);
    state.fuel_usage = 0.0;
    state.propulsion = 0.0;
}
