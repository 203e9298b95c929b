//! Floating-vessel physics shared by the simulator and its tests.
//!
//! This crate intentionally avoids any ECS types. Everything here is plain
//! data plus pure step functions: waves and currents are read-only once
//! built, and a vessel's mutable state is owned by whoever steps it.

mod math;
pub use math::{lerp_clamped, Quatf, Vec2f, Vec3f};
mod error;
pub use error::SpecError;

pub mod current;
pub mod engine;
pub mod flooding;
pub mod fluid;
pub mod fuel;
pub mod waves;

pub use current::{CurrentCell, CurrentSpec, WaterCurrentGrid, WaterCurrents};
pub use engine::{step_engine, EngineInputs, EngineSpec, EngineState};
pub use flooding::{Breach, FloodingSpec, FloodingState, ImpactOutcome};
pub use fluid::FluidState;
pub use fuel::{FuelGrant, FuelSource, FuelSystem, FuelTank, FuelType, SharedFuelSystem};
pub use waves::{WaveComponent, WaveField, WaveFieldSpec};

mod sea;
pub use sea::{Sea, SeaSpec};

pub mod builtins;

pub mod vessel_physics;
pub use vessel_physics::{
    register_impact, step_vessel, step_vessel_dbg, VesselInputs, VesselState, VesselStepDebug,
};

mod vessel_specs;
pub use vessel_specs::vesselspecs;
pub use vessel_specs::{DragPreset, VesselSpec};
