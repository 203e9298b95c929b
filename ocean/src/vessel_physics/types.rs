use crate::engine::EngineState;
use crate::flooding::FloodingState;
use crate::fuel::FuelSystem;
use crate::{DragPreset, Quatf, SpecError, Vec3f, VesselSpec};

/// Per-tick force and torque sums, both in world frame. Cleared at the start
/// of every step; only the stepping thread writes to it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceAccumulator {
    pub force: Vec3f,
    /// Torque about the vessel's center of mass.
    pub torque: Vec3f,
}

impl ForceAccumulator {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn add_force(&mut self, force: Vec3f) {
        self.force += force;
    }

    /// Add a force applied at world point `at`, given the center of mass `com`.
    pub fn add_force_at(&mut self, force: Vec3f, at: Vec3f, com: Vec3f) {
        self.force += force;
        self.torque += (at - com).cross(force);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VesselStepDebug {
    pub dt: f32,
    pub time: f32,
    pub inputs: VesselInputs,
    pub speed: f32,
    pub submerged_count: usize,
    /// True on the tick the drag preset was swapped.
    pub drag_switched: bool,
    pub buoyancy: Vec3f,
    pub drift: Vec3f,
    pub propulsion: Vec3f,
    pub steering: Vec3f,
    /// Mass admitted by flooding this tick (usually zero between cycles).
    pub flooded: f32,
    pub net_force: Vec3f,
    pub net_torque: Vec3f,
}

#[derive(Debug, Clone)]
pub struct VesselState {
    pub position: Vec3f,
    pub velocity: Vec3f,
    /// Orientation as quaternion (body→world).
    /// Body axes: +Z forward, +Y up, +X right (starboard).
    pub orientation: Quatf,
    /// Angular velocity in world frame (rad/s).
    pub ang_vel: Vec3f,
    /// Current mass; dry mass plus everything flooding has let in.
    pub mass: f32,
    /// Active drag pair, swapped between the air and underwater presets.
    pub drag: DragPreset,
    pub submerged: bool,
    pub submerged_count: usize,
    pub engines: Vec<EngineState>,
    pub fuel: FuelSystem,
    pub flooding: FloodingState,
    pub accum: ForceAccumulator,
}

impl VesselState {
    /// Spawn a vessel at rest. Starts dry; the first step decides whether it
    /// is actually in the water.
    pub fn new(spec: &VesselSpec, position: Vec3f, orientation: Quatf) -> Result<Self, SpecError> {
        spec.validate()?;
        Ok(Self {
            position,
            velocity: Vec3f::ZERO,
            orientation: orientation.normalize(),
            ang_vel: Vec3f::ZERO,
            mass: spec.mass,
            drag: spec.air_drag,
            submerged: false,
            submerged_count: 0,
            engines: vec![EngineState::default(); spec.engines.len()],
            fuel: spec.build_fuel_system()?,
            flooding: FloodingState::default(),
            accum: ForceAccumulator::default(),
        })
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn tank_levels(&self) -> Vec<f32> {
        self.fuel.tanks().iter().map(|t| t.remaining).collect()
    }

    /// True while at least one engine is running.
    pub fn any_engine_running(&self) -> bool {
        self.engines.iter().any(|e| e.ignition)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VesselInputs {
    /// Ignition command for every engine on board.
    pub ignition: bool,
    /// Throttle in [-100, 100]. Negative values idle the engines.
    pub throttle: f32,
    /// Rudder in [-80, 80]. Positive pushes the steering points to starboard.
    pub steering: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_center_force_produces_torque() {
        let mut acc = ForceAccumulator::default();
        // Lifting the starboard side: torque about +Z.
        acc.add_force_at(Vec3f::Y * 10.0, Vec3f::new(1.0, 0.0, 0.0), Vec3f::ZERO);
        assert_eq!(acc.force, Vec3f::new(0.0, 10.0, 0.0));
        assert!((acc.torque - Vec3f::new(0.0, 0.0, 10.0)).length() < 1e-6, "{:?}", acc.torque);
        acc.clear();
        assert_eq!(acc, ForceAccumulator::default());
    }
}
