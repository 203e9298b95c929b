//! Hull breaches and the water they let in.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Quatf, Vec3f};

pub const GRAVITY: f32 = 9.81;
/// World height at or below which a breach takes on water.
pub const NOMINAL_WATERLINE: f32 = 0.0;
const RADIUS_PER_IMPACT_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodingSpec {
    /// Impacts must be strictly faster than this to hole the hull.
    pub breach_threshold: f32,
    /// Seconds of simulated time between inflow updates.
    pub cycle_s: f32,
}

impl Default for FloodingSpec {
    fn default() -> Self {
        Self { breach_threshold: 10.0, cycle_s: 1.0 }
    }
}

/// A hole in the hull, fixed in the vessel frame. Never repaired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breach {
    pub local_pos: Vec3f,
    pub radius: f32,
    /// Simulation time at which the breach was opened.
    pub created_at: f32,
}

impl Breach {
    pub fn world_pos(&self, position: Vec3f, orientation: Quatf) -> Vec3f {
        position + orientation * self.local_pos
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpactOutcome {
    Breached { radius: f32 },
    /// Too soft to hole the hull.
    Glancing,
}

/// Orifice-flow volume through a hole of `radius` under `head_depth` of water.
pub fn discharge(head_depth: f32, radius: f32) -> f32 {
    (2.0 * GRAVITY * head_depth.abs()).sqrt() * PI * radius * radius
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FloodingState {
    pub breaches: Vec<Breach>,
    /// Total mass taken on so far.
    pub flooded_mass: f32,
    timer: f32,
}

impl FloodingState {
    /// Apply a collision. `contact` is in world space and is stored relative
    /// to the vessel pose at the moment of impact.
    pub fn register_impact(
        &mut self,
        spec: &FloodingSpec,
        impact_speed: f32,
        contact: Vec3f,
        position: Vec3f,
        orientation: Quatf,
        time: f32,
    ) -> ImpactOutcome {
        if !(impact_speed > spec.breach_threshold) {
            debug!(impact_speed, "Impact too soft to breach the hull");
            return ImpactOutcome::Glancing;
        }
        let radius = impact_speed * RADIUS_PER_IMPACT_SPEED;
        let local_pos = orientation.inverse() * (contact - position);
        self.breaches.push(Breach { local_pos, radius, created_at: time });
        info!(impact_speed, radius, ?local_pos, breaches = self.breaches.len(), "Hull breached");
        ImpactOutcome::Breached { radius }
    }

    /// Advance the flooding timer. Returns the mass admitted this call, zero
    /// on ticks where no cycle completes.
    pub fn step(
        &mut self,
        spec: &FloodingSpec,
        position: Vec3f,
        orientation: Quatf,
        density: f32,
        dt: f32,
    ) -> f32 {
        self.timer += dt;
        if self.timer < spec.cycle_s {
            return 0.0;
        }
        self.timer -= spec.cycle_s;
        let added = self.cycle_inflow(position, orientation, density);
        self.flooded_mass += added;
        added
    }

    /// Mass admitted by one flooding cycle for the given pose. Breaches
    /// above the waterline admit nothing.
    pub fn cycle_inflow(&self, position: Vec3f, orientation: Quatf, density: f32) -> f32 {
        self.breaches
            .iter()
            .filter_map(|b| {
                let y = b.world_pos(position, orientation).y;
                (y <= NOMINAL_WATERLINE).then(|| discharge(y, b.radius) * (density / 1000.0))
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discharge_matches_orifice_formula() {
        let q = discharge(2.0, 1.5);
        let expected = (2.0f32 * 9.81 * 2.0).sqrt() * PI * 1.5 * 1.5;
        assert!((q - expected).abs() < 1e-4);
        assert!((q - 44.28).abs() < 0.05, "q={q}");
        // Head is a depth; the sign of the world Y does not matter.
        assert_eq!(discharge(-2.0, 1.5), q);
    }

    #[test]
    fn discharge_increases_with_depth_and_radius() {
        let mut last = 0.0;
        for i in 1..50 {
            let q = discharge(i as f32 * 0.2, 0.7);
            assert!(q > last);
            last = q;
        }
        let mut last = 0.0;
        for i in 1..50 {
            let q = discharge(3.0, i as f32 * 0.05);
            assert!(q > last);
            last = q;
        }
    }

    #[test]
    fn soft_impacts_do_not_breach() {
        let spec = FloodingSpec::default();
        let mut state = FloodingState::default();
        let out = state.register_impact(&spec, 10.0, Vec3f::ZERO, Vec3f::ZERO, Quatf::IDENTITY, 0.0);
        assert_eq!(out, ImpactOutcome::Glancing);
        assert!(state.breaches.is_empty());
        let out = state.register_impact(&spec, f32::NAN, Vec3f::ZERO, Vec3f::ZERO, Quatf::IDENTITY, 0.0);
        assert_eq!(out, ImpactOutcome::Glancing);
    }

    #[test]
    fn breach_is_stored_in_vessel_frame() {
        let spec = FloodingSpec::default();
        let mut state = FloodingState::default();
        let position = Vec3f::new(10.0, 0.0, 5.0);
        let orientation = Quatf::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let contact = Vec3f::new(12.0, -1.0, 5.0);
        let out = state.register_impact(&spec, 15.0, contact, position, orientation, 3.5);
        assert_eq!(out, ImpactOutcome::Breached { radius: 1.5 });
        let breach = state.breaches[0];
        assert_eq!(breach.created_at, 3.5);
        // +X in world is the vessel's +Z after a +90° yaw
        assert!((breach.local_pos - Vec3f::new(0.0, -1.0, 2.0)).length() < 1e-5, "{:?}", breach.local_pos);
        assert!((breach.world_pos(position, orientation) - contact).length() < 1e-5);
    }

    #[test]
    fn inflow_runs_once_per_cycle() {
        let spec = FloodingSpec { breach_threshold: 10.0, cycle_s: 1.0 };
        let mut state = FloodingState::default();
        state.register_impact(&spec, 15.0, Vec3f::new(0.0, -2.0, 0.0), Vec3f::ZERO, Quatf::IDENTITY, 0.0);
        let mut added = Vec::new();
        for _ in 0..10 {
            added.push(state.step(&spec, Vec3f::ZERO, Quatf::IDENTITY, 998.0, 0.25));
        }
        let cycles: Vec<f32> = added.iter().copied().filter(|&m| m > 0.0).collect();
        assert_eq!(cycles.len(), 2, "added={added:?}");
        let expected = discharge(2.0, 1.5) * 0.998;
        assert!((cycles[0] - expected).abs() < 1e-3);
        assert!((cycles[0] - 44.19).abs() < 0.05, "got {}", cycles[0]);
        assert!((state.flooded_mass - 2.0 * expected).abs() < 1e-3);
    }

    #[test]
    fn cycle_period_carries_overshoot() {
        let spec = FloodingSpec { breach_threshold: 10.0, cycle_s: 1.0 };
        let mut state = FloodingState::default();
        state.register_impact(&spec, 15.0, Vec3f::new(0.0, -2.0, 0.0), Vec3f::ZERO, Quatf::IDENTITY, 0.0);
        // 11 × 0.3 s = 3.3 s of flooding: three full cycles.
        let cycles = (0..11)
            .map(|_| state.step(&spec, Vec3f::ZERO, Quatf::IDENTITY, 998.0, 0.3))
            .filter(|&m| m > 0.0)
            .count();
        assert_eq!(cycles, 3);
    }

    #[test]
    fn breach_above_waterline_admits_nothing() {
        let spec = FloodingSpec::default();
        let mut state = FloodingState::default();
        state.register_impact(&spec, 20.0, Vec3f::new(0.0, 0.5, 0.0), Vec3f::ZERO, Quatf::IDENTITY, 0.0);
        assert_eq!(state.cycle_inflow(Vec3f::ZERO, Quatf::IDENTITY, 998.0), 0.0);
        // Same breach once the hull settles lower.
        let sunk = Vec3f::new(0.0, -1.0, 0.0);
        assert!(state.cycle_inflow(sunk, Quatf::IDENTITY, 998.0) > 0.0);
    }
}
