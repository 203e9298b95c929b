use serde::{Deserialize, Serialize};

use crate::engine::EngineSpec;
use crate::flooding::FloodingSpec;
use crate::fuel::FuelSystem;
use crate::{SpecError, Vec3f};

/// Linear and angular drag coefficients applied by the integrator as
/// `v *= max(0, 1 - drag·dt)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragPreset {
    pub linear: f32,
    pub angular: f32,
}

impl DragPreset {
    pub const UNDERWATER: DragPreset = DragPreset { linear: 3.0, angular: 1.0 };
    pub const AIR: DragPreset = DragPreset { linear: 0.0, angular: 0.05 };
}

/// Static configuration of one vessel class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSpec {
    pub name: String,
    /// Dry mass (kg). Flooding adds to this at runtime.
    pub mass: f32,
    /// Full hull extents: x beam, y height, z length.
    pub hull_size: Vec3f,
    /// Buoyancy probes in the vessel frame.
    pub sample_points: Vec<Vec3f>,
    pub buoyancy_strength: f32,
    pub air_drag: DragPreset,
    pub underwater_drag: DragPreset,
    pub engines: Vec<EngineSpec>,
    pub fuel_tanks: usize,
    pub fuel_tank_capacity: f32,
    /// Where rudder side force is applied, in the vessel frame.
    pub steering_points: Vec<Vec3f>,
    /// Constant offset added to the steering command.
    pub steering_trim: f32,
    #[serde(default)]
    pub flooding: FloodingSpec,
}

impl VesselSpec {
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.sample_points.is_empty() {
            return Err(SpecError::NoSamplePoints { vessel: self.name.clone() });
        }
        if !(self.mass > 0.0) {
            return Err(SpecError::NonPositiveMass { vessel: self.name.clone(), mass: self.mass });
        }
        for (index, engine) in self.engines.iter().enumerate() {
            if engine.cylinders == 0 {
                return Err(SpecError::NoCylinders { index });
            }
            if !(engine.propeller_size > 0.0) {
                return Err(SpecError::NonPositivePropeller { index, size: engine.propeller_size });
            }
            if !(engine.fuel_cycle_s > 0.0) {
                return Err(SpecError::NonPositiveCycle { what: "fuel", value: engine.fuel_cycle_s });
            }
        }
        if !(self.flooding.cycle_s > 0.0) {
            return Err(SpecError::NonPositiveCycle { what: "flooding", value: self.flooding.cycle_s });
        }
        self.build_fuel_system().map(|_| ())
    }

    /// A fresh set of full tanks for this class.
    pub fn build_fuel_system(&self) -> Result<FuelSystem, SpecError> {
        FuelSystem::with_full_tanks(self.fuel_tanks, self.fuel_tank_capacity)
    }

    /// Diagonal body inertia of a solid box with the hull's extents.
    pub fn inertia(&self, mass: f32) -> Vec3f {
        let Vec3f { x: w, y: h, z: l } = self.hull_size;
        let k = mass / 12.0;
        Vec3f::new(k * (h * h + l * l), k * (w * w + l * l), k * (w * w + h * h))
    }
}

fn box_corners(half_beam: f32, keel: f32, half_length: f32) -> Vec<Vec3f> {
    let mut points = Vec::with_capacity(8);
    for z in [-half_length, -half_length * 0.33, half_length * 0.33, half_length] {
        for x in [-half_beam, half_beam] {
            points.push(Vec3f::new(x, keel, z));
        }
    }
    points
}

pub mod vesselspecs {
    use super::*;
    use crate::fuel::FuelType;

    pub const PATROL_BOAT: &str = "patrol_boat";
    pub const DINGHY: &str = "dinghy";

    /// Twin diesel workboat: eight keel probes, two tanks of 100.
    pub fn patrol_boat_spec() -> VesselSpec {
        let hull_size = Vec3f::new(2.4, 1.2, 6.0);
        let stern = -hull_size.z * 0.5;
        let engine = |x: f32| EngineSpec {
            cylinders: 4,
            cylinder_displacement: 0.5,
            fuel: FuelType::Diesel,
            mount_body: Vec3f::new(x, -0.5, stern),
            propeller_size: 0.5,
            fuel_cycle_s: 1.0,
        };
        VesselSpec {
            name: PATROL_BOAT.to_string(),
            mass: 40.0,
            hull_size,
            sample_points: box_corners(1.2, -0.4, 2.5),
            buoyancy_strength: 600.0,
            air_drag: DragPreset::AIR,
            underwater_drag: DragPreset::UNDERWATER,
            engines: vec![engine(-0.6), engine(0.6)],
            fuel_tanks: 2,
            fuel_tank_capacity: 100.0,
            steering_points: vec![Vec3f::new(0.0, -0.5, stern)],
            steering_trim: 0.0,
            flooding: FloodingSpec::default(),
        }
    }

    // Single outboard, four probes; the lightest hull we ship.
    pub fn dinghy_spec() -> VesselSpec {
        let hull_size = Vec3f::new(1.4, 0.6, 3.0);
        VesselSpec {
            name: DINGHY.to_string(),
            mass: 12.0,
            hull_size,
            sample_points: vec![
                Vec3f::new(-0.6, -0.2, -1.3),
                Vec3f::new(0.6, -0.2, -1.3),
                Vec3f::new(-0.6, -0.2, 1.3),
                Vec3f::new(0.6, -0.2, 1.3),
            ],
            buoyancy_strength: 200.0,
            air_drag: DragPreset::AIR,
            underwater_drag: DragPreset::UNDERWATER,
            engines: vec![EngineSpec {
                cylinders: 2,
                cylinder_displacement: 0.25,
                fuel: FuelType::Petrol,
                mount_body: Vec3f::new(0.0, -0.3, -1.5),
                propeller_size: 0.3,
                fuel_cycle_s: 1.0,
            }],
            fuel_tanks: 1,
            fuel_tank_capacity: 25.0,
            steering_points: vec![Vec3f::new(0.0, -0.3, -1.5)],
            steering_trim: 0.0,
            flooding: FloodingSpec::default(),
        }
    }

    pub fn names() -> &'static [&'static str] {
        &[PATROL_BOAT, DINGHY]
    }

    pub fn by_name(name: &str) -> Option<VesselSpec> {
        match name {
            PATROL_BOAT => Some(patrol_boat_spec()),
            DINGHY => Some(dinghy_spec()),
            _ => None,
        }
    }
}
