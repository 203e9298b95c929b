use serde::{Deserialize, Serialize};

/// Density of fresh water at the reference temperature (kg/m³).
pub const NOMINAL_DENSITY: f32 = 998.2;
/// Volumetric temperature expansion coefficient.
pub const THERMAL_EXPANSION: f32 = 0.0002;
pub const REFERENCE_TEMPERATURE_C: f32 = 20.0;

/// Ambient water around the vessel. Temperature is the only input; density
/// is always derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluidState {
    /// Water temperature in °C, limited to [-100, 100].
    pub temperature_c: f32,
    /// Dynamic viscosity, used as a propeller slip factor by the engines.
    pub dynamic_viscosity: f32,
}

impl Default for FluidState {
    fn default() -> Self {
        Self {
            temperature_c: REFERENCE_TEMPERATURE_C,
            dynamic_viscosity: 0.9775,
        }
    }
}

impl FluidState {
    pub fn density(&self) -> f32 {
        density_at(self.temperature_c)
    }
}

pub fn density_at(temperature_c: f32) -> f32 {
    let t = temperature_c.clamp(-100.0, 100.0);
    NOMINAL_DENSITY / (1.0 + THERMAL_EXPANSION * (t - REFERENCE_TEMPERATURE_C))
}
