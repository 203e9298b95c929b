use serde::{Deserialize, Serialize};

use crate::current::{CurrentSpec, WaterCurrents};
use crate::waves::{WaveField, WaveFieldSpec};
use crate::{FluidState, SpecError, Vec3f};

/// Serializable description of the water a vessel floats in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeaSpec {
    pub waves: WaveFieldSpec,
    pub current: CurrentSpec,
    pub fluid: FluidState,
}

/// Built environment, shared read-only by every vessel.
#[derive(Debug, Clone, PartialEq)]
pub struct Sea {
    pub waves: WaveField,
    pub currents: WaterCurrents,
    pub fluid: FluidState,
}

impl Sea {
    pub fn from_spec(spec: &SeaSpec) -> Result<Self, SpecError> {
        Ok(Self {
            waves: spec.waves.build()?,
            currents: WaterCurrents::from_spec(&spec.current)?,
            fluid: spec.fluid,
        })
    }

    /// Flat, still water at the reference temperature.
    pub fn still_water() -> Self {
        Self {
            waves: WaveField::calm(),
            currents: WaterCurrents::still(),
            fluid: FluidState::default(),
        }
    }

    pub fn wave_height(&self, x: f32, z: f32, t: f32) -> f32 {
        self.waves.height(x, z, t)
    }

    pub fn current_at(&self, pos: Vec3f) -> Option<Vec3f> {
        self.currents.force_at(pos)
    }

    pub fn density(&self) -> f32 {
        self.fluid.density()
    }
}
