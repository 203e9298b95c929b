//! Procedural ocean surface.
//!
//! The surface is a plain sum of sinusoids evaluated on demand. There is no
//! internal state, so a [`WaveField`] can be shared by reference across
//! worker threads and queried from any number of sample points at once.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{SpecError, Vec2f, Vec3f};

/// Smallest batch handed to a single worker when sampling heights in parallel.
const MIN_POINTS_PER_TASK: usize = 8;

/// One sinusoidal wave train.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveComponent {
    /// Spatial frequency (2π / wavelength).
    pub frequency: f32,
    pub amplitude: f32,
    /// Temporal phase speed (speed · 2π / wavelength).
    pub phase_speed: f32,
    /// Propagation direction in the XZ plane (`y` holds world Z).
    pub direction: Vec2f,
}

impl WaveComponent {
    pub const fn new(frequency: f32, amplitude: f32, phase_speed: f32, dir_x: f32, dir_z: f32) -> Self {
        Self {
            frequency,
            amplitude,
            phase_speed,
            direction: Vec2f::new(dir_x, dir_z),
        }
    }

    #[inline]
    pub fn evaluate(&self, x: f32, z: f32, t: f32) -> f32 {
        let along = self.direction.x * x + self.direction.y * z;
        self.amplitude * (along * self.frequency + t * self.phase_speed).sin()
    }

    fn is_finite(&self) -> bool {
        self.frequency.is_finite()
            && self.amplitude.is_finite()
            && self.phase_speed.is_finite()
            && self.direction.is_finite()
    }
}

/// Surface height field: `height(x, z, t) = Σ amp · sin((dir · (x,z)) · freq + t' · phase)`
/// where `t' = t · time_scale`. Every built-in field uses a scale of 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveField {
    pub components: Vec<WaveComponent>,
    /// Multiplier applied to simulation time before evaluation.
    pub time_scale: f32,
}

pub const DEFAULT_TIME_SCALE: f32 = 1.0;

impl Default for WaveField {
    fn default() -> Self {
        Self::ocean_swell()
    }
}

impl WaveField {
    pub fn new(components: Vec<WaveComponent>, time_scale: f32) -> Result<Self, SpecError> {
        let field = Self { components, time_scale };
        field.validate()?;
        Ok(field)
    }

    /// Flat water at height zero.
    pub fn calm() -> Self {
        Self { components: Vec::new(), time_scale: DEFAULT_TIME_SCALE }
    }

    /// Four-train swell used for buoyancy probing.
    pub fn ocean_swell() -> Self {
        Self::four_train(0.3, 1.01, 1.0)
    }

    /// Gentler swell matching the rendered water surface.
    pub fn render_swell() -> Self {
        Self::four_train(0.1, 0.3, 2.0)
    }

    fn four_train(freq: f32, amp: f32, third_amp_gain: f32) -> Self {
        Self {
            components: vec![
                WaveComponent::new(freq, amp, 0.5, 0.0, 0.6),
                WaveComponent::new(freq * 2.0, amp * 0.5, 1.3, 0.7, 0.0),
                WaveComponent::new(freq, amp * third_amp_gain, 0.5, 0.1, 0.2),
                WaveComponent::new(freq * 4.0, amp * 0.5, 1.3, 0.5, 0.1),
            ],
            time_scale: DEFAULT_TIME_SCALE,
        }
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        if !self.time_scale.is_finite() {
            return Err(SpecError::NonFiniteTimeScale(self.time_scale));
        }
        match self.components.iter().position(|c| !c.is_finite()) {
            Some(index) => Err(SpecError::NonFiniteWave { index }),
            None => Ok(()),
        }
    }

    /// Surface height at world (x, z) and simulation time `t`.
    #[inline]
    pub fn height(&self, x: f32, z: f32, t: f32) -> f32 {
        let t = t * self.time_scale;
        self.components.iter().map(|c| c.evaluate(x, z, t)).sum()
    }

    /// Upper bound on `|height|` anywhere, at any time.
    pub fn amplitude_bound(&self) -> f32 {
        self.components.iter().map(|c| c.amplitude.abs()).sum()
    }

    /// Heights below each world point, evaluated as a parallel-for on the
    /// current rayon pool. Returns only once every point has been sampled;
    /// the output order matches `points`.
    pub fn heights_at(&self, points: &[Vec3f], t: f32) -> Vec<f32> {
        points
            .par_iter()
            .with_min_len(MIN_POINTS_PER_TASK)
            .map(|p| self.height(p.x, p.z, t))
            .collect()
    }
}

/// Serializable choice of wave field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WaveFieldSpec {
    Calm,
    #[default]
    OceanSwell,
    RenderSwell,
    Custom {
        components: Vec<WaveComponent>,
        #[serde(default = "default_time_scale")]
        time_scale: f32,
    },
}

fn default_time_scale() -> f32 {
    DEFAULT_TIME_SCALE
}

impl WaveFieldSpec {
    pub fn build(&self) -> Result<WaveField, SpecError> {
        match self {
            WaveFieldSpec::Calm => Ok(WaveField::calm()),
            WaveFieldSpec::OceanSwell => Ok(WaveField::ocean_swell()),
            WaveFieldSpec::RenderSwell => Ok(WaveField::render_swell()),
            WaveFieldSpec::Custom { components, time_scale } => {
                WaveField::new(components.clone(), *time_scale)
            }
        }
    }
}
