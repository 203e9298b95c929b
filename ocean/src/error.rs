use thiserror::Error;

/// Rejected configuration. Raised once, when a sea or vessel is built; the
/// per-tick simulation itself never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecError {
    #[error("wave component {index} has a non-finite parameter")]
    NonFiniteWave { index: usize },
    #[error("wave time scale must be finite, got {0}")]
    NonFiniteTimeScale(f32),
    #[error("current grid size must be finite and non-negative, got {0}")]
    InvalidGridSize(f32),
    #[error("current grid of {dim}×{dim} cells is too large")]
    GridTooLarge { dim: usize },
    #[error("uniform current magnitude must be finite, got {0}")]
    InvalidCurrentMagnitude(f32),
    #[error("uniform current heading must be finite, got {0}")]
    InvalidCurrentHeading(f32),
    #[error("fuel system needs at least one tank")]
    NoFuelTanks,
    #[error("fuel tank {index} has invalid capacity {capacity}")]
    InvalidTankCapacity { index: usize, capacity: f32 },
    #[error("vessel `{vessel}` has no buoyancy sample points")]
    NoSamplePoints { vessel: String },
    #[error("vessel `{vessel}` mass must be positive, got {mass}")]
    NonPositiveMass { vessel: String, mass: f32 },
    #[error("engine {index} propeller size must be positive, got {size}")]
    NonPositivePropeller { index: usize, size: f32 },
    #[error("engine {index} must have at least one cylinder")]
    NoCylinders { index: usize },
    #[error("{what} cycle must be positive, got {value}")]
    NonPositiveCycle { what: &'static str, value: f32 },
}
