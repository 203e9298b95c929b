//! Spatial water-current field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{Quatf, SpecError, Vec3f};

/// Side length of one grid cell in world units.
pub const CELL_SIZE: f32 = 100.0;
/// Exclusive upper bound on the random per-cell flow magnitude.
pub const MAX_CELL_MAGNITUDE: f32 = 20.0;
/// Largest grid accepted, 1024 × 1024 cells.
pub const MAX_GRID_CELLS: usize = 1 << 20;

const WORLD_FORWARD: Vec3f = Vec3f::Z;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentCell {
    /// Flow vector (direction scaled by magnitude).
    pub direction: Vec3f,
    /// Extra push along world forward. Always zero for generated cells.
    pub speed: f32,
}

impl CurrentCell {
    pub fn from_heading(heading_deg: f32, magnitude: f32) -> Self {
        Self {
            direction: Quatf::from_rotation_y(heading_deg.to_radians()) * WORLD_FORWARD * magnitude,
            speed: 0.0,
        }
    }

    /// Force this cell applies to a probe point.
    #[inline]
    pub fn force(&self) -> Vec3f {
        WORLD_FORWARD * self.speed + self.direction
    }
}

/// Square grid of [`CurrentCell`]s anchored at the world origin. Built once
/// and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterCurrentGrid {
    dim: usize,
    // Row-major on X: index = cell_x * dim + cell_z
    cells: Vec<CurrentCell>,
    update_interval_s: Option<f32>,
}

impl WaterCurrentGrid {
    /// Generate a `floor(size)` × `floor(size)` grid with seeded random flow.
    pub fn generate(size: f32, seed: u64) -> Result<Self, SpecError> {
        if !size.is_finite() || size < 0.0 {
            return Err(SpecError::InvalidGridSize(size));
        }
        let dim = size.floor() as usize;
        let count = dim
            .checked_mul(dim)
            .filter(|&n| n <= MAX_GRID_CELLS)
            .ok_or(SpecError::GridTooLarge { dim })?;
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..count)
            .map(|_| {
                let heading = rng.gen_range(0.0..360.0);
                let magnitude = rng.gen_range(0.0..MAX_CELL_MAGNITUDE);
                CurrentCell::from_heading(heading, magnitude)
            })
            .collect();
        Ok(Self { dim, cells, update_interval_s: None })
    }

    pub fn with_update_interval(mut self, interval_s: Option<f32>) -> Self {
        self.update_interval_s = interval_s;
        self
    }

    /// Cells per side.
    pub fn dimension(&self) -> usize {
        self.dim
    }

    /// Configured refresh interval. Cells are never regenerated; the value is
    /// carried for collaborators that want to report it.
    pub fn update_interval_s(&self) -> Option<f32> {
        self.update_interval_s
    }

    /// Grid coordinates for a world position, `None` when outside the grid.
    /// Negative coordinates mirror onto the positive quadrant.
    pub fn cell_coords(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        let cx = (x / CELL_SIZE).floor().abs();
        let cz = (z / CELL_SIZE).floor().abs();
        if !cx.is_finite() || !cz.is_finite() {
            return None;
        }
        let limit = self.dim as f32;
        if cx >= limit || cz >= limit {
            return None;
        }
        Some((cx as usize, cz as usize))
    }

    pub fn cell_at(&self, x: f32, z: f32) -> Option<&CurrentCell> {
        let (cx, cz) = self.cell_coords(x, z)?;
        self.cells.get(cx * self.dim + cz)
    }
}

/// Serializable description of the current field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurrentSpec {
    /// Same flow everywhere.
    Uniform { heading_deg: f32, magnitude: f32 },
    /// Random per-cell flow over a square grid.
    Grid {
        size: f32,
        #[serde(default)]
        seed: u64,
        #[serde(default)]
        update_interval_s: Option<f32>,
    },
}

impl Default for CurrentSpec {
    fn default() -> Self {
        CurrentSpec::Grid { size: 10.0, seed: 0, update_interval_s: None }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaterCurrents {
    Uniform(CurrentCell),
    Grid(WaterCurrentGrid),
}

impl WaterCurrents {
    pub fn still() -> Self {
        WaterCurrents::Uniform(CurrentCell { direction: Vec3f::ZERO, speed: 0.0 })
    }

    pub fn from_spec(spec: &CurrentSpec) -> Result<Self, SpecError> {
        match *spec {
            CurrentSpec::Uniform { heading_deg, magnitude } => {
                if !heading_deg.is_finite() {
                    return Err(SpecError::InvalidCurrentHeading(heading_deg));
                }
                if !magnitude.is_finite() {
                    return Err(SpecError::InvalidCurrentMagnitude(magnitude));
                }
                Ok(WaterCurrents::Uniform(CurrentCell::from_heading(heading_deg, magnitude)))
            }
            CurrentSpec::Grid { size, seed, update_interval_s } => Ok(WaterCurrents::Grid(
                WaterCurrentGrid::generate(size, seed)?.with_update_interval(update_interval_s),
            )),
        }
    }

    /// Drift force at a world position; `None` when the position lies
    /// outside the grid (no force, not an error).
    pub fn force_at(&self, pos: Vec3f) -> Option<Vec3f> {
        match self {
            WaterCurrents::Uniform(cell) => Some(cell.force()),
            WaterCurrents::Grid(grid) => grid.cell_at(pos.x, pos.z).map(CurrentCell::force),
        }
    }

    pub fn update_interval_s(&self) -> Option<f32> {
        match self {
            WaterCurrents::Uniform(_) => None,
            WaterCurrents::Grid(grid) => grid.update_interval_s(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_dimension_floors_size() {
        let grid = WaterCurrentGrid::generate(4.9, 1).expect("grid");
        assert_eq!(grid.dimension(), 4);
        assert!(WaterCurrentGrid::generate(-1.0, 1).is_err());
        assert_eq!(WaterCurrentGrid::generate(0.0, 1).expect("grid").dimension(), 0);
    }

    #[test]
    fn oversized_grid_is_rejected() {
        assert_eq!(
            WaterCurrentGrid::generate(1.0e6, 1).unwrap_err(),
            SpecError::GridTooLarge { dim: 1_000_000 }
        );
        assert!(WaterCurrentGrid::generate(f32::MAX, 1).is_err());
        assert_eq!(WaterCurrentGrid::generate(1024.0, 1).expect("grid").dimension(), 1024);
    }

    #[test]
    fn generated_cells_within_magnitude_range() {
        let grid = WaterCurrentGrid::generate(8.0, 42).expect("grid");
        for x in 0..8 {
            for z in 0..8 {
                let cell = grid
                    .cell_at(x as f32 * CELL_SIZE + 1.0, z as f32 * CELL_SIZE + 1.0)
                    .expect("inside grid");
                assert_eq!(cell.speed, 0.0);
                assert!(cell.direction.y.abs() < 1e-4, "flow stays horizontal");
                assert!(cell.direction.length() < MAX_CELL_MAGNITUDE);
            }
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let a = WaterCurrentGrid::generate(5.0, 9).expect("grid");
        let b = WaterCurrentGrid::generate(5.0, 9).expect("grid");
        let c = WaterCurrentGrid::generate(5.0, 10).expect("grid");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn boundary_cell_lookup_succeeds() {
        let grid = WaterCurrentGrid::generate(3.0, 0).expect("grid");
        // Last valid cell starts at 200 and ends just before 300.
        assert_eq!(grid.cell_coords(200.0, 0.0), Some((2, 0)));
        assert_eq!(grid.cell_coords(299.99, 299.99), Some((2, 2)));
        assert_eq!(grid.cell_coords(0.0, 0.0), Some((0, 0)));
        // Negative side mirrors: floor(-0.5) = -1 -> 1
        assert_eq!(grid.cell_coords(-50.0, -150.0), Some((1, 2)));
    }

    #[test]
    fn outside_grid_yields_no_force() {
        let currents = WaterCurrents::Grid(WaterCurrentGrid::generate(3.0, 0).expect("grid"));
        assert!(currents.force_at(Vec3f::new(300.0, 0.0, 10.0)).is_none());
        assert!(currents.force_at(Vec3f::new(10.0, 0.0, -301.0)).is_none());
        assert!(currents.force_at(Vec3f::new(f32::NAN, 0.0, 0.0)).is_none());
        assert!(currents.force_at(Vec3f::new(150.0, -3.0, 250.0)).is_some());
    }

    #[test]
    fn uniform_current_points_along_heading() {
        let currents = WaterCurrents::from_spec(&CurrentSpec::Uniform { heading_deg: 90.0, magnitude: 2.0 })
            .expect("uniform");
        let f = currents.force_at(Vec3f::new(1.0e6, 0.0, -1.0e6)).expect("uniform everywhere");
        // +90° yaw turns world +Z toward +X
        assert!((f - Vec3f::new(2.0, 0.0, 0.0)).length() < 1e-4, "f={f:?}");
    }

    #[test]
    fn uniform_current_rejects_bad_heading_and_magnitude() {
        let bad_heading = CurrentSpec::Uniform { heading_deg: f32::NAN, magnitude: 2.0 };
        assert!(matches!(
            WaterCurrents::from_spec(&bad_heading),
            Err(SpecError::InvalidCurrentHeading(h)) if h.is_nan()
        ));
        let bad_magnitude = CurrentSpec::Uniform { heading_deg: 45.0, magnitude: f32::INFINITY };
        assert_eq!(
            WaterCurrents::from_spec(&bad_magnitude).unwrap_err(),
            SpecError::InvalidCurrentMagnitude(f32::INFINITY)
        );
    }
}
