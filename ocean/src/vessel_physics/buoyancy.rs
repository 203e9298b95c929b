use tracing::debug;

use super::types::VesselState;
use super::util::{to_world, WORLD_UP};
use crate::{Vec3f, VesselSpec, WaveField};

const BUOYANCY_SCALE: f32 = 0.1;

#[derive(Debug, Clone, Copy, Default)]
pub(super) struct BuoyancyReport {
    pub force: Vec3f,
    pub drag_switched: bool,
}

pub(super) fn world_sample_points(spec: &VesselSpec, state: &VesselState) -> Vec<Vec3f> {
    spec.sample_points
        .iter()
        .map(|&p| to_world(state.position, state.orientation, p))
        .collect()
}

/// Signed depth of each point relative to the wave surface; negative means
/// below water. Sampled in parallel and joined before returning.
pub fn probe_depths(waves: &WaveField, points: &[Vec3f], time: f32) -> Vec<f32> {
    waves
        .heights_at(points, time)
        .into_iter()
        .zip(points)
        .map(|(h, p)| p.y - h)
        .collect()
}

/// Push up every submerged probe and update the submerged flag, swapping the
/// drag preset on the tick it changes.
pub(super) fn apply_buoyancy(
    spec: &VesselSpec,
    state: &mut VesselState,
    points: &[Vec3f],
    depths: &[f32],
) -> BuoyancyReport {
    let mut report = BuoyancyReport::default();
    let mut count = 0usize;
    for (&p, &depth) in points.iter().zip(depths) {
        if depth < 0.0 {
            count += 1;
            let f = WORLD_UP * (spec.buoyancy_strength * depth.abs() * BUOYANCY_SCALE);
            state.accum.add_force_at(f, p, state.position);
            report.force += f;
        }
    }
    state.submerged_count = count;

    let submerged = count > 0;
    if submerged != state.submerged {
        state.submerged = submerged;
        state.drag = if submerged { spec.underwater_drag } else { spec.air_drag };
        report.drag_switched = true;
        debug!(submerged, count, drag = ?state.drag, "Drag preset switched");
    }
    report
}
