use crate::{Quatf, Vec3f};

// Basis: standard RHS with +Z forward, +Y up, +X right
pub(super) const BODY_FWD: Vec3f = Vec3f::new(0.0, 0.0, 1.0);
pub(super) const BODY_RIGHT: Vec3f = Vec3f::new(1.0, 0.0, 0.0);
pub(super) const WORLD_UP: Vec3f = Vec3f::new(0.0, 1.0, 0.0);

#[inline]
pub(super) fn to_world(position: Vec3f, orientation: Quatf, local: Vec3f) -> Vec3f {
    position + orientation * local
}
