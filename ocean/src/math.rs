// Shared physics uses Bevy's math types directly; the aliases keep the
// physics code free of any ECS imports.
pub use bevy_math::{Quat as Quatf, Vec2 as Vec2f, Vec3 as Vec3f};

/// Linear interpolation with the parameter clamped to [0, 1].
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    a + (b - a) * t
}
