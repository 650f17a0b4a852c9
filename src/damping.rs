//! Frame-rate independent approach toward a target.
//!
//! Both forms move `current` toward `target` without ever passing it, for
//! any non-negative `delta` (including very long frames after a suspend).

use crate::Vec3;

/// Exponential damping: `target - (target - current) * exp(-rate * delta)`.
///
/// The remaining distance decays continuously in time, so splitting one
/// frame into many shorter ones gives the same result.
#[inline]
pub fn damp(current: Vec3, target: Vec3, rate: f32, delta: f32) -> Vec3 {
    let decay = (-rate * delta).exp();
    target - (target - current) * decay
}

/// One clamped lerp step: `current + (target - current) * min(1, rate * delta)`.
///
/// At `rate * delta >= 1` the result lands exactly on `target`.
#[inline]
pub fn lerp_step(current: Vec3, target: Vec3, rate: f32, delta: f32) -> Vec3 {
    let t = (rate * delta).clamp(0.0, 1.0);
    if t >= 1.0 {
        return target;
    }
    current + (target - current) * t
}

/// Replace a delta the damping forms can't take with zero.
///
/// Negative or non-finite deltas would push `current` away from the target.
#[inline]
pub fn sanitize_delta(delta: f32) -> f32 {
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}
