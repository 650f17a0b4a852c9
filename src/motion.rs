//! Per-frame rotation, derived from elapsed time and particle index.
//!
//! Nothing here is integrated or stored. Given the same `time` and index the
//! result is always the same, so there is no drift to accumulate.

use crate::dataset::Particle;
use crate::toggle::MorphState;
use crate::Vec3;
use std::f32::consts::TAU;

/// Roll amplitude of the assembled needle sway.
pub const SWAY_AMPLITUDE: f32 = 0.05;
/// Angular frequency of the sway.
pub const SWAY_FREQUENCY: f32 = 2.0;
/// Topper yaw speed in rad/s.
pub const TOPPER_SPIN: f32 = 0.6;
/// Topper roll wobble amplitude.
pub const TOPPER_WOBBLE: f32 = 0.1;

/// Euler XYZ rotation for needle `index`.
///
/// Assembled needles sway about the roll axis with a per-index phase.
/// Scattered needles tumble continuously on pitch and roll.
pub fn needle_rotation(particle: &Particle, index: usize, state: MorphState, time: f32) -> Vec3 {
    let i = index as f32;
    let mut rotation = particle.base_rotation;
    match state {
        MorphState::Assembled => {
            rotation.z += (time * SWAY_FREQUENCY + i).sin() * SWAY_AMPLITUDE;
        }
        MorphState::Scattered => {
            // Wrapped to keep f32 precision over long sessions.
            rotation.x += (time * 0.5 + i * 0.1).rem_euclid(TAU);
            rotation.z += (time * 0.3 + i * 0.1).rem_euclid(TAU);
        }
    }
    rotation
}

/// Euler XYZ rotation for ornament `index`: upright when assembled, slow
/// drift when scattered.
pub fn ornament_rotation(index: usize, state: MorphState, time: f32) -> Vec3 {
    match state {
        MorphState::Assembled => Vec3::ZERO,
        MorphState::Scattered => Vec3::new(
            (time * 0.2 + index as f32).rem_euclid(TAU),
            (time * 0.2).rem_euclid(TAU),
            0.0,
        ),
    }
}

/// Euler XYZ rotation for the topper. Spins in either state.
pub fn topper_rotation(time: f32) -> Vec3 {
    Vec3::new(
        0.0,
        (time * TOPPER_SPIN).rem_euclid(TAU),
        time.sin() * TOPPER_WOBBLE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn needle() -> Particle {
        Particle {
            assembled_position: Vec3::ZERO,
            scattered_position: Vec3::ZERO,
            base_rotation: Vec3::new(0.3, 0.6, 0.9),
            scale: 1.0,
        }
    }

    #[test]
    fn test_assembled_needle_sways_on_roll_only() {
        let p = needle();
        for i in 0..20 {
            let r = needle_rotation(&p, i, MorphState::Assembled, 3.7);
            assert_eq!(r.x, 0.3);
            assert_eq!(r.y, 0.6);
            assert!((r.z - 0.9).abs() <= SWAY_AMPLITUDE + 1e-6);
        }
    }

    #[test]
    fn test_scattered_needle_tumbles() {
        let p = needle();
        let a = needle_rotation(&p, 0, MorphState::Scattered, 1.0);
        let b = needle_rotation(&p, 0, MorphState::Scattered, 2.0);
        assert_ne!(a.x, b.x);
        assert_ne!(a.z, b.z);
        assert_eq!(a.y, 0.6);
    }

    #[test]
    fn test_rotation_is_deterministic() {
        let p = needle();
        assert_eq!(
            needle_rotation(&p, 7, MorphState::Scattered, 12.5),
            needle_rotation(&p, 7, MorphState::Scattered, 12.5)
        );
        assert_eq!(
            ornament_rotation(3, MorphState::Scattered, 4.0),
            ornament_rotation(3, MorphState::Scattered, 4.0)
        );
    }

    #[test]
    fn test_ornament_upright_when_assembled() {
        assert_eq!(ornament_rotation(5, MorphState::Assembled, 100.0), Vec3::ZERO);
        assert_ne!(ornament_rotation(5, MorphState::Scattered, 100.0), Vec3::ZERO);
    }

    #[test]
    fn test_topper_spins_with_time() {
        let a = topper_rotation(1.0);
        let b = topper_rotation(2.0);
        assert!((b.y - a.y - TOPPER_SPIN).abs() < 1e-5);
        assert!(a.z.abs() <= TOPPER_WOBBLE);
        assert_eq!(a.x, 0.0);
    }
}
