//! Integration tests for sampling, damping and full scene runs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use treemorph::damping::{damp, lerp_step};
use treemorph::{
    random_in_sphere, random_on_cone_band, FrameTick, MorphConfig, MorphState, ParticleDataset,
    Scene, Vec3,
};

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Kolmogorov-Smirnov statistic of `samples` against Uniform(0, 1).
fn ks_uniform(mut samples: Vec<f64>) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = samples.len() as f64;
    samples
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let below = x - i as f64 / n;
            let above = (i + 1) as f64 / n - x;
            below.max(above)
        })
        .fold(0.0, f64::max)
}

fn sign(x: f32) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

// ============================================================================
// Sampling
// ============================================================================

#[test]
fn test_sphere_points_within_radius() {
    let mut rng = rng(1);
    for _ in 0..10_000 {
        assert!(random_in_sphere(&mut rng, 25.0).length() <= 25.0 + 1e-3);
    }
}

#[test]
fn test_sphere_radial_distribution_is_volume_uniform() {
    let mut rng = rng(2);
    let radius = 25.0_f64;
    let n = 10_000;
    let samples: Vec<f64> = (0..n)
        .map(|_| {
            let r = random_in_sphere(&mut rng, radius as f32).length() as f64;
            (r / radius).powi(3)
        })
        .collect();

    let d = ks_uniform(samples);
    // Critical value at alpha = 0.001.
    assert!(d < 1.95 / (n as f64).sqrt(), "KS statistic {d} too large");
}

#[test]
fn test_sphere_directions_are_unbiased() {
    let mut rng = rng(3);
    let n = 10_000;
    let mean = (0..n)
        .map(|_| random_in_sphere(&mut rng, 1.0).normalize_or_zero())
        .sum::<Vec3>()
        / n as f32;
    assert!(mean.length() < 0.05, "mean direction {mean:?}");
}

#[test]
fn test_cone_points_within_band() {
    let mut rng = rng(4);
    let (height, max_radius, noise) = (12.0, 4.5, 0.2);
    for _ in 0..10_000 {
        let bias: f32 = rng.gen();
        let p = random_on_cone_band(&mut rng, height, max_radius, bias, noise);
        assert!((p.y - bias * height).abs() < 1e-4);
        let radial = (p.x * p.x + p.z * p.z).sqrt();
        assert!(radial <= max_radius * (1.0 - bias) + noise + 1e-4);
    }
}

// ============================================================================
// Damping
// ============================================================================

const DELTAS: [f32; 7] = [1.0 / 60.0, 1.0 / 30.0, 0.1, 0.5, 1.0, 3.0, 10.0];

fn check_convergence(step: fn(Vec3, Vec3, f32, f32) -> Vec3) {
    let target = Vec3::new(3.0, 12.0, -1.5);
    for &delta in &DELTAS {
        let mut current = Vec3::new(-20.0, 4.0, 18.0);
        let mut distance = (target - current).length();
        for _ in 0..2000 {
            let next = step(current, target, 2.0, delta);
            for axis in 0..3 {
                let before = sign(target[axis] - current[axis]);
                let after = sign(target[axis] - next[axis]);
                assert!(after == 0 || after == before, "overshoot on axis {axis} at delta {delta}");
            }
            let next_distance = (target - next).length();
            assert!(next_distance <= distance + 1e-5, "distance grew at delta {delta}");
            current = next;
            distance = next_distance;
        }
        assert!(distance < 1e-3, "did not converge at delta {delta}");
    }
}

#[test]
fn test_exponential_damping_converges_monotonically() {
    check_convergence(damp);
}

#[test]
fn test_lerp_step_converges_monotonically() {
    check_convergence(lerp_step);
}

#[test]
fn test_rest_state_is_stable() {
    let target = Vec3::new(1.0, 2.0, 3.0);
    let eps = 1e-3;
    for step in [damp as fn(Vec3, Vec3, f32, f32) -> Vec3, lerp_step] {
        let mut current = target + Vec3::splat(eps * 0.5);
        for &delta in DELTAS.iter().cycle().take(500) {
            current = step(current, target, 2.0, delta);
            assert!((current - target).length() < eps);
        }
    }
}

// ============================================================================
// Datasets and toggle
// ============================================================================

#[test]
fn test_dataset_generation_is_deterministic() {
    let config = MorphConfig {
        needle_count: 500,
        ornament_count: 40,
        ..Default::default()
    };
    let a = ParticleDataset::generate(&config, &mut rng(9));
    let b = ParticleDataset::generate(&config, &mut rng(9));
    assert_eq!(a, b);
    assert_eq!(a.needles.len(), 500);
    assert_eq!(a.ornaments.len(), 40);

    let c = ParticleDataset::generate(&config, &mut rng(10));
    assert_ne!(a.needles, c.needles);
}

#[test]
fn test_toggle_round_trip_restores_targets() {
    let mut scene = Scene::builder()
        .with_config(MorphConfig {
            needle_count: 50,
            ornament_count: 10,
            ..Default::default()
        })
        .with_seed(3)
        .build()
        .unwrap();

    assert_eq!(scene.state(), MorphState::Assembled);
    let before: Vec<Vec3> = scene.engine().targets(scene.state()).collect();
    scene.flip();
    assert_eq!(scene.state(), MorphState::Scattered);
    let flipped: Vec<Vec3> = scene.engine().targets(scene.state()).collect();
    scene.flip();
    let after: Vec<Vec3> = scene.engine().targets(scene.state()).collect();

    assert_eq!(scene.state(), MorphState::Assembled);
    assert_eq!(before, after);
    assert_ne!(before, flipped);
    assert_eq!(before.len(), 61);
}

// ============================================================================
// Full scene runs
// ============================================================================

fn small_scene(seed: u64) -> Scene {
    Scene::builder()
        .with_config(MorphConfig {
            needle_count: 3,
            ornament_count: 3,
            damping_rate: 2.0,
            ..Default::default()
        })
        .with_seed(seed)
        .build()
        .unwrap()
}

#[test]
fn test_scatter_to_assembled_end_to_end() {
    let mut scene = small_scene(21);
    scene.flip();
    assert_eq!(scene.state(), MorphState::Scattered);
    let needles = scene.engine().needles();
    for (p, pos) in needles.population().iter().zip(needles.current_positions()) {
        assert_eq!(pos, p.scattered_position);
    }

    scene.flip();
    let delta = 1.0 / 60.0;
    for frame in 1..=1000 {
        scene.frame(FrameTick::new(frame as f32 * delta, delta));
    }

    let engine = scene.engine();
    for animator in [engine.needles(), engine.ornaments()] {
        for (p, pos) in animator.population().iter().zip(animator.current_positions()) {
            assert!((pos - p.assembled_position).length() < 0.01);
        }
    }
    let topper = engine.topper();
    assert!((topper.current_position() - topper.particle().assembled_position).length() < 0.01);
}

#[test]
fn test_mid_flight_flip_reverses_smoothly() {
    let mut scene = small_scene(22);
    let delta = 1.0 / 60.0;
    let mut elapsed = 0.0;

    // Head toward the cone for a while.
    for _ in 0..30 {
        elapsed += delta;
        scene.frame(FrameTick::new(elapsed, delta));
    }
    let mid: Vec<Vec3> = scene.engine().needles().current_positions().collect();

    scene.flip();
    elapsed += delta;
    scene.frame(FrameTick::new(elapsed, delta));

    // One frame later nothing has jumped, and everything moved back toward the cloud.
    let step = 1.0 - (-2.0 * delta).exp();
    let needles = scene.engine().needles();
    let rows = needles.population().iter().zip(&mid).zip(needles.current_positions());
    for ((p, before), after) in rows {
        let remaining = (p.scattered_position - *before).length();
        assert!((after - *before).length() <= step * remaining + 1e-4);
        assert!((p.scattered_position - after).length() <= remaining + 1e-5);
    }
}

#[test]
fn test_long_stall_lands_without_overshoot() {
    let mut scene = small_scene(23);
    scene.frame(FrameTick::new(600.0, 600.0));

    let engine = scene.engine();
    for (p, pos) in engine.needles().population().iter().zip(engine.needles().current_positions()) {
        assert!((pos - p.assembled_position).length() < 1e-3);
    }
    assert_eq!(engine.topper().current_position(), engine.topper().particle().assembled_position);
}

#[test]
fn test_scale_is_never_animated() {
    let mut scene = small_scene(24);
    for frame in 1..=120 {
        scene.frame(FrameTick::new(frame as f32 * 0.05, 0.05));
    }
    let animator = scene.engine().ornaments();
    for (p, t) in animator.population().iter().zip(animator.instances().as_slice()) {
        let (scale, _, _) = t.matrix().to_scale_rotation_translation();
        assert!((scale - Vec3::splat(p.scale)).length() < 1e-3);
    }
}
