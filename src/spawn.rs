//! Point distributions for the two target forms.
//!
//! Both samplers take the random source as a parameter, so a seeded
//! generator reproduces a layout exactly.

use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// Build the generator used for dataset generation.
///
/// `Some(seed)` gives a reproducible layout, `None` a fresh one each run.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Random point inside a solid sphere of given radius, centered at origin.
///
/// Direction is uniform over the sphere (`phi = acos(2v - 1)`), and the
/// cube root on the radial draw keeps density uniform through the volume.
pub fn random_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = TAU * rng.gen::<f32>();
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
    let r = radius * rng.gen::<f32>().cbrt();
    let sin_phi = phi.sin();

    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Random point on a horizontal band of a Y-up cone.
///
/// * `height` - Cone height; the base sits at y = 0
/// * `max_radius` - Radius at the base
/// * `vertical_bias` - 0.0 (base) to 1.0 (apex), clamped
/// * `noise` - Width of the x/z jitter band, centered on the surface
pub fn random_on_cone_band<R: Rng + ?Sized>(
    rng: &mut R,
    height: f32,
    max_radius: f32,
    vertical_bias: f32,
    noise: f32,
) -> Vec3 {
    let bias = vertical_bias.clamp(0.0, 1.0);
    let y = bias * height;
    let band_radius = max_radius * (1.0 - bias);
    let angle = rng.gen::<f32>() * TAU;

    let x = angle.cos() * band_radius + (rng.gen::<f32>() - 0.5) * noise;
    let z = angle.sin() * band_radius + (rng.gen::<f32>() - 0.5) * noise;

    Vec3::new(x, y, z)
}

/// Uniform draw from `[min, max)`. A collapsed range returns `min`.
#[inline]
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, [min, max]: [f32; 2]) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// How a population spreads its members along the cone height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalBias {
    /// `uniform()` - even spread from base to apex.
    Uniform,
    /// `uniform().powf(exponent)` - reshapes the spread along the height.
    Power(f32),
}

impl VerticalBias {
    /// Draw one normalized height in `[0, 1]`.
    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        match self {
            VerticalBias::Uniform => rng.gen(),
            VerticalBias::Power(exponent) => rng.gen::<f32>().powf(exponent),
        }
    }
}
