//! Immutable particle datasets, generated once per session.
//!
//! Each particle carries both of its targets up front. The engine never
//! writes back into a dataset; it only keeps its own current positions,
//! aligned with the dataset by index.

use crate::config::MorphConfig;
use crate::spawn::{random_in_range, random_in_sphere, random_on_cone_band, VerticalBias};
use crate::Vec3;
use rand::Rng;
use std::f32::consts::PI;
use std::ops::Index;

/// Visual kind of a population.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopulationKind {
    /// Green crystal needles forming the canopy.
    Needle,
    /// Gold spheres hung just outside the needles.
    Ornament,
    /// The single star above the apex.
    Topper,
}

impl PopulationKind {
    pub fn name(self) -> &'static str {
        match self {
            PopulationKind::Needle => "needle",
            PopulationKind::Ornament => "ornament",
            PopulationKind::Topper => "topper",
        }
    }
}

/// Static record for one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Target in the cone form.
    pub assembled_position: Vec3,
    /// Target in the sphere form.
    pub scattered_position: Vec3,
    /// Euler XYZ angles in radians. Zero for everything except needles.
    pub base_rotation: Vec3,
    /// Uniform scale, fixed for the session.
    pub scale: f32,
}

impl Particle {
    /// Target for the given state.
    #[inline]
    pub fn target(&self, assembled: bool) -> Vec3 {
        if assembled {
            self.assembled_position
        } else {
            self.scattered_position
        }
    }
}

/// Shape parameters a population is generated from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopulationShape {
    pub count: usize,
    pub height: f32,
    /// Cone base radius.
    pub radius: f32,
    pub scatter_radius: f32,
    /// Width of the cone jitter band.
    pub noise: f32,
    pub bias: VerticalBias,
    /// `[min, max]` scale range.
    pub scale: [f32; 2],
    /// Whether members get a random base orientation.
    pub random_rotation: bool,
}

impl PopulationShape {
    /// Needle layer: base radius, base scatter radius, power-law height bias.
    pub fn needles(config: &MorphConfig) -> Self {
        Self {
            count: config.needle_count,
            height: config.tree_height,
            radius: config.tree_radius,
            scatter_radius: config.scatter_radius,
            noise: config.cone_noise,
            bias: VerticalBias::Power(config.needle_bias_exponent),
            scale: config.needle_scale,
            random_rotation: true,
        }
    }

    /// Ornament layer: pushed outward on the cone and scattered further.
    pub fn ornaments(config: &MorphConfig) -> Self {
        Self {
            count: config.ornament_count,
            height: config.tree_height,
            radius: config.ornament_radius(),
            scatter_radius: config.ornament_scatter_radius(),
            noise: config.cone_noise,
            bias: VerticalBias::Uniform,
            scale: config.ornament_scale,
            random_rotation: false,
        }
    }
}

/// Fixed-length, ordered particles of one kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    kind: PopulationKind,
    particles: Box<[Particle]>,
}

impl Population {
    /// Generate `shape.count` particles. A count of zero is an empty population.
    pub fn generate<R: Rng + ?Sized>(
        kind: PopulationKind,
        shape: &PopulationShape,
        rng: &mut R,
    ) -> Self {
        let particles: Box<[Particle]> = (0..shape.count)
            .map(|_| {
                let bias = shape.bias.sample(rng);
                let assembled_position =
                    random_on_cone_band(rng, shape.height, shape.radius, bias, shape.noise);
                let scattered_position = random_in_sphere(rng, shape.scatter_radius);
                let base_rotation = if shape.random_rotation {
                    Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI)
                } else {
                    Vec3::ZERO
                };
                let scale = random_in_range(rng, shape.scale);

                Particle {
                    assembled_position,
                    scattered_position,
                    base_rotation,
                    scale,
                }
            })
            .collect();

        log::debug!("generated {} {} particles", particles.len(), kind.name());

        Self { kind, particles }
    }

    #[inline]
    pub fn kind(&self) -> PopulationKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }
}

impl Index<usize> for Population {
    type Output = Particle;

    fn index(&self, index: usize) -> &Particle {
        &self.particles[index]
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.particles.iter()
    }
}

/// Every morphing body in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleDataset {
    pub needles: Population,
    pub ornaments: Population,
    pub topper: Particle,
}

impl ParticleDataset {
    /// Generate all populations from a validated config.
    ///
    /// Draw order is needles, ornaments, then the topper's scatter point,
    /// so the same seed always yields the same scene.
    pub fn generate<R: Rng + ?Sized>(config: &MorphConfig, rng: &mut R) -> Self {
        let needle_shape = PopulationShape::needles(config);
        let ornament_shape = PopulationShape::ornaments(config);
        let needles = Population::generate(PopulationKind::Needle, &needle_shape, rng);
        let ornaments = Population::generate(PopulationKind::Ornament, &ornament_shape, rng);
        let topper = Particle {
            assembled_position: config.topper_position(),
            scattered_position: random_in_sphere(rng, config.scatter_radius),
            base_rotation: Vec3::ZERO,
            scale: config.topper_scale,
        };

        Self {
            needles,
            ornaments,
            topper,
        }
    }
}
