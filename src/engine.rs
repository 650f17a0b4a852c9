//! Morph animation engine.
//!
//! Each frame every particle damps its current position toward the target
//! picked by the toggle, then a fresh rotation is derived from time and
//! index, and the resulting pose is written to the population's
//! [`InstanceBuffer`].
//!
//! # State
//!
//! The only thing carried between frames is one [`AnimationState`] per
//! particle. It starts at the scattered position. When the toggle flips
//! nothing is reset: the next frame reads the other target and the damping
//! reverses smoothly from wherever the particle is.
//!
//! # Ownership
//!
//! Datasets are moved into the engine and only read. Animation states are
//! private to the engine. Instance buffers are the render-facing output and
//! are handed out as shared slices. Nothing is allocated after
//! construction.

use crate::config::MorphConfig;
use crate::damping::{damp, lerp_step, sanitize_delta};
use crate::dataset::{Particle, ParticleDataset, Population, PopulationKind};
use crate::instance::{InstanceBuffer, InstanceTransform, Pose};
use crate::motion::{needle_rotation, ornament_rotation, topper_rotation};
use crate::time::FrameTick;
use crate::toggle::MorphState;
use crate::Vec3;

/// Mutable per-particle state carried across frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    pub current_position: Vec3,
}

impl AnimationState {
    /// Starting pose: the scattered position.
    #[inline]
    pub fn at_rest(particle: &Particle) -> Self {
        Self {
            current_position: particle.scattered_position,
        }
    }
}

/// Advance one population by one frame.
///
/// `particles`, `states` and `out` are index-aligned. `tick.delta` must
/// already be sanitized (finite, non-negative).
///
/// # Panics
///
/// Panics if the three slices differ in length. That can only happen if a
/// caller broke the dataset/state alignment.
#[allow(clippy::too_many_arguments)]
pub fn advance_population(
    kind: PopulationKind,
    particles: &[Particle],
    states: &mut [AnimationState],
    out: &mut [InstanceTransform],
    state: MorphState,
    tick: FrameTick,
    rate: f32,
    origin: Vec3,
) {
    assert_eq!(
        particles.len(),
        states.len(),
        "animation state missing for {} population",
        kind.name()
    );
    assert_eq!(
        particles.len(),
        out.len(),
        "instance buffer misaligned for {} population",
        kind.name()
    );

    let assembled = state.is_assembled();
    let time = tick.elapsed;

    let rows = particles.iter().zip(states.iter_mut()).zip(out.iter_mut());
    for (i, ((particle, anim), slot)) in rows.enumerate() {
        let target = particle.target(assembled);
        anim.current_position = damp(anim.current_position, target, rate, tick.delta);

        let rotation = match kind {
            PopulationKind::Needle => needle_rotation(particle, i, state, time),
            PopulationKind::Ornament => ornament_rotation(i, state, time),
            PopulationKind::Topper => topper_rotation(time),
        };

        let pose = Pose {
            position: anim.current_position,
            rotation,
            scale: particle.scale,
        };
        *slot = InstanceTransform::from_pose(&pose, origin);
    }
}

/// A population together with its animation state and output buffer.
#[derive(Clone, Debug)]
pub struct PopulationAnimator {
    population: Population,
    states: Vec<AnimationState>,
    instances: InstanceBuffer,
}

impl PopulationAnimator {
    /// Place every particle at its scattered position and write the
    /// starting matrices with the static base rotation.
    pub fn new(population: Population, origin: Vec3) -> Self {
        let states: Vec<AnimationState> = population.iter().map(AnimationState::at_rest).collect();
        let mut instances = InstanceBuffer::new(population.len());
        let rows = population.iter().zip(&states).zip(instances.as_mut_slice());
        for ((particle, anim), slot) in rows {
            let pose = Pose {
                position: anim.current_position,
                rotation: particle.base_rotation,
                scale: particle.scale,
            };
            *slot = InstanceTransform::from_pose(&pose, origin);
        }

        Self {
            population,
            states,
            instances,
        }
    }

    pub fn update(&mut self, state: MorphState, tick: FrameTick, rate: f32, origin: Vec3) {
        if self.population.is_empty() {
            return;
        }
        advance_population(
            self.population.kind(),
            self.population.as_slice(),
            &mut self.states,
            self.instances.as_mut_slice(),
            state,
            tick,
            rate,
            origin,
        );
    }

    #[inline]
    pub fn kind(&self) -> PopulationKind {
        self.population.kind()
    }

    #[inline]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[inline]
    pub fn states(&self) -> &[AnimationState] {
        &self.states
    }

    #[inline]
    pub fn instances(&self) -> &InstanceBuffer {
        &self.instances
    }

    /// Current positions, in dataset order.
    pub fn current_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.states.iter().map(|s| s.current_position)
    }
}

/// The single topper body. Follows its target with a clamped lerp.
#[derive(Clone, Debug)]
pub struct TopperAnimator {
    particle: Particle,
    state: AnimationState,
    instance: InstanceTransform,
}

impl TopperAnimator {
    pub fn new(particle: Particle, origin: Vec3) -> Self {
        let state = AnimationState::at_rest(&particle);
        let pose = Pose {
            position: state.current_position,
            rotation: particle.base_rotation,
            scale: particle.scale,
        };
        Self {
            particle,
            state,
            instance: InstanceTransform::from_pose(&pose, origin),
        }
    }

    pub fn update(&mut self, state: MorphState, tick: FrameTick, rate: f32, origin: Vec3) {
        let target = self.particle.target(state.is_assembled());
        self.state.current_position =
            lerp_step(self.state.current_position, target, rate, tick.delta);

        let pose = Pose {
            position: self.state.current_position,
            rotation: topper_rotation(tick.elapsed),
            scale: self.particle.scale,
        };
        self.instance = InstanceTransform::from_pose(&pose, origin);
    }

    #[inline]
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    #[inline]
    pub fn current_position(&self) -> Vec3 {
        self.state.current_position
    }

    /// One-element view for instanced draws.
    #[inline]
    pub fn instances(&self) -> &[InstanceTransform] {
        std::slice::from_ref(&self.instance)
    }
}

/// Drives every morphing body in the scene.
#[derive(Clone, Debug)]
pub struct MorphEngine {
    needles: PopulationAnimator,
    ornaments: PopulationAnimator,
    topper: TopperAnimator,
    damping_rate: f32,
    topper_rate: f32,
    origin: Vec3,
}

impl MorphEngine {
    /// Take ownership of the dataset and set up the starting pose.
    pub fn new(dataset: ParticleDataset, config: &MorphConfig) -> Self {
        let origin = config.origin();
        Self {
            needles: PopulationAnimator::new(dataset.needles, origin),
            ornaments: PopulationAnimator::new(dataset.ornaments, origin),
            topper: TopperAnimator::new(dataset.topper, origin),
            damping_rate: config.damping_rate,
            topper_rate: config.topper_damping_rate,
            origin,
        }
    }

    /// Advance everything by one frame. `state` is read once for the whole frame.
    pub fn update(&mut self, tick: FrameTick, state: MorphState) {
        let delta = sanitize_delta(tick.delta);
        if delta != tick.delta && tick.delta != 0.0 {
            log::warn!("ignoring invalid frame delta {}", tick.delta);
        }
        let tick = FrameTick { delta, ..tick };

        self.needles.update(state, tick, self.damping_rate, self.origin);
        self.ornaments.update(state, tick, self.damping_rate, self.origin);
        self.topper.update(state, tick, self.topper_rate, self.origin);
    }

    #[inline]
    pub fn needles(&self) -> &PopulationAnimator {
        &self.needles
    }

    #[inline]
    pub fn ornaments(&self) -> &PopulationAnimator {
        &self.ornaments
    }

    #[inline]
    pub fn topper(&self) -> &TopperAnimator {
        &self.topper
    }

    /// Instance data per population, needles first.
    pub fn instances(&self) -> [(PopulationKind, &[InstanceTransform]); 3] {
        [
            (PopulationKind::Needle, self.needles.instances().as_slice()),
            (PopulationKind::Ornament, self.ornaments.instances().as_slice()),
            (PopulationKind::Topper, self.topper.instances()),
        ]
    }

    /// Targets every body is currently heading toward under `state`.
    pub fn targets(&self, state: MorphState) -> impl Iterator<Item = Vec3> + '_ {
        let assembled = state.is_assembled();
        self.needles
            .population()
            .iter()
            .chain(self.ornaments.population().iter())
            .chain(std::iter::once(self.topper.particle()))
            .map(move |p| p.target(assembled))
    }
}
