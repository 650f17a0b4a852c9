//! # treemorph
//!
//! Thousands of small bodies morphing between a cone-shaped tree and a
//! scattered spherical cloud, driven by a two-state toggle.
//!
//! treemorph owns the procedural layouts and the per-frame animation. The
//! render loop, camera, lights and drawing stay outside: the host supplies
//! a [`FrameTick`] each frame, flips the toggle when its control is used,
//! and reads back one model matrix per body.
//!
//! ## Quick Start
//!
//! ```ignore
//! use treemorph::prelude::*;
//!
//! let mut scene = Scene::builder()
//!     .with_config(MorphConfig::default())
//!     .with_seed(7)
//!     .build()?;
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     scene.frame(clock.tick());
//!     scene.render(&mut my_renderer);   // impl RenderAdapter
//!     if button_clicked {
//!         scene.flip();
//!     }
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Populations
//!
//! - [`PopulationKind::Needle`]: cone surface with height drawn as `u^0.8`,
//!   scattered in a sphere of `scatter_radius`. Random base rotation plus
//!   sway when assembled and tumble when scattered.
//! - [`PopulationKind::Ornament`]: cone pushed out by `ornament_radius_offset`,
//!   scattered in a sphere of `scatter_radius * 1.2`. Upright when assembled,
//!   slow drift when scattered.
//! - [`PopulationKind::Topper`]: just above the apex, scattered in a sphere of
//!   `scatter_radius`. Always spinning.
//!
//! Datasets are generated once from a [`MorphConfig`] and never change.
//!
//! ### Motion
//!
//! Needles and ornaments follow exponential damping,
//! `target - (target - current) * exp(-rate * delta)`. The topper uses a
//! clamped lerp step. Neither overshoots for any delta, so a long stall
//! (a backgrounded window) just lands bodies on their targets.
//!
//! Rotation is a pure function of elapsed time and particle index; nothing
//! about it is stored between frames.
//!
//! ### Toggle
//!
//! [`MorphState`] has two states and one transition. Flipping mid-flight
//! needs no special handling: every body damps from its current position
//! toward the new target.

pub mod config;
pub mod damping;
pub mod dataset;
pub mod engine;
mod error;
pub mod instance;
pub mod motion;
pub mod render;
mod scene;
pub mod spawn;
pub mod time;
pub mod toggle;

pub use bytemuck;
pub use config::MorphConfig;
pub use dataset::{Particle, ParticleDataset, Population, PopulationKind, PopulationShape};
pub use engine::{
    advance_population, AnimationState, MorphEngine, PopulationAnimator, TopperAnimator,
};
pub use error::ConfigError;
pub use glam::{Mat4, Vec3};
pub use instance::{InstanceBuffer, InstanceTransform, Pose};
pub use render::{FrameStats, PopulationStats, RenderAdapter};
pub use scene::{Scene, SceneBuilder};
pub use spawn::{random_in_sphere, random_on_cone_band, VerticalBias};
pub use time::{FrameClock, FrameTick};
pub use toggle::{MorphState, Toggle};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use treemorph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::MorphConfig;
    pub use crate::dataset::PopulationKind;
    pub use crate::error::ConfigError;
    pub use crate::instance::InstanceTransform;
    pub use crate::render::{FrameStats, RenderAdapter};
    pub use crate::scene::{Scene, SceneBuilder};
    pub use crate::time::{FrameClock, FrameTick};
    pub use crate::toggle::MorphState;
    pub use crate::{Mat4, Vec3};
}
