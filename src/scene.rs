//! Scene builder and frame driver.

use crate::config::MorphConfig;
use crate::dataset::ParticleDataset;
use crate::engine::MorphEngine;
use crate::error::ConfigError;
use crate::render::RenderAdapter;
use crate::spawn::seeded_rng;
use crate::time::FrameTick;
use crate::toggle::{MorphState, Toggle};
use rand::RngCore;

/// A morphing tree scene builder.
///
/// Use method chaining to configure, then call `.build()`.
///
/// ```ignore
/// let mut scene = SceneBuilder::new()
///     .with_config(MorphConfig::default())
///     .with_seed(7)
///     .build()?;
/// ```
pub struct SceneBuilder {
    config: MorphConfig,
    rng: Option<Box<dyn RngCore>>,
}

impl SceneBuilder {
    /// Start from the default config.
    pub fn new() -> Self {
        Self {
            config: MorphConfig::default(),
            rng: None,
        }
    }

    pub fn with_config(mut self, config: MorphConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed dataset generation, overriding `config.seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Generate datasets from a caller-supplied random source.
    ///
    /// Takes precedence over any seed.
    pub fn with_rng<R: RngCore + 'static>(mut self, rng: R) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Validate the config and generate all datasets.
    pub fn build(self) -> Result<Scene, ConfigError> {
        self.config.validate()?;

        let dataset = match self.rng {
            Some(mut rng) => ParticleDataset::generate(&self.config, &mut *rng),
            None => ParticleDataset::generate(&self.config, &mut seeded_rng(self.config.seed)),
        };

        log::info!(
            "built scene: {} needles, {} ornaments, seed {:?}",
            dataset.needles.len(),
            dataset.ornaments.len(),
            self.config.seed
        );

        let engine = MorphEngine::new(dataset, &self.config);
        Ok(Scene {
            config: self.config,
            engine,
            toggle: Toggle::new(MorphState::Assembled),
        })
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Datasets, animation engine and toggle for one session.
#[derive(Clone, Debug)]
pub struct Scene {
    config: MorphConfig,
    engine: MorphEngine,
    toggle: Toggle,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    /// The control surface: switch between assembled and scattered.
    ///
    /// The next call to [`frame`](Self::frame) sees the new state.
    pub fn flip(&mut self) -> MorphState {
        self.toggle.flip()
    }

    /// Current toggle state.
    #[inline]
    pub fn state(&self) -> MorphState {
        self.toggle.state()
    }

    /// Advance all bodies by one frame.
    pub fn frame(&mut self, tick: FrameTick) {
        let state = self.toggle.state();
        self.engine.update(tick, state);
    }

    /// Hand every population's instance data to the adapter.
    pub fn render<A: RenderAdapter + ?Sized>(&self, adapter: &mut A) {
        for (kind, instances) in self.engine.instances() {
            adapter.draw(kind, instances);
        }
    }

    #[inline]
    pub fn engine(&self) -> &MorphEngine {
        &self.engine
    }

    #[inline]
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }
}
