//! Scene configuration.
//!
//! A [`MorphConfig`] is loaded once at startup and never mutated afterwards.
//! Changing any value means rebuilding the datasets from scratch.
//!
//! Configs serialize to JSON. Every field has a default, so a partial file
//! only needs the values it overrides:
//!
//! ```json
//! { "needle_count": 5000, "scatter_radius": 30.0, "seed": 7 }
//! ```

use crate::error::ConfigError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Numeric parameters for the tree and its scattered cloud.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MorphConfig {
    /// Height of the assembled cone (base at y = 0, apex at y = height).
    pub tree_height: f32,
    /// Radius of the cone base for the needle layer.
    pub tree_radius: f32,
    pub needle_count: usize,
    pub ornament_count: usize,
    /// Radius of the sphere needles scatter into.
    pub scatter_radius: f32,
    /// Exponential damping rate shared by needles and ornaments.
    pub damping_rate: f32,
    /// Lerp rate for the topper.
    pub topper_damping_rate: f32,
    /// Extra cone radius so ornaments sit outside the needles.
    pub ornament_radius_offset: f32,
    /// Ornaments scatter to `scatter_radius * ornament_scatter_multiplier`.
    pub ornament_scatter_multiplier: f32,
    /// Width of the x/z noise band around the cone surface.
    pub cone_noise: f32,
    /// Needles draw their vertical bias as `uniform().powf(exponent)`.
    pub needle_bias_exponent: f32,
    /// `[min, max]` uniform scale range for needles.
    pub needle_scale: [f32; 2],
    /// `[min, max]` uniform scale range for ornaments.
    pub ornament_scale: [f32; 2],
    /// How far above the apex the topper rests.
    pub topper_height_offset: f32,
    pub topper_scale: f32,
    /// Scene-root translation applied to emitted matrices only.
    pub origin: [f32; 3],
    /// Seed for dataset generation. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            tree_height: 12.0,
            tree_radius: 4.5,
            needle_count: 2500,
            ornament_count: 150,
            scatter_radius: 25.0,
            damping_rate: 2.0,
            topper_damping_rate: 2.0,
            ornament_radius_offset: 0.2,
            ornament_scatter_multiplier: 1.2,
            cone_noise: 0.2,
            needle_bias_exponent: 0.8,
            needle_scale: [0.5, 2.0],
            ornament_scale: [0.8, 2.0],
            topper_height_offset: 0.5,
            topper_scale: 1.0,
            origin: [0.0, -4.0, 0.0],
            seed: None,
        }
    }
}

impl MorphConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        config.validate()?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject values that would produce a degenerate or divergent scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("tree_height", self.tree_height),
            ("tree_radius", self.tree_radius),
            ("scatter_radius", self.scatter_radius),
            ("damping_rate", self.damping_rate),
            ("topper_damping_rate", self.topper_damping_rate),
            ("ornament_radius_offset", self.ornament_radius_offset),
            ("ornament_scatter_multiplier", self.ornament_scatter_multiplier),
            ("cone_noise", self.cone_noise),
            ("needle_bias_exponent", self.needle_bias_exponent),
            ("topper_height_offset", self.topper_height_offset),
            ("topper_scale", self.topper_scale),
        ];
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, [min, max]) in [
            ("needle_scale", self.needle_scale),
            ("ornament_scale", self.ornament_scale),
        ] {
            check_finite(field, min)?;
            check_finite(field, max)?;
            if min < 0.0 {
                return Err(ConfigError::Negative { field, value: min });
            }
            if min > max {
                return Err(ConfigError::InvertedRange { field, min, max });
            }
        }

        for value in self.origin {
            check_finite("origin", value)?;
        }

        Ok(())
    }

    /// Scene-root translation as a vector.
    pub fn origin(&self) -> Vec3 {
        Vec3::from_array(self.origin)
    }

    /// Cone base radius used by the ornament layer.
    pub fn ornament_radius(&self) -> f32 {
        self.tree_radius + self.ornament_radius_offset
    }

    /// Sphere radius ornaments scatter into.
    pub fn ornament_scatter_radius(&self) -> f32 {
        self.scatter_radius * self.ornament_scatter_multiplier
    }

    /// Where the topper rests in the assembled form.
    pub fn topper_position(&self) -> Vec3 {
        Vec3::new(0.0, self.tree_height + self.topper_height_offset, 0.0)
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}
