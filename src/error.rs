//! Error types for treemorph.
//!
//! Only configuration can fail. Everything past startup (dataset
//! generation, frame updates) is infallible by construction.

use std::path::PathBuf;

/// Errors raised while loading or validating a [`MorphConfig`](crate::MorphConfig).
///
/// All of these are fatal at startup; a scene is never built from a
/// config that produced one.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid config JSON (this includes negative counts).
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A numeric field is NaN or infinite.
    #[error("config value `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    /// A field that describes a size, rate or count is negative.
    #[error("config value `{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    /// A `[min, max]` range has `min > max`.
    #[error("config range `{field}` is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
}
