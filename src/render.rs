//! Boundary to whatever draws the instances.
//!
//! Drawing is not part of this crate. A [`RenderAdapter`] receives the
//! finished instance data for each population once per frame and may
//! upload it, record it, or ignore it.

use crate::dataset::PopulationKind;
use crate::instance::InstanceTransform;
use crate::Vec3;
use std::collections::HashMap;

/// Consumer of per-frame instance data.
pub trait RenderAdapter {
    /// Called once per population per frame, needles first, topper last.
    fn draw(&mut self, kind: PopulationKind, instances: &[InstanceTransform]);
}

/// Per-population figures from the most recent frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PopulationStats {
    pub instances: usize,
    /// Mean world-space translation. Zero for an empty population.
    pub centroid: Vec3,
    /// Largest distance of any instance from the centroid.
    pub spread: f32,
}

/// Adapter that records summary statistics instead of drawing.
///
/// Used by the headless runner and by tests.
#[derive(Clone, Debug, Default)]
pub struct FrameStats {
    frames: u64,
    populations: HashMap<PopulationKind, PopulationStats>,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of topper draws seen, which is one per frame.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn get(&self, kind: PopulationKind) -> Option<&PopulationStats> {
        self.populations.get(&kind)
    }
}

impl RenderAdapter for FrameStats {
    fn draw(&mut self, kind: PopulationKind, instances: &[InstanceTransform]) {
        let centroid = if instances.is_empty() {
            Vec3::ZERO
        } else {
            let sum: Vec3 = instances.iter().map(InstanceTransform::translation).sum();
            sum / instances.len() as f32
        };
        let spread = instances
            .iter()
            .map(|t| t.translation().distance(centroid))
            .fold(0.0, f32::max);

        self.populations.insert(
            kind,
            PopulationStats {
                instances: instances.len(),
                centroid,
                spread,
            },
        );
        if kind == PopulationKind::Topper {
            self.frames += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Pose;

    fn at(position: Vec3) -> InstanceTransform {
        InstanceTransform::from_pose(
            &Pose {
                position,
                rotation: Vec3::ZERO,
                scale: 1.0,
            },
            Vec3::ZERO,
        )
    }

    #[test]
    fn test_stats_centroid_and_spread() {
        let mut stats = FrameStats::new();
        stats.draw(
            PopulationKind::Ornament,
            &[at(Vec3::new(-1.0, 0.0, 0.0)), at(Vec3::new(1.0, 0.0, 0.0))],
        );
        let s = stats.get(PopulationKind::Ornament).unwrap();
        assert_eq!(s.instances, 2);
        assert!(s.centroid.length() < 1e-6);
        assert!((s.spread - 1.0).abs() < 1e-6);
        assert_eq!(stats.frames(), 0);
    }

    #[test]
    fn test_stats_empty_population() {
        let mut stats = FrameStats::new();
        stats.draw(PopulationKind::Needle, &[]);
        let s = stats.get(PopulationKind::Needle).unwrap();
        assert_eq!(s.instances, 0);
        assert_eq!(s.centroid, Vec3::ZERO);
    }

    #[test]
    fn test_frames_counted_on_topper() {
        let mut stats = FrameStats::new();
        stats.draw(PopulationKind::Topper, &[at(Vec3::Y)]);
        stats.draw(PopulationKind::Topper, &[at(Vec3::Y)]);
        assert_eq!(stats.frames(), 2);
    }
}
