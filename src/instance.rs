//! Render-facing instance data.
//!
//! The engine writes one [`InstanceTransform`] per particle into an
//! [`InstanceBuffer`] each frame. Render adapters only ever read these
//! buffers; the continuous animation state lives elsewhere.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, orientation and scale of one particle for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Euler XYZ angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Pose {
    /// Compose into a model matrix, translated by `origin`.
    pub fn to_matrix(&self, origin: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            origin + self.position,
        )
    }
}

/// Column-major model matrix, laid out for an instanced vertex buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceTransform {
    pub model: [[f32; 4]; 4],
}

impl InstanceTransform {
    pub const IDENTITY: Self = Self {
        model: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn from_pose(pose: &Pose, origin: Vec3) -> Self {
        Self {
            model: pose.to_matrix(origin).to_cols_array_2d(),
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// World-space translation.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        let [x, y, z, _] = self.model[3];
        Vec3::new(x, y, z)
    }
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Fixed-length output array for one population.
///
/// Allocated once; frames overwrite entries in place.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceBuffer {
    transforms: Vec<InstanceTransform>,
}

impl InstanceBuffer {
    /// A buffer of `len` identity transforms.
    pub fn new(len: usize) -> Self {
        Self {
            transforms: vec![InstanceTransform::IDENTITY; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[InstanceTransform] {
        &self.transforms
    }

    /// Raw bytes for upload to a GPU instance buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.transforms)
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [InstanceTransform] {
        &mut self.transforms
    }
}
