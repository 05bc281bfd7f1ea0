use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::Pose;

/// The component's position relative to its [`super::Parent`].
///
/// If the entity doesn't have a [`super::Parent`], then the global transform is just whatever
/// you've set here. Entities marked [`super::HeadLocked`] have their translation and rotation
/// overwritten every frame, but their scale is left alone.
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct LocalTransform {
    /// The translation of the entity
    pub translation: Vec3,
    /// The rotation of the entity
    pub rotation: Quat,
    /// The non-uniform scale of the entity
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Update the translation and rotation from a [`Pose`], keeping the scale
    pub fn update_from_pose(&mut self, pose: &Pose) {
        self.translation = pose.position;
        self.rotation = pose.orientation;
    }

    /// Convert this transform into an [`Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}
