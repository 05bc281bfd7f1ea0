use glam::{Affine3A, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A position and orientation in some space, usually global space.
///
/// Lockview uses a right handed coordinate system where the viewer looks down **-Z**, the same
/// convention as OpenXR and WebXR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Where the thing is
    pub position: Vec3,
    /// Which way the thing is facing. Must be normalised.
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// A pose at the origin, looking down -Z
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    /// Create a new pose
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Unit vector pointing the way this pose is looking
    pub fn forward(&self) -> Vec3 {
        (self.orientation * Vec3::NEG_Z).normalize()
    }

    /// Extract the pose from an affine transform, discarding any scale
    pub fn from_affine(transform: &Affine3A) -> Self {
        let (_, orientation, position) = transform.to_scale_rotation_translation();
        Self {
            position,
            orientation,
        }
    }

    /// Convert the pose into a rigid affine transform
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.orientation, self.position)
    }
}

/// Place a billboard `offset` metres directly in front of `camera`, facing it.
///
/// The billboard shares the camera's orientation exactly, so its surface lies parallel to the
/// camera's image plane.
pub fn compute_billboard_pose(camera: &Pose, offset: f32) -> Pose {
    Pose {
        position: camera.position + camera.forward() * offset,
        orientation: camera.orientation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    pub fn test_billboard_pose_identity() {
        let camera = Pose::new([0., 1.6, 0.].into(), Quat::IDENTITY);
        let billboard = compute_billboard_pose(&camera, 1.5);

        assert_relative_eq!(billboard.position, Vec3::new(0., 1.6, -1.5));
        assert_eq!(billboard.orientation, camera.orientation);
    }

    #[test]
    pub fn test_billboard_pose_rotated() {
        // Turning 90 degrees to the left means looking down -X.
        let orientation = Quat::from_rotation_y(FRAC_PI_2);
        let camera = Pose::new([1., 2., 3.].into(), orientation);
        let billboard = compute_billboard_pose(&camera, 1.5);

        assert_relative_eq!(billboard.position, Vec3::new(-0.5, 2., 3.), epsilon = 1e-6);
        assert_eq!(billboard.orientation, orientation);

        // Pitched down and rolled, for good measure.
        let orientation = Quat::from_euler(glam::EulerRot::YXZ, 0.3, -0.4, 0.2);
        let camera = Pose::new([-4., 0.5, 2.].into(), orientation);
        let billboard = compute_billboard_pose(&camera, 2.0);
        let expected = camera.position + (orientation * Vec3::NEG_Z) * 2.0;

        assert_relative_eq!(billboard.position, expected, epsilon = 1e-6);
        assert_eq!(billboard.orientation, orientation);
        assert_relative_eq!((billboard.position - camera.position).length(), 2.0, epsilon = 1e-6);
    }

    #[test]
    pub fn test_billboard_pose_is_pure() {
        let camera = Pose::new(
            [0.2, 1.7, -0.3].into(),
            Quat::from_rotation_x(0.25) * Quat::from_rotation_y(-1.1),
        );
        assert_eq!(
            compute_billboard_pose(&camera, 1.5),
            compute_billboard_pose(&camera, 1.5)
        );
    }

    #[test]
    pub fn test_affine_round_trip_discards_scale() {
        let pose = Pose::new([1., 2., 3.].into(), Quat::from_rotation_z(0.7));
        let scaled = Affine3A::from_scale_rotation_translation(
            [2., 2., 2.].into(),
            pose.orientation,
            pose.position,
        );
        let extracted = Pose::from_affine(&scaled);

        assert_relative_eq!(extracted.position, pose.position, epsilon = 1e-6);
        assert_relative_eq!(extracted.orientation, pose.orientation, epsilon = 1e-6);
    }
}
