//! Capture camera orientation.
//!
//! Forward is local +Z and up is local +Y. Yaw turns +Z toward +X, pitch
//! turns +Z toward +Y (positive pitch looks up). Steps are applied in the
//! camera's local frame, one after another, like turning a physical camera.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::face::CubeFace;

/// A relative rotation applied to the current orientation, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RotationStep {
    Yaw(f32),
    Pitch(f32),
}

impl RotationStep {
    pub fn quat(self) -> Quat {
        match self {
            RotationStep::Yaw(degrees) => Quat::from_rotation_y(degrees.to_radians()),
            RotationStep::Pitch(degrees) => Quat::from_rotation_x(-degrees.to_radians()),
        }
    }
}

/// Relative steps between captures and the face each resulting view shows.
///
/// Four yaws sweep the horizon and return to the start yaw, then the camera
/// pitches up and flips over to look down.
pub const CAPTURE_STEPS: [(CubeFace, RotationStep); 6] = [
    (CubeFace::PositiveX, RotationStep::Yaw(90.0)),
    (CubeFace::NegativeZ, RotationStep::Yaw(90.0)),
    (CubeFace::NegativeX, RotationStep::Yaw(90.0)),
    (CubeFace::PositiveZ, RotationStep::Yaw(90.0)),
    (CubeFace::PositiveY, RotationStep::Pitch(90.0)),
    (CubeFace::NegativeY, RotationStep::Pitch(180.0)),
];

/// Capture camera orientation as a unit quaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation(Quat);

impl Orientation {
    /// Orientation before the first step: looking down +Z.
    pub const REFERENCE: Self = Self(Quat::IDENTITY);

    /// Apply `step` in the local frame of `self`.
    pub fn rotate_local(self, step: RotationStep) -> Self {
        Self((self.0 * step.quat()).normalize())
    }

    pub fn quat(self) -> Quat {
        self.0
    }

    pub fn forward(self) -> Vec3 {
        self.0 * Vec3::Z
    }

    pub fn up(self) -> Vec3 {
        self.0 * Vec3::Y
    }

    /// Screen-right as seen through the camera.
    pub fn right(self) -> Vec3 {
        self.forward().cross(self.up())
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Fold [`CAPTURE_STEPS`] over the reference orientation, yielding the pose of every capture in order.
pub fn capture_poses() -> Vec<(CubeFace, Orientation)> {
    CAPTURE_STEPS
        .iter()
        .scan(Orientation::REFERENCE, |orientation, &(face, step)| {
            *orientation = orientation.rotate_local(step);
            Some((face, *orientation))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_yaw_turns_forward_toward_x() {
        let o = Orientation::REFERENCE.rotate_local(RotationStep::Yaw(90.0));
        assert_close(o.forward(), Vec3::X);
        assert_close(o.up(), Vec3::Y);
    }

    #[test]
    fn test_pitch_looks_up() {
        let o = Orientation::REFERENCE.rotate_local(RotationStep::Pitch(90.0));
        assert_close(o.forward(), Vec3::Y);
        assert_close(o.up(), Vec3::NEG_Z);
    }

    #[test]
    fn test_poses_face_their_tagged_axis() {
        let poses = capture_poses();
        assert_eq!(poses.len(), 6);
        for (face, orientation) in &poses {
            assert_close(orientation.forward(), face.axis());
        }
    }

    #[test]
    fn test_poses_are_cumulative() {
        // the fourth yaw brings the camera back to the reference heading
        let poses = capture_poses();
        assert_close(poses[3].1.forward(), Orientation::REFERENCE.forward());
        assert_close(poses[3].1.up(), Vec3::Y);
        // the downward view is reached from the upward one, so its up vector is flipped
        assert_close(poses[4].1.up(), Vec3::NEG_Z);
        assert_close(poses[5].1.up(), Vec3::Z);
    }

    #[test]
    fn test_poses_are_deterministic() {
        assert_eq!(capture_poses(), capture_poses());
    }

    #[test]
    fn test_basis_is_orthonormal() {
        for (_, o) in capture_poses() {
            assert!(o.forward().dot(o.up()).abs() < 1e-5);
            assert!(o.forward().dot(o.right()).abs() < 1e-5);
            assert!((o.right().length() - 1.0).abs() < 1e-5);
        }
    }
}
