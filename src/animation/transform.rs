//! Per-part position + Euler rotation pair.

use serde::{Deserialize, Serialize};

use crate::core::types::{EulerRot, Mat4, Quat, Vec3};
use crate::environment::Lerp;

/// Euler order shared with the renderer.
pub const EULER_ORDER: EulerRot = EulerRot::XYZ;

/// Position (world units) and rotation (Euler radians, XYZ order).
///
/// Used both for rest transforms and for per-keyframe animated deltas. Rest
/// and delta are summed componentwise, never composed as matrices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartTransform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl PartTransform {
    pub const ZERO: PartTransform = PartTransform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
    };

    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO)
    }

    pub fn from_rotation(rotation: Vec3) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    /// Componentwise sum (rest ⊕ delta).
    pub fn add(&self, other: &Self) -> Self {
        Self {
            position: self.position + other.position,
            rotation: self.rotation + other.rotation,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.position == Vec3::ZERO && self.rotation == Vec3::ZERO
    }

    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EULER_ORDER, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local matrix: rotate about the pivot, then translate.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.to_quat(), self.position)
    }
}

impl Lerp for PartTransform {
    /// Per-axis lerp on both vectors. Rotation is deliberately not slerped:
    /// the renderer composes Euler angles.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: Lerp::lerp(&self.position, &other.position, t),
            rotation: Lerp::lerp(&self.rotation, &other.rotation, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_componentwise() {
        let rest = PartTransform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.1, 0.0, 0.0));
        let delta = PartTransform::new(Vec3::new(0.5, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0));
        let sum = rest.add(&delta);
        assert_eq!(sum.position, Vec3::new(1.5, 2.0, 2.0));
        assert_eq!(sum.rotation, Vec3::new(0.1, 1.0, 0.0));
    }

    #[test]
    fn test_lerp_rotation_is_per_axis() {
        let a = PartTransform::from_rotation(Vec3::new(0.0, 0.0, 0.0));
        let b = PartTransform::from_rotation(Vec3::new(3.0, -2.0, 6.0));
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.rotation, Vec3::new(1.5, -1.0, 3.0));
        assert_eq!(mid.position, Vec3::ZERO);
    }

    #[test]
    fn test_to_mat4_translation_and_rotation() {
        let t = PartTransform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        );
        let m = t.to_mat4();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-5);

        // +X rotated 90 degrees about Y lands on -Z
        let x = m.transform_vector3(Vec3::X);
        assert!((x - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_zero() {
        assert!(PartTransform::ZERO.is_zero());
        assert!(PartTransform::default().is_zero());
        assert!(!PartTransform::from_position(Vec3::X).is_zero());
    }
}
