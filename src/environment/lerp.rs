//! Linear interpolation shared by environment blending and pose blending.

use glam::Vec3;

/// Trait for types that can be linearly interpolated.
pub trait Lerp: Clone {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for [f32; 3] {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        [
            self[0] + (other[0] - self[0]) * t,
            self[1] + (other[1] - self[1]) * t,
            self[2] + (other[2] - self[2]) * t,
        ]
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

/// Categorical blend: `a` while `t < 0.5`, otherwise `b`.
#[inline]
pub fn snap<T: Clone>(a: &T, b: &T, t: f32) -> T {
    if t < 0.5 { a.clone() } else { b.clone() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f32_lerp() {
        assert_eq!(0.0_f32.lerp(&10.0, 0.25), 2.5);
        assert_eq!(4.0_f32.lerp(&8.0, 0.0), 4.0);
        assert_eq!(4.0_f32.lerp(&8.0, 1.0), 8.0);
    }

    #[test]
    fn test_vec3_lerp() {
        let v = Lerp::lerp(&Vec3::ZERO, &Vec3::new(2.0, -4.0, 6.0), 0.5);
        assert_eq!(v, Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn test_array_lerp() {
        let v = [0.0, 1.0, 2.0].lerp(&[1.0, 1.0, 0.0], 0.5);
        assert_eq!(v, [0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_snap_threshold() {
        assert_eq!(snap(&"a", &"b", 0.49), "a");
        assert_eq!(snap(&"a", &"b", 0.5), "b");
        assert_eq!(snap(&"a", &"b", 1.0), "b");
    }
}
