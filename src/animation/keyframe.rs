//! Keyframes and interpolation modes

use serde::{Deserialize, Serialize};

use super::transform::PartTransform;
use crate::environment::EnvironmentSnapshot;
use crate::rig::{Part, PartMap};

/// How the blend factor is shaped between a keyframe and the next one.
/// The mode of the earlier keyframe of a bracketing pair applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    Bezier,
}

impl InterpolationMode {
    /// Shape a raw `[0, 1]` factor.
    #[inline]
    pub fn shape(self, raw_t: f32) -> f32 {
        match self {
            InterpolationMode::Step => 0.0,
            InterpolationMode::Linear => raw_t,
            InterpolationMode::Bezier => ease_in_out_cubic(raw_t),
        }
    }
}

/// Fixed symmetric cubic ease.
#[inline]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// Timestamped pose deltas plus an environment snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Normalized time in `[0, 1]`
    pub time: f32,
    pub interpolation: InterpolationMode,
    /// Animated delta from rest for every part
    pub transforms: PartMap<PartTransform>,
    pub environment: EnvironmentSnapshot,
}

impl Keyframe {
    /// Zero-delta keyframe.
    pub fn new(time: f32, environment: EnvironmentSnapshot) -> Self {
        Self {
            time,
            interpolation: InterpolationMode::default(),
            transforms: PartMap::default(),
            environment,
        }
    }

    pub fn transform(&self, part: Part) -> &PartTransform {
        &self.transforms[part]
    }

    pub fn set_transform(&mut self, part: Part, transform: PartTransform) {
        self.transforms[part] = transform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_fixed_points() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
    }

    #[test]
    fn test_ease_is_symmetric() {
        for x in [0.1_f32, 0.2, 0.3, 0.4] {
            let sum = ease_in_out_cubic(x) + ease_in_out_cubic(1.0 - x);
            assert!((sum - 1.0).abs() < 1e-5);
        }
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_mode_shape() {
        assert_eq!(InterpolationMode::Step.shape(0.9), 0.0);
        assert_eq!(InterpolationMode::Linear.shape(0.3), 0.3);
        assert_eq!(InterpolationMode::Bezier.shape(0.5), 0.5);
    }

    #[test]
    fn test_new_keyframe_is_zero_delta() {
        let kf = Keyframe::new(0.4, EnvironmentSnapshot::default());
        assert!(kf.transforms.iter().all(|(_, t)| t.is_zero()));
        assert_eq!(kf.interpolation, InterpolationMode::Linear);
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&InterpolationMode::Bezier).unwrap(), "\"BEZIER\"");
    }
}
