//! User libraries: saved rig setups and animation presets.

use std::f32::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::animation::{InterpolationMode, Keyframe, KeyframeTimeline, PartTransform};
use crate::core::types::Vec3;
use crate::environment::EnvironmentSnapshot;
use crate::rig::{Part, PartMap, RestPoseStore, RigTemplate, RigTopology};

/// A named rig configuration that can be re-applied to any model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedRigTemplate {
    pub id: String,
    pub name: String,
    pub template: RigTemplate,
    pub topology: RigTopology,
    pub rest_pose: RestPoseStore,
}

/// Pose part of a keyframe, without an environment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresetKeyframe {
    pub time: f32,
    pub interpolation: InterpolationMode,
    pub transforms: PartMap<PartTransform>,
}

impl PresetKeyframe {
    fn new(time: f32, interpolation: InterpolationMode) -> Self {
        Self {
            time,
            interpolation,
            transforms: PartMap::default(),
        }
    }

    fn with(mut self, part: Part, transform: PartTransform) -> Self {
        self.transforms[part] = transform;
        self
    }
}

/// A reusable motion: a keyframe set applied over the whole timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationPreset {
    pub id: String,
    pub name: String,
    pub keyframes: Vec<PresetKeyframe>,
}

impl AnimationPreset {
    /// Capture the poses of an existing timeline.
    pub fn capture(id: String, name: String, timeline: &KeyframeTimeline) -> Self {
        let keyframes = timeline
            .keyframes()
            .iter()
            .map(|k| PresetKeyframe {
                time: k.time,
                interpolation: k.interpolation,
                transforms: k.transforms.clone(),
            })
            .collect();
        Self { id, name, keyframes }
    }

    /// Build a timeline from this preset; every keyframe takes `environment`.
    pub fn to_timeline(&self, environment: &EnvironmentSnapshot) -> KeyframeTimeline {
        let keyframes: Vec<Keyframe> = self
            .keyframes
            .iter()
            .map(|k| Keyframe {
                time: k.time,
                interpolation: k.interpolation,
                transforms: k.transforms.clone(),
                environment: environment.clone(),
            })
            .collect();
        KeyframeTimeline::from(keyframes)
    }
}

/// Motions shipped with the studio.
pub fn builtin_animation_presets() -> Vec<AnimationPreset> {
    use InterpolationMode::{Bezier, Linear};

    let bob = |y: f32| PartTransform::from_position(Vec3::new(0.0, y, 0.0));
    let spin = |angle: f32| PartTransform::from_rotation(Vec3::new(0.0, angle, 0.0));
    let wave = |z: f32| PartTransform::from_rotation(Vec3::new(0.0, 0.0, z));

    vec![
        AnimationPreset {
            id: "idle".to_string(),
            name: "Idle Bob".to_string(),
            keyframes: vec![
                PresetKeyframe::new(0.0, Bezier),
                PresetKeyframe::new(0.5, Bezier).with(Part::Body, bob(0.5)),
                PresetKeyframe::new(1.0, Bezier),
            ],
        },
        AnimationPreset {
            id: "turntable".to_string(),
            name: "Turntable".to_string(),
            keyframes: vec![
                PresetKeyframe::new(0.0, Linear),
                PresetKeyframe::new(1.0, Linear).with(Part::Root, spin(TAU)),
            ],
        },
        AnimationPreset {
            id: "wave".to_string(),
            name: "Wave".to_string(),
            keyframes: vec![
                PresetKeyframe::new(0.0, Bezier),
                PresetKeyframe::new(0.25, Bezier).with(Part::ArmR, wave(PI * 0.75)),
                PresetKeyframe::new(0.5, Bezier).with(Part::ArmR, wave(PI * 0.5)),
                PresetKeyframe::new(0.75, Bezier).with(Part::ArmR, wave(PI * 0.75)),
                PresetKeyframe::new(1.0, Bezier),
            ],
        },
    ]
}
