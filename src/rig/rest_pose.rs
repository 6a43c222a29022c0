//! Per-part rest (pivot) transforms, independent of animation.

use serde::{Deserialize, Serialize};

use super::part::Part;
use super::part_map::PartMap;
use crate::animation::{KeyframeTimeline, PartTransform};

/// Which half of a [`PartTransform`] an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformComponent {
    Position,
    Rotation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }
}

/// Write one scalar of a transform.
pub fn set_component(
    transform: &mut PartTransform,
    component: TransformComponent,
    axis: Axis,
    value: f32,
) {
    let v = match component {
        TransformComponent::Position => &mut transform.position,
        TransformComponent::Rotation => &mut transform.rotation,
    };
    v[axis.index()] = value;
}

/// Rest transform for every part. Unset parts are zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestPoseStore {
    transforms: PartMap<PartTransform>,
}

impl RestPoseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, part: Part) -> PartTransform {
        self.transforms[part]
    }

    pub fn transforms(&self) -> &PartMap<PartTransform> {
        &self.transforms
    }

    /// Replace a part's whole rest transform.
    pub fn set_transform(&mut self, part: Part, transform: PartTransform) {
        self.transforms[part] = transform;
    }

    /// Point edit of one axis. Range limits are the caller's concern.
    pub fn set(&mut self, part: Part, component: TransformComponent, axis: Axis, value: f32) {
        set_component(&mut self.transforms[part], component, axis, value);
    }

    /// Fold an animated delta into the rest transform and zero that part's
    /// delta in every keyframe, so the pose at the capture instant is kept.
    pub fn capture_from_animated_pose(
        &mut self,
        part: Part,
        delta: PartTransform,
        timeline: &mut KeyframeTimeline,
    ) {
        self.transforms[part] = self.transforms[part].add(&delta);
        timeline.clear_part(part);
        log::debug!("Captured animated pose of {} into rest", part);
    }

    pub fn reset(&mut self, part: Part) {
        self.transforms[part] = PartTransform::ZERO;
    }

    pub fn reset_all(&mut self) {
        self.transforms = PartMap::default();
    }
}
