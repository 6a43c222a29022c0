//! Part hierarchy: arena of part nodes and world-transform composition.
//!
//! The arena is rebuilt only when the topology changes. Each frame,
//! [`RigHierarchy::compose`] walks it in parents-before-children order.

use serde::{Deserialize, Serialize};

use crate::animation::{PartTransform, EULER_ORDER};
use crate::core::types::{Mat4, Quat, Vec3};
use crate::rig::{Part, PartMap, RigTopology};

/// Uniform scale the voxel model is displayed at.
pub const MODEL_SCALE: f32 = 0.5;

/// Global placement of the whole model, applied above every rig root.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelTransform {
    pub position: Vec3,
    /// Euler radians, same order as part rotations
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl ModelTransform {
    /// Convert to a 4x4 matrix.
    pub fn to_mat4(&self) -> Mat4 {
        let rotation = Quat::from_euler(EULER_ORDER, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }

    /// Matrix every rig root hangs under, including [`MODEL_SCALE`].
    pub fn root_matrix(&self) -> Mat4 {
        self.to_mat4() * Mat4::from_scale(Vec3::splat(MODEL_SCALE))
    }
}

/// World matrices of the active parts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldPose {
    matrices: PartMap<Option<Mat4>>,
}

impl WorldPose {
    /// World matrix, `None` for parts outside the hierarchy.
    pub fn get(&self, part: Part) -> Option<Mat4> {
        self.matrices[part]
    }

    /// World position of the part's pivot.
    pub fn position(&self, part: Part) -> Option<Vec3> {
        self.matrices[part].map(|m| m.w_axis.truncate())
    }

    /// Transform a point from part-local space to world space.
    pub fn transform_point(&self, part: Part, point: Vec3) -> Option<Vec3> {
        self.matrices[part].map(|m| m.transform_point3(point))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Part, Mat4)> + '_ {
        self.matrices.iter().filter_map(|(p, m)| m.map(|m| (p, m)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flattened forest over the active parts, indexed by [`Part`].
#[derive(Clone, Debug, PartialEq)]
pub struct RigHierarchy {
    /// Active parts, every parent before its children
    order: Vec<Part>,
    parents: PartMap<Option<Part>>,
    children: PartMap<Vec<Part>>,
}

impl RigHierarchy {
    /// Build the arena from a topology. Parents that are inactive read as
    /// "no parent", so such parts become roots.
    pub fn build(topology: &RigTopology) -> Self {
        let parents = PartMap::from_fn(|part| topology.effective_parent(part));
        let mut children: PartMap<Vec<Part>> = PartMap::default();
        for part in topology.active_parts() {
            if let Some(parent) = parents[part] {
                children[parent].push(part);
            }
        }

        let mut order = Vec::with_capacity(topology.active_count());
        let mut stack: Vec<Part> = topology.roots();
        stack.reverse();
        while let Some(part) = stack.pop() {
            order.push(part);
            stack.extend(children[part].iter().rev().copied());
        }

        log::debug!("Built rig hierarchy with {} parts", order.len());

        Self {
            order,
            parents,
            children,
        }
    }

    /// Active parts in walk order (parents before children).
    pub fn order(&self) -> &[Part] {
        &self.order
    }

    pub fn contains(&self, part: Part) -> bool {
        self.order.contains(&part)
    }

    pub fn parent(&self, part: Part) -> Option<Part> {
        self.parents[part]
    }

    pub fn children(&self, part: Part) -> &[Part] {
        &self.children[part]
    }

    pub fn is_leaf(&self, part: Part) -> bool {
        self.children[part].is_empty()
    }

    /// Compose world matrices: `world = parent_world * local`, with rig roots
    /// placed under `model_root`.
    pub fn compose(&self, locals: &PartMap<PartTransform>, model_root: Mat4) -> WorldPose {
        let mut matrices: PartMap<Option<Mat4>> = PartMap::default();

        for &part in &self.order {
            let parent_world = self.parents[part]
                .and_then(|parent| matrices[parent])
                .unwrap_or(model_root);
            matrices[part] = Some(parent_world * locals[part].to_mat4());
        }

        WorldPose { matrices }
    }
}

/// One-shot composition for callers that do not keep an arena around.
pub fn compose_world_transforms(
    locals: &PartMap<PartTransform>,
    topology: &RigTopology,
    model_root: Mat4,
) -> WorldPose {
    RigHierarchy::build(topology).compose(locals, model_root)
}
