//! Skeleton overlay: directed bone segments between part pivots.

use crate::core::types::Vec3;
use crate::rig::{Part, PartMap};

use super::hierarchy::{RigHierarchy, WorldPose};

/// A drawable bone from `start` to `end` in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneSegment {
    pub part: Part,
    /// Child the bone points at; `None` for a terminal bone aimed at the
    /// part's own voxel centroid
    pub child: Option<Part>,
    pub start: Vec3,
    pub end: Vec3,
}

impl BoneSegment {
    pub fn is_terminal(&self) -> bool {
        self.child.is_none()
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Segments from every parent to each child, plus a terminal segment for each
/// leaf that owns voxels. `centroids` are in part-local (model) space.
pub fn bone_segments(
    hierarchy: &RigHierarchy,
    world: &WorldPose,
    centroids: &PartMap<Option<Vec3>>,
) -> Vec<BoneSegment> {
    let mut segments = Vec::new();

    for &part in hierarchy.order() {
        let Some(start) = world.position(part) else {
            continue;
        };

        if hierarchy.is_leaf(part) {
            let end = centroids[part].and_then(|c| world.transform_point(part, c));
            if let Some(end) = end {
                segments.push(BoneSegment {
                    part,
                    child: None,
                    start,
                    end,
                });
            }
            continue;
        }

        for &child in hierarchy.children(part) {
            if let Some(end) = world.position(child) {
                segments.push(BoneSegment {
                    part,
                    child: Some(child),
                    start,
                    end,
                });
            }
        }
    }

    segments
}
