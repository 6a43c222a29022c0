//! GPU-side packing of per-part world matrices for the renderer.

use bytemuck::{Pod, Zeroable};

use crate::core::types::Mat4;
use crate::rig::{Part, PartMap};

use super::hierarchy::WorldPose;

/// One part's world matrix plus flags, laid out for a storage buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuPartTransform {
    pub matrix: [[f32; 4]; 4],
    pub part_index: u32,
    /// 1 if the part should be drawn
    pub visible: u32,
    pub _pad: [u32; 2],
}

impl GpuPartTransform {
    /// Create from a glam Mat4
    pub fn from_mat4(part: Part, matrix: Mat4, visible: bool) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
            part_index: part.index() as u32,
            visible: visible as u32,
            _pad: [0; 2],
        }
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.matrix)
    }
}

/// Pack every composed part in index order. Hidden parts keep their matrix
/// but are flagged invisible.
pub fn pack_world_pose(world: &WorldPose, hidden: &PartMap<bool>) -> Vec<GpuPartTransform> {
    world
        .iter()
        .map(|(part, matrix)| GpuPartTransform::from_mat4(part, matrix, !hidden[part]))
        .collect()
}

/// Raw bytes ready for a buffer upload.
pub fn as_bytes(transforms: &[GpuPartTransform]) -> &[u8] {
    bytemuck::cast_slice(transforms)
}
