//! Imported voxel record

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::environment::Color;
use crate::rig::Part;

/// One colored voxel from the importer, in `.vox` grid coordinates (z up).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoxelData {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<Part>,
}

impl VoxelData {
    pub fn new(x: u8, y: u8, z: u8, color: Color) -> Self {
        Self {
            x,
            y,
            z,
            color,
            part: None,
        }
    }

    pub fn with_part(self, part: Part) -> Self {
        Self {
            part: Some(part),
            ..self
        }
    }

    /// Part this voxel belongs to; untagged voxels count as BODY.
    #[inline]
    pub fn effective_part(&self) -> Part {
        self.part.unwrap_or(Part::Body)
    }

    /// Grid position as floats, still in `.vox` axes.
    #[inline]
    pub fn grid_position(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}
