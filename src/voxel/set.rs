//! Imported model: voxels plus the derived data the studio needs every frame.
//!
//! Positions are re-centered once at import into renderer space (y up): the
//! model sits on the ground plane, centered on x and on depth.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::math::Aabb;
use crate::rig::{Part, PartMap, RigTemplate};

use super::classifier::classify_voxels;
use super::voxel::VoxelData;

/// A voxel model with centering offset and per-part statistics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<VoxelData>", into = "Vec<VoxelData>")]
pub struct VoxelSet {
    voxels: Vec<VoxelData>,
    /// Grid-space point mapped to the local origin
    origin: Vec3,
    counts: PartMap<usize>,
    centroids: PartMap<Option<Vec3>>,
}

impl VoxelSet {
    pub fn new(voxels: Vec<VoxelData>) -> Self {
        let mut set = Self {
            voxels,
            ..Default::default()
        };
        set.recompute();
        set
    }

    /// Re-segment for `template` and refresh the derived data.
    pub fn reclassify(&mut self, template: RigTemplate) {
        self.voxels = classify_voxels(&self.voxels, template);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.origin = centering_origin(&self.voxels);

        let mut counts: PartMap<usize> = PartMap::default();
        let mut sums: PartMap<Vec3> = PartMap::splat(Vec3::ZERO);
        for v in &self.voxels {
            let part = v.effective_part();
            counts[part] += 1;
            sums[part] += self.local_position(v);
        }

        self.centroids = PartMap::from_fn(|part| {
            (counts[part] > 0).then(|| sums[part] / counts[part] as f32)
        });
        self.counts = counts;
    }

    pub fn voxels(&self) -> &[VoxelData] {
        &self.voxels
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Renderer-space position of a voxel: `(x - avg_x, z - min_z, y - avg_y)`.
    pub fn local_position(&self, voxel: &VoxelData) -> Vec3 {
        Vec3::new(
            voxel.x as f32 - self.origin.x,
            voxel.z as f32 - self.origin.z,
            voxel.y as f32 - self.origin.y,
        )
    }

    /// Voxels of one part.
    pub fn part_voxels(&self, part: Part) -> impl Iterator<Item = &VoxelData> + '_ {
        self.voxels.iter().filter(move |v| v.effective_part() == part)
    }

    pub fn part_count(&self, part: Part) -> usize {
        self.counts[part]
    }

    /// Parts that own at least one voxel.
    pub fn parts_present(&self) -> impl Iterator<Item = Part> + '_ {
        self.counts.iter().filter(|(_, n)| **n > 0).map(|(p, _)| p)
    }

    /// Mean local position of each part's voxels.
    pub fn centroids(&self) -> &PartMap<Option<Vec3>> {
        &self.centroids
    }

    /// Bounds in renderer space.
    pub fn local_bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.voxels.iter().map(|v| self.local_position(v)))
    }
}

/// `(avg_x, avg_y, min_z)` in grid axes.
fn centering_origin(voxels: &[VoxelData]) -> Vec3 {
    if voxels.is_empty() {
        return Vec3::ZERO;
    }
    let n = voxels.len() as f32;
    let avg_x = voxels.iter().map(|v| v.x as f32).sum::<f32>() / n;
    let avg_y = voxels.iter().map(|v| v.y as f32).sum::<f32>() / n;
    let min_z = voxels.iter().map(|v| v.z).min().unwrap_or(0) as f32;
    Vec3::new(avg_x, avg_y, min_z)
}

impl From<Vec<VoxelData>> for VoxelSet {
    fn from(voxels: Vec<VoxelData>) -> Self {
        Self::new(voxels)
    }
}

impl From<VoxelSet> for Vec<VoxelData> {
    fn from(set: VoxelSet) -> Self {
        set.voxels
    }
}
