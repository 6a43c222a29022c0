//! Axis-aligned bounding box over voxel positions

use crate::core::types::Vec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around a set of points. `None` when the set is empty.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self::new(first, first);
        for p in points {
            aabb.expand(p);
        }
        Some(aabb)
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if point is inside AABB
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }

    /// Expand AABB to include point
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Map a point into [0, 1] per axis. A flat axis divides by 1 instead of 0.
    pub fn normalize(&self, p: Vec3) -> Vec3 {
        let size = self.size();
        let span = Vec3::new(
            if size.x == 0.0 { 1.0 } else { size.x },
            if size.y == 0.0 { 1.0 } else { size.y },
            if size.z == 0.0 { 1.0 } else { size.z },
        );
        (p - self.min) / span
    }

    /// Octant index of a point relative to the box center
    /// (bit 0 = x, bit 1 = y, bit 2 = z; set when at or past the center)
    pub fn octant_index(&self, p: Vec3) -> usize {
        let center = self.center();
        let mut index = 0;
        if p.x >= center.x {
            index |= 1;
        }
        if p.y >= center.y {
            index |= 2;
        }
        if p.z >= center.z {
            index |= 4;
        }
        index
    }
}
