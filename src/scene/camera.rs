//! Orbit camera placement handed to the renderer, plus named bookmarks.

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat4, Vec3};

/// Camera pose as an orbit controller sees it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// World position
    pub position: Vec3,
    /// Orbit target
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl CameraConfig {
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        Self { position, target, fov }
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Get projection matrix for the given aspect ratio (width / height)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, 0.1, 1000.0)
    }

    /// Distance from the camera to its orbit target
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::new(Vec3::splat(50.0), Vec3::ZERO, 35.0)
    }
}

/// A user-named camera bookmark.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedCamera {
    pub id: String,
    pub name: String,
    pub config: CameraConfig,
}

/// Stable identifier derived from a display name: `"Low Angle"` -> `"low-angle"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
