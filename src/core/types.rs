//! Core type aliases and re-exports

pub use glam::{
    EulerRot,
    Mat4,
    Quat,
    Vec3,
};

/// Standard Result type for the studio core
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
