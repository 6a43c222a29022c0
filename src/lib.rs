//! Voxrig - Voxel character rigging and keyframe animation core

pub mod core;
pub mod math;
pub mod rig;
pub mod animation;
pub mod environment;
pub mod scene;
pub mod voxel;
pub mod studio;
