//! Scene composition: part hierarchy, world transforms, skeleton overlay,
//! renderer packing and camera placement.

pub mod camera;
pub mod gpu;
pub mod hierarchy;
pub mod skeleton;

pub use camera::{CameraConfig, SavedCamera};
pub use gpu::{pack_world_pose, GpuPartTransform};
pub use hierarchy::{compose_world_transforms, ModelTransform, RigHierarchy, WorldPose, MODEL_SCALE};
pub use skeleton::{bone_segments, BoneSegment};
