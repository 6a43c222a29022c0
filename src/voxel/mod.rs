//! Voxel models: imported records, centering, segmentation and samples

pub mod classifier;
pub mod samples;
pub mod set;
pub mod voxel;

pub use classifier::{classify_point, classify_voxels};
pub use samples::{find_sample, SampleModel, SAMPLE_MODELS};
pub use set::VoxelSet;
pub use voxel::VoxelData;
