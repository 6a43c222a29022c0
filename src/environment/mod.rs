//! Scene environment: lighting, background, shadows and color grading
//!
//! Each keyframe carries a full [`EnvironmentSnapshot`]; playback blends the
//! bracketing pair with the same factor used for the pose.

pub mod color;
pub mod config;
pub mod lerp;
pub mod presets;

pub use color::Color;
pub use config::{BackgroundType, EnvironmentSnapshot};
pub use lerp::Lerp;
pub use presets::{default_presets, LookPreset, HDRI_PRESETS};
