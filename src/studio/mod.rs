//! Editor layer: the state container, undo history, project files, user
//! libraries, settings and export

pub mod config;
pub mod export;
pub mod history;
pub mod library;
pub mod project;
pub mod state;

pub use config::StudioConfig;
pub use export::{
    export_clip, AspectRatio, CredentialProvider, ExportRequest, ExportSettings, Resolution,
    VideoSink, DEFAULT_PROMPT,
};
pub use history::History;
pub use library::{builtin_animation_presets, AnimationPreset, PresetKeyframe, SavedRigTemplate};
pub use project::{ProjectSnapshot, PROJECT_VERSION};
pub use state::{FrameOutput, StudioState};
