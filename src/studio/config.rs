//! Studio settings loaded from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::{LoopMode, DEFAULT_PLAYBACK_RATE};
use crate::core::Result;
use crate::rig::RigTemplate;

/// Editor behavior that is not part of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Normalized timeline units per second of playback
    pub playback_rate: f32,
    pub loop_mode: LoopMode,
    /// Undo depth; oldest snapshots are dropped past this
    pub history_limit: usize,
    /// Template used for a fresh studio and for imports
    pub default_template: RigTemplate,
    /// Pose edits create/update a keyframe at the cursor instead of editing
    /// the preceding keyframe
    pub auto_keyframe: bool,
    /// Emit bone segments with each frame
    pub show_skeleton: bool,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            playback_rate: DEFAULT_PLAYBACK_RATE,
            loop_mode: LoopMode::Loop,
            history_limit: 100,
            default_template: RigTemplate::Humanoid,
            auto_keyframe: false,
            show_skeleton: false,
        }
    }
}

impl StudioConfig {
    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from file (sync). Missing fields take their defaults.
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded studio config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.playback_rate, 0.2);
        assert_eq!(config.loop_mode, LoopMode::Loop);
        assert_eq!(config.history_limit, 100);
        assert_eq!(config.default_template, RigTemplate::Humanoid);
        assert!(!config.auto_keyframe);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("studio.json");

        let config = StudioConfig {
            auto_keyframe: true,
            loop_mode: LoopMode::PingPong,
            default_template: RigTemplate::Bird,
            ..Default::default()
        };
        config.save_sync(&path).unwrap();
        assert_eq!(StudioConfig::load_sync(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studio.json");
        std::fs::write(&path, r#"{"history_limit": 5, "loop_mode": "once"}"#).unwrap();

        let config = StudioConfig::load_sync(&path).unwrap();
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.loop_mode, LoopMode::Once);
        assert_eq!(config.playback_rate, 0.2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StudioConfig::load_sync(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, crate::core::Error::Io(_)));
    }
}
