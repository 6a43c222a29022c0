//! Project document: everything a save file holds and undo restores.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::KeyframeTimeline;
use crate::core::Result;
use crate::environment::{default_presets, EnvironmentSnapshot, LookPreset};
use crate::rig::{PartMap, RestPoseStore, RigTemplate, RigTopology};
use crate::scene::{CameraConfig, ModelTransform, SavedCamera};
use crate::voxel::VoxelSet;

use super::library::{builtin_animation_presets, AnimationPreset, SavedRigTemplate};

/// Current on-disk format version.
pub const PROJECT_VERSION: u32 = 1;

/// Full editable state of one project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub template: RigTemplate,
    pub voxels: VoxelSet,
    pub topology: RigTopology,
    pub rest_pose: RestPoseStore,
    pub timeline: KeyframeTimeline,
    /// Live environment, captured into keyframes as they are created
    pub environment: EnvironmentSnapshot,
    #[serde(default)]
    pub model_transform: ModelTransform,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub hidden: PartMap<bool>,
    #[serde(default)]
    pub locked: PartMap<bool>,
    #[serde(default = "default_presets")]
    pub presets: Vec<LookPreset>,
    #[serde(default)]
    pub saved_cameras: Vec<SavedCamera>,
    #[serde(default)]
    pub saved_rigs: Vec<SavedRigTemplate>,
    #[serde(default = "builtin_animation_presets")]
    pub animation_presets: Vec<AnimationPreset>,
}

fn default_version() -> u32 {
    PROJECT_VERSION
}

impl ProjectSnapshot {
    /// Empty project rigged with `template`.
    pub fn new(template: RigTemplate) -> Self {
        let environment = EnvironmentSnapshot::default();
        Self {
            version: PROJECT_VERSION,
            template,
            voxels: VoxelSet::default(),
            topology: RigTopology::from_template(template),
            rest_pose: RestPoseStore::new(),
            timeline: KeyframeTimeline::new(environment.clone()),
            environment,
            model_transform: ModelTransform::default(),
            camera: CameraConfig::default(),
            hidden: PartMap::default(),
            locked: PartMap::default(),
            presets: default_presets(),
            saved_cameras: Vec::new(),
            saved_rigs: Vec::new(),
            animation_presets: builtin_animation_presets(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let project: Self = serde_json::from_str(json)?;
        if project.version > PROJECT_VERSION {
            log::warn!(
                "Project format v{} is newer than supported v{}",
                project.version,
                PROJECT_VERSION
            );
        }
        Ok(project)
    }

    /// Save to file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        log::info!("Saved project to {}", path.display());
        Ok(())
    }

    /// Load from file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let project = Self::from_json(&json)?;
        log::info!(
            "Loaded project from {} ({} voxels, {} keyframes)",
            path.display(),
            project.voxels.len(),
            project.timeline.len()
        );
        Ok(project)
    }
}

impl Default for ProjectSnapshot {
    fn default() -> Self {
        Self::new(RigTemplate::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::PartTransform;
    use crate::core::types::Vec3;
    use crate::rig::Part;
    use crate::voxel::find_sample;

    fn sample_project() -> ProjectSnapshot {
        let robot = find_sample("robot").unwrap();
        let mut project = ProjectSnapshot::new(robot.template);
        project.voxels = VoxelSet::new(robot.voxels());
        project.rest_pose.set_transform(Part::Head, PartTransform::from_position(Vec3::Y));
        let env = project.environment.clone();
        project.timeline.update_part_at_time(
            Part::ArmR,
            0.5,
            PartTransform::from_rotation(Vec3::new(0.0, 1.0, 0.0)),
            &env,
        );
        project.hidden[Part::LegL] = true;
        project
    }

    #[test]
    fn test_new_project_defaults() {
        let project = ProjectSnapshot::new(RigTemplate::Quadruped);
        assert_eq!(project.version, PROJECT_VERSION);
        assert_eq!(project.timeline.len(), 1);
        assert!(project.topology.is_active(Part::Tail));
        assert_eq!(project.presets.len(), 4);
        assert!(project.voxels.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let project = sample_project();
        let json = project.to_json().unwrap();
        let back = ProjectSnapshot::from_json(&json).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_save_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects").join("robot.json");

        let project = sample_project();
        project.save_sync(&path).unwrap();
        let loaded = ProjectSnapshot::load_sync(&path).unwrap();
        assert_eq!(loaded, project);
    }

    #[test]
    fn test_optional_sections_default() {
        let mut value = serde_json::to_value(ProjectSnapshot::default()).unwrap();
        let object = value.as_object_mut().unwrap();
        for key in ["version", "hidden", "locked", "presets", "saved_cameras", "model_transform"] {
            object.remove(key);
        }

        let project: ProjectSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(project.version, PROJECT_VERSION);
        assert_eq!(project.presets, default_presets());
        assert!(!project.hidden[Part::Head]);
    }

    #[test]
    fn test_corrupt_topology_rejected() {
        let mut value = serde_json::to_value(ProjectSnapshot::default()).unwrap();
        value["topology"]["part_parents"]["BODY"] = serde_json::json!("HEAD");
        assert!(ProjectSnapshot::from_json(&value.to_string()).is_err());
    }
}
