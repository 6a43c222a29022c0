//! Studio state: the single owner of a project plus the editor around it.
//!
//! Undoable operations clone the project before mutating it. A failed
//! mutation restores the clone; a successful one pushes it onto the history.
//! Continuous interactions such as camera orbit, environment sliders and
//! scrubbing bypass the history.

use std::path::Path;

use crate::animation::{
    animated_delta, evaluate, EvaluatedFrame, InterpolationMode, Keyframe, KeyframeTimeline,
    LoopMode, PartTransform, PlaybackCursor, PlaybackDirection,
};
use crate::core::Result;
use crate::environment::{EnvironmentSnapshot, LookPreset};
use crate::rig::{
    rest_pose::set_component, Axis, Part, RestPoseStore, RigError, RigTemplate, RigTopology,
    TransformComponent,
};
use crate::scene::camera::slugify;
use crate::scene::{
    bone_segments, pack_world_pose, BoneSegment, CameraConfig, GpuPartTransform, ModelTransform,
    RigHierarchy, SavedCamera, WorldPose,
};
use crate::voxel::{find_sample, VoxelData, VoxelSet};

use super::config::StudioConfig;
use super::export::{export_clip, CredentialProvider, ExportSettings, VideoSink};
use super::history::History;
use super::library::{AnimationPreset, SavedRigTemplate};
use super::project::ProjectSnapshot;

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub frame: EvaluatedFrame,
    pub world: WorldPose,
    pub gpu: Vec<GpuPartTransform>,
    /// Empty unless the skeleton overlay is enabled
    pub bones: Vec<BoneSegment>,
}

pub struct StudioState {
    config: StudioConfig,
    project: ProjectSnapshot,
    cursor: PlaybackCursor,
    selected: Option<Part>,
    hierarchy: RigHierarchy,
    history: History<ProjectSnapshot>,
    export_settings: ExportSettings,
}

impl StudioState {
    pub fn new(config: StudioConfig) -> Self {
        let project = ProjectSnapshot::new(config.default_template);
        Self::with_project(config, project)
    }

    /// Open an existing project.
    pub fn with_project(config: StudioConfig, project: ProjectSnapshot) -> Self {
        let hierarchy = RigHierarchy::build(&project.topology);
        Self {
            cursor: PlaybackCursor::new(config.playback_rate, config.loop_mode),
            history: History::new(config.history_limit),
            config,
            project,
            selected: None,
            hierarchy,
            export_settings: ExportSettings::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn project(&self) -> &ProjectSnapshot {
        &self.project
    }

    pub fn cursor(&self) -> &PlaybackCursor {
        &self.cursor
    }

    pub fn current_time(&self) -> f32 {
        self.cursor.current_time()
    }

    pub fn selected(&self) -> Option<Part> {
        self.selected
    }

    pub fn hierarchy(&self) -> &RigHierarchy {
        &self.hierarchy
    }

    pub fn template(&self) -> RigTemplate {
        self.project.template
    }

    pub fn topology(&self) -> &RigTopology {
        &self.project.topology
    }

    pub fn rest_pose(&self) -> &RestPoseStore {
        &self.project.rest_pose
    }

    pub fn timeline(&self) -> &KeyframeTimeline {
        &self.project.timeline
    }

    pub fn voxels(&self) -> &VoxelSet {
        &self.project.voxels
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.project.environment
    }

    pub fn camera(&self) -> CameraConfig {
        self.project.camera
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export_settings
    }

    pub fn export_settings_mut(&mut self) -> &mut ExportSettings {
        &mut self.export_settings
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Run an undoable mutation. On error the project is left as it was and
    /// nothing is recorded.
    fn edit<R>(&mut self, f: impl FnOnce(&mut ProjectSnapshot) -> Result<R>) -> Result<R> {
        let before = self.project.clone();
        match f(&mut self.project) {
            Ok(value) => {
                self.history.checkpoint(before);
                Ok(value)
            }
            Err(err) => {
                self.project = before;
                Err(err)
            }
        }
    }

    /// Undoable mutation that cannot fail.
    fn record<R>(&mut self, f: impl FnOnce(&mut ProjectSnapshot) -> R) -> R {
        let before = self.project.clone();
        let value = f(&mut self.project);
        self.history.checkpoint(before);
        value
    }

    /// Rebuild the part arena after a topology change.
    fn refresh_rig(&mut self) {
        self.hierarchy = RigHierarchy::build(&self.project.topology);
        self.validate_selection();
    }

    fn validate_selection(&mut self) {
        if let Some(part) = self.selected {
            if self.check_selectable(part).is_err() {
                log::debug!("Deselected {}", part);
                self.selected = None;
            }
        }
    }

    fn check_selectable(&self, part: Part) -> std::result::Result<(), RigError> {
        if !self.project.topology.is_active(part) {
            return Err(RigError::InactivePart(part));
        }
        if self.project.hidden[part] {
            return Err(RigError::PartHidden(part));
        }
        if self.project.locked[part] {
            return Err(RigError::PartLocked(part));
        }
        Ok(())
    }

    fn check_poseable(&self, part: Part) -> Result<()> {
        self.check_selectable(part).map_err(|err| {
            log::warn!("Rejected pose edit: {}", err);
            err.into()
        })
    }

    /// Index of the keyframe a pose edit at the cursor writes into.
    fn pose_target_index(&self) -> usize {
        let time = self.cursor.current_time();
        let timeline = &self.project.timeline;
        if self.config.auto_keyframe {
            timeline
                .find_at(time)
                .unwrap_or_else(|| timeline.preceding_index(time))
        } else {
            timeline.preceding_index(time)
        }
    }

    /// Fresh single-keyframe timeline carrying the live environment.
    fn fresh_timeline(project: &ProjectSnapshot) -> KeyframeTimeline {
        KeyframeTimeline::new(project.environment.clone())
    }

    // -----------------------------------------------------------------------
    // Model import and rig templates
    // -----------------------------------------------------------------------

    /// Replace the model. Voxels are segmented for the current template and
    /// the animation starts over.
    pub fn import_voxels(&mut self, voxels: Vec<VoxelData>) {
        let count = voxels.len();
        self.record(|project| {
            let mut set = VoxelSet::new(voxels);
            set.reclassify(project.template);
            project.voxels = set;
            project.timeline = Self::fresh_timeline(project);
        });

        self.cursor.stop();
        self.selected = None;
        log::info!("Imported {} voxels as {}", count, self.project.template);
    }

    /// Load a bundled sample with the template it is tagged for.
    pub fn load_sample(&mut self, id: &str) -> bool {
        let Some(sample) = find_sample(id) else {
            log::warn!("Unknown sample model '{}'", id);
            return false;
        };

        self.record(|project| {
            project.template = sample.template;
            project.topology = RigTopology::from_template(sample.template);
            project.rest_pose.reset_all();
            project.voxels = VoxelSet::new(sample.voxels());
            project.timeline = Self::fresh_timeline(project);
            project.hidden = Default::default();
            project.locked = Default::default();
        });

        self.cursor.stop();
        self.selected = None;
        self.refresh_rig();
        log::info!("Loaded sample '{}' ({} voxels)", sample.name, self.project.voxels.len());
        true
    }

    /// Switch to another template: default topology, zero rest pose, fresh
    /// timeline and re-segmented voxels. Returns false if already active.
    pub fn switch_template(&mut self, template: RigTemplate) -> bool {
        if template == self.project.template {
            return false;
        }

        self.record(|project| {
            project.template = template;
            project.topology = RigTopology::from_template(template);
            project.rest_pose.reset_all();
            project.voxels.reclassify(template);
            project.timeline = Self::fresh_timeline(project);
            project.hidden = Default::default();
            project.locked = Default::default();
        });

        self.selected = None;
        self.refresh_rig();
        log::info!("Switched rig template to {}", template);
        true
    }

    // -----------------------------------------------------------------------
    // Topology
    // -----------------------------------------------------------------------

    pub fn set_parent(&mut self, part: Part, parent: Option<Part>) -> Result<()> {
        self.edit(|project| Ok(project.topology.set_parent(part, parent)?))?;
        self.refresh_rig();
        Ok(())
    }

    /// Activate a part as a new root bone. Returns false if it was active.
    pub fn add_bone(&mut self, part: Part) -> bool {
        if self.project.topology.is_active(part) {
            return false;
        }
        self.record(|project| {
            project.topology.add_active_part(part);
        });
        self.refresh_rig();
        true
    }

    /// Deactivate a part; its children become roots.
    pub fn remove_bone(&mut self, part: Part) -> Result<Vec<Part>> {
        let orphans = self.edit(|project| Ok(project.topology.remove_active_part(part)?))?;
        self.refresh_rig();
        Ok(orphans)
    }

    // -----------------------------------------------------------------------
    // Selection, visibility, locking
    // -----------------------------------------------------------------------

    /// Attach the pose gizmo to `part`, or detach it with `None`.
    pub fn select_part(&mut self, part: Option<Part>) -> Result<()> {
        if let Some(part) = part {
            self.check_selectable(part)?;
        }
        self.selected = part;
        Ok(())
    }

    pub fn set_hidden(&mut self, part: Part, hidden: bool) {
        if self.project.hidden[part] == hidden {
            return;
        }
        self.record(|project| {
            project.hidden[part] = hidden;
        });
        self.validate_selection();
    }

    pub fn set_locked(&mut self, part: Part, locked: bool) {
        if self.project.locked[part] == locked {
            return;
        }
        self.record(|project| {
            project.locked[part] = locked;
        });
        self.validate_selection();
    }

    // -----------------------------------------------------------------------
    // Posing
    // -----------------------------------------------------------------------

    /// Animated delta a pose edit at the cursor would start from.
    pub fn pose_delta(&self, part: Part) -> PartTransform {
        let index = self.pose_target_index();
        *self.project.timeline.keyframes()[index].transform(part)
    }

    /// Write a gizmo pose (delta from rest) for `part` at the cursor.
    ///
    /// With auto-keyframe the keyframe at the cursor is created or updated;
    /// otherwise the preceding keyframe is edited. Returns the keyframe index.
    pub fn pose_part(&mut self, part: Part, delta: PartTransform) -> Result<usize> {
        self.check_poseable(part)?;
        let time = self.cursor.current_time();
        let auto_keyframe = self.config.auto_keyframe;

        Ok(self.record(|project| {
            if auto_keyframe {
                let live = project.environment.clone();
                project.timeline.update_part_at_time(part, time, delta, &live)
            } else {
                project.timeline.update_part_preceding(part, time, delta)
            }
        }))
    }

    /// Single-axis pose edit from a numeric field.
    pub fn set_pose_component(
        &mut self,
        part: Part,
        component: TransformComponent,
        axis: Axis,
        value: f32,
    ) -> Result<usize> {
        let mut delta = self.pose_delta(part);
        set_component(&mut delta, component, axis, value);
        self.pose_part(part, delta)
    }

    pub fn set_rest_component(
        &mut self,
        part: Part,
        component: TransformComponent,
        axis: Axis,
        value: f32,
    ) -> Result<()> {
        self.check_poseable(part)?;
        self.record(|project| project.rest_pose.set(part, component, axis, value));
        Ok(())
    }

    pub fn reset_rest(&mut self, part: Part) -> Result<()> {
        self.check_poseable(part)?;
        self.record(|project| project.rest_pose.reset(part));
        Ok(())
    }

    /// Fold the interpolated delta at the cursor into `part`'s rest pose.
    pub fn freeze_pose(&mut self, part: Part) -> Result<()> {
        self.check_poseable(part)?;
        let delta = animated_delta(&self.project.timeline, part, self.cursor.current_time());
        self.record(|project| {
            project
                .rest_pose
                .capture_from_animated_pose(part, delta, &mut project.timeline);
        });
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Keyframes
    // -----------------------------------------------------------------------

    /// Add a keyframe at the cursor. `None` if one is already there.
    pub fn add_keyframe(&mut self) -> Option<usize> {
        let time = self.cursor.current_time();
        if self.project.timeline.find_at(time).is_some() {
            return None;
        }
        self.record(|project| project.timeline.add_keyframe(time))
    }

    pub fn move_keyframe(&mut self, index: usize, time: f32) -> Result<usize> {
        self.edit(|project| Ok(project.timeline.move_keyframe(index, time)?))
    }

    pub fn remove_keyframe(&mut self, index: usize) -> Result<Keyframe> {
        self.edit(|project| Ok(project.timeline.remove_keyframe(index)?))
    }

    /// Set the mode of the keyframe governing the cursor position.
    pub fn set_interpolation_mode(&mut self, mode: InterpolationMode) -> usize {
        let time = self.cursor.current_time();
        let index = self.project.timeline.preceding_index(time);
        self.record(|project| {
            project.timeline.set_interpolation_mode_at_time(time, mode);
        });
        index
    }

    /// Jump to a keyframe's time.
    pub fn seek_keyframe(&mut self, index: usize) -> bool {
        match self.project.timeline.get(index) {
            Some(keyframe) => {
                self.cursor.seek(keyframe.time);
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Environment, looks, cameras
    // -----------------------------------------------------------------------

    /// Live edit of the environment (slider drag). Not recorded in history.
    pub fn update_environment(&mut self, f: impl FnOnce(&mut EnvironmentSnapshot)) {
        f(&mut self.project.environment);
    }

    pub fn set_environment(&mut self, environment: EnvironmentSnapshot) {
        self.project.environment = environment;
    }

    /// Apply a look preset. Returns the camera the view should move to.
    pub fn apply_preset(&mut self, id: &str) -> Option<CameraConfig> {
        let preset = self.project.presets.iter().find(|p| p.id == id)?.clone();
        self.record(|project| {
            project.environment = preset.environment.clone();
            project.camera = preset.camera;
        });
        log::info!("Applied look preset '{}'", preset.name);
        Some(preset.camera)
    }

    /// Save the live environment and camera as a new look. Returns its id.
    pub fn save_preset(&mut self, name: &str) -> String {
        let id = unique_id("custom", name, self.project.presets.iter().map(|p| p.id.as_str()));
        let preset = LookPreset {
            id: id.clone(),
            name: name.to_string(),
            environment: self.project.environment.clone(),
            camera: self.project.camera,
        };
        self.record(|project| {
            project.presets.push(preset);
        });
        id
    }

    /// Orbit controls moved the camera. Not recorded in history.
    pub fn set_camera(&mut self, camera: CameraConfig) {
        self.project.camera = camera;
    }

    pub fn save_camera(&mut self, name: &str) -> String {
        let id = unique_id("cam", name, self.project.saved_cameras.iter().map(|c| c.id.as_str()));
        let camera = SavedCamera {
            id: id.clone(),
            name: name.to_string(),
            config: self.project.camera,
        };
        self.record(|project| {
            project.saved_cameras.push(camera);
        });
        id
    }

    pub fn delete_camera(&mut self, id: &str) -> bool {
        if !self.project.saved_cameras.iter().any(|c| c.id == id) {
            return false;
        }
        self.record(|project| {
            project.saved_cameras.retain(|c| c.id != id);
        });
        true
    }

    /// Move the view to a bookmark.
    pub fn switch_camera(&mut self, id: &str) -> Option<CameraConfig> {
        let config = self.project.saved_cameras.iter().find(|c| c.id == id)?.config;
        self.project.camera = config;
        Some(config)
    }

    pub fn set_model_transform(&mut self, transform: ModelTransform) {
        self.record(|project| {
            project.model_transform = transform;
        });
    }

    // -----------------------------------------------------------------------
    // Libraries
    // -----------------------------------------------------------------------

    /// Store the current rig (template, topology, rest pose) under `name`.
    pub fn save_rig_template(&mut self, name: &str) -> String {
        let id = unique_id("rig", name, self.project.saved_rigs.iter().map(|r| r.id.as_str()));
        let rig = SavedRigTemplate {
            id: id.clone(),
            name: name.to_string(),
            template: self.project.template,
            topology: self.project.topology.clone(),
            rest_pose: self.project.rest_pose.clone(),
        };
        self.record(|project| {
            project.saved_rigs.push(rig);
        });
        id
    }

    /// Re-apply a saved rig. Voxels are re-segmented if its template differs.
    pub fn apply_rig_template(&mut self, id: &str) -> bool {
        let Some(rig) = self.project.saved_rigs.iter().find(|r| r.id == id).cloned() else {
            return false;
        };

        self.record(|project| {
            if project.template != rig.template {
                project.voxels.reclassify(rig.template);
            }
            project.template = rig.template;
            project.topology = rig.topology.clone();
            project.rest_pose = rig.rest_pose.clone();
        });

        self.refresh_rig();
        log::info!("Applied saved rig '{}'", rig.name);
        true
    }

    pub fn delete_rig_template(&mut self, id: &str) -> bool {
        if !self.project.saved_rigs.iter().any(|r| r.id == id) {
            return false;
        }
        self.record(|project| {
            project.saved_rigs.retain(|r| r.id != id);
        });
        true
    }

    /// Replace the timeline with a stored motion.
    pub fn apply_animation_preset(&mut self, id: &str) -> bool {
        let Some(preset) = self.project.animation_presets.iter().find(|p| p.id == id).cloned()
        else {
            return false;
        };

        self.record(|project| {
            project.timeline = preset.to_timeline(&project.environment);
        });
        self.cursor.seek(0.0);
        log::info!("Applied animation preset '{}'", preset.name);
        true
    }

    /// Store the current timeline's poses as a reusable motion.
    pub fn save_animation_preset(&mut self, name: &str) -> String {
        let existing = self.project.animation_presets.iter().map(|p| p.id.as_str());
        let id = unique_id("anim", name, existing);
        let preset = AnimationPreset::capture(id.clone(), name.to_string(), &self.project.timeline);
        self.record(|project| {
            project.animation_presets.push(preset);
        });
        id
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    pub fn play(&mut self) {
        self.cursor.play();
    }

    pub fn pause(&mut self) {
        self.cursor.pause();
    }

    pub fn toggle_playback(&mut self) {
        self.cursor.toggle();
    }

    pub fn stop(&mut self) {
        self.cursor.stop();
    }

    pub fn seek(&mut self, time: f32) {
        self.cursor.seek(time);
    }

    pub fn step_forward(&mut self) {
        self.cursor.step_forward();
    }

    pub fn step_backward(&mut self) {
        self.cursor.step_backward();
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.cursor.loop_mode = mode;
        self.config.loop_mode = mode;
    }

    pub fn set_direction(&mut self, direction: PlaybackDirection) {
        self.cursor.direction = direction;
    }

    pub fn set_auto_keyframe(&mut self, enabled: bool) {
        self.config.auto_keyframe = enabled;
    }

    pub fn set_show_skeleton(&mut self, enabled: bool) {
        self.config.show_skeleton = enabled;
    }

    // -----------------------------------------------------------------------
    // Per-frame evaluation
    // -----------------------------------------------------------------------

    /// Advance playback by `delta_secs` and evaluate the resulting frame.
    pub fn tick(&mut self, delta_secs: f32) -> FrameOutput {
        self.cursor.tick(delta_secs);
        self.frame()
    }

    /// Evaluate the rig at the cursor without advancing it.
    pub fn frame(&self) -> FrameOutput {
        let project = &self.project;
        let frame = evaluate(
            &project.timeline,
            &project.rest_pose,
            &project.topology,
            self.cursor.current_time(),
        );
        let world = self
            .hierarchy
            .compose(&frame.transforms, project.model_transform.root_matrix());
        let gpu = pack_world_pose(&world, &project.hidden);
        let bones = if self.config.show_skeleton {
            bone_segments(&self.hierarchy, &world, project.voxels.centroids())
        } else {
            Vec::new()
        };

        FrameOutput {
            frame,
            world,
            gpu,
            bones,
        }
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let current = self.project.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.project = previous;
                self.refresh_rig();
                log::debug!("Undo ({} left)", self.history.undo_depth());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        let current = self.project.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.project = next;
                self.refresh_rig();
                log::debug!("Redo");
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Persistence and export
    // -----------------------------------------------------------------------

    pub fn save_project(&self, path: &Path) -> Result<()> {
        self.project.save_sync(path)
    }

    /// Replace the whole project from disk. History is cleared.
    pub fn load_project(&mut self, path: &Path) -> Result<()> {
        let project = ProjectSnapshot::load_sync(path)?;
        self.project = project;
        self.history.clear();
        self.cursor.stop();
        self.selected = None;
        self.refresh_rig();
        Ok(())
    }

    /// Export the current frame through the injected services.
    pub fn export(
        &self,
        credentials: &mut dyn CredentialProvider,
        sink: &mut dyn VideoSink,
        rendered_frame: Vec<u8>,
    ) -> Result<String> {
        export_clip(credentials, sink, &self.export_settings, rendered_frame)
    }
}

impl Default for StudioState {
    fn default() -> Self {
        Self::new(StudioConfig::default())
    }
}

/// `prefix-slug`, suffixed with a counter if already taken.
fn unique_id<'a>(prefix: &str, name: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let slug = slugify(name);
    let base = if slug.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}-{slug}")
    };

    let taken: Vec<&str> = existing.collect();
    if !taken.contains(&base.as_str()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken.contains(&candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}
