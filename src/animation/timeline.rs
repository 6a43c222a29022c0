//! Keyframe timeline over normalized time `[0, 1]`.
//!
//! The keyframe list is never empty, always sorted ascending by time, and its
//! first keyframe sits at time 0 and cannot be moved away from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::keyframe::{InterpolationMode, Keyframe};
use super::transform::PartTransform;
use crate::environment::EnvironmentSnapshot;
use crate::rig::Part;

/// Two keyframe times closer than this are the same slot.
pub const KEYFRAME_TOLERANCE: f32 = 0.001;

/// Clamp a time into `[0, 1]`; NaN maps to 0.
fn sanitize_time(time: f32) -> f32 {
    if time.is_nan() { 0.0 } else { time.clamp(0.0, 1.0) }
}

/// Rejected timeline edits. State is unchanged when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimelineError {
    #[error("keyframe 0 is pinned at time 0")]
    PinnedKeyframe,

    #[error("keyframe index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered keyframe list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeTimeline {
    keyframes: Vec<Keyframe>,
}

impl KeyframeTimeline {
    /// Timeline with a single zero-delta keyframe at time 0.
    pub fn new(environment: EnvironmentSnapshot) -> Self {
        Self {
            keyframes: vec![Keyframe::new(0.0, environment)],
        }
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    pub fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    pub fn last(&self) -> &Keyframe {
        &self.keyframes[self.keyframes.len() - 1]
    }

    /// Index of the keyframe nearest `time` within [`KEYFRAME_TOLERANCE`].
    /// Equal times resolve to the later keyframe, as in [`Self::preceding_index`].
    pub fn find_at(&self, time: f32) -> Option<usize> {
        self.keyframes
            .iter()
            .enumerate()
            .filter(|(_, k)| (k.time - time).abs() < KEYFRAME_TOLERANCE)
            .max_by(|(_, a), (_, b)| (b.time - time).abs().total_cmp(&(a.time - time).abs()))
            .map(|(index, _)| index)
    }

    /// Last keyframe with `time_k <= time`, or the first keyframe if none.
    pub fn preceding_index(&self, time: f32) -> usize {
        self.keyframes
            .partition_point(|k| k.time <= time)
            .saturating_sub(1)
    }

    /// First keyframe with `time_k >= time`, or the preceding one if none.
    pub fn following_index(&self, time: f32) -> usize {
        let idx = self.keyframes.partition_point(|k| k.time < time);
        if idx < self.keyframes.len() {
            idx
        } else {
            self.preceding_index(time)
        }
    }

    /// Bracketing keyframes for `time`. May be the same keyframe twice.
    pub fn bracket(&self, time: f32) -> (&Keyframe, &Keyframe) {
        let prev = self.preceding_index(time);
        let next = self.following_index(time);
        (&self.keyframes[prev], &self.keyframes[next])
    }

    /// Index a keyframe at `time` would be inserted at. Equal times go after
    /// existing ones.
    fn insertion_index(&self, time: f32) -> usize {
        self.keyframes.partition_point(|k| k.time <= time)
    }

    /// Copy of the preceding keyframe retimed to `time`, inserted in order.
    fn synthesize(&mut self, time: f32) -> usize {
        let mut keyframe = self.keyframes[self.preceding_index(time)].clone();
        keyframe.time = time;
        let index = self.insertion_index(time);
        self.keyframes.insert(index, keyframe);
        log::debug!("Inserted keyframe {} at t={:.3}", index, time);
        index
    }

    /// Add a keyframe reproducing the pose just before `time`.
    ///
    /// Returns the new index, or `None` when a keyframe already occupies that
    /// time.
    pub fn add_keyframe(&mut self, time: f32) -> Option<usize> {
        let time = sanitize_time(time);
        if self.find_at(time).is_some() {
            return None;
        }
        Some(self.synthesize(time))
    }

    /// Retime a keyframe. Returns its new index.
    pub fn move_keyframe(&mut self, index: usize, new_time: f32) -> Result<usize, TimelineError> {
        self.check_index(index)?;
        let new_time = sanitize_time(new_time);

        if index == 0 {
            if new_time != 0.0 {
                log::warn!("Rejected move of pinned keyframe 0 to t={:.3}", new_time);
                return Err(TimelineError::PinnedKeyframe);
            }
            return Ok(0);
        }

        let mut keyframe = self.keyframes.remove(index);
        keyframe.time = new_time;
        let new_index = self.insertion_index(new_time).max(1);
        self.keyframes.insert(new_index, keyframe);
        log::debug!("Moved keyframe {} -> {} (t={:.3})", index, new_index, new_time);
        Ok(new_index)
    }

    /// Delete any keyframe except the pinned first one.
    pub fn remove_keyframe(&mut self, index: usize) -> Result<Keyframe, TimelineError> {
        self.check_index(index)?;
        if index == 0 {
            log::warn!("Rejected removal of pinned keyframe 0");
            return Err(TimelineError::PinnedKeyframe);
        }
        let removed = self.keyframes.remove(index);
        log::debug!("Removed keyframe {} (t={:.3})", index, removed.time);
        Ok(removed)
    }

    /// Auto-keyframe posing: write `part`'s delta into the keyframe at `time`,
    /// creating it first if needed. An existing keyframe also takes the live
    /// environment. Returns the keyframe's index.
    pub fn update_part_at_time(
        &mut self,
        part: Part,
        time: f32,
        transform: PartTransform,
        live_environment: &EnvironmentSnapshot,
    ) -> usize {
        let time = sanitize_time(time);
        let index = match self.find_at(time) {
            Some(index) => {
                self.keyframes[index].environment = live_environment.clone();
                index
            }
            None => self.synthesize(time),
        };
        self.keyframes[index].set_transform(part, transform);
        index
    }

    /// Manual posing: write `part`'s delta into the keyframe preceding `time`.
    pub fn update_part_preceding(&mut self, part: Part, time: f32, transform: PartTransform) -> usize {
        let index = self.preceding_index(time);
        self.keyframes[index].set_transform(part, transform);
        index
    }

    /// Set the mode of the keyframe preceding `time`. Returns its index.
    pub fn set_interpolation_mode_at_time(&mut self, time: f32, mode: InterpolationMode) -> usize {
        let index = self.preceding_index(time);
        self.keyframes[index].interpolation = mode;
        log::debug!("Keyframe {} interpolation -> {:?}", index, mode);
        index
    }

    /// Zero `part`'s delta in every keyframe.
    pub fn clear_part(&mut self, part: Part) {
        for keyframe in &mut self.keyframes {
            keyframe.set_transform(part, PartTransform::ZERO);
        }
    }

    fn check_index(&self, index: usize) -> Result<(), TimelineError> {
        if index < self.keyframes.len() {
            Ok(())
        } else {
            Err(TimelineError::IndexOutOfRange {
                index,
                len: self.keyframes.len(),
            })
        }
    }
}

impl Default for KeyframeTimeline {
    fn default() -> Self {
        Self::new(EnvironmentSnapshot::default())
    }
}

/// Restores the ordering invariants on arbitrary input: times are clamped,
/// the list is stably sorted, and a zero-delta keyframe is added at time 0 if
/// none is there.
impl From<Vec<Keyframe>> for KeyframeTimeline {
    fn from(mut keyframes: Vec<Keyframe>) -> Self {
        for keyframe in &mut keyframes {
            keyframe.time = sanitize_time(keyframe.time);
        }
        keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));

        match keyframes.first() {
            Some(first) if first.time == 0.0 => {}
            Some(first) => {
                let environment = first.environment.clone();
                keyframes.insert(0, Keyframe::new(0.0, environment));
            }
            None => keyframes.push(Keyframe::new(0.0, EnvironmentSnapshot::default())),
        }

        Self { keyframes }
    }
}

impl From<KeyframeTimeline> for Vec<Keyframe> {
    fn from(timeline: KeyframeTimeline) -> Self {
        timeline.keyframes
    }
}
