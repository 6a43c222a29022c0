//! Keyframe animation: transforms, keyframes, timeline, evaluation, playback

pub mod evaluator;
pub mod keyframe;
pub mod playback;
pub mod timeline;
pub mod transform;

pub use evaluator::{animated_delta, evaluate, raw_blend_factor, EvaluatedFrame};
pub use keyframe::{ease_in_out_cubic, InterpolationMode, Keyframe};
pub use playback::{LoopMode, PlaybackCursor, PlaybackDirection, DEFAULT_PLAYBACK_RATE, FRAME_STEP};
pub use timeline::{KeyframeTimeline, TimelineError, KEYFRAME_TOLERANCE};
pub use transform::{PartTransform, EULER_ORDER};
