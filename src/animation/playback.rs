//! Timeline cursor: current time, play state, direction and loop handling.

use serde::{Deserialize, Serialize};

/// Normalized units per second; a full clip plays in 5 seconds.
pub const DEFAULT_PLAYBACK_RATE: f32 = 0.2;

/// Cursor step for previous/next frame.
pub const FRAME_STEP: f32 = 0.01;

/// What happens when the cursor reaches either end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Stop at the boundary
    Once,
    /// Wrap to the opposite end
    #[default]
    Loop,
    /// Reverse direction
    PingPong,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackDirection {
    #[default]
    Forward,
    Reverse,
}

impl PlaybackDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            PlaybackDirection::Forward => 1.0,
            PlaybackDirection::Reverse => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            PlaybackDirection::Forward => PlaybackDirection::Reverse,
            PlaybackDirection::Reverse => PlaybackDirection::Forward,
        }
    }
}

/// Playback state. `current_time` is kept in `[0, 1]` at all times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackCursor {
    current_time: f32,
    pub playing: bool,
    pub rate: f32,
    pub direction: PlaybackDirection,
    pub loop_mode: LoopMode,
}

impl PlaybackCursor {
    pub fn new(rate: f32, loop_mode: LoopMode) -> Self {
        Self {
            current_time: 0.0,
            playing: false,
            rate,
            direction: PlaybackDirection::Forward,
            loop_mode,
        }
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Scrub to `time`, clamped into `[0, 1]`.
    pub fn seek(&mut self, time: f32) {
        self.current_time = if time.is_nan() { 0.0 } else { time.clamp(0.0, 1.0) };
    }

    /// Start playing. A finished forward `Once` clip restarts from 0.
    pub fn play(&mut self) {
        if self.loop_mode == LoopMode::Once {
            match self.direction {
                PlaybackDirection::Forward if self.current_time >= 1.0 => self.current_time = 0.0,
                PlaybackDirection::Reverse if self.current_time <= 0.0 => self.current_time = 1.0,
                _ => {}
            }
        }
        self.playing = true;
    }

    /// Pause (keeps current time)
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Stop and rewind to the beginning
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_time = 0.0;
    }

    pub fn step_forward(&mut self) {
        self.seek(self.current_time + FRAME_STEP);
    }

    pub fn step_backward(&mut self) {
        self.seek(self.current_time - FRAME_STEP);
    }

    /// Advance by `delta_secs` of wall time. Returns true if the cursor moved.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if !self.playing || delta_secs <= 0.0 {
            return false;
        }

        let before = self.current_time;
        let mut time = self.current_time + self.rate * delta_secs * self.direction.sign();

        if time > 1.0 || time < 0.0 {
            let hit_end = time > 1.0;
            match self.loop_mode {
                LoopMode::Once => {
                    time = if hit_end { 1.0 } else { 0.0 };
                    self.playing = false;
                }
                LoopMode::Loop => {
                    time = if hit_end { 0.0 } else { 1.0 };
                }
                LoopMode::PingPong => {
                    // Reflect the overshoot back into range
                    time = if hit_end { 2.0 - time } else { -time };
                    time = time.clamp(0.0, 1.0);
                    self.direction = self.direction.flipped();
                }
            }
        }

        self.current_time = time;
        self.current_time != before
    }
}

impl Default for PlaybackCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYBACK_RATE, LoopMode::default())
    }
}
