//! Fixed-cadence frame admission
//!
//! The host calls `admit` on every display refresh. A frame is admitted once
//! a full period has passed since the last admitted frame; anything earlier
//! is dropped, so a slow host never builds up a backlog of steps.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameClock {
    frame_period_nanos: u64,
    last_frame_nanos: u64,
    admitted: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::from_fps(FPS)
    }
}

impl FrameClock {
    /// Clock targeting `fps` admitted frames per second (minimum 1)
    pub fn from_fps(fps: u64) -> Self {
        Self {
            frame_period_nanos: 1_000_000_000 / fps.max(1),
            last_frame_nanos: 0,
            admitted: 0,
        }
    }

    #[inline]
    pub fn frame_period_nanos(&self) -> u64 {
        self.frame_period_nanos
    }

    /// Number of frames admitted since creation or the last reset
    #[inline]
    pub fn admitted(&self) -> u64 {
        self.admitted
    }

    /// Admit a frame at `now_nanos` if a full period has elapsed
    pub fn admit(&mut self, now_nanos: u64) -> bool {
        if now_nanos.saturating_sub(self.last_frame_nanos) < self.frame_period_nanos {
            return false;
        }
        self.last_frame_nanos = now_nanos;
        self.admitted += 1;
        true
    }

    pub fn reset(&mut self) {
        self.last_frame_nanos = 0;
        self.admitted = 0;
    }
}
