//! Fixed timestep accumulator
//!
//! Hosts call back at whatever rate they like; the simulation only ever
//! advances in whole frames.

use crate::Tuning;

/// Longest host delta accepted in one callback (seconds)
const MAX_ELAPSED: f32 = 0.1;

/// Turns host wall-clock deltas into a number of frames to simulate
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    frame_dt: f32,
    max_frames: u32,
}

impl FrameClock {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            accumulator: 0.0,
            frame_dt: tuning.frame_dt(),
            max_frames: tuning.max_catchup_frames,
        }
    }

    /// Seconds per frame
    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    /// Add `elapsed` seconds and return how many frames are now due.
    ///
    /// Negative deltas count as zero and long stalls (tab in background,
    /// debugger) are capped so the game does not fast-forward.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_ELAPSED);

        let mut frames = 0;
        while self.accumulator >= self.frame_dt && frames < self.max_frames {
            self.accumulator -= self.frame_dt;
            frames += 1;
        }
        frames
    }
}
