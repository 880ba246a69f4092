//! Data-driven game balance
//!
//! Speeds and timing only. Screen and grid geometry are fixed in
//! [`crate::consts`]. Missing JSON fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning value for `{field}`: {value} ({reason})")]
    Invalid {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Paddle movement per frame while a direction is held
    pub paddle_speed: f32,
    /// Ball speed per axis at the start of a round
    pub ball_speed: f32,
    /// Max random change to the ball's dx on each paddle hit
    pub rebound_spin: f32,
    /// Simulation frames per second
    pub frame_rate: f32,
    /// Cap on frames simulated for a single host callback
    pub max_catchup_frames: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_speed: PADDLE_SPEED,
            ball_speed: BALL_SPEED,
            rebound_spin: REBOUND_SPIN,
            frame_rate: FRAME_RATE,
            max_catchup_frames: MAX_CATCHUP_FRAMES,
        }
    }
}

impl Tuning {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "breakout_tuning";

    /// Seconds per simulation frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_speed", self.ball_speed)?;
        positive("frame_rate", self.frame_rate)?;

        // The kick is drawn from [-spin, spin], so the full width must fit in an f32
        if !(2.0 * self.rebound_spin).is_finite() || self.rebound_spin < 0.0 {
            return Err(TuningError::Invalid {
                field: "rebound_spin",
                value: self.rebound_spin as f64,
                reason: "must be finite and not negative",
            });
        }
        if self.max_catchup_frames == 0 {
            return Err(TuningError::Invalid {
                field: "max_catchup_frames",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file on disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            value: value as f64,
            reason: "must be finite and positive",
        })
    }
}
