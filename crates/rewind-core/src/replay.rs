//! Input recordings that reproduce a duel exactly.
//!
//! A [`Replay`] is the configuration plus every frame's input and elapsed
//! time. Since the simulation is deterministic, re-running a replay yields a
//! controller with the same [`state_hash`](RoundController::state_hash) as
//! the one that recorded it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{ConfigError, DuelConfig};
use crate::input::FrameInput;
use crate::round::{RoundController, RoundOutcome};

/// Errors raised when loading or running a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The replay document is not valid JSON for a [`Replay`].
    #[error("malformed replay: {0}")]
    Json(#[from] serde_json::Error),
    /// The embedded configuration does not validate.
    #[error("replay config is invalid: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// One recorded frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Controls held by both players.
    pub input: FrameInput,
    /// Elapsed seconds passed to the update.
    pub elapsed: f32,
}

/// A configuration and the frames played under it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    /// Configuration the duel was created with.
    pub config: DuelConfig,
    /// Every frame in order.
    pub frames: Vec<ReplayFrame>,
}

impl Replay {
    /// Creates an empty replay.
    #[must_use]
    pub fn new(config: DuelConfig) -> Self {
        Self {
            config,
            frames: Vec::new(),
        }
    }

    /// Appends a frame.
    pub fn push(&mut self, input: FrameInput, elapsed: f32) {
        self.frames.push(ReplayFrame { input, elapsed });
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no frames were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serializes to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a replay and validates its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the document is malformed or the config is
    /// rejected.
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        let replay: Self = serde_json::from_str(json)?;
        replay.config.validate()?;
        Ok(replay)
    }

    /// Re-simulates every frame on a fresh controller.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidConfig`] if the config is rejected.
    pub fn run(&self) -> Result<RoundController, ReplayError> {
        let mut controller = RoundController::new(self.config.clone())?;
        for frame in &self.frames {
            let _ = controller.step(&frame.input, frame.elapsed);
        }
        debug!(
            frames = self.frames.len(),
            score = %controller.score(),
            "replay finished"
        );
        Ok(controller)
    }
}

/// Wraps a controller and records every step it takes.
///
/// # Example
///
/// ```
/// use rewind_core::config::DuelConfig;
/// use rewind_core::input::{Controls, FrameInput};
/// use rewind_core::replay::{Recorder, Replay};
///
/// let mut recorder = Recorder::new(DuelConfig::default()).unwrap();
/// for _ in 0..30 {
///     recorder.step(&FrameInput::new(Controls::WALK_RIGHT, Controls::WALK_LEFT), 0.016);
/// }
///
/// let json = recorder.replay().to_json().unwrap();
/// let rerun = Replay::from_json(&json).unwrap().run().unwrap();
/// assert_eq!(rerun.state_hash(), recorder.controller().state_hash());
/// ```
#[derive(Debug, Clone)]
pub struct Recorder {
    controller: RoundController,
    replay: Replay,
}

impl Recorder {
    /// Starts recording a new duel.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: DuelConfig) -> Result<Self, ConfigError> {
        let controller = RoundController::new(config.clone())?;
        Ok(Self {
            controller,
            replay: Replay::new(config),
        })
    }

    /// Steps the controller and records the frame.
    pub fn step(&mut self, input: &FrameInput, elapsed: f32) -> Option<RoundOutcome> {
        self.replay.push(*input, elapsed);
        self.controller.step(input, elapsed)
    }

    /// The live controller.
    #[must_use]
    pub const fn controller(&self) -> &RoundController {
        &self.controller
    }

    /// Mutable access to the live controller, e.g. to drain events.
    pub fn controller_mut(&mut self) -> &mut RoundController {
        &mut self.controller
    }

    /// Frames recorded so far.
    #[must_use]
    pub const fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Stops recording and returns the replay.
    #[must_use]
    pub fn finish(self) -> Replay {
        self.replay
    }
}
