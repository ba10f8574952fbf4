//! # Rewind Core
//!
//! Deterministic simulation core for a two-player sword duel built around a
//! rewind mechanic: either player may replay their own recent history in
//! reverse, at the price of a mandatory cooldown.
//!
//! ## Architecture
//!
//! - **Combatants** ([`combatant`]): kinematic state, rewind state machine,
//!   history log and the pose derived from the head position
//! - **Movement** ([`movement`]): wall and separation limits on walking
//! - **Rewind** ([`rewind`]): history playback and cooldown
//! - **Hits** ([`hit`]): sword geometry, attack hits, temporal collisions
//! - **Rounds** ([`round`]): per-frame orchestration, scoring and resets
//!
//! Rendering and input devices are out of scope; callers feed abstract
//! [`Controls`] each frame and read back poses, palettes and scores.
//!
//! ## Usage
//!
//! ```
//! use rewind_core::{Controls, FrameInput, RoundController};
//!
//! let mut duel = RoundController::default();
//! let input = FrameInput::new(Controls::WALK_RIGHT, Controls::WALK_LEFT);
//!
//! while duel.frame() < 600 {
//!     if let Some(outcome) = duel.step(&input, 1.0 / 60.0) {
//!         println!("{outcome}, score {}", duel.score());
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combatant;
pub mod config;
pub mod event;
pub mod hit;
pub mod input;
pub mod movement;
pub mod palette;
pub mod replay;
pub mod rewind;
pub mod round;
pub mod trig;

pub use combatant::{ActionState, Combatant, Side};
pub use config::{ConfigError, ConfigOverrides, DuelConfig};
pub use event::{DuelEvent, FrameEvent};
pub use hit::{HitRule, HitZone};
pub use input::{Controls, FrameInput};
pub use replay::{Recorder, Replay, ReplayError};
pub use rewind::{RewindDenied, RewindEnd};
pub use round::{RoundController, RoundOutcome, Score};

#[cfg(test)]
mod tests;
