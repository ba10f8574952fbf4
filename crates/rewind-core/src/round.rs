//! Per-frame orchestration of a duel.
//!
//! The [`RoundController`] exclusively owns both combatants and the score.
//! Each frame runs in a fixed order:
//!
//! 1. **Gate** ([`RoundController::apply_input`]): held controls become
//!    walk flags, swings and rewind transitions, left side first.
//! 2. **Update** ([`RoundController::update`]):
//!    - left, then right: a rewinding combatant plays back history and does
//!      nothing else; any other combatant ticks its cooldown, advances its
//!      sword, walks and records a snapshot;
//!    - temporal collision: a rewinding combatant too close to its opponent
//!      loses the round;
//!    - attack hits: every side whose sword landed scores a point.
//!
//! A decided round replaces both combatants with fresh ones. Scores persist
//! until [`RoundController::reset_match`].
//!
//! # Example
//!
//! ```
//! use rewind_core::input::{Controls, FrameInput};
//! use rewind_core::round::RoundController;
//!
//! let mut duel = RoundController::default();
//! let walk = FrameInput::new(Controls::WALK_RIGHT, Controls::empty());
//!
//! for _ in 0..10 {
//!     assert!(duel.step(&walk, 1.0 / 60.0).is_none());
//! }
//!
//! let left = duel.left();
//! assert!((left.head().x - -6.5).abs() < 1e-4);
//! assert_eq!(left.history().len(), 10);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combatant::{Combatant, Side};
use crate::config::{ConfigError, DuelConfig};
use crate::event::{DuelEvent, EventLog, FrameEvent};
use crate::hit::{self, HitZone};
use crate::input::{Controls, FrameInput};
use crate::movement::{self, WalkDirection};
use crate::rewind::{self, RewindDenied, RewindEnd};

// =============================================================================
// Score and outcome
// =============================================================================

/// Points won by each side.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Left player's points.
    pub left: u32,
    /// Right player's points.
    pub right: u32,
}

impl Score {
    /// Points held by `side`.
    #[must_use]
    pub const fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Gives `side` one point.
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left, self.right)
    }
}

/// How a round was decided.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// A rewinding combatant came within the overlap distance of its
    /// opponent. The other side scores.
    TemporalCollision {
        /// The rewinding combatant.
        loser: Side,
    },
    /// At least one sword landed. Every side that landed scores.
    Strike {
        /// Zone struck by the left sword.
        left: Option<HitZone>,
        /// Zone struck by the right sword.
        right: Option<HitZone>,
    },
}

impl RoundOutcome {
    /// Returns true if `side` earned a point.
    #[must_use]
    pub fn scored(&self, side: Side) -> bool {
        match *self {
            Self::TemporalCollision { loser } => loser != side,
            Self::Strike { left, right } => match side {
                Side::Left => left.is_some(),
                Side::Right => right.is_some(),
            },
        }
    }
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemporalCollision { loser } => write!(f, "temporal collision, {loser} loses"),
            Self::Strike { left, right } => match (left, right) {
                (Some(_), Some(_)) => write!(f, "double hit"),
                (Some(zone), None) => write!(f, "left hits {zone:?}"),
                (None, Some(zone)) => write!(f, "right hits {zone:?}"),
                (None, None) => write!(f, "no hit"),
            },
        }
    }
}

// =============================================================================
// Round controller
// =============================================================================

/// Owns both combatants and runs the duel one frame at a time.
#[derive(Debug, Clone)]
pub struct RoundController {
    config: DuelConfig,
    combatants: [Combatant; 2],
    score: Score,
    frame: u64,
    round: u32,
    events: EventLog,
}

impl Default for RoundController {
    fn default() -> Self {
        Self::with_valid_config(DuelConfig::default())
    }
}

impl RoundController {
    /// Creates a duel with fresh combatants and a zero score.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: DuelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: DuelConfig) -> Self {
        let combatants = fresh_pair(&config);
        Self {
            config,
            combatants,
            score: Score::default(),
            frame: 0,
            round: 0,
            events: EventLog::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Configuration the duel runs with.
    #[must_use]
    pub const fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// The combatant on `side`.
    #[must_use]
    pub const fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side.index()]
    }

    /// The left combatant.
    #[must_use]
    pub const fn left(&self) -> &Combatant {
        &self.combatants[0]
    }

    /// The right combatant.
    #[must_use]
    pub const fn right(&self) -> &Combatant {
        &self.combatants[1]
    }

    /// Both combatants, left first.
    #[must_use]
    pub const fn combatants(&self) -> &[Combatant; 2] {
        &self.combatants
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    /// Frames simulated since the match began.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Rounds decided since the match began.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Events recorded since the last [`take_events`](Self::take_events).
    #[must_use]
    pub fn events(&self) -> &[FrameEvent] {
        self.events.events()
    }

    /// Drains the event log.
    pub fn take_events(&mut self) -> Vec<FrameEvent> {
        self.events.take()
    }

    #[cfg(test)]
    pub(crate) fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        &mut self.combatants[side.index()]
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Applies held controls for both players, left first.
    ///
    /// - walk flags are copied as held;
    /// - `ATTACK` starts a swing only if the sword is at rest, no swing is in
    ///   progress and the player is not rewinding;
    /// - `REWIND` held starts a rewind when permitted;
    /// - `REWIND` released while rewinding ends the rewind into cooldown.
    ///
    /// Because the left side is gated first, a simultaneous rewind request
    /// from both players goes to the left one. Refusals are logged and
    /// returned per side (left first); they never change state.
    pub fn apply_input(&mut self, input: &FrameInput) -> [Option<RewindDenied>; 2] {
        let mut denied = [None, None];
        for side in Side::BOTH {
            let controls = input.get(side);
            let (combatant, opponent) = split_pair(&mut self.combatants, side);

            combatant.set_walking(
                controls.contains(Controls::WALK_LEFT),
                controls.contains(Controls::WALK_RIGHT),
            );

            if controls.contains(Controls::ATTACK) && combatant.begin_attack(&self.config) {
                debug!(%side, "attack started");
                self.events.push(self.frame, DuelEvent::AttackStarted { side });
            }

            if controls.contains(Controls::REWIND) {
                if combatant.is_rewinding() {
                    continue;
                }
                match rewind::begin(combatant, opponent) {
                    Ok(()) => self.events.push(self.frame, DuelEvent::RewindStarted { side }),
                    Err(reason) => {
                        debug!(%side, %reason, "rewind refused");
                        denied[side.index()] = Some(reason);
                    }
                }
            } else if rewind::release(combatant) {
                self.events.push(
                    self.frame,
                    DuelEvent::RewindEnded {
                        side,
                        reason: RewindEnd::Released,
                    },
                );
            }
        }
        denied
    }

    /// Advances the simulation by one frame of `elapsed` seconds.
    ///
    /// Returns the outcome if the round was decided this frame, in which case
    /// both combatants have already been reset.
    ///
    /// # Panics
    ///
    /// Panics if both combatants are rewinding, which the input gate rules
    /// out.
    pub fn update(&mut self, elapsed: f32) -> Option<RoundOutcome> {
        assert!(
            !(self.combatants[0].is_rewinding() && self.combatants[1].is_rewinding()),
            "both combatants are rewinding"
        );
        self.frame += 1;

        for side in Side::BOTH {
            let (combatant, opponent) = split_pair(&mut self.combatants, side);

            if combatant.is_rewinding() {
                let step = rewind::step(combatant, &self.config, elapsed);
                if let Some(reason) = step.ended {
                    self.events.push(self.frame, DuelEvent::RewindEnded { side, reason });
                }
                continue;
            }

            if rewind::tick_cooldown(combatant, &self.config, elapsed) {
                self.events.push(self.frame, DuelEvent::CooldownFinished { side });
            }

            combatant.advance_swing(&self.config);

            let direction =
                WalkDirection::from_flags(combatant.is_walking_left(), combatant.is_walking_right());
            if let Some(direction) = direction {
                if let Some(head) =
                    movement::resolve_step(direction, combatant, opponent, &self.config)
                {
                    combatant.set_head(head);
                }
            }

            combatant.record_snapshot();
        }

        if let Some(loser) = hit::temporal_overlap(&self.combatants, &self.config) {
            self.score.award(loser.opponent());
            let outcome = RoundOutcome::TemporalCollision { loser };
            self.end_round(outcome);
            return Some(outcome);
        }

        let hits = hit::detect_hits(&self.combatants, &self.config);
        if hits.any() {
            for side in Side::BOTH {
                if hits.landed_by(side).is_some() {
                    self.score.award(side);
                }
            }
            let outcome = RoundOutcome::Strike {
                left: hits.left,
                right: hits.right,
            };
            self.end_round(outcome);
            return Some(outcome);
        }

        None
    }

    /// Gates `input` and then advances one frame.
    pub fn step(&mut self, input: &FrameInput, elapsed: f32) -> Option<RoundOutcome> {
        let _ = self.apply_input(input);
        self.update(elapsed)
    }

    /// Starts a new match: fresh combatants, zero score, frame and round
    /// counters cleared, pending events dropped.
    pub fn reset_match(&mut self) {
        self.combatants = fresh_pair(&self.config);
        self.score = Score::default();
        self.frame = 0;
        self.round = 0;
        self.events.clear();
    }

    /// Hash over every simulation-relevant field.
    ///
    /// Two controllers fed the same configuration, inputs and elapsed times
    /// produce the same hash on every frame. The event log is not included.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.frame.hash(&mut hasher);
        self.round.hash(&mut hasher);
        self.score.hash(&mut hasher);
        for combatant in &self.combatants {
            combatant.hash_state(&mut hasher);
        }
        hasher.finish()
    }

    fn end_round(&mut self, outcome: RoundOutcome) {
        self.round += 1;
        self.combatants = fresh_pair(&self.config);
        info!(
            round = self.round,
            frame = self.frame,
            %outcome,
            score = %self.score,
            "round ended"
        );
        self.events.push(
            self.frame,
            DuelEvent::RoundEnded {
                outcome,
                score: self.score,
            },
        );
    }
}

fn fresh_pair(config: &DuelConfig) -> [Combatant; 2] {
    Side::BOTH.map(|side| Combatant::new(side, config))
}

/// Splits the pair into `(side, opponent)` mutable borrows.
fn split_pair(combatants: &mut [Combatant; 2], side: Side) -> (&mut Combatant, &mut Combatant) {
    let [left, right] = combatants;
    match side {
        Side::Left => (left, right),
        Side::Right => (right, left),
    }
}
