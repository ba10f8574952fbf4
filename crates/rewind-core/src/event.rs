//! Gameplay event log.
//!
//! The round controller records what happened during each frame: swings
//! started, rewinds begun and ended, cooldowns served and rounds won. The
//! log never influences the simulation; callers drain it with
//! [`EventLog::take`] (usually once per frame) to drive sound, effects or
//! telemetry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combatant::Side;
use crate::rewind::RewindEnd;
use crate::round::{RoundOutcome, Score};

/// Something noteworthy that happened to a combatant or the round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DuelEvent {
    /// A swing began.
    AttackStarted {
        /// Who swung.
        side: Side,
    },
    /// A rewind began.
    RewindStarted {
        /// Who is rewinding.
        side: Side,
    },
    /// A rewind ended and cooldown began.
    RewindEnded {
        /// Who stopped rewinding.
        side: Side,
        /// Why it stopped.
        reason: RewindEnd,
    },
    /// A cooldown completed; rewind is available again.
    CooldownFinished {
        /// Who recovered.
        side: Side,
    },
    /// A round was decided and both combatants were reset.
    RoundEnded {
        /// How the round was decided.
        outcome: RoundOutcome,
        /// Score after the points were awarded.
        score: Score,
    },
}

impl fmt::Display for DuelEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttackStarted { side } => write!(f, "{side} attacks"),
            Self::RewindStarted { side } => write!(f, "{side} rewinds"),
            Self::RewindEnded { side, reason } => {
                write!(f, "{side} stops rewinding ({reason:?})")
            }
            Self::CooldownFinished { side } => write!(f, "{side} can rewind again"),
            Self::RoundEnded { outcome, score } => write!(f, "round over: {outcome} ({score})"),
        }
    }
}

/// An event stamped with the frame it happened on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Frame counter value when the event was recorded.
    pub frame: u64,
    /// What happened.
    pub event: DuelEvent,
}

/// Ordered buffer of [`FrameEvent`]s.
///
/// # Example
///
/// ```
/// use rewind_core::combatant::Side;
/// use rewind_core::event::{DuelEvent, EventLog};
///
/// let mut log = EventLog::new();
/// log.push(3, DuelEvent::AttackStarted { side: Side::Left });
///
/// let drained = log.take();
/// assert_eq!(drained.len(), 1);
/// assert_eq!(drained[0].frame, 3);
/// assert!(log.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<FrameEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub fn push(&mut self, frame: u64, event: DuelEvent) {
        self.events.push(FrameEvent { frame, event });
    }

    /// Drains every recorded event, oldest first.
    pub fn take(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[FrameEvent] {
        &self.events
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops every pending event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
