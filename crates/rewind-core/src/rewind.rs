//! Rewind playback and the cooldown that always follows it.
//!
//! ```text
//!            begin (not cooling, opponent not rewinding)
//!   Normal ───────────────────────────────────────────▶ Rewinding
//!     ▲                                                     │
//!     │ cooldown_secs of elapsed time    released / exhausted / cap
//!     │                                                     ▼
//!     └──────────────────────────────────────────────── Cooling
//! ```
//!
//! While rewinding, each frame first discards `rewind_speedup` snapshots
//! from the front of the history and then restores the next one, so
//! playback runs `rewind_speedup + 1` times faster than recording. The
//! elapsed time of every restored frame counts toward `max_rewind_secs`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::combatant::history::Snapshot;
use crate::combatant::{ActionState, Combatant};
use crate::config::DuelConfig;

/// Why a rewind request was refused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RewindDenied {
    /// The combatant is already rewinding.
    #[error("already rewinding")]
    AlreadyRewinding,
    /// The combatant is still serving its cooldown.
    #[error("rewind is cooling down")]
    CoolingDown,
    /// Only one combatant may rewind at a time.
    #[error("opponent is rewinding")]
    OpponentRewinding,
}

/// Why a rewind ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewindEnd {
    /// The player let go of the rewind control.
    Released,
    /// The history ran out.
    Exhausted,
    /// The rewind played back `max_rewind_secs` of elapsed time.
    CapReached,
}

/// What one frame of playback did.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RewindStep {
    /// Snapshots dropped without being applied.
    pub discarded: usize,
    /// The snapshot applied to the combatant, if any.
    pub restored: Option<Snapshot>,
    /// Set when this frame ended the rewind.
    pub ended: Option<RewindEnd>,
}

/// Checks whether `combatant` may start rewinding.
///
/// # Errors
///
/// Returns the first [`RewindDenied`] reason that applies.
pub fn can_begin(combatant: &Combatant, opponent: &Combatant) -> Result<(), RewindDenied> {
    match combatant.state() {
        ActionState::Rewinding { .. } => Err(RewindDenied::AlreadyRewinding),
        ActionState::Cooling { .. } => Err(RewindDenied::CoolingDown),
        ActionState::Normal if opponent.is_rewinding() => Err(RewindDenied::OpponentRewinding),
        ActionState::Normal => Ok(()),
    }
}

/// Moves `combatant` into `Rewinding` with a zeroed counter.
///
/// # Errors
///
/// Returns [`RewindDenied`] and leaves the combatant untouched if the rewind
/// is not permitted.
pub fn begin(combatant: &mut Combatant, opponent: &Combatant) -> Result<(), RewindDenied> {
    can_begin(combatant, opponent)?;
    combatant.set_state(ActionState::Rewinding { rewound_secs: 0.0 });
    debug!(side = %combatant.side(), history = combatant.history().len(), "rewind started");
    Ok(())
}

/// Ends a rewind early. Returns false if the combatant was not rewinding.
pub fn release(combatant: &mut Combatant) -> bool {
    if !combatant.is_rewinding() {
        return false;
    }
    finish(combatant, RewindEnd::Released);
    true
}

/// Plays back one frame of history.
///
/// Does nothing unless `combatant` is rewinding. Every path that ends the
/// rewind leaves the combatant in `Cooling` with a zeroed timer.
pub fn step(combatant: &mut Combatant, config: &DuelConfig, elapsed: f32) -> RewindStep {
    let mut report = RewindStep::default();
    let ActionState::Rewinding { rewound_secs } = combatant.state() else {
        return report;
    };

    for _ in 0..config.rewind_speedup {
        if rewound_secs >= config.max_rewind_secs {
            report.ended = Some(finish(combatant, RewindEnd::CapReached));
            return report;
        }
        if !combatant.history_mut().discard_newest() {
            report.ended = Some(finish(combatant, RewindEnd::Exhausted));
            return report;
        }
        report.discarded += 1;
    }

    let Some(snapshot) = combatant.history_mut().pop_newest() else {
        report.ended = Some(finish(combatant, RewindEnd::Exhausted));
        return report;
    };
    combatant.restore(snapshot);
    report.restored = Some(snapshot);

    let rewound_secs = rewound_secs + elapsed;
    if rewound_secs >= config.max_rewind_secs {
        report.ended = Some(finish(combatant, RewindEnd::CapReached));
    } else if combatant.history().is_empty() {
        report.ended = Some(finish(combatant, RewindEnd::Exhausted));
    } else {
        combatant.set_state(ActionState::Rewinding { rewound_secs });
    }
    report
}

/// Advances the cooldown timer. Returns true on the frame it completes.
pub fn tick_cooldown(combatant: &mut Combatant, config: &DuelConfig, elapsed: f32) -> bool {
    let ActionState::Cooling { elapsed_secs } = combatant.state() else {
        return false;
    };

    let elapsed_secs = elapsed_secs + elapsed;
    if elapsed_secs >= config.cooldown_secs {
        combatant.set_state(ActionState::Normal);
        debug!(side = %combatant.side(), "cooldown finished");
        true
    } else {
        combatant.set_state(ActionState::Cooling { elapsed_secs });
        false
    }
}

fn finish(combatant: &mut Combatant, reason: RewindEnd) -> RewindEnd {
    combatant.set_state(ActionState::Cooling { elapsed_secs: 0.0 });
    debug!(side = %combatant.side(), ?reason, remaining = combatant.history().len(), "rewind ended");
    reason
}
