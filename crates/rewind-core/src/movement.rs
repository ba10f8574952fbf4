//! Walking, bounded by the arena walls and the opponent.
//!
//! A step is accepted only if a probe limb stays inside the court. The probe
//! is the sword tip when advancing toward the opponent and the free arm's tip
//! when backing away. Advancing additionally requires the heads to stay more
//! than `min_separation` apart on the combatant's own side, so no step can
//! carry one combatant past the other. A refused step is not an error; the
//! combatant simply stays put for the frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::combatant::pose::{limb_tip, Pose};
use crate::combatant::Combatant;
use crate::config::DuelConfig;
use crate::hit::sword_points_at;

/// Horizontal walking direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalkDirection {
    /// Toward `-x`.
    Left,
    /// Toward `+x`.
    Right,
}

impl WalkDirection {
    /// `-1.0` for left, `+1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Direction implied by the held walk controls.
    ///
    /// Holding both or neither yields no movement.
    #[must_use]
    pub const fn from_flags(walk_left: bool, walk_right: bool) -> Option<Self> {
        match (walk_left, walk_right) {
            (true, false) => Some(Self::Left),
            (false, true) => Some(Self::Right),
            _ => None,
        }
    }
}

/// Tip of the free (non-sword) arm for `combatant` with its head at `head`.
///
/// The free arm never moves; it hangs at the rest angle pointing away from
/// the opponent.
#[must_use]
pub fn back_arm_tip_at(combatant: &Combatant, head: Vec2, config: &DuelConfig) -> Vec2 {
    let side = combatant.side();
    let pose = Pose::from_head(head, &config.body);
    limb_tip(
        pose.back_shoulder(side),
        config.body.arm_length,
        -config.rest_angle_deg,
        -side.facing(),
    )
}

/// Next head position for `combatant` walking in `direction`, or `None` if
/// the step is blocked.
///
/// # Example
///
/// ```
/// use rewind_core::combatant::{Combatant, Side};
/// use rewind_core::config::DuelConfig;
/// use rewind_core::movement::{resolve_step, WalkDirection};
///
/// let config = DuelConfig::default();
/// let left = Combatant::new(Side::Left, &config);
/// let right = Combatant::new(Side::Right, &config);
///
/// let next = resolve_step(WalkDirection::Right, &left, &right, &config).unwrap();
/// assert!((next.x - -7.85).abs() < 1e-5);
/// assert_eq!(next.y, 0.0);
/// ```
#[must_use]
pub fn resolve_step(
    direction: WalkDirection,
    combatant: &Combatant,
    opponent: &Combatant,
    config: &DuelConfig,
) -> Option<Vec2> {
    let side = combatant.side();
    let candidate = combatant.head() + Vec2::new(direction.sign() * config.walk_speed, 0.0);
    #[allow(clippy::float_cmp)]
    let advancing = direction.sign() == side.facing();

    let probe = if advancing {
        sword_points_at(combatant, candidate, config).tip
    } else {
        back_arm_tip_at(combatant, candidate, config)
    };

    let wall = config.arena_half_extent.x;
    if probe.x.abs() > wall {
        trace!(%side, probe_x = probe.x, wall, "step blocked by wall");
        return None;
    }

    if advancing {
        // Measured along facing so a candidate on or past the opponent is negative
        let gap = side.facing() * (opponent.head().x - candidate.x);
        if gap <= config.min_separation {
            trace!(%side, gap, min = config.min_separation, "step blocked by opponent");
            return None;
        }
    }

    Some(candidate)
}
