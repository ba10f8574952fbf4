//! One player's complete simulation state.
//!
//! - [`Side`]: which end of the court a combatant starts on, and its facing
//! - [`ActionState`]: the `Normal / Rewinding / Cooling` state machine
//! - [`Combatant`]: head position, sword angle, behavior flags and history
//!
//! # Facing
//!
//! The two combatants are mirror images. Instead of duplicating geometry per
//! side, every horizontal offset is multiplied by [`Side::facing`] (`+1` for
//! the left combatant, `-1` for the right one). Sword angles are stored raw
//! (left swings through `[-rest, 0]`, right through `[0, rest]`) and
//! converted to a shared "strike angle" with [`Combatant::strike_angle`],
//! where `-rest` is fully raised and `0` is level with the ground.
//!
//! # Example
//!
//! ```
//! use rewind_core::combatant::{Combatant, Side};
//! use rewind_core::config::DuelConfig;
//!
//! let config = DuelConfig::default();
//! let left = Combatant::new(Side::Left, &config);
//!
//! assert_eq!(left.head().x, -8.0);
//! assert_eq!(left.sword_angle(), -60.0);
//! assert!(left.is_sword_at_rest(&config));
//! assert!(left.history().is_empty());
//! ```

pub mod history;
pub mod pose;

use std::fmt;
use std::hash::{Hash, Hasher};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::DuelConfig;
use crate::palette::Palette;

use history::{HistoryLog, Snapshot};
use pose::Pose;

/// Tolerance when comparing the sword angle against its rest angle.
const ANGLE_EPSILON: f32 = 1e-4;

/// Which end of the court a combatant belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Starts near the left wall, faces right.
    Left,
    /// Starts near the right wall, faces left.
    Right,
}

impl Side {
    /// Both sides in processing order.
    pub const BOTH: [Self; 2] = [Self::Left, Self::Right];

    /// `+1.0` when facing right, `-1.0` when facing left.
    #[must_use]
    pub const fn facing(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// The arm that carries the sword: the one nearer the opponent.
    #[must_use]
    pub const fn sword_arm(self) -> Arm {
        match self {
            Self::Left => Arm::Right,
            Self::Right => Arm::Left,
        }
    }

    /// Index into per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// An arm, named from the combatant's own point of view on screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arm {
    /// Arm on the screen-left of the torso.
    Left,
    /// Arm on the screen-right of the torso.
    Right,
}

impl Arm {
    /// The opposite arm.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Rewind state machine.
///
/// Rewinding and cooling down are variants of one enum, so a combatant can
/// never be in both at once. Each variant carries its own timer, which
/// resets implicitly on every transition.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionState {
    /// Free to move, attack and start a rewind.
    Normal,
    /// Playing back history.
    Rewinding {
        /// Elapsed seconds consumed by this rewind so far.
        rewound_secs: f32,
    },
    /// Recovering; rewind is unavailable.
    Cooling {
        /// Elapsed seconds of cooldown served so far.
        elapsed_secs: f32,
    },
}

impl ActionState {
    /// Palette the state is drawn with.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Normal => Palette::Normal,
            Self::Rewinding { .. } => Palette::Rewinding,
            Self::Cooling { .. } => Palette::Cooling,
        }
    }

    /// Small integer code (`0` normal, `1` rewinding, `2` cooling).
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Rewinding { .. } => 1,
            Self::Cooling { .. } => 2,
        }
    }
}

/// One player's kinematic and behavioral state.
///
/// Only the head position is stored; torso, arms and legs are derived with
/// [`Combatant::pose`]. A combatant is never reset in place: the round
/// controller replaces it with [`Combatant::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    side: Side,
    head: Vec2,
    sword_angle: f32,
    walking_left: bool,
    walking_right: bool,
    attacking: bool,
    state: ActionState,
    history: HistoryLog,
}

impl Combatant {
    /// Creates a combatant at its side's starting position with the sword at
    /// rest, no flags set and an empty history.
    #[must_use]
    pub fn new(side: Side, config: &DuelConfig) -> Self {
        Self {
            side,
            head: config.start_position(side),
            sword_angle: -side.facing() * config.rest_angle_deg,
            walking_left: false,
            walking_right: false,
            attacking: false,
            state: ActionState::Normal,
            history: HistoryLog::new(config.history_capacity),
        }
    }

    /// Which side this combatant plays.
    #[must_use]
    pub const fn side(&self) -> Side {
        self.side
    }

    /// Head center.
    #[must_use]
    pub const fn head(&self) -> Vec2 {
        self.head
    }

    /// Raw sword-arm angle in degrees.
    #[must_use]
    pub const fn sword_angle(&self) -> f32 {
        self.sword_angle
    }

    /// Sword angle in the facing frame: `-rest` raised, `0` level.
    #[must_use]
    pub fn strike_angle(&self) -> f32 {
        self.side.facing() * self.sword_angle
    }

    /// Raw angle of the free arm, which never moves.
    #[must_use]
    pub fn free_arm_angle(&self, config: &DuelConfig) -> f32 {
        self.side.facing() * config.rest_angle_deg
    }

    /// Full body layout for this frame.
    #[must_use]
    pub fn pose(&self, config: &DuelConfig) -> Pose {
        Pose::from_head(self.head, &config.body)
    }

    /// Returns true if the sword is fully retracted.
    #[must_use]
    pub fn is_sword_at_rest(&self, config: &DuelConfig) -> bool {
        (self.strike_angle() + config.rest_angle_deg).abs() <= ANGLE_EPSILON
    }

    /// Whether the walk-left control is held.
    #[must_use]
    pub const fn is_walking_left(&self) -> bool {
        self.walking_left
    }

    /// Whether the walk-right control is held.
    #[must_use]
    pub const fn is_walking_right(&self) -> bool {
        self.walking_right
    }

    /// Whether a swing is in progress (the blade is live).
    #[must_use]
    pub const fn is_attacking(&self) -> bool {
        self.attacking
    }

    /// Current rewind state.
    #[must_use]
    pub const fn state(&self) -> ActionState {
        self.state
    }

    /// Returns true while playing back history.
    #[must_use]
    pub const fn is_rewinding(&self) -> bool {
        matches!(self.state, ActionState::Rewinding { .. })
    }

    /// Returns true while serving a cooldown.
    #[must_use]
    pub const fn is_cooling(&self) -> bool {
        matches!(self.state, ActionState::Cooling { .. })
    }

    /// Seconds consumed by the current rewind, `0.0` when not rewinding.
    #[must_use]
    pub const fn rewound_secs(&self) -> f32 {
        match self.state {
            ActionState::Rewinding { rewound_secs } => rewound_secs,
            _ => 0.0,
        }
    }

    /// Seconds of cooldown served, `0.0` when not cooling.
    #[must_use]
    pub const fn cooldown_secs(&self) -> f32 {
        match self.state {
            ActionState::Cooling { elapsed_secs } => elapsed_secs,
            _ => 0.0,
        }
    }

    /// Palette selected by the current state.
    #[must_use]
    pub const fn palette(&self) -> Palette {
        self.state.palette()
    }

    /// Recorded timeline, newest first.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Sets the held walk controls.
    pub fn set_walking(&mut self, left: bool, right: bool) {
        self.walking_left = left;
        self.walking_right = right;
    }

    /// Starts a swing if the sword is at rest and nothing else is in
    /// progress. Returns whether a swing started.
    pub fn begin_attack(&mut self, config: &DuelConfig) -> bool {
        if self.attacking || self.is_rewinding() || !self.is_sword_at_rest(config) {
            return false;
        }
        self.attacking = true;
        true
    }

    /// Advances the sword one frame.
    ///
    /// While attacking the blade swings down by `swing_step_deg` until it is
    /// level, which ends the attack. Otherwise it retracts by
    /// `retract_step_deg` until it is back at rest.
    pub fn advance_swing(&mut self, config: &DuelConfig) {
        let rest = -config.rest_angle_deg;
        let mut angle = self.strike_angle();

        if self.attacking && angle <= 0.0 {
            angle += config.swing_step_deg;
            if angle >= 0.0 {
                angle = 0.0;
                self.attacking = false;
            }
        } else if !self.attacking && angle > rest {
            angle = (angle - config.retract_step_deg).max(rest);
        }

        self.set_strike_angle(angle);
    }

    /// Appends the current pose to the history.
    ///
    /// The controller calls this after the frame's swing and step, so the
    /// first entry of a walk already holds the moved position (`-7.85` for a
    /// first step right from `-8.0`), not the starting one.
    pub fn record_snapshot(&mut self) {
        self.history.record(self.snapshot());
    }

    /// The current pose as a history entry.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.head,
            sword_angle: self.sword_angle,
            attacking: self.attacking,
        }
    }

    /// Feeds every simulation-relevant field into `state`.
    ///
    /// Floats are hashed by bit pattern, so two combatants hash equal only if
    /// they are bit-identical.
    pub fn hash_state<H: Hasher>(&self, state: &mut H) {
        self.side.hash(state);
        hash_vec2(self.head, state);
        self.sword_angle.to_bits().hash(state);
        self.walking_left.hash(state);
        self.walking_right.hash(state);
        self.attacking.hash(state);
        self.state.code().hash(state);
        self.rewound_secs().to_bits().hash(state);
        self.cooldown_secs().to_bits().hash(state);
        self.history.len().hash(state);
        for snapshot in self.history.iter() {
            hash_vec2(snapshot.head, state);
            snapshot.sword_angle.to_bits().hash(state);
            snapshot.attacking.hash(state);
        }
    }

    pub(crate) fn set_head(&mut self, head: Vec2) {
        self.head = head;
    }

    pub(crate) fn set_strike_angle(&mut self, angle: f32) {
        self.sword_angle = self.side.facing() * angle;
    }

    pub(crate) fn set_state(&mut self, state: ActionState) {
        self.state = state;
    }

    pub(crate) fn history_mut(&mut self) -> &mut HistoryLog {
        &mut self.history
    }

    /// Moves the combatant back to a recorded moment.
    pub(crate) fn restore(&mut self, snapshot: Snapshot) {
        self.head = snapshot.head;
        self.sword_angle = snapshot.sword_angle;
        self.attacking = snapshot.attacking;
    }
}

fn hash_vec2<H: Hasher>(v: Vec2, state: &mut H) {
    v.x.to_bits().hash(state);
    v.y.to_bits().hash(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    mod side_tests {
        use super::*;

        #[test]
        fn facing_is_signed() {
            assert_eq!(Side::Left.facing(), 1.0);
            assert_eq!(Side::Right.facing(), -1.0);
        }

        #[test]
        fn opponent_round_trips() {
            for side in Side::BOTH {
                assert_eq!(side.opponent().opponent(), side);
                assert_ne!(side.opponent(), side);
            }
        }

        #[test]
        fn sword_arm_is_inner_arm() {
            assert_eq!(Side::Left.sword_arm(), Arm::Right);
            assert_eq!(Side::Right.sword_arm(), Arm::Left);
        }

        #[test]
        fn display() {
            assert_eq!(Side::Left.to_string(), "left");
            assert_eq!(Side::Right.to_string(), "right");
        }
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn right_combatant_mirrors_left() {
            let config = DuelConfig::default();
            let left = Combatant::new(Side::Left, &config);
            let right = Combatant::new(Side::Right, &config);

            assert_eq!(left.head().x, -right.head().x);
            assert_eq!(left.sword_angle(), -right.sword_angle());
            assert_eq!(left.strike_angle(), right.strike_angle());
            assert_eq!(left.free_arm_angle(&config), 60.0);
            assert_eq!(right.free_arm_angle(&config), -60.0);
        }

        #[test]
        fn starts_normal_and_idle() {
            let config = DuelConfig::default();
            let c = Combatant::new(Side::Right, &config);

            assert_eq!(c.state(), ActionState::Normal);
            assert_eq!(c.palette(), Palette::Normal);
            assert!(!c.is_attacking());
            assert!(!c.is_walking_left());
            assert!(!c.is_walking_right());
            assert_eq!(c.history().capacity(), config.history_capacity);
        }
    }

    mod swing_tests {
        use super::*;

        #[test]
        fn attack_requires_rest() {
            let config = DuelConfig::default();
            let mut c = Combatant::new(Side::Left, &config);
            c.set_strike_angle(-30.0);
            assert!(!c.begin_attack(&config));
            c.set_strike_angle(-60.0);
            assert!(c.begin_attack(&config));
            assert!(!c.begin_attack(&config), "already swinging");
        }

        #[test]
        fn attack_refused_while_rewinding() {
            let config = DuelConfig::default();
            let mut c = Combatant::new(Side::Left, &config);
            c.set_state(ActionState::Rewinding { rewound_secs: 0.0 });
            assert!(!c.begin_attack(&config));
        }

        #[test]
        fn swing_reaches_level_and_stops() {
            let config = DuelConfig::default();
            for side in Side::BOTH {
                let mut c = Combatant::new(side, &config);
                assert!(c.begin_attack(&config));

                for _ in 0..5 {
                    c.advance_swing(&config);
                    assert!(c.is_attacking());
                }
                // -60 + 6 * 10 reaches level
                c.advance_swing(&config);
                assert!(!c.is_attacking());
                assert_eq!(c.strike_angle(), 0.0);
            }
        }

        #[test]
        fn sword_retracts_to_rest() {
            let config = DuelConfig::default();
            let mut c = Combatant::new(Side::Right, &config);
            c.set_strike_angle(0.0);

            c.advance_swing(&config);
            assert_eq!(c.strike_angle(), -1.75);
            assert_eq!(c.sword_angle(), 1.75);

            for _ in 0..100 {
                c.advance_swing(&config);
            }
            assert!(c.is_sword_at_rest(&config));
            assert_eq!(c.sword_angle(), 60.0);
        }

        #[test]
        fn resting_sword_stays_put() {
            let config = DuelConfig::default();
            let mut c = Combatant::new(Side::Left, &config);
            c.advance_swing(&config);
            assert_eq!(c.sword_angle(), -60.0);
        }
    }

    mod snapshot_tests {
        use super::*;

        #[test]
        fn restore_applies_snapshot() {
            let config = DuelConfig::default();
            let mut c = Combatant::new(Side::Left, &config);
            let snap = Snapshot {
                head: Vec2::new(-3.0, 0.0),
                sword_angle: -20.0,
                attacking: true,
            };
            c.restore(snap);
            assert_eq!(c.snapshot(), snap);
        }

        #[test]
        fn record_pushes_current_pose() {
            let config = DuelConfig::default();
            let mut c = Combatant::new(Side::Left, &config);
            c.record_snapshot();
            c.set_head(Vec2::new(-7.0, 0.0));
            c.record_snapshot();

            assert_eq!(c.history().len(), 2);
            assert_eq!(c.history().newest().unwrap().head.x, -7.0);
            assert_eq!(c.history().oldest().unwrap().head.x, -8.0);
        }
    }

    mod hash_tests {
        use super::*;
        use std::collections::hash_map::DefaultHasher;

        fn hash_of(c: &Combatant) -> u64 {
            let mut hasher = DefaultHasher::new();
            c.hash_state(&mut hasher);
            hasher.finish()
        }

        #[test]
        fn identical_combatants_hash_equal() {
            let config = DuelConfig::default();
            let a = Combatant::new(Side::Left, &config);
            let b = Combatant::new(Side::Left, &config);
            assert_eq!(hash_of(&a), hash_of(&b));
        }

        #[test]
        fn history_changes_hash() {
            let config = DuelConfig::default();
            let a = Combatant::new(Side::Left, &config);
            let mut b = a.clone();
            b.record_snapshot();
            assert_ne!(hash_of(&a), hash_of(&b));
        }
    }
}
