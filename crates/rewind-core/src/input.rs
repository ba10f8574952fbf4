//! Abstract per-frame controls.
//!
//! Device mapping happens outside the core. A frame's input is the set of
//! controls each player is holding; the round controller's input gate turns
//! held controls into state changes (see
//! [`RoundController::apply_input`](crate::round::RoundController::apply_input)).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::combatant::Side;

bitflags! {
    /// Controls held by one player during a frame.
    ///
    /// ```
    /// use rewind_core::input::Controls;
    ///
    /// let held = Controls::WALK_RIGHT | Controls::ATTACK;
    /// assert!(held.contains(Controls::ATTACK));
    /// assert!(!held.contains(Controls::REWIND));
    /// ```
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Controls: u8 {
        /// Walk toward the left wall.
        const WALK_LEFT = 1 << 0;
        /// Walk toward the right wall.
        const WALK_RIGHT = 1 << 1;
        /// Start a swing.
        const ATTACK = 1 << 2;
        /// Start, or keep, rewinding.
        const REWIND = 1 << 3;
    }
}

impl Controls {
    /// Builds a control word from four booleans.
    #[must_use]
    pub fn from_bools(walk_left: bool, walk_right: bool, attack: bool, rewind: bool) -> Self {
        let mut controls = Self::empty();
        controls.set(Self::WALK_LEFT, walk_left);
        controls.set(Self::WALK_RIGHT, walk_right);
        controls.set(Self::ATTACK, attack);
        controls.set(Self::REWIND, rewind);
        controls
    }
}

/// Both players' controls for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameInput {
    /// Controls held by the left player.
    pub left: Controls,
    /// Controls held by the right player.
    pub right: Controls,
}

impl FrameInput {
    /// Creates a frame input.
    #[must_use]
    pub const fn new(left: Controls, right: Controls) -> Self {
        Self { left, right }
    }

    /// A frame where nobody touches anything.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            left: Controls::empty(),
            right: Controls::empty(),
        }
    }

    /// Controls held by the player on `side`.
    #[must_use]
    pub const fn get(&self, side: Side) -> Controls {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bools_sets_each_flag() {
        assert_eq!(
            Controls::from_bools(true, false, true, false),
            Controls::WALK_LEFT | Controls::ATTACK
        );
        assert_eq!(Controls::from_bools(false, false, false, false), Controls::empty());
        assert_eq!(Controls::from_bools(true, true, true, true), Controls::all());
    }

    #[test]
    fn get_selects_side() {
        let input = FrameInput::new(Controls::REWIND, Controls::WALK_LEFT);
        assert_eq!(input.get(Side::Left), Controls::REWIND);
        assert_eq!(input.get(Side::Right), Controls::WALK_LEFT);
    }

    #[test]
    fn idle_is_default() {
        assert_eq!(FrameInput::idle(), FrameInput::default());
    }

    #[test]
    fn serde_round_trip() {
        let input = FrameInput::new(Controls::WALK_RIGHT | Controls::ATTACK, Controls::empty());
        let json = serde_json::to_string(&input).unwrap();
        let back: FrameInput = serde_json::from_str(&json).unwrap();
        assert_eq!(back, input);
    }
}
