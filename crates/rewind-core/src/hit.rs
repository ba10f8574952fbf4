//! Sword geometry and the two round-ending checks.
//!
//! Both checks are pure functions of the two combatants:
//!
//! - [`detect_hits`]: does an attacking sword tip reach the opponent's head
//!   or torso?
//! - [`temporal_overlap`]: is a rewinding combatant standing on top of its
//!   opponent?
//!
//! All horizontal geometry is mirrored through [`Side::facing`], so the same
//! code serves both combatants.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::combatant::pose::{limb_tip, Aabb, Pose, SwordPoints};
use crate::combatant::{Combatant, Side};
use crate::config::DuelConfig;

/// How a sword tip is tested against a body box.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitRule {
    /// The tip has crossed the near face of the box and is not above its top
    /// edge. Everything behind and below the box counts.
    #[default]
    Reach,
    /// The tip lies inside the box.
    Overlap,
}

impl HitRule {
    /// Tests `tip`, travelling along `facing`, against `target`.
    #[must_use]
    pub fn test(self, target: &Aabb, tip: Vec2, facing: f32) -> bool {
        match self {
            Self::Reach => target.reached_by(tip, facing),
            Self::Overlap => target.contains(tip),
        }
    }
}

/// The body part a sword struck.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitZone {
    /// Head box.
    Head,
    /// Torso box.
    Torso,
}

/// Which sides landed a hit this frame, and where.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HitReport {
    /// Zone struck by the left combatant's sword.
    pub left: Option<HitZone>,
    /// Zone struck by the right combatant's sword.
    pub right: Option<HitZone>,
}

impl HitReport {
    /// Zone struck by `side`, if any.
    #[must_use]
    pub const fn landed_by(&self, side: Side) -> Option<HitZone> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns true if at least one sword landed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }
}

/// Sword triangle for `combatant` at its current head position.
#[must_use]
pub fn sword_points(combatant: &Combatant, config: &DuelConfig) -> SwordPoints {
    sword_points_at(combatant, combatant.head(), config)
}

/// Sword triangle for `combatant` as if its head were at `head`.
///
/// The movement resolver uses this to probe a candidate position before
/// committing to it.
#[must_use]
pub fn sword_points_at(combatant: &Combatant, head: Vec2, config: &DuelConfig) -> SwordPoints {
    let body = &config.body;
    let side = combatant.side();
    let facing = side.facing();
    let angle = combatant.strike_angle();

    let pose = Pose::from_head(head, body);
    let pivot = limb_tip(pose.front_shoulder(side), body.arm_length, angle, facing);
    let tip = limb_tip(pivot, config.sword_length, angle, facing);
    let base = pivot - Vec2::new(0.0, body.arm_thickness);

    SwordPoints { pivot, tip, base }
}

/// Zone of `defender` struck by `attacker`, if `attacker` is mid-swing.
///
/// The head is tested before the torso.
#[must_use]
pub fn attack_hit(attacker: &Combatant, defender: &Combatant, config: &DuelConfig) -> Option<HitZone> {
    if !attacker.is_attacking() {
        return None;
    }

    let tip = sword_points(attacker, config).tip;
    let facing = attacker.side().facing();
    let target = defender.pose(config);

    if config.hit_rule.test(&target.head, tip, facing) {
        Some(HitZone::Head)
    } else if config.hit_rule.test(&target.torso, tip, facing) {
        Some(HitZone::Torso)
    } else {
        None
    }
}

/// Runs [`attack_hit`] in both directions.
#[must_use]
pub fn detect_hits(combatants: &[Combatant; 2], config: &DuelConfig) -> HitReport {
    let [left, right] = combatants;
    HitReport {
        left: attack_hit(left, right, config),
        right: attack_hit(right, left, config),
    }
}

/// The side that loses to a temporal collision this frame, if any.
///
/// Only applies while exactly one combatant is rewinding: if the horizontal
/// distance between heads is at or below `overlap_distance`, the rewinding
/// combatant loses.
#[must_use]
pub fn temporal_overlap(combatants: &[Combatant; 2], config: &DuelConfig) -> Option<Side> {
    let [left, right] = combatants;
    let rewinding = match (left.is_rewinding(), right.is_rewinding()) {
        (true, false) => Side::Left,
        (false, true) => Side::Right,
        _ => return None,
    };

    let distance = (left.head().x - right.head().x).abs();
    (distance <= config.overlap_distance).then_some(rewinding)
}
