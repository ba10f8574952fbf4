//! Tuning constants for a duel, injected at construction.
//!
//! Every threshold the simulation compares against lives in [`DuelConfig`].
//! The defaults are the standard tuning: a 20 x 10 court, combatants two
//! units in from each wall, a 1.5 second rewind budget and a six second
//! cooldown.
//!
//! # Example
//!
//! ```
//! use rewind_core::config::DuelConfig;
//!
//! let config = DuelConfig {
//!     cooldown_secs: 3.0,
//!     ..DuelConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combatant::Side;
use crate::hit::HitRule;

/// Errors raised when validating a [`DuelConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A field that must be strictly positive is zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A field that must not be negative is negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// The sword rest angle is outside `(0, 90]` degrees.
    #[error("rest angle {0} must be within (0, 90] degrees")]
    RestAngleOutOfRange(f32),
    /// A bounded history was configured with no room for a single snapshot.
    #[error("history capacity must hold at least one snapshot")]
    ZeroHistoryCapacity,
    /// The start inset places combatants on or outside the arena walls.
    #[error("start inset {inset} does not fit inside arena half-width {half_width}")]
    StartOutsideArena {
        /// Configured distance from each wall.
        inset: f32,
        /// Arena half-width.
        half_width: f32,
    },
    /// The starting heads are already closer than the minimum separation.
    #[error("starting gap {gap} must exceed the minimum separation {min_separation}")]
    StartTooClose {
        /// Horizontal gap between the two starting heads.
        gap: f32,
        /// Configured minimum separation.
        min_separation: f32,
    },
}

/// Fixed body offsets, all relative to the head or torso center.
///
/// Limb positions are never stored; they are recomputed from the head
/// position with these offsets (see [`crate::combatant::pose`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyGeometry {
    /// Half-extent of the head box.
    pub head_half_extent: Vec2,
    /// Vertical offset from head center to torso center.
    pub torso_offset: f32,
    /// Half-extent of the torso box.
    pub torso_half_extent: Vec2,
    /// Shoulder offset from the torso center (x is mirrored per arm).
    pub shoulder_offset: Vec2,
    /// Length of an arm from shoulder to hand.
    pub arm_length: f32,
    /// Thickness of an arm, also the depth of the sword base.
    pub arm_thickness: f32,
    /// Leg offset from the torso center (x is mirrored per leg).
    pub leg_offset: Vec2,
    /// Half-extent of a leg box.
    pub leg_half_extent: Vec2,
}

impl Default for BodyGeometry {
    fn default() -> Self {
        Self {
            head_half_extent: Vec2::new(0.5, 0.5),
            torso_offset: -1.5,
            torso_half_extent: Vec2::new(0.2, 1.0),
            shoulder_offset: Vec2::new(0.2, 0.4),
            arm_length: 1.25,
            arm_thickness: 0.4,
            leg_offset: Vec2::new(0.2, -2.0),
            leg_half_extent: Vec2::new(0.1, 1.0),
        }
    }
}

/// Complete tuning for one duel.
///
/// Speeds are per simulation frame; durations are seconds of accumulated
/// elapsed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Half-extent of the court. Limb tips must stay within `±x`.
    pub arena_half_extent: Vec2,
    /// Distance from each side wall to a combatant's starting head.
    pub start_inset: f32,
    /// Horizontal head displacement per frame of walking.
    pub walk_speed: f32,
    /// Heads may not come closer than this while advancing.
    pub min_separation: f32,
    /// Head distance at or below which a rewinding combatant loses.
    pub overlap_distance: f32,
    /// Degrees the sword swings toward the strike angle per frame.
    pub swing_step_deg: f32,
    /// Degrees the sword retracts toward rest per frame.
    pub retract_step_deg: f32,
    /// Magnitude of the sword's rest angle.
    pub rest_angle_deg: f32,
    /// History entries discarded per rewind frame before one is applied.
    pub rewind_speedup: u32,
    /// Cap on elapsed seconds a single rewind may play back.
    pub max_rewind_secs: f32,
    /// Mandatory recovery after any rewind.
    pub cooldown_secs: f32,
    /// Length of the sword blade beyond the hand.
    pub sword_length: f32,
    /// Maximum snapshots kept per combatant; `None` keeps everything.
    pub history_capacity: Option<usize>,
    /// How a sword tip is tested against body boxes.
    pub hit_rule: HitRule,
    /// Body offsets.
    pub body: BodyGeometry,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            arena_half_extent: Vec2::new(10.0, 5.0),
            start_inset: 2.0,
            walk_speed: 0.15,
            min_separation: 1.25,
            overlap_distance: 1.0,
            swing_step_deg: 10.0,
            retract_step_deg: 1.75,
            rest_angle_deg: 60.0,
            rewind_speedup: 2,
            max_rewind_secs: 1.5,
            cooldown_secs: 6.0,
            sword_length: 2.0,
            history_capacity: Some(4096),
            hit_rule: HitRule::default(),
            body: BodyGeometry::default(),
        }
    }
}

impl DuelConfig {
    /// Head position a combatant on `side` starts every round at.
    #[must_use]
    pub fn start_position(&self, side: Side) -> Vec2 {
        Vec2::new(
            -side.facing() * (self.arena_half_extent.x - self.start_inset),
            0.0,
        )
    }

    /// Checks that the configuration describes a playable duel.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let body = &self.body;
        let scalars = [
            ("arena_half_extent.x", self.arena_half_extent.x),
            ("arena_half_extent.y", self.arena_half_extent.y),
            ("start_inset", self.start_inset),
            ("walk_speed", self.walk_speed),
            ("min_separation", self.min_separation),
            ("overlap_distance", self.overlap_distance),
            ("swing_step_deg", self.swing_step_deg),
            ("retract_step_deg", self.retract_step_deg),
            ("rest_angle_deg", self.rest_angle_deg),
            ("max_rewind_secs", self.max_rewind_secs),
            ("cooldown_secs", self.cooldown_secs),
            ("sword_length", self.sword_length),
            ("body.head_half_extent.x", body.head_half_extent.x),
            ("body.head_half_extent.y", body.head_half_extent.y),
            ("body.torso_offset", body.torso_offset),
            ("body.torso_half_extent.x", body.torso_half_extent.x),
            ("body.torso_half_extent.y", body.torso_half_extent.y),
            ("body.shoulder_offset.x", body.shoulder_offset.x),
            ("body.shoulder_offset.y", body.shoulder_offset.y),
            ("body.arm_length", body.arm_length),
            ("body.arm_thickness", body.arm_thickness),
            ("body.leg_offset.x", body.leg_offset.x),
            ("body.leg_offset.y", body.leg_offset.y),
            ("body.leg_half_extent.x", body.leg_half_extent.x),
            ("body.leg_half_extent.y", body.leg_half_extent.y),
        ];
        if let Some(&(field, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }

        for (field, value) in [
            ("arena_half_extent.x", self.arena_half_extent.x),
            ("arena_half_extent.y", self.arena_half_extent.y),
            ("walk_speed", self.walk_speed),
            ("swing_step_deg", self.swing_step_deg),
            ("retract_step_deg", self.retract_step_deg),
            ("max_rewind_secs", self.max_rewind_secs),
            ("sword_length", self.sword_length),
            ("body.arm_length", body.arm_length),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("min_separation", self.min_separation),
            ("overlap_distance", self.overlap_distance),
            ("cooldown_secs", self.cooldown_secs),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.rest_angle_deg <= 0.0 || self.rest_angle_deg > 90.0 {
            return Err(ConfigError::RestAngleOutOfRange(self.rest_angle_deg));
        }

        if self.history_capacity == Some(0) {
            return Err(ConfigError::ZeroHistoryCapacity);
        }

        let half_width = self.arena_half_extent.x;
        if self.start_inset <= 0.0 || self.start_inset >= half_width {
            return Err(ConfigError::StartOutsideArena {
                inset: self.start_inset,
                half_width,
            });
        }

        let gap = 2.0 * (half_width - self.start_inset);
        if gap <= self.min_separation {
            return Err(ConfigError::StartTooClose {
                gap,
                min_separation: self.min_separation,
            });
        }

        Ok(())
    }
}

/// Individual settings to replace on top of a base [`DuelConfig`].
///
/// `None` keeps the base value. For `history_capacity`, `Some(None)` lifts
/// the bound entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConfigOverrides {
    /// Replaces [`DuelConfig::walk_speed`].
    pub walk_speed: Option<f32>,
    /// Replaces [`DuelConfig::max_rewind_secs`].
    pub max_rewind_secs: Option<f32>,
    /// Replaces [`DuelConfig::cooldown_secs`].
    pub cooldown_secs: Option<f32>,
    /// Replaces [`DuelConfig::rewind_speedup`].
    pub rewind_speedup: Option<u32>,
    /// Replaces [`DuelConfig::history_capacity`].
    #[allow(clippy::option_option)]
    pub history_capacity: Option<Option<usize>>,
    /// Replaces [`DuelConfig::hit_rule`].
    pub hit_rule: Option<HitRule>,
}

impl ConfigOverrides {
    /// Returns `base` with every set field replaced.
    #[must_use]
    pub fn apply(self, base: DuelConfig) -> DuelConfig {
        DuelConfig {
            walk_speed: self.walk_speed.unwrap_or(base.walk_speed),
            max_rewind_secs: self.max_rewind_secs.unwrap_or(base.max_rewind_secs),
            cooldown_secs: self.cooldown_secs.unwrap_or(base.cooldown_secs),
            rewind_speedup: self.rewind_speedup.unwrap_or(base.rewind_speedup),
            history_capacity: self.history_capacity.unwrap_or(base.history_capacity),
            hit_rule: self.hit_rule.unwrap_or(base.hit_rule),
            ..base
        }
    }
}
