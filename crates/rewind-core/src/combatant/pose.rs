//! Body layout derived from a head position.
//!
//! A combatant stores only its head position; everything else here is a pure
//! function of that position and the [`BodyGeometry`] offsets, so limbs can
//! never drift away from the head.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::BodyGeometry;
use crate::trig::{cos_deg, sin_deg};

use super::{Arm, Side};

/// Axis-aligned box described by its center and half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center point.
    pub center: Vec2,
    /// Half of the width and height.
    pub half_extent: Vec2,
}

impl Aabb {
    /// Creates a box from center and half-extents.
    #[must_use]
    pub const fn new(center: Vec2, half_extent: Vec2) -> Self {
        Self {
            center,
            half_extent,
        }
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extent
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extent
    }

    /// Returns true if `point` lies inside or on the edge of the box.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Returns true if `point`, travelling along `facing`, has crossed the
    /// box's near face and is not above its top edge.
    ///
    /// The region behind the near face and below the box counts as inside.
    #[must_use]
    pub fn reached_by(&self, point: Vec2, facing: f32) -> bool {
        let near_face = self.center.x - facing * self.half_extent.x;
        facing * (point.x - near_face) >= 0.0 && point.y <= self.center.y + self.half_extent.y
    }
}

/// Every body part position for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Head box.
    pub head: Aabb,
    /// Torso box.
    pub torso: Aabb,
    /// Pivot of the left arm.
    pub left_shoulder: Vec2,
    /// Pivot of the right arm.
    pub right_shoulder: Vec2,
    /// Left leg box.
    pub left_leg: Aabb,
    /// Right leg box.
    pub right_leg: Aabb,
}

impl Pose {
    /// Lays out a body around `head`.
    ///
    /// # Example
    ///
    /// ```
    /// use rewind_core::combatant::pose::Pose;
    /// use rewind_core::config::BodyGeometry;
    /// use glam::Vec2;
    ///
    /// let pose = Pose::from_head(Vec2::new(-8.0, 0.0), &BodyGeometry::default());
    /// assert_eq!(pose.torso.center, Vec2::new(-8.0, -1.5));
    /// assert!((pose.right_shoulder - Vec2::new(-7.8, -1.1)).length() < 1e-6);
    /// ```
    #[must_use]
    pub fn from_head(head: Vec2, body: &BodyGeometry) -> Self {
        let torso = head + Vec2::new(0.0, body.torso_offset);
        let shoulder = body.shoulder_offset;
        let leg = body.leg_offset;

        Self {
            head: Aabb::new(head, body.head_half_extent),
            torso: Aabb::new(torso, body.torso_half_extent),
            left_shoulder: torso + Vec2::new(-shoulder.x, shoulder.y),
            right_shoulder: torso + Vec2::new(shoulder.x, shoulder.y),
            left_leg: Aabb::new(torso + Vec2::new(-leg.x, leg.y), body.leg_half_extent),
            right_leg: Aabb::new(torso + Vec2::new(leg.x, leg.y), body.leg_half_extent),
        }
    }

    /// Pivot of the given arm.
    #[must_use]
    pub const fn shoulder(&self, arm: Arm) -> Vec2 {
        match arm {
            Arm::Left => self.left_shoulder,
            Arm::Right => self.right_shoulder,
        }
    }

    /// Pivot of the sword arm for a combatant on `side`.
    #[must_use]
    pub const fn front_shoulder(&self, side: Side) -> Vec2 {
        self.shoulder(side.sword_arm())
    }

    /// Pivot of the free arm for a combatant on `side`.
    #[must_use]
    pub const fn back_shoulder(&self, side: Side) -> Vec2 {
        self.shoulder(side.sword_arm().other())
    }
}

/// The three corners of the sword triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwordPoints {
    /// Where the blade meets the hand (end of the sword arm).
    pub pivot: Vec2,
    /// Point of contact for hit detection.
    pub tip: Vec2,
    /// Lower corner of the hilt.
    pub base: Vec2,
}

/// End point of a segment of `length` rotated by `angle_deg` from `pivot`.
///
/// The angle is measured in the facing frame: `0` points straight ahead
/// along `facing`, negative angles raise the limb.
#[must_use]
pub fn limb_tip(pivot: Vec2, length: f32, angle_deg: f32, facing: f32) -> Vec2 {
    Vec2::new(
        pivot.x + facing * length * cos_deg(angle_deg),
        pivot.y - length * sin_deg(angle_deg),
    )
}
