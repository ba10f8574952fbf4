//! Degree-based trigonometry for limb geometry.
//!
//! Arm and sword angles are authored in degrees throughout the simulation.
//! These helpers keep the conversion in one place so every caller rotates
//! limbs identically.

/// Returns the sine of an angle given in degrees.
#[must_use]
#[inline]
pub fn sin_deg(degrees: f32) -> f32 {
    degrees.to_radians().sin()
}

/// Returns the cosine of an angle given in degrees.
#[must_use]
#[inline]
pub fn cos_deg(degrees: f32) -> f32 {
    degrees.to_radians().cos()
}
