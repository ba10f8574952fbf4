//! Presentation tints driven by the rewind state machine.
//!
//! The simulation never reads colors. They live here because which palette a
//! combatant wears is decided by its [`ActionState`](crate::combatant::ActionState).

use serde::{Deserialize, Serialize};

use crate::combatant::Side;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    /// Unpacks a `0xRRGGBBAA` literal.
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex.to_be_bytes())
    }
}

/// Which of the three palettes a combatant is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Palette {
    /// Neither rewinding nor recovering.
    Normal,
    /// Playing back history.
    Rewinding,
    /// Serving the post-rewind cooldown.
    Cooling,
}

impl Palette {
    /// Tint for a combatant on `side`.
    ///
    /// ```
    /// use rewind_core::combatant::Side;
    /// use rewind_core::palette::{Palette, Rgba};
    ///
    /// assert_eq!(Palette::Normal.tint(Side::Left), Rgba([0x00, 0x66, 0xff, 0xff]));
    /// ```
    #[must_use]
    pub const fn tint(self, side: Side) -> Rgba {
        let hex = match (side, self) {
            (Side::Left, Self::Normal) => 0x0066_ffff,
            (Side::Left, Self::Rewinding) => 0x0066_99ff,
            (Side::Left, Self::Cooling) => 0x0066_6666,
            (Side::Right, Self::Normal) => 0xff66_00ff,
            (Side::Right, Self::Rewinding) => 0x9966_00ff,
            (Side::Right, Self::Cooling) => 0x6666_0066,
        };
        Rgba::from_hex(hex)
    }
}
