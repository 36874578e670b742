// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Colour vocabulary of the 8-bit renderer.
//!
//! `Colour` names one of the 31 remappable hues. `ExtColour` keys the palette
//! catalog: the first 31 values are the hue remaps, followed by the
//! translucency tables. `AdvancedColour` is the packed byte text drawing takes.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Index into the 256-entry hardware palette.
pub type PaletteIndex = u8;

pub mod palette_index {
    use super::PaletteIndex;

    pub const TRANSPARENT: PaletteIndex = 0;
    pub const INDEX_0A: PaletteIndex = 0x0A;
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize)]
pub enum Colour {
    Black = 0,
    Grey,
    White,
    MutedDarkPurple,
    MutedPurple,
    Purple,
    DarkBlue,
    Blue,
    MutedDarkTeal,
    MutedTeal,
    DarkGreen,
    MutedSeaGreen,
    MutedGrassGreen,
    Green,
    MutedAvocadoGreen,
    MutedOliveGreen,
    Yellow,
    DarkYellow,
    Orange,
    Amber,
    DarkOrange,
    MutedDarkYellow,
    MutedYellow,
    Brown,
    MutedOrange,
    MutedDarkRed,
    DarkRed,
    Red,
    DarkPink,
    Pink,
    MutedRed,
}

pub const COLOUR_COUNT: u8 = 31;

impl Colour {
    /// Lossy conversion from the low five bits of a packed colour byte.
    /// Out of range values fall back to black.
    pub fn from_bits(v: u8) -> Colour {
        Colour::from_u8(v & 0x1F).unwrap_or(Colour::Black)
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct ExtColour(pub u8);

impl ExtColour {
    pub const TRANSLUCENT_BASE: u8 = 44;

    /// Translucency table of `colour`, `level` 0 (darkest) to 2 (lightest).
    pub fn translucent(colour: Colour, level: u8) -> ExtColour {
        debug_assert!(level < 3);
        ExtColour(Self::TRANSLUCENT_BASE + colour as u8 * 3 + level.min(2))
    }
}

impl From<Colour> for ExtColour {
    fn from(c: Colour) -> Self {
        ExtColour(c as u8)
    }
}

/// Colour plus text style bits, or one of the three sentinels.
///
/// ```text
/// bit 0-4  colour
/// bit 5    outline
/// bit 6    inset
/// bit 7    translucent
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancedColour(pub u8);

impl AdvancedColour {
    const COLOUR_MASK: u8 = 0x1F;
    const OUTLINE: u8 = 0x20;
    const INSET: u8 = 0x40;
    const TRANSLUCENT: u8 = 0x80;

    /// keep the current text state
    pub const FE: AdvancedColour = AdvancedColour(0xFE);
    /// reset to plain black, then keep going
    pub const FD: AdvancedColour = AdvancedColour(0xFD);
    /// skip colour setup entirely
    pub const FF: AdvancedColour = AdvancedColour(0xFF);

    pub fn new(c: Colour) -> Self {
        AdvancedColour(c as u8)
    }

    pub fn colour(self) -> Colour {
        Colour::from_bits(self.0 & Self::COLOUR_MASK)
    }

    pub fn outline(self) -> Self {
        AdvancedColour(self.0 | Self::OUTLINE)
    }

    pub fn inset(self) -> Self {
        AdvancedColour(self.0 | Self::INSET)
    }

    pub fn translucent(self) -> Self {
        AdvancedColour(self.0 | Self::TRANSLUCENT)
    }

    pub fn is_outline(self) -> bool {
        self.0 & Self::OUTLINE != 0
    }

    pub fn is_inset(self) -> bool {
        self.0 & Self::INSET != 0
    }

    pub fn is_translucent(self) -> bool {
        self.0 & Self::TRANSLUCENT != 0
    }

    pub fn is_fe(self) -> bool {
        self == Self::FE
    }

    pub fn is_fd(self) -> bool {
        self == Self::FD
    }

    pub fn is_ff(self) -> bool {
        self == Self::FF
    }
}

impl From<Colour> for AdvancedColour {
    fn from(c: Colour) -> Self {
        AdvancedColour::new(c)
    }
}
