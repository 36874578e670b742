// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Byte values of the text control codes.
//!
//! Bytes below 32 are control codes whose argument count is fixed by range:
//!
//! ```text
//! 0x00         terminator
//! 0x01..=0x04  one argument byte
//! 0x05..=0x10  no arguments
//! 0x11..=0x16  two argument bytes
//! 0x17..=0x1F  four argument bytes
//! ```
//!
//! Text colours live above the glyph range at `0x90..=0x9D`.

use num_derive::FromPrimitive;

pub const TERMINATOR: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ControlCode {
    MoveX = 0x01,
    AdjustPalette = 0x02,
    Newline = 0x05,
    NewlineSmaller = 0x06,
    FontSmall = 0x07,
    FontLarge = 0x08,
    FontBold = 0x09,
    FontRegular = 0x0A,
    OutlineOn = 0x0B,
    OutlineOff = 0x0C,
    WindowColour1 = 0x0D,
    WindowColour2 = 0x0E,
    WindowColour3 = 0x0F,
    WindowColour4 = 0x10,
    NewlineXY = 0x11,
    InlineSprite = 0x17,
}

impl ControlCode {
    pub fn byte(self) -> u8 {
        self as u8
    }
}

/// Number of argument bytes following control byte `b`.
pub fn arg_count(b: u8) -> usize {
    match b {
        0x01..=0x04 => 1,
        0x11..=0x16 => 2,
        0x17..=0x1F => 4,
        _ => 0,
    }
}

pub fn is_control(b: u8) -> bool {
    b < 0x20
}

/// The fourteen text colours, in text palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum TextColour {
    Black = 0,
    Grey,
    White,
    Red,
    Green,
    Yellow,
    Topaz,
    Celadon,
    BabyBlue,
    PaleLavender,
    PaleGold,
    LightPink,
    PearlAqua,
    PaleSilver,
}

pub const TEXT_COLOUR_FIRST: u8 = 0x90;
pub const TEXT_COLOUR_LAST: u8 = 0x9D;

impl TextColour {
    pub fn byte(self) -> u8 {
        TEXT_COLOUR_FIRST + self as u8
    }
}

/// `INLINE_SPRITE` followed by the image id, little endian.
pub fn inline_sprite(image: u32) -> [u8; 5] {
    let b = image.to_le_bytes();
    [ControlCode::InlineSprite.byte(), b[0], b[1], b[2], b[3]]
}
