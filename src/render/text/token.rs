// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Tokenizer shared by measurement, wrapping, clipping and drawing.

use super::codes::{arg_count, is_control, ControlCode, TERMINATOR, TEXT_COLOUR_FIRST, TEXT_COLOUR_LAST};
use super::font::Font;
use num_traits::FromPrimitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// printable byte, 32..=255 outside the colour range
    Glyph(u8),
    Newline,
    NewlineSmaller,
    Font(Font),
    OutlineOn,
    OutlineOff,
    /// window colour slot 0..=3
    WindowColour(u8),
    /// text colour 0..=13
    Colour(u8),
    MoveX(u8),
    NewlineXY(u8, u8),
    AdjustPalette(u8),
    /// full image word, flags included
    InlineSprite(u32),
    Reserved { code: u8, len: usize },
}

impl Token {
    /// Bytes the token occupies in the stream, code byte included.
    pub fn encoded_len(&self) -> usize {
        match self {
            Token::MoveX(_) | Token::AdjustPalette(_) => 2,
            Token::NewlineXY(..) => 3,
            Token::InlineSprite(_) => 5,
            Token::Reserved { len, .. } => *len,
            _ => 1,
        }
    }

    fn decode(code: u8, args: &[u8]) -> Token {
        if !is_control(code) {
            return match code {
                TEXT_COLOUR_FIRST..=TEXT_COLOUR_LAST => Token::Colour(code - TEXT_COLOUR_FIRST),
                _ => Token::Glyph(code),
            };
        }
        let reserved = Token::Reserved {
            code,
            len: 1 + args.len(),
        };
        let Some(cc) = ControlCode::from_u8(code) else {
            return reserved;
        };
        match cc {
            ControlCode::MoveX => Token::MoveX(args[0]),
            ControlCode::AdjustPalette => Token::AdjustPalette(args[0]),
            ControlCode::Newline => Token::Newline,
            ControlCode::NewlineSmaller => Token::NewlineSmaller,
            ControlCode::FontSmall => Token::Font(Font::Small),
            ControlCode::FontLarge => Token::Font(Font::Large),
            ControlCode::FontBold => Token::Font(Font::MediumBold),
            ControlCode::FontRegular => Token::Font(Font::MediumNormal),
            ControlCode::OutlineOn => Token::OutlineOn,
            ControlCode::OutlineOff => Token::OutlineOff,
            ControlCode::WindowColour1 => Token::WindowColour(0),
            ControlCode::WindowColour2 => Token::WindowColour(1),
            ControlCode::WindowColour3 => Token::WindowColour(2),
            ControlCode::WindowColour4 => Token::WindowColour(3),
            ControlCode::NewlineXY => Token::NewlineXY(args[0], args[1]),
            ControlCode::InlineSprite => Token::InlineSprite(u32::from_le_bytes([args[0], args[1], args[2], args[3]])),
        }
    }
}

/// Yields `(offset, token)` up to the terminator, the end of the slice or a
/// control code whose arguments are cut off.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Tokens { bytes, pos: 0 }
    }

    pub fn at(bytes: &'a [u8], pos: usize) -> Self {
        Tokens { bytes, pos }
    }

    /// Offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl Iterator for Tokens<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        let off = self.pos;
        let code = *self.bytes.get(off)?;
        if code == TERMINATOR {
            return None;
        }
        let n = if is_control(code) { arg_count(code) } else { 0 };
        let args = self.bytes.get(off + 1..off + 1 + n)?;
        self.pos = off + 1 + n;
        Some((off, Token::decode(code, args)))
    }
}

/// Length of the string up to its terminator.
pub fn str_len(bytes: &[u8]) -> usize {
    let mut t = Tokens::new(bytes);
    for _ in t.by_ref() {}
    t.offset()
}
