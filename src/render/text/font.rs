// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Fonts and their advance widths.

use crate::render::g1::SpriteCatalog;
use serde::{Deserialize, Serialize};

/// Glyphs per font, characters 32..=255.
pub const GLYPH_COUNT: usize = 224;
pub const FONT_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Font {
    MediumNormal,
    #[default]
    MediumBold,
    Small,
    Large,
    /// medium bold, drawn dark
    M1,
    /// medium bold, drawn extra dark
    M2,
}

impl Font {
    /// Sprite offset of the font's first glyph; negative for the dark variants.
    pub fn sprite_base(self) -> i32 {
        match self {
            Font::MediumNormal => 0,
            Font::MediumBold => 224,
            Font::Small => 448,
            Font::Large => 672,
            Font::M1 => -1,
            Font::M2 => -2,
        }
    }

    /// Sprite offset used for glyph images and widths.
    pub fn glyph_base(self) -> u32 {
        match self {
            Font::M1 | Font::M2 => Font::MediumBold.sprite_base() as u32,
            f => f.sprite_base() as u32,
        }
    }

    pub fn line_height(self) -> i32 {
        match self {
            Font::Small => 6,
            Font::Large => 18,
            _ => 10,
        }
    }

    /// Advance of the half-height newline.
    pub fn small_line_height(self) -> i32 {
        match self {
            Font::Small => 3,
            Font::Large => 9,
            _ => 5,
        }
    }
}

/// Advance width of every glyph of the four fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontMetrics {
    widths: Vec<u8>,
}

impl FontMetrics {
    /// `widths` is indexed by `font.glyph_base() + (chr - 32)`, short tables are zero padded.
    pub fn from_widths(mut widths: Vec<u8>) -> Self {
        widths.resize(GLYPH_COUNT * FONT_COUNT, 0);
        FontMetrics { widths }
    }

    /// Every glyph of every font `w` wide.
    pub fn uniform(w: u8) -> Self {
        FontMetrics::from_widths(vec![w; GLYPH_COUNT * FONT_COUNT])
    }

    /// Reads glyph sprite widths, missing glyphs are zero wide.
    pub fn from_catalog(sprites: &dyn SpriteCatalog, glyph_image_base: u32) -> Self {
        let widths = (0..(GLYPH_COUNT * FONT_COUNT) as u32)
            .map(|i| {
                sprites
                    .element(glyph_image_base + i)
                    .map(|e| e.width.clamp(0, 255) as u8)
                    .unwrap_or(0)
            })
            .collect();
        FontMetrics { widths }
    }

    #[inline]
    pub fn width(&self, font: Font, chr: u8) -> u16 {
        if chr < 32 {
            return 0;
        }
        let idx = font.glyph_base() as usize + (chr - 32) as usize;
        self.widths.get(idx).copied().unwrap_or(0) as u16
    }
}
