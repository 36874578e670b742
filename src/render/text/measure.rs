// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! String widths and clipping.

use super::font::{Font, FontMetrics};
use super::token::{Token, Tokens};
use crate::render::g1::SpriteCatalog;
use crate::render::image_id::IMAGE_INDEX_MASK;

/// Glyph widths plus the sprite catalog, for inline sprites.
#[derive(Clone, Copy)]
pub struct TextMetrics<'a> {
    pub fonts: &'a FontMetrics,
    pub sprites: &'a dyn SpriteCatalog,
}

/// Running width of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct LineWidth {
    pub font: Font,
    pub width: u16,
}

impl LineWidth {
    pub fn new(font: Font) -> Self {
        LineWidth { font, width: 0 }
    }
}

impl<'a> TextMetrics<'a> {
    pub fn new(fonts: &'a FontMetrics, sprites: &'a dyn SpriteCatalog) -> Self {
        TextMetrics { fonts, sprites }
    }

    #[inline]
    pub fn glyph_width(&self, font: Font, chr: u8) -> u16 {
        self.fonts.width(font, chr)
    }

    /// Width of the sprite an inline sprite word refers to, 0 if missing.
    pub fn inline_sprite_width(&self, image: u32) -> u16 {
        self.sprites
            .element(image & IMAGE_INDEX_MASK)
            .map(|e| e.width.max(0) as u16)
            .unwrap_or(0)
    }

    /// Single line advance of `tok`.
    pub(super) fn advance(&self, line: &mut LineWidth, tok: Token) {
        match tok {
            Token::Glyph(c) => line.width = line.width.saturating_add(self.glyph_width(line.font, c)),
            Token::InlineSprite(id) => line.width = line.width.saturating_add(self.inline_sprite_width(id)),
            Token::MoveX(x) | Token::NewlineXY(x, _) => line.width = x as u16,
            Token::Newline | Token::NewlineSmaller => line.width = 0,
            Token::Font(f) => line.font = f,
            _ => {}
        }
    }

    /// Width of `text` as one line. Newlines start over from zero and
    /// positioning codes set the width absolutely.
    pub fn string_width(&self, font: Font, text: &[u8]) -> u16 {
        let mut line = LineWidth::new(font);
        for (_, tok) in Tokens::new(text) {
            self.advance(&mut line, tok);
        }
        line.width
    }

    /// Widest stretch between positioning codes and newlines.
    pub fn max_string_width(&self, font: Font, text: &[u8]) -> u16 {
        let mut line = LineWidth::new(font);
        let mut max: u16 = 0;
        for (_, tok) in Tokens::new(text) {
            if matches!(
                tok,
                Token::MoveX(_) | Token::NewlineXY(..) | Token::Newline | Token::NewlineSmaller
            ) {
                max = max.max(line.width);
            }
            self.advance(&mut line, tok);
        }
        max.max(line.width)
    }

    /// Widest of the `NEWLINE` separated lines.
    pub fn string_width_new_lined(&self, font: Font, text: &[u8]) -> u16 {
        let mut line = LineWidth::new(font);
        let mut max: u16 = 0;
        for (_, tok) in Tokens::new(text) {
            match tok {
                Token::Newline => {
                    max = max.max(line.width);
                    line.width = 0;
                }
                Token::NewlineXY(..) | Token::NewlineSmaller => {}
                t => self.advance(&mut line, t),
            }
        }
        max.max(line.width)
    }

    /// Shortens `text` to fit in `width`, appending `ellipsis` if anything was
    /// cut. Widths under `min_width` empty the string. Returns the new width.
    pub fn clip_string(&self, font: Font, width: i16, text: &mut Vec<u8>, min_width: i16, ellipsis: &[u8]) -> i16 {
        if width < min_width {
            text.clear();
            return 0;
        }
        let full = self.string_width(font, text);
        if (full as i32) <= width as i32 {
            return full as i16;
        }

        let mut line = LineWidth::new(font);
        let mut best: Option<(usize, u16)> = None;
        for (off, tok) in Tokens::new(text) {
            self.advance(&mut line, tok);
            let candidate = line
                .width
                .saturating_add(self.string_width(line.font, ellipsis));
            if (candidate as i32) >= width as i32 {
                break;
            }
            best = Some((off + tok.encoded_len(), candidate));
        }

        match best {
            Some((end, w)) => {
                text.truncate(end);
                text.extend_from_slice(ellipsis);
                w as i16
            }
            None => {
                text.clear();
                0
            }
        }
    }
}
