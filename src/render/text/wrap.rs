// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Greedy word wrap.
//!
//! [`TextMetrics::wrap_layout`] computes line spans over the untouched
//! input. [`wrap_string`] turns those spans into the terminator separated
//! buffer the line drawing functions walk with [`wrapped_lines`].

use super::codes::TERMINATOR;
use super::font::Font;
use super::measure::TextMetrics;
use super::token::{str_len, Token, Tokens};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapLayout {
    /// byte ranges of the line contents, breaking bytes excluded
    pub lines: Vec<Range<usize>>,
    pub max_width: u16,
    /// font active where the last line ends
    pub final_font: Font,
}

impl WrapLayout {
    /// Line count minus one.
    pub fn breaks(&self) -> u16 {
        self.lines.len().saturating_sub(1) as u16
    }
}

struct LineScan {
    end: usize,
    next: usize,
    width: u16,
    font: Font,
}

impl TextMetrics<'_> {
    fn scan_line(&self, text: &[u8], start: usize, font: Font, max: u16) -> LineScan {
        let mut tokens = Tokens::at(text, start);
        let mut width: u16 = 0;
        let mut font = font;
        let mut has_content = false;
        let mut last_space: Option<(usize, u16, Font)> = None;

        for (off, tok) in tokens.by_ref() {
            match tok {
                Token::Newline => {
                    return LineScan {
                        end: off,
                        next: off + 1,
                        width,
                        font,
                    };
                }
                Token::Font(f) => font = f,
                Token::MoveX(x) => width = x as u16,
                Token::InlineSprite(id) => {
                    width = width.saturating_add(self.inline_sprite_width(id));
                    has_content = true;
                }
                Token::Glyph(c) => {
                    if c == b' ' && has_content {
                        last_space = Some((off, width, font));
                    }
                    let adv = self.glyph_width(font, c);
                    if has_content && width.saturating_add(adv) > max {
                        return match last_space {
                            Some((sp, w, f)) => LineScan {
                                end: sp,
                                next: sp + 1,
                                width: w,
                                font: f,
                            },
                            None => LineScan {
                                end: off,
                                next: off,
                                width,
                                font,
                            },
                        };
                    }
                    width += adv;
                    has_content = true;
                }
                _ => {}
            }
        }
        LineScan {
            end: tokens.offset(),
            next: tokens.offset(),
            width,
            font,
        }
    }

    /// Splits `text` into lines no wider than `width` where possible. A line
    /// always keeps its first glyph, so single glyphs wider than `width`
    /// still make progress.
    pub fn wrap_layout(&self, font: Font, text: &[u8], width: u16) -> WrapLayout {
        let end = str_len(text);
        let mut lines = Vec::new();
        let mut max_width: u16 = 0;
        let mut font = font;
        let mut pos = 0;
        loop {
            let scan = self.scan_line(text, pos, font, width);
            lines.push(pos..scan.end);
            max_width = max_width.max(scan.width);
            font = scan.font;
            pos = scan.next;
            // a newline closing the text adds no empty line
            if pos >= end {
                break;
            }
        }
        WrapLayout {
            lines,
            max_width,
            final_font: font,
        }
    }
}

/// Rewrites `text` as terminator separated lines. Returns the widest line,
/// the line count minus one and the font active at the end.
pub fn wrap_string(metrics: &TextMetrics, font: Font, text: &mut Vec<u8>, width: u16) -> (u16, u16, Font) {
    let layout = metrics.wrap_layout(font, text, width);
    let mut out = Vec::with_capacity(text.len() + layout.lines.len());
    for line in &layout.lines {
        out.extend_from_slice(&text[line.clone()]);
        out.push(TERMINATOR);
    }
    *text = out;
    (layout.max_width, layout.breaks(), layout.final_font)
}

/// Lines of a buffer produced by [`wrap_string`]. Zero argument bytes do
/// not split lines.
pub fn wrapped_lines(buf: &[u8]) -> WrappedLines<'_> {
    WrappedLines { buf, pos: 0 }
}

pub struct WrappedLines<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.buf.len() {
            return None;
        }
        let start = self.pos;
        let len = str_len(&self.buf[start..]);
        self.pos = start + len + 1;
        Some(&self.buf[start..start + len])
    }
}
