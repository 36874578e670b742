// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Text drawing on a [`DrawingContext`].

use super::codes::TERMINATOR;
use super::font::Font;
use super::token::{Token, Tokens};
use super::wrap::wrapped_lines;
use crate::render::context::{DrawingContext, StringId, TextDrawFlags};
use crate::render::image_id::{ImageId, IMAGE_INDEX_MASK};
use crate::render::palette::{palette_index, AdvancedColour, Colour, PaletteIndex, PaletteMap};
use crate::render::rect::RectFlags;
use crate::render::target::RenderTarget;
use crate::util::Point;
use log::warn;

impl DrawingContext<'_> {
    /// Primary and outline colours. Ignored while drawing inset.
    pub fn set_text_colours(&mut self, primary: PaletteIndex, outline1: PaletteIndex, outline2: PaletteIndex) {
        if self.text.flags.contains(TextDrawFlags::INSET) {
            return;
        }
        let c = &mut self.text.colours;
        c[1] = primary;
        c[2] = palette_index::TRANSPARENT;
        c[3] = palette_index::TRANSPARENT;
        if self.text.flags.contains(TextDrawFlags::OUTLINE) {
            c[2] = outline1;
            c[3] = outline2;
        }
    }

    /// Text colour `colour` from the text palette sprite, four bytes per colour.
    pub fn set_text_colour(&mut self, colour: u8) {
        let at = colour as usize * 4;
        let sprites = self.sprites;
        let ramp = sprites
            .element(self.config.text_palette_image)
            .and_then(|el| el.data.get(at..at + 3))
            .map(|s| [s[0], s[1], s[2]]);
        match ramp {
            Some([p1, p2, p3]) => self.set_text_colours(p1, p2, p3),
            None => warn!(
                "text colour {} missing from text palette sprite {}",
                colour, self.config.text_palette_image
            ),
        }
    }

    fn draw_glyph(&self, rt: &mut RenderTarget, pos: Point, chr: u8) {
        let index = self.config.glyph_image_base + self.text.font.glyph_base() + (chr - 32) as u32;
        let colours = self.text.colours;
        let palette = PaletteMap::borrowed(&colours);
        let image = ImageId::new(index).with_primary(Colour::Black);
        self.draw_image_palette_set(rt, pos, image, &palette);
    }

    fn draw_inline_sprite(&self, rt: &mut RenderTarget, pos: Point, word: u32) {
        if self.text.flags.contains(TextDrawFlags::INSET) {
            let image = ImageId::new(word & IMAGE_INDEX_MASK);
            self.draw_image_solid(rt, pos, image, self.text.colours[3]);
            self.draw_image_solid(rt, pos + Point::new(1, 1), image, self.text.colours[1]);
        } else {
            self.draw_image(rt, pos, ImageId::from_u32(word));
        }
    }

    /// Draws `text` starting at `origin` with the current text state and
    /// returns where the cursor ended.
    ///
    /// Glyphs of lines outside the target are neither drawn nor advanced
    /// over; the next newline or positioning code puts the cursor back.
    pub fn loop_newline(&mut self, rt: &mut RenderTarget, origin: Point, text: &[u8]) -> Point {
        self.walk(rt, origin, text, &[])
    }

    fn walk(&mut self, rt: &mut RenderTarget, origin: Point, text: &[u8], y_offsets: &[i8]) -> Point {
        let mut pos = origin;
        let mut glyph = 0usize;
        for (_, tok) in Tokens::new(text) {
            let offscreen = !(pos.y + self.config.max_glyph_height > rt.y && rt.y + rt.height > pos.y);
            match tok {
                Token::Glyph(c) => {
                    if !offscreen {
                        let dy = y_offsets.get(glyph).copied().unwrap_or(0) as i32;
                        self.draw_glyph(rt, Point::new(pos.x, pos.y + dy), c);
                        pos.x += self.fonts.width(self.text.font, c) as i32;
                    }
                    glyph += 1;
                }
                Token::Newline => {
                    pos.x = origin.x;
                    pos.y += self.text.font.line_height();
                }
                Token::NewlineSmaller => {
                    pos.x = origin.x;
                    pos.y += self.text.font.small_line_height();
                }
                Token::MoveX(x) => pos.x = origin.x + x as i32,
                Token::NewlineXY(x, y) => {
                    pos.x = origin.x + x as i32;
                    pos.y = origin.y + y as i32;
                }
                Token::Font(f) => self.text.font = f,
                Token::OutlineOn => self.text.flags.insert(TextDrawFlags::OUTLINE),
                Token::OutlineOff => self.text.flags.remove(TextDrawFlags::OUTLINE),
                Token::WindowColour(n) => {
                    let hue = self.window_colours[n as usize & 3].colour();
                    let shade = if n == 0 { 7 } else { 9 };
                    let primary = self.palettes.shade(hue, shade);
                    self.set_text_colours(primary, palette_index::INDEX_0A, palette_index::INDEX_0A);
                }
                Token::Colour(c) => self.set_text_colour(c),
                Token::InlineSprite(word) => {
                    self.draw_inline_sprite(rt, pos, word);
                    pos.x += self.metrics().inline_sprite_width(word) as i32;
                }
                Token::AdjustPalette(_) | Token::Reserved { .. } => {
                    debug_assert!(false, "unsupported control code {:?}", tok);
                }
            }
        }
        pos
    }

    /// Flags and colours for a fresh draw in `colour`.
    fn begin_text(&mut self, colour: AdvancedColour) {
        self.text.flags = TextDrawFlags::empty();
        match self.text.font {
            Font::M1 => {
                self.text.font = Font::MediumBold;
                self.text.flags |= TextDrawFlags::DARK;
            }
            Font::M2 => {
                self.text.font = Font::MediumBold;
                self.text.flags |= TextDrawFlags::DARK | TextDrawFlags::EXTRA_DARK;
            }
            _ => {}
        }

        let pal = self.palettes;
        self.text.colours[0] = palette_index::TRANSPARENT;
        self.text.colours[1] = pal.shade(Colour::MutedDarkPurple, 5);
        self.text.colours[2] = pal.shade(Colour::MutedRed, 5);
        self.text.colours[3] = pal.shade(Colour::Blue, 5);

        if colour.is_outline() {
            self.text.flags |= TextDrawFlags::OUTLINE;
        }
        if colour.is_inset() {
            self.text.flags |= TextDrawFlags::INSET;
        }

        let hue = colour.colour();
        if self.text.flags.contains(TextDrawFlags::INSET) {
            let dark = self.text.flags.contains(TextDrawFlags::DARK);
            let extra_dark = self.text.flags.contains(TextDrawFlags::EXTRA_DARK);
            let (face, shadow) = match (dark, extra_dark) {
                (true, true) => (2, 4),
                (true, false) => (3, 5),
                _ => (4, 6),
            };
            self.text.colours[1] = pal.shade(hue, face);
            self.text.colours[2] = palette_index::TRANSPARENT;
            self.text.colours[3] = pal.shade(hue, shadow);
        } else {
            self.set_text_colours(pal.shade(hue, 9), palette_index::INDEX_0A, palette_index::INDEX_0A);
        }
    }

    /// Draws `text` at `(x, y)`.
    ///
    /// `FE` continues with the current text state, `FD` resets it to plain
    /// black first, `FF` skips colour setup. Any other colour starts a fresh
    /// draw in that colour. Except for `FE`/`FD`, strings starting right of
    /// or below the target, or too far left of or above it, draw nothing.
    pub fn draw_string(&mut self, rt: &mut RenderTarget, x: i32, y: i32, colour: AdvancedColour, text: &[u8]) -> Point {
        self.draw_string_offsets(rt, x, y, colour, text, &[])
    }

    fn draw_string_offsets(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        colour: AdvancedColour,
        text: &[u8],
        y_offsets: &[i8],
    ) -> Point {
        let origin = Point::new(x, y);
        if colour.is_fe() {
            return self.walk(rt, origin, text, y_offsets);
        }
        if colour.is_fd() {
            self.text.flags = TextDrawFlags::empty();
            self.set_text_colour(0);
            return self.walk(rt, origin, text, y_offsets);
        }

        if x >= rt.x + rt.width
            || x < rt.x - self.config.offscreen_left_margin
            || y >= rt.y + rt.height
            || y < rt.y - self.config.offscreen_top_margin
        {
            return origin;
        }

        if !colour.is_ff() {
            self.begin_text(colour);
        }
        self.walk(rt, origin, text, y_offsets)
    }

    /// Sets the text colours for `colour` without drawing anything.
    fn prime_colours(&mut self, rt: &mut RenderTarget, colour: AdvancedColour) {
        self.text.font = Font::MediumBold;
        let (x, y) = (rt.x, rt.y);
        self.draw_string(rt, x, y, colour, &[]);
    }

    fn line_height(&self) -> i32 {
        self.text.font.line_height()
    }

    fn draw_underline(&mut self, rt: &mut RenderTarget, x: i32, y: i32, width: u16) {
        let y = y + self.config.underline_offset;
        let colours = self.text.colours;
        self.draw_rect(rt, x, y, width as i32, 1, colours[1], RectFlags::empty());
        if colours[2] != palette_index::TRANSPARENT {
            self.draw_rect(rt, x, y + 1, width as i32, 1, colours[2], RectFlags::empty());
        }
    }

    pub fn draw_string_left(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let mut origin = Point::new(x, y);
        self.draw_string_left_at(rt, &mut origin, colour, id, args);
    }

    /// Like [`draw_string_left`](Self::draw_string_left), moving `origin`
    /// to where the text ended.
    pub fn draw_string_left_at(
        &mut self,
        rt: &mut RenderTarget,
        origin: &mut Point,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        *origin = self.draw_string(rt, origin.x, origin.y, colour, &buf);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_string_left_clipped(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        width: i16,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let mut buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        self.clip_string(width, &mut buf);
        self.draw_string(rt, x, y, colour, &buf);
    }

    /// Word wraps to `width` and returns the y below the last line.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_string_left_wrapped(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        width: u16,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) -> i32 {
        let mut buf = self.format(id, args);
        self.prime_colours(rt, colour);

        self.text.font = Font::MediumBold;
        let (_, breaks) = self.wrap_string(&mut buf, width);
        let line_height = self.line_height();
        self.text.flags = TextDrawFlags::empty();

        let mut point = Point::new(x, y);
        for line in wrapped_lines(&buf).take(breaks as usize + 1) {
            self.draw_string(rt, point.x, point.y, AdvancedColour::FE, line);
            point.y += line_height;
        }
        point.y
    }

    pub fn draw_string_right(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        let width = self.string_width(&buf);
        self.draw_string(rt, x - width as i32, y, colour, &buf);
    }

    pub fn draw_string_right_underline(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        let width = self.string_width(&buf);
        let left = x - width as i32;
        self.draw_string(rt, left, y, colour, &buf);
        self.draw_underline(rt, left, y, width);
    }

    pub fn draw_string_left_underline(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        let width = self.string_width(&buf);
        self.draw_string(rt, x, y, colour, &buf);
        self.draw_underline(rt, x, y, width);
    }

    /// Centred on `x`. Nothing is drawn if the left edge would be negative.
    pub fn draw_string_centred(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        let half = (self.string_width(&buf) / 2) as i32;
        if x - half < 0 {
            return;
        }
        self.draw_string(rt, x - half, y, colour, &buf);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_string_centred_clipped(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        width: i16,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) {
        let mut buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        let width = self.clip_string(width, &mut buf);
        self.draw_string(rt, x - (width / 2) as i32, y, colour, &buf);
    }

    /// Wraps to `width` and centres every line on `origin.x`, the block
    /// vertically centred on `origin.y`. Returns the y below the last line.
    pub fn draw_string_centred_wrapped(
        &mut self,
        rt: &mut RenderTarget,
        origin: Point,
        width: u16,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
    ) -> i32 {
        self.prime_colours(rt, colour);
        let mut buf = self.format(id, args);

        self.text.font = Font::MediumBold;
        let (_, breaks) = self.wrap_string(&mut buf, width);
        let line_height = self.line_height();
        self.text.flags = TextDrawFlags::empty();

        let mut point = origin;
        point.y -= (line_height / 2) * breaks as i32;
        for line in wrapped_lines(&buf).take(breaks as usize + 1) {
            let half = (self.string_width(line) / 2) as i32;
            self.draw_string(rt, point.x - half, point.y, AdvancedColour::FE, line);
            point.y += line_height;
        }
        point.y
    }

    /// Centred lines of an already wrapped buffer, `linebreak_count + 1` lines.
    pub fn draw_string_centred_raw(
        &mut self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        linebreak_count: i16,
        colour: AdvancedColour,
        wrapped: &[u8],
    ) {
        self.prime_colours(rt, colour);
        self.text.font = Font::MediumBold;
        self.text.flags = TextDrawFlags::empty();

        let mut origin = Point::new(x, y);
        let count = (linebreak_count as i32 + 1).max(0) as usize;
        for line in wrapped_lines(wrapped).take(count) {
            let half = (self.string_width(line) / 2) as i32;
            self.draw_string(rt, origin.x - half, origin.y, AdvancedColour::FE, line);
            origin.y += self.line_height();
        }
    }

    /// Draws with glyph `i` shifted down by `y_offsets[i]`; glyphs past the
    /// end of `y_offsets` are not shifted.
    pub fn draw_string_y_offsets(
        &mut self,
        rt: &mut RenderTarget,
        loc: Point,
        colour: AdvancedColour,
        id: StringId,
        args: &[u8],
        y_offsets: &[i8],
    ) {
        let buf = self.format(id, args);
        self.text.font = Font::MediumBold;
        self.draw_string_offsets(rt, loc.x, loc.y, colour, &buf, y_offsets);
    }
}

/// Joins lines into the terminator separated form [`wrapped_lines`] reads.
pub fn join_wrapped<'b>(lines: impl IntoIterator<Item = &'b [u8]>) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        out.extend_from_slice(line);
        out.push(TERMINATOR);
    }
    out
}
