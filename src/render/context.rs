// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! DrawingContext bundles the collaborators every draw call needs (sprite
//! and palette catalogs, string formatter, window colours) together with
//! the text state that control codes mutate while a string is drawn.
//!
//! A context is single threaded scratch: create one per thread, or per
//! window, and pass it to every draw call.

use crate::init::{get_render_config, RenderConfig};
use crate::render::blit;
use crate::render::g1::{G1Element, SpriteCatalog};
use crate::render::image_id::ImageId;
use crate::render::palette::{AdvancedColour, Colour, PaletteCatalog, PaletteIndex, PaletteMap};
use crate::render::rect::{self, RectFlags, RectInsetFlags};
use crate::render::target::{self, RenderTarget};
use crate::render::text::{wrap_string, Font, FontMetrics, TextMetrics};
use crate::util::Point;
use bitflags::bitflags;
use log::warn;

/// Capacity of the buffer formatted strings are written into.
pub const FORMAT_BUFFER_SIZE: usize = 512;

pub type StringId = u16;

/// Turns a string template and its argument block into control-code text.
pub trait StringFormatter {
    fn format_string(&self, id: StringId, args: &[u8], out: &mut Vec<u8>);
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct TextDrawFlags: u8 {
        const INSET      = 1 << 0;
        const OUTLINE    = 1 << 1;
        const DARK       = 1 << 2;
        const EXTRA_DARK = 1 << 3;
    }
}

/// Text state carried from one control code to the next.
///
/// `colours` is the glyph palette: 0 transparent, 1 primary, 2 and 3 the
/// outline (or inset shadow) shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextState {
    pub font: Font,
    pub flags: TextDrawFlags,
    pub colours: [PaletteIndex; 8],
}

pub struct DrawingContext<'a> {
    pub sprites: &'a dyn SpriteCatalog,
    pub palettes: &'a dyn PaletteCatalog,
    pub strings: &'a dyn StringFormatter,
    pub fonts: FontMetrics,
    pub config: RenderConfig,
    pub window_colours: [AdvancedColour; 4],
    pub text: TextState,
}

impl<'a> DrawingContext<'a> {
    /// Context using the global render config, glyph widths read from the
    /// sprite catalog.
    pub fn new(
        sprites: &'a dyn SpriteCatalog,
        palettes: &'a dyn PaletteCatalog,
        strings: &'a dyn StringFormatter,
    ) -> Self {
        Self::with_config(sprites, palettes, strings, get_render_config().clone())
    }

    pub fn with_config(
        sprites: &'a dyn SpriteCatalog,
        palettes: &'a dyn PaletteCatalog,
        strings: &'a dyn StringFormatter,
        config: RenderConfig,
    ) -> Self {
        let fonts = FontMetrics::from_catalog(sprites, config.glyph_image_base);
        DrawingContext {
            sprites,
            palettes,
            strings,
            fonts,
            config,
            window_colours: [AdvancedColour::new(Colour::Black); 4],
            text: TextState::default(),
        }
    }

    pub fn with_font_metrics(mut self, fonts: FontMetrics) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn metrics(&self) -> TextMetrics<'_> {
        TextMetrics::new(&self.fonts, self.sprites)
    }

    pub fn current_font(&self) -> Font {
        self.text.font
    }

    pub fn set_current_font(&mut self, font: Font) {
        self.text.font = font;
    }

    pub fn set_window_colours(&mut self, colours: [AdvancedColour; 4]) {
        self.window_colours = colours;
    }

    pub fn clear(&self, rt: &mut RenderTarget, fill: u32) {
        target::clear(rt, fill);
    }

    pub fn clear_single(&self, rt: &mut RenderTarget, index: PaletteIndex) {
        target::clear_single(rt, index);
    }

    fn noise_for(&self, image: ImageId) -> Option<&'a G1Element> {
        let sprites: &'a dyn SpriteCatalog = self.sprites;
        self.config
            .noise_mask_image(image.noise_mask())
            .and_then(|idx| sprites.element(idx))
    }

    pub fn draw_image(&self, rt: &mut RenderTarget, pos: Point, image: ImageId) {
        blit::draw_image(rt, self.sprites, self.palettes, pos, image, self.noise_for(image));
    }

    /// Draws a packed image word as carried in string buffers.
    pub fn draw_image_raw(&self, rt: &mut RenderTarget, pos: Point, image: u32) {
        self.draw_image(rt, pos, ImageId::from_u32(image));
    }

    pub fn draw_image_palette_set(&self, rt: &mut RenderTarget, pos: Point, image: ImageId, palette: &PaletteMap) {
        blit::draw_image_palette_set(rt, self.sprites, pos, image, palette, self.noise_for(image));
    }

    pub fn draw_image_solid(&self, rt: &mut RenderTarget, pos: Point, image: ImageId, index: PaletteIndex) {
        blit::draw_image_solid(rt, self.sprites, pos, image, index);
    }

    pub fn draw_image_masked(&self, rt: &mut RenderTarget, pos: Point, image: ImageId, mask: ImageId) {
        blit::draw_image_masked(rt, self.sprites, pos, image, mask);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_rect(
        &self,
        rt: &mut RenderTarget,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        colour: u8,
        flags: RectFlags,
    ) {
        rect::fill_rect(rt, self.palettes, left, top, right, bottom, colour, flags);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_rect(&self, rt: &mut RenderTarget, x: i32, y: i32, dx: i32, dy: i32, colour: u8, flags: RectFlags) {
        rect::draw_rect(rt, self.palettes, x, y, dx, dy, colour, flags);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn fill_rect_inset(
        &self,
        rt: &mut RenderTarget,
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        colour: AdvancedColour,
        flags: RectInsetFlags,
    ) {
        rect::fill_rect_inset(rt, self.palettes, left, top, right, bottom, colour, flags);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_rect_inset(
        &self,
        rt: &mut RenderTarget,
        x: i32,
        y: i32,
        dx: i32,
        dy: i32,
        colour: AdvancedColour,
        flags: RectInsetFlags,
    ) {
        rect::draw_rect_inset(rt, self.palettes, x, y, dx, dy, colour, flags);
    }

    pub fn draw_line(&self, rt: &mut RenderTarget, a: Point, b: Point, colour: PaletteIndex) {
        rect::draw_line(rt, a, b, colour);
    }

    pub fn draw_horizontal_line(&self, rt: &mut RenderTarget, colour: PaletteIndex, start: Point, length: i32) {
        rect::draw_horizontal_line(rt, colour, start, length);
    }

    /// Width of `text` in the current font.
    pub fn string_width(&self, text: &[u8]) -> u16 {
        self.metrics().string_width(self.text.font, text)
    }

    pub fn max_string_width(&self, text: &[u8]) -> u16 {
        self.metrics().max_string_width(self.text.font, text)
    }

    pub fn string_width_new_lined(&self, text: &[u8]) -> u16 {
        self.metrics().string_width_new_lined(self.text.font, text)
    }

    /// Clips `text` in place, see [`TextMetrics::clip_string`].
    pub fn clip_string(&self, width: i16, text: &mut Vec<u8>) -> i16 {
        self.metrics().clip_string(
            self.text.font,
            width,
            text,
            self.config.clip_min_width,
            self.config.ellipsis.as_bytes(),
        )
    }

    /// Wraps `text` in place into terminator separated lines and returns the
    /// widest line and the line count minus one. The current font is left at
    /// whatever font the last line ends in.
    pub fn wrap_string(&mut self, text: &mut Vec<u8>, width: u16) -> (u16, u16) {
        let (max_width, breaks, font) = wrap_string(&self.metrics(), self.text.font, text, width);
        self.text.font = font;
        (max_width, breaks)
    }

    /// Formats `id` into a fresh buffer of [`FORMAT_BUFFER_SIZE`] bytes at most.
    pub fn format(&self, id: StringId, args: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(FORMAT_BUFFER_SIZE);
        self.strings.format_string(id, args, &mut buf);
        if buf.len() > FORMAT_BUFFER_SIZE {
            warn!("string {} formatted to {} bytes, truncating", id, buf.len());
            buf.truncate(FORMAT_BUFFER_SIZE);
        }
        buf
    }
}
