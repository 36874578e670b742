// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! RenderTarget is the clip region every draw call writes through.
//!
//! It is a view over 8-bit pixel storage owned by someone else: a window of
//! canvas space (`x`, `y`, `width`, `height`) mapped onto physical rows of
//! `(width >> zoom_level) + pitch` bytes. Canvas coordinates stay unzoomed;
//! drawing code shifts them right by the zoom level before touching pixels.
//!
//! `FrameBuffer` owns a zoom 0 canvas and hands out such views, either of the
//! whole buffer or of a window inside it.

use crate::util::{Point, UiRect};
use std::ops::Range;

pub const MAX_ZOOM_LEVEL: u8 = 3;

#[derive(Debug)]
pub struct RenderTarget<'a> {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub pitch: i32,
    pub zoom_level: u8,
    bits: &'a mut [u8],
}

impl<'a> RenderTarget<'a> {
    pub fn new(
        bits: &'a mut [u8],
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        pitch: i32,
        zoom_level: u8,
    ) -> Self {
        debug_assert!(zoom_level <= MAX_ZOOM_LEVEL);
        debug_assert!(width >= 0 && height >= 0 && pitch >= 0);
        let rt = RenderTarget {
            x,
            y,
            width,
            height,
            pitch,
            zoom_level,
            bits,
        };
        debug_assert!(
            rt.bits.len() >= rt.required_len(),
            "pixel storage smaller than the target"
        );
        rt
    }

    fn required_len(&self) -> usize {
        let rows = self.physical_height();
        if rows == 0 {
            return 0;
        }
        (rows as usize - 1) * self.stride() + self.physical_width() as usize
    }

    /// Half resolution view of the same storage, used when drawing a
    /// pre-scaled sprite variant.
    pub fn zoomed_out(&mut self) -> RenderTarget<'_> {
        RenderTarget {
            x: self.x >> 1,
            y: self.y >> 1,
            width: self.width >> 1,
            height: self.height >> 1,
            pitch: self.pitch,
            zoom_level: self.zoom_level.saturating_sub(1),
            bits: &mut *self.bits,
        }
    }

    pub fn ui_rect(&self) -> UiRect {
        UiRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn physical_width(&self) -> i32 {
        self.width >> self.zoom_level
    }

    pub fn physical_height(&self) -> i32 {
        self.height >> self.zoom_level
    }

    /// Bytes between the starts of two physical rows.
    pub fn stride(&self) -> usize {
        (self.physical_width() + self.pitch).max(0) as usize
    }

    /// Physical row `y`, pitch bytes excluded.
    #[inline]
    pub fn row_mut(&mut self, y: i32) -> Option<&mut [u8]> {
        let range = self.row_range(y)?;
        self.bits.get_mut(range)
    }

    #[inline]
    pub fn row(&self, y: i32) -> Option<&[u8]> {
        let range = self.row_range(y)?;
        self.bits.get(range)
    }

    fn row_range(&self, y: i32) -> Option<Range<usize>> {
        if y < 0 || y >= self.physical_height() {
            return None;
        }
        let start = y as usize * self.stride();
        Some(start..start + self.physical_width() as usize)
    }

    /// Physical pixel, mostly for tests and debugging.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 {
            return None;
        }
        self.row(y)?.get(x as usize).copied()
    }

    /// Pixel addressed in canvas coordinates.
    pub fn pixel_at(&self, p: Point) -> Option<u8> {
        self.pixel((p.x - self.x) >> self.zoom_level, (p.y - self.y) >> self.zoom_level)
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits[..]
    }
}

/// Fills the physical area with the low byte of `fill`.
pub fn clear(rt: &mut RenderTarget, fill: u32) {
    clear_single(rt, (fill & 0xFF) as u8);
}

/// Fills the physical area with one palette index.
pub fn clear_single(rt: &mut RenderTarget, palette_id: u8) {
    for y in 0..rt.physical_height() {
        if let Some(row) = rt.row_mut(y) {
            row.fill(palette_id);
        }
    }
}

/// Owned zoom 0 canvas.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameBuffer {
    pub width: i32,
    pub height: i32,
    pub content: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        FrameBuffer::filled(width, height, 0)
    }

    pub fn filled(width: i32, height: i32, index: u8) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        FrameBuffer {
            width,
            height,
            content: vec![index; (width * height) as usize],
        }
    }

    pub fn area(&self) -> UiRect {
        UiRect::new(0, 0, self.width, self.height)
    }

    pub fn index_of(&self, x: i32, y: i32) -> usize {
        debug_assert!(
            x >= 0 && y >= 0 && x < self.width && y < self.height,
            "Trying to access position outside the buffer: x={}, y={}, area={:?}",
            x,
            y,
            self.area()
        );
        (y * self.width + x) as usize
    }

    pub fn get(&self, x: i32, y: i32) -> u8 {
        self.content[self.index_of(x, y)]
    }

    pub fn render_target(&mut self) -> RenderTarget<'_> {
        let (w, h) = (self.width, self.height);
        RenderTarget::new(&mut self.content, 0, 0, w, h, 0, 0)
    }

    /// View of a window of the buffer, `None` when `rect` misses it.
    pub fn clip(&mut self, rect: UiRect) -> Option<RenderTarget<'_>> {
        let r = rect.intersection(self.area());
        if r.is_empty() {
            return None;
        }
        let start = (r.y * self.width + r.x) as usize;
        let pitch = self.width - r.width;
        Some(RenderTarget::new(
            &mut self.content[start..],
            r.x,
            r.y,
            r.width,
            r.height,
            pitch,
            0,
        ))
    }

    /// Rows as strings of hex digits, handy when eyeballing test output.
    pub fn dump(&self) -> Vec<String> {
        self.content
            .chunks(self.width.max(1) as usize)
            .map(|row| row.iter().map(|p| format!("{:x}", p % 16)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_views_share_storage_with_pitch() {
        let mut fb = FrameBuffer::new(8, 4);
        {
            let mut rt = fb.clip(UiRect::new(2, 1, 3, 2)).unwrap();
            assert_eq!(rt.pitch, 5);
            assert_eq!(rt.stride(), 8);
            clear_single(&mut rt, 7);
        }
        assert_eq!(fb.get(1, 1), 0);
        assert_eq!(fb.get(2, 1), 7);
        assert_eq!(fb.get(4, 2), 7);
        assert_eq!(fb.get(5, 2), 0);
        assert_eq!(fb.get(2, 3), 0);
    }

    #[test]
    fn clip_outside_is_none() {
        let mut fb = FrameBuffer::new(8, 4);
        assert!(fb.clip(UiRect::new(8, 0, 2, 2)).is_none());
    }

    #[test]
    fn clear_never_touches_pitch_bytes() {
        let mut storage = vec![9u8; 2 * 6];
        let mut rt = RenderTarget::new(&mut storage, 0, 0, 4, 2, 2, 0);
        clear(&mut rt, 0x1234_5601);
        assert_eq!(storage, vec![1, 1, 1, 1, 9, 9, 1, 1, 1, 1, 9, 9]);
    }

    #[test]
    fn zoomed_target_halves_canvas_and_keeps_stride() {
        let mut storage = vec![0u8; 4 * 4];
        let mut rt = RenderTarget::new(&mut storage, 8, 8, 16, 16, 0, 2);
        assert_eq!(rt.physical_width(), 4);
        let z = rt.zoomed_out();
        assert_eq!((z.x, z.y, z.width, z.height, z.zoom_level), (4, 4, 8, 8, 1));
        assert_eq!(z.stride(), 4);
    }

    #[test]
    fn rows_out_of_range_are_none() {
        let mut fb = FrameBuffer::new(3, 3);
        let mut rt = fb.render_target();
        assert!(rt.row_mut(-1).is_none());
        assert!(rt.row_mut(3).is_none());
        assert_eq!(rt.pixel_at(Point::new(2, 2)), Some(0));
    }
}
