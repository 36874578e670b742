// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Primitive rasterizer: filled and bevelled rects, horizontal spans, lines.
//!
//! Rect coordinates are inclusive canvas coordinates. Everything clips to the
//! render target; a shape entirely outside it costs only the bounds test.

use crate::render::palette::{palette_index, AdvancedColour, ExtColour, PaletteCatalog, PaletteIndex};
use crate::render::target::RenderTarget;
use crate::util::{Point, UiRect};
use bitflags::bitflags;
use log::trace;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RectFlags: u32 {
        const SELECT_PATTERN = 1 << 24;
        /// remap the pixels below through a translucency table
        const TRANSPARENT    = 1 << 25;
        const G1_PATTERN     = 1 << 26;
        /// every other pixel, alternating per row
        const CROSS_HATCHING = 1 << 30;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RectInsetFlags: u8 {
        const FILL_TRANSPARENT = 1 << 2;
        const BORDER_NONE      = 1 << 3;
        const FILL_NONE        = 1 << 4;
        const BORDER_INSET     = 1 << 5;
        const FILL_DARKER      = 1 << 6;
        const COLOUR_LIGHT     = 1 << 7;
    }
}

/// Fills the inclusive rect `left..=right` x `top..=bottom`.
///
/// With `TRANSPARENT`, `colour` names the translucency table (an
/// `ExtColour`) used to remap what is already there.
#[allow(clippy::too_many_arguments)]
pub fn fill_rect(
    rt: &mut RenderTarget,
    palettes: &dyn PaletteCatalog,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    colour: u8,
    flags: RectFlags,
) {
    if left > right || top > bottom {
        return;
    }
    if right < rt.x || left >= rt.x + rt.width || bottom < rt.y || top >= rt.y + rt.height {
        return;
    }

    let mut cross_pattern: u32 = 0;
    let mut left_x = left - rt.x;
    if left_x < 0 {
        cross_pattern ^= left_x as u32;
        left_x = 0;
    }
    let right_x = (right - rt.x + 1).min(rt.width);
    let mut top_y = top - rt.y;
    if top_y < 0 {
        cross_pattern ^= top_y as u32;
        top_y = 0;
    }
    let bottom_y = (bottom - rt.y + 1).min(rt.height);

    let z = rt.zoom_level;
    let x0 = (left_x >> z) as usize;
    let y0 = top_y >> z;
    let width = ((right_x - left_x) >> z).max(0) as usize;
    let height = (bottom_y - top_y) >> z;

    if flags.contains(RectFlags::TRANSPARENT) {
        let Some(map) = palettes.palette_for_colour(ExtColour(colour)) else {
            trace!("fill_rect: no translucency table {}", colour);
            return;
        };
        for y in 0..height {
            if let Some(span) = rt.row_mut(y0 + y).and_then(|r| r.get_mut(x0..x0 + width)) {
                for p in span.iter_mut() {
                    *p = map.get(*p);
                }
            }
        }
    } else if flags.contains(RectFlags::CROSS_HATCHING) {
        for y in 0..height {
            let mut p = cross_pattern.rotate_right(1);
            if let Some(span) = rt.row_mut(y0 + y).and_then(|r| r.get_mut(x0..x0 + width)) {
                for d in span.iter_mut() {
                    p ^= 0x8000_0000;
                    if p & 0x8000_0000 != 0 {
                        *d = colour;
                    }
                }
            }
            cross_pattern ^= 1;
        }
    } else if flags.intersects(RectFlags::G1_PATTERN | RectFlags::SELECT_PATTERN) {
        debug_assert!(false, "patterned rect fills are not supported");
    } else {
        for y in 0..height {
            if let Some(span) = rt.row_mut(y0 + y).and_then(|r| r.get_mut(x0..x0 + width)) {
                span.fill(colour);
            }
        }
    }
}

fn fill_ui_rect(rt: &mut RenderTarget, palettes: &dyn PaletteCatalog, r: UiRect, colour: u8, flags: RectFlags) {
    fill_rect(rt, palettes, r.left(), r.top(), r.right() - 1, r.bottom() - 1, colour, flags);
}

/// `dx` by `dy` rect with its top left corner at `(x, y)`.
#[allow(clippy::too_many_arguments)]
pub fn draw_rect(
    rt: &mut RenderTarget,
    palettes: &dyn PaletteCatalog,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    colour: u8,
    flags: RectFlags,
) {
    fill_rect(rt, palettes, x, y, x + dx - 1, y + dy - 1, colour, flags);
}

/// Bevelled panel in the shades of `colour`: sunken with `BORDER_INSET`,
/// raised otherwise, flat with `BORDER_NONE`.
#[allow(clippy::too_many_arguments)]
pub fn fill_rect_inset(
    rt: &mut RenderTarget,
    palettes: &dyn PaletteCatalog,
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
    colour: AdvancedColour,
    flags: RectInsetFlags,
) {
    debug_assert!(!colour.is_outline());
    debug_assert!(!colour.is_inset());
    let base = colour.colour();
    let whole = UiRect::from_ltrb(left, top, right, bottom);
    let ltrb = UiRect::from_ltrb;

    if colour.is_translucent() {
        let t = |level: u8| ExtColour::translucent(base, level).0;
        let tr = RectFlags::TRANSPARENT;
        let (edge_lt, edge_rb) = if flags.contains(RectInsetFlags::BORDER_INSET) {
            (t(2), t(0))
        } else {
            (t(0), t(2))
        };
        if flags.contains(RectInsetFlags::BORDER_NONE) {
            fill_ui_rect(rt, palettes, whole, t(1), tr);
            return;
        }
        fill_ui_rect(rt, palettes, ltrb(left, top, left, bottom), edge_lt, tr);
        fill_ui_rect(rt, palettes, ltrb(left, top, right, top), edge_lt, tr);
        fill_ui_rect(rt, palettes, ltrb(right, top, right, bottom), edge_rb, tr);
        fill_ui_rect(rt, palettes, ltrb(left, bottom, right, bottom), edge_rb, tr);
        if !flags.contains(RectInsetFlags::FILL_NONE) {
            fill_rect(rt, palettes, left + 1, top + 1, right - 1, bottom - 1, t(1), tr);
        }
        return;
    }

    let shade = |s: u8| palettes.shade(base, s);
    let (shadow, mut fill, fill2, hilight) = if flags.contains(RectInsetFlags::COLOUR_LIGHT) {
        (shade(1), shade(3), shade(4), shade(5))
    } else {
        (shade(3), shade(5), shade(6), shade(7))
    };
    let none = RectFlags::empty();

    if flags.contains(RectInsetFlags::BORDER_NONE) {
        fill_ui_rect(rt, palettes, whole, fill, none);
    } else if flags.contains(RectInsetFlags::BORDER_INSET) {
        fill_rect(rt, palettes, left, top, left, bottom, shadow, none);
        fill_rect(rt, palettes, left + 1, top, right, top, shadow, none);
        fill_rect(rt, palettes, right, top + 1, right, bottom - 1, hilight, none);
        fill_rect(rt, palettes, left + 1, bottom, right, bottom, hilight, none);
        if !flags.contains(RectInsetFlags::FILL_NONE) {
            if !flags.contains(RectInsetFlags::FILL_DARKER) {
                fill = fill2;
            }
            if flags.contains(RectInsetFlags::FILL_TRANSPARENT) {
                fill = palette_index::TRANSPARENT;
            }
            fill_rect(rt, palettes, left + 1, top + 1, right - 1, bottom - 1, fill, none);
        }
    } else {
        fill_rect(rt, palettes, left, top, left, bottom - 1, hilight, none);
        fill_rect(rt, palettes, left + 1, top, right - 1, top, hilight, none);
        fill_rect(rt, palettes, right, top, right, bottom - 1, shadow, none);
        fill_rect(rt, palettes, left, bottom, right, bottom, shadow, none);
        if !flags.contains(RectInsetFlags::FILL_NONE) {
            if flags.contains(RectInsetFlags::FILL_TRANSPARENT) {
                fill = palette_index::TRANSPARENT;
            }
            fill_rect(rt, palettes, left + 1, top + 1, right - 1, bottom - 1, fill, none);
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn draw_rect_inset(
    rt: &mut RenderTarget,
    palettes: &dyn PaletteCatalog,
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    colour: AdvancedColour,
    flags: RectInsetFlags,
) {
    fill_rect_inset(rt, palettes, x, y, x + dx - 1, y + dy - 1, colour, flags);
}

/// `length` pixels to the right of `start`; a zero length still draws one,
/// a negative one draws nothing.
pub fn draw_horizontal_line(rt: &mut RenderTarget, colour: PaletteIndex, start: Point, length: i32) {
    let mut x = start.x - rt.x;
    let y = start.y - rt.y;
    if y < 0 || y >= rt.height {
        return;
    }
    let mut length = if length == 0 { 1 } else { length };
    if length <= 0 {
        return;
    }
    if x < 0 {
        length += x;
        if length <= 0 {
            return;
        }
        x = 0;
    }
    if x + length > rt.width {
        length = rt.width - x;
        if length <= 0 {
            return;
        }
    }
    let z = rt.zoom_level;
    let (px, py, plen) = ((x >> z) as usize, y >> z, (length >> z).max(1) as usize);
    if let Some(span) = rt.row_mut(py).and_then(|r| r.get_mut(px..px + plen)) {
        span.fill(colour);
    }
}

/// Bresenham line from `a` to `b`, both ends included.
pub fn draw_line(rt: &mut RenderTarget, a: Point, b: Point, colour: PaletteIndex) {
    let bounding = UiRect::from_ltrb(a.x, a.y, b.x, b.y);
    if !rt.ui_rect().intersects(bounding) {
        return;
    }

    let steep = (a.y - b.y).abs() > (a.x - b.x).abs();
    let (mut a, mut b) = (a, b);
    if steep {
        a = Point::new(a.y, a.x);
        b = Point::new(b.y, b.x);
    }
    if a.x > b.x {
        std::mem::swap(&mut a, &mut b);
    }

    let dx = b.x - a.x;
    let dy = (b.y - a.y).abs();
    let y_step = if a.y < b.y { 1 } else { -1 };
    let mut error = dx / 2;
    let mut y = a.y;
    let mut x_start = a.x;

    for x in a.x..=b.x {
        if steep {
            draw_horizontal_line(rt, colour, Point::new(y, x), 1);
        }
        if x == b.x {
            if !steep {
                draw_horizontal_line(rt, colour, Point::new(x_start, y), x - x_start + 1);
            }
            break;
        }
        error -= dy;
        if error < 0 {
            // shallow lines go out as one span per row
            if !steep {
                draw_horizontal_line(rt, colour, Point::new(x_start, y), x - x_start + 1);
            }
            x_start = x + 1;
            y += y_step;
            error += dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::palette::{Colour, PaletteTable};
    use crate::render::target::FrameBuffer;

    fn painted(fb: &FrameBuffer) -> Vec<(i32, i32)> {
        let mut v = vec![];
        for y in 0..fb.height {
            for x in 0..fb.width {
                if fb.get(x, y) != 0 {
                    v.push((x, y));
                }
            }
        }
        v
    }

    #[test]
    fn fill_rect_is_inclusive() {
        let mut fb = FrameBuffer::new(6, 6);
        let pal = PaletteTable::new();
        fill_rect(&mut fb.render_target(), &pal, 1, 2, 3, 2, 5, RectFlags::empty());
        assert_eq!(painted(&fb), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn inverted_or_outside_rects_draw_nothing() {
        let mut fb = FrameBuffer::new(4, 4);
        let pal = PaletteTable::new();
        fill_rect(&mut fb.render_target(), &pal, 3, 0, 1, 2, 5, RectFlags::empty());
        fill_rect(&mut fb.render_target(), &pal, 4, 0, 9, 2, 5, RectFlags::empty());
        fill_rect(&mut fb.render_target(), &pal, -5, 0, -1, 2, 5, RectFlags::empty());
        assert!(painted(&fb).is_empty());
    }

    #[test]
    fn cross_hatch_alternates_per_row() {
        let mut fb = FrameBuffer::new(4, 2);
        let pal = PaletteTable::new();
        fill_rect(&mut fb.render_target(), &pal, 0, 0, 3, 1, 1, RectFlags::CROSS_HATCHING);
        assert_eq!(fb.content, vec![1, 0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn cross_hatch_phase_follows_the_clipped_edge() {
        let mut fb = FrameBuffer::new(3, 1);
        let pal = PaletteTable::new();
        fill_rect(&mut fb.render_target(), &pal, -1, 0, 2, 0, 1, RectFlags::CROSS_HATCHING);
        assert_eq!(fb.content, vec![0, 1, 0]);
    }

    #[test]
    fn transparent_fill_remaps_existing_pixels() {
        let mut fb = FrameBuffer::filled(2, 1, 4);
        let mut pal = PaletteTable::new();
        let t = ExtColour::translucent(Colour::Blue, 1);
        pal.insert(t, (0..=255u8).map(|i| i.wrapping_mul(2)).collect());
        fill_rect(&mut fb.render_target(), &pal, 0, 0, 0, 0, t.0, RectFlags::TRANSPARENT);
        assert_eq!(fb.content, vec![8, 4]);
        // unknown table leaves the target alone
        fill_rect(&mut fb.render_target(), &pal, 0, 0, 1, 0, 3, RectFlags::TRANSPARENT);
        assert_eq!(fb.content, vec![8, 4]);
    }

    #[test]
    fn horizontal_line_clips_and_draws_at_least_one_pixel() {
        let mut fb = FrameBuffer::new(4, 2);
        draw_horizontal_line(&mut fb.render_target(), 7, Point::new(2, 1), 0);
        draw_horizontal_line(&mut fb.render_target(), 7, Point::new(-2, 0), 4);
        draw_horizontal_line(&mut fb.render_target(), 7, Point::new(-2, 0), 2);
        assert_eq!(painted(&fb), vec![(0, 0), (1, 0), (2, 1)]);
    }

    #[test]
    fn negative_length_lines_draw_nothing() {
        let mut fb = FrameBuffer::new(6, 1);
        draw_horizontal_line(&mut fb.render_target(), 7, Point::new(2, 0), -3);
        draw_horizontal_line(&mut fb.render_target(), 7, Point::new(5, 0), -1);
        assert!(painted(&fb).is_empty());
        draw_horizontal_line(&mut fb.render_target(), 7, Point::new(5, 0), 0);
        assert_eq!(painted(&fb), vec![(5, 0)]);
    }

    #[test]
    fn horizontal_line_includes_both_ends() {
        let mut fb = FrameBuffer::new(6, 1);
        draw_line(&mut fb.render_target(), Point::new(0, 0), Point::new(4, 0), 3);
        assert_eq!(fb.content, vec![3, 3, 3, 3, 3, 0]);
    }

    #[test]
    fn steep_lines_are_single_pixels_per_row() {
        let mut fb = FrameBuffer::new(3, 5);
        draw_line(&mut fb.render_target(), Point::new(2, 4), Point::new(0, 0), 3);
        let p = painted(&fb);
        assert_eq!(p.len(), 5);
        for y in 0..5 {
            assert_eq!(p.iter().filter(|(_, py)| *py == y).count(), 1);
        }
        assert!(p.contains(&(0, 0)) && p.contains(&(2, 4)));
    }

    #[test]
    fn diagonal_line_hits_every_step() {
        let mut fb = FrameBuffer::new(4, 4);
        draw_line(&mut fb.render_target(), Point::new(0, 0), Point::new(3, 3), 1);
        assert_eq!(painted(&fb), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn inset_panel_uses_shadow_and_hilight() {
        let mut pal = PaletteTable::new();
        pal.insert_hue(Colour::Grey, [10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21]);
        let mut fb = FrameBuffer::new(3, 3);
        fill_rect_inset(
            &mut fb.render_target(),
            &pal,
            0,
            0,
            2,
            2,
            AdvancedColour::new(Colour::Grey),
            RectInsetFlags::BORDER_INSET,
        );
        // shadow 13 top/left, hilight 17 bottom/right, fill2 16 inside
        assert_eq!(fb.content, vec![13, 13, 13, 13, 16, 17, 13, 17, 17]);
    }

    #[test]
    fn raised_panel_is_the_mirror_image() {
        let mut pal = PaletteTable::new();
        pal.insert_hue(Colour::Grey, [10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21]);
        let mut fb = FrameBuffer::new(3, 3);
        fill_rect_inset(
            &mut fb.render_target(),
            &pal,
            0,
            0,
            2,
            2,
            AdvancedColour::new(Colour::Grey),
            RectInsetFlags::empty(),
        );
        assert_eq!(fb.content, vec![17, 17, 13, 17, 15, 13, 13, 13, 13]);
    }
}
