// RustPixel
// copyright zipxing@hotmail.com 2022～2025

mod common;

use common::*;
use pixel_gfx::render::blit::draw_image;
use pixel_gfx::render::rect::{draw_line, fill_rect};
use pixel_gfx::render::{
    AdvancedColour, Colour, FrameBuffer, G1Element, ImageId, PaletteTable, RectFlags, RectInsetFlags,
    RenderTarget, SpriteSheet,
};
use pixel_gfx::util::{Point, UiRect};

fn sheet() -> SpriteSheet {
    let mut s = SpriteSheet::new();
    let dense: Vec<u8> = (0..64).map(|i| 1 + (i % 7) as u8).collect();
    s.insert(1, G1Element::raw(8, 8, dense.clone())).unwrap();
    s.insert(2, G1Element::rle(8, 8, &dense).unwrap()).unwrap();
    s.insert(3, G1Element::raw(5, 3, vec![4; 15]).with_offset(-2, -1)).unwrap();
    s
}

/// Physical window (3, 2) 6x5 of a 16x12 buffer, addressed at `zoom`.
fn window_target(fb: &mut FrameBuffer, zoom: u8) -> RenderTarget<'_> {
    let start = (2 * fb.width + 3) as usize;
    RenderTarget::new(&mut fb.content[start..], 3 << zoom, 2 << zoom, 6 << zoom, 5 << zoom, 10, zoom)
}

#[test]
fn sprites_never_write_outside_the_target() {
    let s = sheet();
    let pal = PaletteTable::new();
    for zoom in 0..=3u8 {
        for image in [1, 2, 3] {
            for y in (-40..60).step_by(3) {
                for x in (-40..80).step_by(3) {
                    let mut fb = FrameBuffer::new(16, 12);
                    draw_image(&mut window_target(&mut fb, zoom), &s, &pal, Point::new(x, y), ImageId::new(image), None);
                    for py in 0..fb.height {
                        for px in 0..fb.width {
                            let inside = (3..9).contains(&px) && (2..7).contains(&py);
                            if !inside {
                                assert_eq!(
                                    fb.get(px, py),
                                    0,
                                    "zoom {} image {} at ({}, {}) wrote ({}, {})",
                                    zoom,
                                    image,
                                    x,
                                    y,
                                    px,
                                    py
                                );
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn sprite_left_of_the_target_is_a_no_op() {
    let s = sheet();
    let pal = PaletteTable::new();
    let mut fb = FrameBuffer::new(16, 16);
    {
        let mut rt = fb.clip(UiRect::new(8, 0, 8, 16)).unwrap();
        draw_image(&mut rt, &s, &pal, Point::new(-1, 0), ImageId::new(1), None);
        draw_image(&mut rt, &s, &pal, Point::new(-1, 0), ImageId::new(2), None);
    }
    assert!(fb.content.iter().all(|p| *p == 0));
}

#[test]
fn zoom_sprites_recurse_down_to_the_smallest_variant() {
    let mut s = SpriteSheet::new();
    // 8x8 at zoom 0, 4x4 one level down, 2x2 below that
    s.insert(10, G1Element::raw(2, 2, vec![3; 4])).unwrap();
    s.insert(20, G1Element::raw(4, 4, vec![2; 16]).with_zoom_sprites(10)).unwrap();
    s.insert(30, G1Element::raw(8, 8, vec![1; 64]).with_zoom_sprites(10)).unwrap();
    let pal = PaletteTable::new();

    let mut z1 = vec![0u8; 64];
    let mut rt = RenderTarget::new(&mut z1, 0, 0, 16, 16, 0, 1);
    draw_image(&mut rt, &s, &pal, Point::new(0, 0), ImageId::new(30), None);
    assert_eq!(z1.iter().filter(|p| **p == 2).count(), 16);

    let mut z2 = vec![0u8; 16];
    let mut rt = RenderTarget::new(&mut z2, 0, 0, 16, 16, 0, 2);
    draw_image(&mut rt, &s, &pal, Point::new(0, 0), ImageId::new(30), None);
    assert_eq!(z2.iter().filter(|p| **p == 3).count(), 4);
    assert_eq!(z2.iter().filter(|p| **p != 0).count(), 4);
}

#[test]
fn inverted_rects_are_no_ops() {
    let pal = PaletteTable::new();
    let mut fb = FrameBuffer::new(10, 10);
    fill_rect(&mut fb.render_target(), &pal, 5, 0, 4, 9, 7, RectFlags::empty());
    fill_rect(&mut fb.render_target(), &pal, 0, 5, 9, 4, 7, RectFlags::empty());
    assert!(fb.content.iter().all(|p| *p == 0));
}

#[test]
fn horizontal_line_paints_exactly_its_pixels() {
    let mut fb = FrameBuffer::new(10, 10);
    draw_line(&mut fb.render_target(), Point::new(0, 0), Point::new(4, 0), 6);
    for y in 0..10 {
        for x in 0..10 {
            let expect = if y == 0 && x <= 4 { 6 } else { 0 };
            assert_eq!(fb.get(x, y), expect, "({}, {})", x, y);
        }
    }
}

#[test]
fn cross_hatching_keeps_its_phase_under_clipping() {
    let pal = PaletteTable::new();
    let mut full = FrameBuffer::new(8, 8);
    fill_rect(&mut full.render_target(), &pal, 0, 0, 7, 7, 5, RectFlags::CROSS_HATCHING);

    let mut clipped = FrameBuffer::new(8, 8);
    {
        let mut rt = clipped.clip(UiRect::new(3, 2, 5, 6)).unwrap();
        fill_rect(&mut rt, &pal, 0, 0, 7, 7, 5, RectFlags::CROSS_HATCHING);
    }
    for y in 2..8 {
        for x in 3..8 {
            assert_eq!(clipped.get(x, y), full.get(x, y), "({}, {})", x, y);
        }
    }
}

#[test]
fn inset_panel_through_the_context() {
    let f = Fixture::new();
    let ctx = f.ctx();
    let mut fb = FrameBuffer::new(6, 6);
    ctx.fill_rect_inset(
        &mut fb.render_target(),
        0,
        0,
        5,
        5,
        AdvancedColour::new(Colour::Blue),
        RectInsetFlags::BORDER_INSET,
    );
    // sunken: dark top left, light bottom right
    assert_ne!(fb.get(0, 2), fb.get(5, 2));
    assert_ne!(fb.get(2, 0), fb.get(2, 5));
    assert_ne!(fb.get(2, 2), 0);
}

#[test]
fn clear_fills_the_whole_target() {
    let f = Fixture::new();
    let ctx = f.ctx();
    let mut fb = FrameBuffer::new(4, 3);
    ctx.clear_single(&mut fb.render_target(), 12);
    assert!(fb.content.iter().all(|p| *p == 12));
    ctx.clear(&mut fb.render_target(), 0x0102_0304);
    assert!(fb.content.iter().all(|p| *p == 4));
}
