// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Sprite blitting.
//!
//! Every draw goes through the same pipeline:
//!
//! 1. look the sprite up, and above zoom 0 hand pre-scaled sprites down to a
//!    half resolution target (recursively),
//! 2. work out the clipped source window and physical destination
//!    ([`draw_pos_args`]),
//! 3. pick the decoder for (zoom, rle) from a table of const generic
//!    specialisations and run it with a [`BlendOp`] resolved once per call.
//!
//! Zero source pixels are never written.

use crate::render::g1::{G1Element, G1Flags, SpriteCatalog};
use crate::render::image_id::ImageId;
use crate::render::palette::{palette_for_image, Colour, PaletteCatalog, PaletteIndex, PaletteMap};
use crate::render::target::RenderTarget;
use crate::util::Point;
use bitflags::bitflags;
use log::trace;

mod decode;
use decode::{decode_raw, decode_rle};

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct BlendOp: u8 {
        /// skip zero pixels
        const TRANSPARENT = 1 << 0;
        /// remap the source pixel
        const SRC         = 1 << 1;
        /// remap the destination pixel
        const DST         = 1 << 2;
        /// skip pixels where the noise mask is zero
        const NOISE       = 1 << 3;
    }
}

impl BlendOp {
    pub fn for_image(image: ImageId, element: &G1Element, has_noise: bool) -> BlendOp {
        let mut op = BlendOp::empty();
        if element.flags.contains(G1Flags::HAS_TRANSPARENCY) || element.is_rle() {
            op |= BlendOp::TRANSPARENT;
        }
        if image.has_primary() {
            op |= BlendOp::SRC;
        }
        if image.is_blended() {
            op |= BlendOp::DST;
        }
        if has_noise {
            op |= BlendOp::NOISE;
        }
        op
    }
}

/// Clipped source window and physical destination of one sprite draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPosArgs {
    pub src_x: i32,
    pub src_y: i32,
    /// physical
    pub dst_left: i32,
    /// physical
    pub dst_top: i32,
    /// canvas units
    pub width: i32,
    /// canvas units
    pub height: i32,
}

/// Clips `element` drawn at `pos` against `rt`. `None` when nothing is visible.
///
/// Raw sprites snap the top edge down to the zoom grid, RLE sprites shift the
/// whole sprite up-left by `2^zoom - 1` and skip source rows instead. Both
/// snap the left edge up.
pub fn draw_pos_args<const ZOOM: u8, const RLE: bool>(
    rt: &RenderTarget,
    element: &G1Element,
    pos: Point,
) -> Option<DrawPosArgs> {
    if ZOOM > 0 && element.flags.contains(G1Flags::NO_ZOOM_DRAW) {
        return None;
    }
    let low = (1i32 << ZOOM) - 1;
    let high = !low;
    let mut pos = pos;
    if RLE && ZOOM > 0 {
        pos.x -= low;
        pos.y -= low;
    }

    let mut height = element.height as i32;
    let mut src_y = 0;
    let mut dst_top = pos.y + element.y_offset as i32;
    if RLE {
        dst_top -= rt.y;
    } else {
        dst_top = (dst_top & high) - rt.y;
    }
    if dst_top < 0 {
        height += dst_top;
        if height <= 0 {
            return None;
        }
        src_y -= dst_top;
        dst_top = 0;
    } else if RLE && ZOOM > 0 {
        src_y -= dst_top & low;
        height += dst_top & low;
    }
    let dst_bottom = dst_top + height;
    if dst_bottom > rt.height {
        height -= dst_bottom - rt.height;
    }
    if height <= 0 {
        return None;
    }
    dst_top >>= ZOOM;

    let mut width = element.width as i32;
    let mut src_x = 0;
    let mut dst_left = ((pos.x + element.x_offset as i32 + low) & high) - rt.x;
    if dst_left < 0 {
        width += dst_left;
        if width <= 0 {
            return None;
        }
        src_x -= dst_left;
        dst_left = 0;
    } else if RLE && ZOOM > 0 {
        src_x -= dst_left & low;
    }
    let dst_right = dst_left + width;
    if dst_right > rt.width {
        width -= dst_right - rt.width;
        if width <= 0 {
            return None;
        }
    }
    dst_left >>= ZOOM;

    Some(DrawPosArgs {
        src_x,
        src_y,
        dst_left,
        dst_top,
        width,
        height,
    })
}

/// Everything a decoder needs besides the target and the clip.
pub struct SpriteArgs<'a> {
    pub element: &'a G1Element,
    pub palette: &'a PaletteMap<'a>,
    pub noise: Option<&'a G1Element>,
    pub op: BlendOp,
}

type SpriteFn = fn(&mut RenderTarget, &SpriteArgs, Point);

fn draw_sprite<const ZOOM: u8, const RLE: bool>(rt: &mut RenderTarget, args: &SpriteArgs, pos: Point) {
    let Some(clip) = draw_pos_args::<ZOOM, RLE>(rt, args.element, pos) else {
        return;
    };
    if RLE {
        decode_rle::<ZOOM>(rt, args, &clip);
    } else {
        decode_raw::<ZOOM>(rt, args, &clip);
    }
}

/// Indexed by `[zoom_level][is_rle]`.
const SPRITE_FNS: [[SpriteFn; 2]; 4] = [
    [draw_sprite::<0, false>, draw_sprite::<0, true>],
    [draw_sprite::<1, false>, draw_sprite::<1, true>],
    [draw_sprite::<2, false>, draw_sprite::<2, true>],
    [draw_sprite::<3, false>, draw_sprite::<3, true>],
];

/// Draws `image` through `palette`, optionally gated by a noise mask sprite.
pub fn draw_image_palette_set(
    rt: &mut RenderTarget,
    sprites: &dyn SpriteCatalog,
    pos: Point,
    image: ImageId,
    palette: &PaletteMap,
    noise: Option<&G1Element>,
) {
    let Some(element) = sprites.element(image.index()) else {
        trace!("draw_image: sprite {} missing", image.index());
        return;
    };

    if rt.zoom_level > 0 && element.flags.contains(G1Flags::HAS_ZOOM_SPRITES) {
        let mut zoomed = rt.zoomed_out();
        let zoomed_pos = Point::new(pos.x >> 1, pos.y >> 1);
        let zoomed_image = image.with_index_offset(-(element.zoom_offset as i32));
        draw_image_palette_set(&mut zoomed, sprites, zoomed_pos, zoomed_image, palette, noise);
        return;
    }

    let args = SpriteArgs {
        element,
        palette,
        noise,
        op: BlendOp::for_image(image, element, noise.is_some()),
    };
    let zoom = (rt.zoom_level as usize).min(SPRITE_FNS.len() - 1);
    SPRITE_FNS[zoom][element.is_rle() as usize](rt, &args, pos);
}

/// Draws `image` recoloured the way its flags ask for.
pub fn draw_image(
    rt: &mut RenderTarget,
    sprites: &dyn SpriteCatalog,
    palettes: &dyn PaletteCatalog,
    pos: Point,
    image: ImageId,
    noise: Option<&G1Element>,
) {
    let palette = palette_for_image(palettes, image).unwrap_or_else(|| PaletteMap::identity());
    draw_image_palette_set(rt, sprites, pos, image, &palette, noise);
}

/// Silhouette of `image` in a single palette index.
pub fn draw_image_solid(
    rt: &mut RenderTarget,
    sprites: &dyn SpriteCatalog,
    pos: Point,
    image: ImageId,
    index: PaletteIndex,
) {
    let palette = PaletteMap::solid(index);
    let image = ImageId::new(image.index()).with_primary(Colour::Black);
    draw_image_palette_set(rt, sprites, pos, image, &palette, None);
}

/// Draws `image & mask` wherever the result is non-zero, both sprites placed
/// at `pos` plus the mask's offset. Zoomed targets point-sample both sprites
/// at the top left canvas pixel of every physical pixel.
pub fn draw_image_masked(
    rt: &mut RenderTarget,
    sprites: &dyn SpriteCatalog,
    pos: Point,
    image: ImageId,
    mask: ImageId,
) {
    let (Some(colour_el), Some(mask_el)) = (sprites.element(image.index()), sprites.element(mask.index())) else {
        return;
    };

    let width = colour_el.width.min(mask_el.width) as i32;
    let height = colour_el.height.min(mask_el.height) as i32;
    let offset = Point::new(pos.x + mask_el.x_offset as i32, pos.y + mask_el.y_offset as i32);

    let left = rt.x.max(offset.x);
    let top = rt.y.max(offset.y);
    let right = (offset.x + width).min(rt.x + rt.width);
    let bottom = (offset.y + height).min(rt.y + rt.height);
    if right <= left || bottom <= top {
        return;
    }

    // physical pixels whose canvas origin lies inside the overlap
    let z = rt.zoom_level;
    let round_up = (1i32 << z) - 1;
    let (rt_x, rt_y) = (rt.x, rt.y);
    let (px0, px1) = ((left - rt_x + round_up) >> z, (right - rt_x + round_up) >> z);
    let (py0, py1) = ((top - rt_y + round_up) >> z, (bottom - rt_y + round_up) >> z);

    for py in py0..py1 {
        let sy = rt_y + (py << z) - offset.y;
        let Some(row) = rt.row_mut(py) else {
            continue;
        };
        for px in px0..px1 {
            let sx = rt_x + (px << z) - offset.x;
            let v = colour_el.pixel(sx, sy) & mask_el.pixel(sx, sy);
            if v != 0 {
                if let Some(d) = row.get_mut(px as usize) {
                    *d = v;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::g1::SpriteSheet;
    use crate::render::palette::{ExtColour, PaletteTable};
    use crate::render::target::FrameBuffer;

    fn sheet() -> SpriteSheet {
        let mut s = SpriteSheet::new();
        s.insert(1, G1Element::raw(2, 2, vec![1, 2, 3, 4])).unwrap();
        s.insert(2, G1Element::rle(3, 2, &[0, 5, 0, 6, 0, 6]).unwrap()).unwrap();
        s.insert(3, G1Element::raw(2, 2, vec![0xFF, 0x0F, 0, 0xFF])).unwrap();
        s
    }

    #[test]
    fn raw_sprite_lands_at_pos_plus_offset() {
        let mut s = sheet();
        s.insert(9, G1Element::raw(2, 2, vec![1, 2, 3, 4]).with_offset(1, 2))
            .unwrap();
        let mut fb = FrameBuffer::new(6, 6);
        let pal = PaletteTable::new();
        draw_image(&mut fb.render_target(), &s, &pal, Point::new(2, 1), ImageId::new(9), None);
        assert_eq!(fb.get(3, 3), 1);
        assert_eq!(fb.get(4, 3), 2);
        assert_eq!(fb.get(3, 4), 3);
        assert_eq!(fb.get(4, 4), 4);
        assert_eq!(fb.content.iter().filter(|p| **p != 0).count(), 4);
    }

    #[test]
    fn clipping_drops_the_offscreen_part() {
        let s = sheet();
        let pal = PaletteTable::new();
        let mut fb = FrameBuffer::new(4, 4);
        draw_image(&mut fb.render_target(), &s, &pal, Point::new(-1, -1), ImageId::new(1), None);
        assert_eq!(fb.get(0, 0), 4);
        assert_eq!(fb.content.iter().filter(|p| **p != 0).count(), 1);
    }

    #[test]
    fn rle_gaps_keep_the_background() {
        let s = sheet();
        let pal = PaletteTable::new();
        let mut fb = FrameBuffer::filled(3, 2, 9);
        draw_image(&mut fb.render_target(), &s, &pal, Point::new(0, 0), ImageId::new(2), None);
        assert_eq!(fb.content, vec![9, 5, 9, 6, 9, 6]);
    }

    #[test]
    fn primary_remap_goes_through_the_hue_map() {
        let s = sheet();
        let mut pal = PaletteTable::new();
        let mut map: Vec<u8> = (0..=255).collect();
        map[5] = 50;
        map[6] = 60;
        pal.insert(ExtColour::from(Colour::Red), map);
        let mut fb = FrameBuffer::new(3, 2);
        let id = ImageId::new(2).with_primary(Colour::Red);
        draw_image(&mut fb.render_target(), &s, &pal, Point::new(0, 0), id, None);
        assert_eq!(fb.content, vec![0, 50, 0, 60, 0, 60]);
    }

    #[test]
    fn translucent_draw_remaps_the_destination() {
        let s = sheet();
        let mut pal = PaletteTable::new();
        let t = ExtColour::translucent(Colour::Grey, 1);
        pal.insert(t, (0..=255u8).map(|i| i.wrapping_add(100)).collect());
        let mut fb = FrameBuffer::filled(3, 2, 7);
        let id = ImageId::new(2).with_translucency(t);
        draw_image(&mut fb.render_target(), &s, &pal, Point::new(0, 0), id, None);
        assert_eq!(fb.content, vec![7, 107, 7, 107, 7, 107]);
    }

    #[test]
    fn solid_draw_keeps_the_silhouette() {
        let s = sheet();
        let mut fb = FrameBuffer::new(3, 2);
        draw_image_solid(&mut fb.render_target(), &s, Point::new(0, 0), ImageId::new(2), 33);
        assert_eq!(fb.content, vec![0, 33, 0, 33, 0, 33]);
    }

    #[test]
    fn masked_draw_ands_the_two_sprites() {
        let s = sheet();
        let mut fb = FrameBuffer::filled(2, 2, 8);
        draw_image_masked(&mut fb.render_target(), &s, Point::new(0, 0), ImageId::new(1), ImageId::new(3));
        assert_eq!(fb.content, vec![1, 2, 8, 4]);
    }

    #[test]
    fn masked_draw_honours_the_mask_when_zoomed() {
        let mut s = SpriteSheet::new();
        s.insert(1, G1Element::raw(4, 4, vec![5; 16])).unwrap();
        s.insert(2, G1Element::raw(4, 4, vec![0; 16])).unwrap();
        let mut half = vec![0u8; 16];
        half[..8].fill(0xFF);
        s.insert(3, G1Element::raw(4, 4, half)).unwrap();

        let mut storage = vec![0u8; 4];
        let mut rt = RenderTarget::new(&mut storage, 0, 0, 4, 4, 0, 1);
        draw_image_masked(&mut rt, &s, Point::new(0, 0), ImageId::new(1), ImageId::new(2));
        assert_eq!(storage, vec![0, 0, 0, 0]);

        let mut rt = RenderTarget::new(&mut storage, 0, 0, 4, 4, 0, 1);
        draw_image_masked(&mut rt, &s, Point::new(0, 0), ImageId::new(1), ImageId::new(3));
        // mask rows 0 and 1 are open, physical row 0 samples canvas row 0
        assert_eq!(storage, vec![5, 5, 0, 0]);
    }

    #[test]
    fn missing_sprite_is_a_no_op() {
        let s = sheet();
        let pal = PaletteTable::new();
        let mut fb = FrameBuffer::new(2, 2);
        draw_image(&mut fb.render_target(), &s, &pal, Point::new(0, 0), ImageId::new(77), None);
        assert!(fb.content.iter().all(|p| *p == 0));
    }

    #[test]
    fn zoom_sprites_are_drawn_from_the_smaller_variant() {
        let mut s = SpriteSheet::new();
        s.insert(10, G1Element::raw(1, 1, vec![3])).unwrap();
        s.insert(20, G1Element::raw(2, 2, vec![1; 4]).with_zoom_sprites(10))
            .unwrap();
        let pal = PaletteTable::new();
        let mut storage = vec![0u8; 4];
        let mut rt = RenderTarget::new(&mut storage, 0, 0, 4, 4, 0, 1);
        draw_image(&mut rt, &s, &pal, Point::new(0, 0), ImageId::new(20), None);
        assert_eq!(storage, vec![3, 0, 0, 0]);
    }

    #[test]
    fn no_zoom_draw_sprites_vanish_when_zoomed() {
        let mut s = SpriteSheet::new();
        let mut e = G1Element::raw(2, 2, vec![1; 4]);
        e.flags |= G1Flags::NO_ZOOM_DRAW;
        s.insert(5, e).unwrap();
        let pal = PaletteTable::new();
        let mut storage = vec![0u8; 4];
        let mut rt = RenderTarget::new(&mut storage, 0, 0, 4, 4, 0, 1);
        draw_image(&mut rt, &s, &pal, Point::new(0, 0), ImageId::new(5), None);
        assert!(storage.iter().all(|p| *p == 0));
    }

    #[test]
    fn raw_clip_snaps_to_the_zoom_grid() {
        let e = G1Element::raw(8, 8, vec![1; 64]);
        let mut storage = vec![0u8; 16];
        let rt = RenderTarget::new(&mut storage, 0, 0, 8, 8, 0, 1);
        let args = draw_pos_args::<1, false>(&rt, &e, Point::new(3, 3)).unwrap();
        // top snaps down to 2, left snaps up to 4
        assert_eq!(args.dst_top, 1);
        assert_eq!(args.dst_left, 2);
        assert_eq!(args.height, 6);
        assert_eq!(args.width, 4);
    }
}
