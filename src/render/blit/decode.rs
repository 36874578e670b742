// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Raw and RLE sprite decoders, one instance per zoom level.
//!
//! Source coordinates step by `2^ZOOM` per destination pixel, so a zoomed
//! draw point-samples the sprite.

use super::{BlendOp, DrawPosArgs, SpriteArgs};
use crate::render::g1::G1Element;
use crate::render::palette::PaletteMap;
use crate::render::target::RenderTarget;

#[inline]
fn blit_pixel(op: BlendOp, src: u8, dst: &mut u8, palette: &PaletteMap) {
    let transparent = op.contains(BlendOp::TRANSPARENT);
    if transparent && src == 0 {
        return;
    }
    let pixel = match (op.contains(BlendOp::SRC), op.contains(BlendOp::DST)) {
        (true, true) => palette.blend(src, *dst),
        (true, false) => palette.get(src),
        (false, true) => palette.get(*dst),
        (false, false) => src,
    };
    if transparent && pixel == 0 {
        return;
    }
    *dst = pixel;
}

/// Noise masks tile over the sprite.
#[inline]
fn noise_allows(args: &SpriteArgs, x: i32, y: i32) -> bool {
    if !args.op.contains(BlendOp::NOISE) {
        return true;
    }
    match args.noise {
        Some(n) if n.width > 0 && n.height > 0 => {
            n.pixel(x.rem_euclid(n.width as i32), y.rem_euclid(n.height as i32)) != 0
        }
        _ => false,
    }
}

pub(super) fn decode_raw<const ZOOM: u8>(rt: &mut RenderTarget, args: &SpriteArgs, clip: &DrawPosArgs) {
    let zoom = 1i32 << ZOOM;
    let el: &G1Element = args.element;
    let src_w = el.width as i32;

    let mut src_y = clip.src_y;
    let mut dst_y = clip.dst_top;
    let mut rows = clip.height;
    while rows > 0 {
        if let Some(row) = rt.row_mut(dst_y) {
            let mut src_x = clip.src_x;
            let mut dst_x = clip.dst_left;
            let mut cols = clip.width;
            while cols > 0 {
                let src = el.data.get((src_y * src_w + src_x) as usize).copied();
                if let (Some(src), Some(dst)) = (src, row.get_mut(dst_x as usize)) {
                    if noise_allows(args, src_x, src_y) {
                        blit_pixel(args.op, src, dst, args.palette);
                    }
                }
                src_x += zoom;
                dst_x += 1;
                cols -= zoom;
            }
        }
        src_y += zoom;
        dst_y += 1;
        rows -= zoom;
    }
}

pub(super) fn decode_rle<const ZOOM: u8>(rt: &mut RenderTarget, args: &SpriteArgs, clip: &DrawPosArgs) {
    let zoom = 1i32 << ZOOM;
    let el: &G1Element = args.element;

    let mut src_y = clip.src_y;
    let mut height = clip.height;
    let mut dst_top = clip.dst_top;
    // rows above the sprite only appear after the zoom alignment shift
    if src_y < 0 {
        src_y += zoom;
        height -= zoom;
        dst_top += 1;
    }

    let mut i = 0;
    while i < height {
        let y = src_y + i;
        let dst_y = dst_top + (i >> ZOOM);
        i += zoom;
        let Some(row) = rt.row_mut(dst_y) else {
            continue;
        };
        for run in el.rle_row(y) {
            let mut x_start = run.x as i32 - clip.src_x;
            let mut count = run.pixels.len() as i32;
            let mut at = 0i32;
            if x_start > 0 {
                let rem = x_start & (zoom - 1);
                if rem != 0 {
                    x_start += zoom - rem;
                    count -= zoom - rem;
                    at += zoom - rem;
                }
            } else if x_start < 0 {
                at -= x_start;
                count += x_start;
                x_start = 0;
            }
            count = count.min(clip.width - x_start);

            let mut dst_x = clip.dst_left + (x_start >> ZOOM);
            while count > 0 {
                let src = run.pixels.get(at as usize).copied();
                if let (Some(src), Some(dst)) = (src, row.get_mut(dst_x as usize)) {
                    if noise_allows(args, run.x as i32 + at, y) {
                        blit_pixel(args.op, src, dst, args.palette);
                    }
                }
                count -= zoom;
                at += zoom;
                dst_x += 1;
            }
        }
    }
}
