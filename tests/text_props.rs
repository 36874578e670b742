// RustPixel
// copyright zipxing@hotmail.com 2022～2025

mod common;

use common::*;
use pixel_gfx::render::text::codes::inline_sprite;
use pixel_gfx::render::text::{wrapped_lines, ControlCode, TextColour};
use pixel_gfx::render::Font;

fn samples() -> Vec<Vec<u8>> {
    let mut with_icon = b"go ".to_vec();
    with_icon.extend_from_slice(&inline_sprite(ICON));
    with_icon.extend_from_slice(b" now");
    vec![
        b"".to_vec(),
        b"x".to_vec(),
        b"hello".to_vec(),
        b"a b c d e".to_vec(),
        b"  leading".to_vec(),
        b"trailing  ".to_vec(),
        b"the quick brown fox".to_vec(),
        vec![b'a', TextColour::Red.byte(), b'b', b' ', ControlCode::FontSmall.byte(), b'c', b'd'],
        with_icon,
    ]
}

#[test]
fn text_that_fits_wraps_to_itself() {
    let f = Fixture::new();
    let mut ctx = f.ctx();
    for text in samples() {
        ctx.set_current_font(Font::MediumBold);
        let width = ctx.string_width(&text);
        for extra in 0..12u16 {
            ctx.set_current_font(Font::MediumBold);
            let mut buf = text.clone();
            let (max_width, breaks) = ctx.wrap_string(&mut buf, width + extra);
            assert_eq!(breaks, 0, "text {:?} at width {}", text, width + extra);
            assert_eq!(max_width, width, "text {:?} at width {}", text, width + extra);
            let lines: Vec<&[u8]> = wrapped_lines(&buf).collect();
            assert_eq!(lines, vec![&text[..]], "text {:?}", text);
        }
    }
}

#[test]
fn clipped_text_is_never_wider_than_asked() {
    let f = Fixture::new();
    let mut ctx = f.ctx();
    for text in samples() {
        for width in 0..60i16 {
            ctx.set_current_font(Font::MediumBold);
            let mut buf = text.clone();
            let got = ctx.clip_string(width, &mut buf);
            let measured = ctx.string_width(&buf) as i16;
            assert!(measured <= width, "text {:?} at width {} measured {}", text, width, measured);
            assert_eq!(got, measured, "text {:?} at width {}", text, width);
            if buf != text && !buf.is_empty() {
                assert!(buf.ends_with(b"..."), "text {:?} at width {}", text, width);
            }
        }
    }
}
