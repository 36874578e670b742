// RustPixel
// copyright zipxing@hotmail.com 2022～2025

#![allow(dead_code)]

use num_traits::FromPrimitive;
use pixel_gfx::init::RenderConfig;
use pixel_gfx::render::palette::{COLOUR_COUNT, REMAP_LENGTH};
use pixel_gfx::render::text::{GLYPH_COUNT, FONT_COUNT};
use pixel_gfx::render::{
    Colour, DrawingContext, G1Element, PaletteIndex, PaletteTable, SpriteSheet, StringFormatter, StringId,
};
use std::collections::HashMap;

pub const GLYPH_BASE: u32 = 1116;
pub const TEXT_PALETTE: u32 = 1115;
pub const ICON: u32 = 2000;
pub const ICON_W: i16 = 6;
pub const ICON_H: i16 = 5;

/// Every glyph is 7 rows of primary ink with a blank last column, spaces
/// are 2 wide and blank, everything else 4 wide.
pub const GLYPH_W: u16 = 4;
pub const SPACE_W: u16 = 2;

pub fn shade(c: Colour, s: u8) -> PaletteIndex {
    (c as u8) * 8 + s
}

/// Text colour `c` ramps to `100 + c`, `120 + c`, `140 + c`.
pub fn text_colour(c: u8) -> [u8; 3] {
    [100 + c, 120 + c, 140 + c]
}

pub fn sprites() -> SpriteSheet {
    let mut s = SpriteSheet::new();
    for i in 0..(GLYPH_COUNT * FONT_COUNT) as u32 {
        let chr = (i as usize % GLYPH_COUNT) as u8 + 32;
        let el = if chr == b' ' {
            G1Element::raw(SPACE_W as i16, 7, vec![0; SPACE_W as usize * 7])
        } else {
            let row = [1, 1, 1, 0];
            G1Element::raw(GLYPH_W as i16, 7, row.repeat(7))
        };
        s.insert(GLYPH_BASE + i, el).unwrap();
    }
    let mut ramp = vec![0u8; 14 * 4];
    for c in 0..14u8 {
        ramp[c as usize * 4..c as usize * 4 + 3].copy_from_slice(&text_colour(c));
    }
    s.insert(TEXT_PALETTE, G1Element::raw(56, 1, ramp)).unwrap();
    s.insert(ICON, G1Element::raw(ICON_W, ICON_H, vec![9; (ICON_W * ICON_H) as usize]))
        .unwrap();
    s
}

pub fn palettes() -> PaletteTable {
    let mut t = PaletteTable::new();
    for c in 0..COLOUR_COUNT {
        let Some(colour) = Colour::from_u8(c) else { continue };
        let mut shades = [0u8; REMAP_LENGTH];
        for (s, v) in shades.iter_mut().enumerate() {
            *v = shade(colour, s as u8);
        }
        t.insert_hue(colour, shades);
    }
    t
}

/// Template strings where `%` expands to the argument bytes. Unknown ids
/// format to their arguments.
#[derive(Default)]
pub struct Templates {
    pub strings: HashMap<StringId, Vec<u8>>,
}

impl Templates {
    pub fn with(mut self, id: StringId, template: &[u8]) -> Self {
        self.strings.insert(id, template.to_vec());
        self
    }
}

impl StringFormatter for Templates {
    fn format_string(&self, id: StringId, args: &[u8], out: &mut Vec<u8>) {
        match self.strings.get(&id) {
            Some(t) => {
                for b in t {
                    if *b == b'%' {
                        out.extend_from_slice(args);
                    } else {
                        out.push(*b);
                    }
                }
            }
            None => out.extend_from_slice(args),
        }
    }
}

pub struct Fixture {
    pub sprites: SpriteSheet,
    pub palettes: PaletteTable,
    pub strings: Templates,
}

impl Fixture {
    pub fn new() -> Self {
        Fixture {
            sprites: sprites(),
            palettes: palettes(),
            strings: Templates::default(),
        }
    }

    pub fn ctx(&self) -> DrawingContext<'_> {
        DrawingContext::with_config(&self.sprites, &self.palettes, &self.strings, RenderConfig::default())
    }
}
