// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Sprite catalog entries.
//!
//! A `G1Element` is one sprite: size, draw offset and 8-bit pixel data in one
//! of two layouts.
//!
//! Raw sprites store `width * height` bytes row by row.
//!
//! RLE sprites start with a table of `height` little-endian `u16` offsets, one
//! per row, each pointing at the run list of that row:
//!
//! ```text
//! [len | 0x80 if last run] [x of first pixel] [len pixel bytes] ...
//! ```
//!
//! Pixels not covered by a run are transparent.

use crate::error::GfxError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct G1Flags: u16 {
        const HAS_TRANSPARENCY  = 1 << 0;
        const IS_RLE_COMPRESSED = 1 << 2;
        const HAS_ZOOM_SPRITES  = 1 << 4;
        const NO_ZOOM_DRAW      = 1 << 5;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Element {
    pub width: i16,
    pub height: i16,
    pub x_offset: i16,
    pub y_offset: i16,
    pub flags: G1Flags,
    /// Distance back to the half-size variant when `HAS_ZOOM_SPRITES` is set.
    pub zoom_offset: u32,
    pub data: Vec<u8>,
}

impl G1Element {
    /// Raw sprite, zero pixels transparent.
    pub fn raw(width: i16, height: i16, data: Vec<u8>) -> Self {
        G1Element {
            width,
            height,
            flags: G1Flags::HAS_TRANSPARENCY,
            data,
            ..Default::default()
        }
    }

    /// Encodes dense row-major pixels as an RLE sprite, zero pixels become gaps.
    /// Fails when a run starts past x 255 or a row offset passes 64 KiB.
    pub fn rle(width: i16, height: i16, pixels: &[u8]) -> Result<Self, GfxError> {
        Ok(G1Element {
            width,
            height,
            flags: G1Flags::HAS_TRANSPARENCY | G1Flags::IS_RLE_COMPRESSED,
            data: encode_rle(width, height, pixels)?,
            ..Default::default()
        })
    }

    pub fn with_offset(mut self, x: i16, y: i16) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn with_zoom_sprites(mut self, zoom_offset: u32) -> Self {
        self.flags |= G1Flags::HAS_ZOOM_SPRITES;
        self.zoom_offset = zoom_offset;
        self
    }

    pub fn is_rle(&self) -> bool {
        self.flags.contains(G1Flags::IS_RLE_COMPRESSED)
    }

    /// Runs of row `y`, empty for raw sprites or rows outside the sprite.
    pub fn rle_row(&self, y: i32) -> RleRuns<'_> {
        if !self.is_rle() || y < 0 || y >= self.height as i32 {
            return RleRuns::empty();
        }
        let at = y as usize * 2;
        match self.data.get(at..at + 2) {
            Some(b) => RleRuns::new(&self.data, u16::from_le_bytes([b[0], b[1]]) as usize),
            None => RleRuns::empty(),
        }
    }

    /// Pixel at sprite-local `(x, y)`, 0 outside or where no run covers it.
    pub fn pixel(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        if self.is_rle() {
            for run in self.rle_row(y) {
                let start = run.x as i32;
                if x >= start && x < start + run.pixels.len() as i32 {
                    return run.pixels[(x - start) as usize];
                }
            }
            0
        } else {
            let idx = (y * self.width as i32 + x) as usize;
            self.data.get(idx).copied().unwrap_or(0)
        }
    }

    /// Dense row-major copy of the sprite.
    pub fn decode(&self) -> Vec<u8> {
        let (w, h) = (self.width.max(0) as usize, self.height.max(0) as usize);
        if !self.is_rle() {
            let mut out = self.data.clone();
            out.resize(w * h, 0);
            return out;
        }
        let mut out = vec![0u8; w * h];
        for y in 0..h {
            for run in self.rle_row(y as i32) {
                let x = run.x as usize;
                if x >= w {
                    continue;
                }
                let n = run.pixels.len().min(w - x);
                out[y * w + x..y * w + x + n].copy_from_slice(&run.pixels[..n]);
            }
        }
        out
    }

    /// Checks the payload against the declared layout.
    pub fn validate(&self) -> Result<(), String> {
        if self.width < 0 || self.height < 0 {
            return Err(format!("negative size {}x{}", self.width, self.height));
        }
        let (w, h) = (self.width as usize, self.height as usize);
        if !self.is_rle() {
            if self.data.len() < w * h {
                return Err(format!("raw data has {} bytes, needs {}", self.data.len(), w * h));
            }
            return Ok(());
        }
        if self.data.len() < h * 2 {
            return Err("row offset table truncated".to_string());
        }
        for y in 0..h {
            let at = y * 2;
            let offset = u16::from_le_bytes([self.data[at], self.data[at + 1]]) as usize;
            if offset >= self.data.len() {
                return Err(format!("row {} offset {} out of range", y, offset));
            }
        }
        Ok(())
    }
}

/// One horizontal run of an RLE row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RleRun<'a> {
    pub x: u8,
    pub pixels: &'a [u8],
}

/// Bounds-checked walk over the runs of one RLE row. Truncated data ends the row.
#[derive(Debug, Clone)]
pub struct RleRuns<'a> {
    data: &'a [u8],
    pos: usize,
    done: bool,
}

impl<'a> RleRuns<'a> {
    fn new(data: &'a [u8], pos: usize) -> Self {
        RleRuns {
            data,
            pos,
            done: false,
        }
    }

    fn empty() -> Self {
        RleRuns {
            data: &[],
            pos: 0,
            done: true,
        }
    }
}

impl<'a> Iterator for RleRuns<'a> {
    type Item = RleRun<'a>;

    fn next(&mut self) -> Option<RleRun<'a>> {
        if self.done {
            return None;
        }
        let header = self.data.get(self.pos..self.pos + 2);
        let Some(&[len_byte, x]) = header else {
            self.done = true;
            return None;
        };
        let len = (len_byte & 0x7F) as usize;
        let start = self.pos + 2;
        let Some(pixels) = self.data.get(start..start + len) else {
            self.done = true;
            return None;
        };
        self.pos = start + len;
        self.done = len_byte & 0x80 != 0;
        Some(RleRun { x, pixels })
    }
}

fn encode_rle(width: i16, height: i16, pixels: &[u8]) -> Result<Vec<u8>, GfxError> {
    let (w, h) = (width.max(0) as usize, height.max(0) as usize);
    let mut table = Vec::with_capacity(h * 2);
    let mut body = Vec::new();
    for y in 0..h {
        let row: &[u8] = pixels.get(y * w..(y + 1) * w).unwrap_or(&[]);
        let offset = u16::try_from(h * 2 + body.len())
            .map_err(|_| GfxError::Encode(format!("row {} starts past the 16-bit offset range", y)))?;
        table.extend_from_slice(&offset.to_le_bytes());

        let mut runs: Vec<(usize, usize)> = vec![];
        let mut x = 0;
        while x < row.len() {
            if row[x] == 0 {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && row[x] != 0 && x - start < 0x7F {
                x += 1;
            }
            runs.push((start, x));
        }
        if runs.is_empty() {
            // a lone empty run still terminates the row
            body.extend_from_slice(&[0x80, 0]);
            continue;
        }
        let last = runs.len() - 1;
        for (i, (s, e)) in runs.into_iter().enumerate() {
            let mut len = (e - s) as u8;
            if i == last {
                len |= 0x80;
            }
            let x = u8::try_from(s).map_err(|_| GfxError::Encode(format!("row {} has a run at x {}", y, s)))?;
            body.push(len);
            body.push(x);
            body.extend_from_slice(&row[s..e]);
        }
    }
    table.extend(body);
    Ok(table)
}

/// Read access to sprites by index.
pub trait SpriteCatalog {
    fn element(&self, index: u32) -> Option<&G1Element>;
}

/// In-memory sprite catalog.
#[derive(Debug, Clone, Default)]
pub struct SpriteSheet {
    elements: HashMap<u32, G1Element>,
}

impl SpriteSheet {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, index: u32, element: G1Element) -> Result<(), GfxError> {
        element
            .validate()
            .map_err(|reason| GfxError::InvalidSprite { index, reason })?;
        self.elements.insert(index, element);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl SpriteCatalog for SpriteSheet {
    fn element(&self, index: u32) -> Option<&G1Element> {
        self.elements.get(&index)
    }
}
