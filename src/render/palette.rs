// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Palette maps and recolouring.
//!
//! A `PaletteMap` is a lookup from source palette index to destination index.
//! Catalog maps are borrowed, composed maps (secondary remaps, solid fills,
//! text colours) are owned; both go through the same `Cow`.
//!
//! Maps longer than 256 entries are blend tables: row `src - 1` holds the
//! result of drawing `src` over every destination index.

use crate::render::image_id::ImageId;
use lazy_static::lazy_static;
use std::borrow::Cow;
use std::collections::HashMap;

mod colour;
pub use colour::*;

/// First entry of the primary remap range.
pub const PRIMARY_REMAP_START: usize = 243;
/// First entry of the secondary remap range.
pub const SECONDARY_REMAP_START: usize = 202;
pub const REMAP_LENGTH: usize = 12;

lazy_static! {
    static ref IDENTITY: [u8; 256] = {
        let mut data = [0u8; 256];
        for (i, d) in data.iter_mut().enumerate() {
            *d = i as u8;
        }
        data
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteMap<'a> {
    data: Cow<'a, [u8]>,
}

impl<'a> PaletteMap<'a> {
    pub fn borrowed(data: &'a [u8]) -> Self {
        PaletteMap {
            data: Cow::Borrowed(data),
        }
    }

    pub fn owned(data: Vec<u8>) -> PaletteMap<'static> {
        PaletteMap {
            data: Cow::Owned(data),
        }
    }

    /// The default map, every index maps to itself.
    pub fn identity() -> PaletteMap<'static> {
        let table: &'static [u8; 256] = &IDENTITY;
        PaletteMap::borrowed(table)
    }

    /// Every non-zero index maps to `index`, index 0 stays transparent.
    pub fn solid(index: PaletteIndex) -> PaletteMap<'static> {
        let mut data = vec![index; 256];
        data[0] = palette_index::TRANSPARENT;
        PaletteMap::owned(data)
    }

    /// Copy of `primary` whose secondary remap range is taken from the
    /// primary remap range of `secondary`.
    pub fn compose_secondary(primary: &PaletteMap, secondary: &PaletteMap) -> PaletteMap<'static> {
        let mut data: Vec<u8> = (0..256).map(|i| primary.get(i as u8)).collect();
        for i in 0..REMAP_LENGTH {
            data[SECONDARY_REMAP_START + i] = secondary.get((PRIMARY_REMAP_START + i) as u8);
        }
        PaletteMap::owned(data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Out of range lookups yield 0.
    #[inline]
    pub fn get(&self, index: u8) -> u8 {
        self.data.get(index as usize).copied().unwrap_or(0)
    }

    /// Result of `src` drawn over `dst`. Single-table maps remap `dst`.
    #[inline]
    pub fn blend(&self, src: u8, dst: u8) -> u8 {
        if src == 0 || self.data.len() <= 256 {
            return self.get(dst);
        }
        let idx = (src as usize - 1) * 256 + dst as usize;
        self.data.get(idx).copied().unwrap_or(dst)
    }

    pub fn into_owned(self) -> PaletteMap<'static> {
        PaletteMap::owned(self.data.into_owned())
    }
}

impl Default for PaletteMap<'static> {
    fn default() -> Self {
        PaletteMap::identity()
    }
}

/// Source of recolour tables and shades.
pub trait PaletteCatalog {
    fn palette_for_colour(&self, colour: ExtColour) -> Option<PaletteMap<'_>>;

    /// Shade 0 (darkest) to 11 of a hue, read from its primary remap range.
    fn shade(&self, colour: Colour, shade: u8) -> PaletteIndex {
        self.palette_for_colour(colour.into())
            .map(|m| m.get((PRIMARY_REMAP_START + shade as usize).min(255) as u8))
            .unwrap_or(palette_index::TRANSPARENT)
    }
}

/// Recolour map for an image, `None` when the image draws with the default map.
pub fn palette_for_image<'c>(catalog: &'c dyn PaletteCatalog, image: ImageId) -> Option<PaletteMap<'c>> {
    if let (Some(p), Some(s)) = (image.primary(), image.secondary()) {
        let primary = catalog.palette_for_colour(p.into())?;
        let secondary = catalog.palette_for_colour(s.into())?;
        return Some(PaletteMap::compose_secondary(&primary, &secondary));
    }
    if let Some(t) = image.translucency() {
        return catalog.palette_for_colour(t);
    }
    if let Some(p) = image.primary() {
        return catalog.palette_for_colour(p.into());
    }
    None
}

/// In-memory palette catalog.
#[derive(Debug, Clone, Default)]
pub struct PaletteTable {
    maps: HashMap<ExtColour, Vec<u8>>,
}

impl PaletteTable {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert(&mut self, colour: ExtColour, map: Vec<u8>) {
        self.maps.insert(colour, map);
    }

    /// Hue remap that is the identity except for the primary remap range,
    /// which is filled with `shades`.
    pub fn insert_hue(&mut self, colour: Colour, shades: [u8; REMAP_LENGTH]) {
        let mut map = IDENTITY.to_vec();
        map[PRIMARY_REMAP_START..PRIMARY_REMAP_START + REMAP_LENGTH].copy_from_slice(&shades);
        self.insert(colour.into(), map);
    }
}

impl PaletteCatalog for PaletteTable {
    fn palette_for_colour(&self, colour: ExtColour) -> Option<PaletteMap<'_>> {
        self.maps.get(&colour).map(|m| PaletteMap::borrowed(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PaletteTable {
        let mut t = PaletteTable::new();
        t.insert_hue(Colour::Red, [100, 101, 102, 103, 104, 105, 106, 107, 108, 109, 110, 111]);
        t.insert_hue(Colour::Blue, [50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61]);
        t.insert(ExtColour::translucent(Colour::Blue, 1), vec![9; 256]);
        t
    }

    #[test]
    fn shades_read_the_primary_remap_range() {
        let t = table();
        assert_eq!(t.shade(Colour::Red, 0), 100);
        assert_eq!(t.shade(Colour::Red, 9), 109);
        assert_eq!(t.shade(Colour::Green, 9), 0);
    }

    #[test]
    fn solid_map_keeps_zero_transparent() {
        let m = PaletteMap::solid(77);
        assert_eq!(m.get(0), 0);
        assert_eq!(m.get(1), 77);
        assert_eq!(m.get(255), 77);
    }

    #[test]
    fn secondary_remap_lands_in_its_own_range() {
        let t = table();
        let id = ImageId::new(1).with_primary(Colour::Red).with_secondary(Colour::Blue);
        let m = palette_for_image(&t, id).unwrap();
        assert_eq!(m.get(243), 100);
        assert_eq!(m.get(202), 50);
        assert_eq!(m.get(213), 61);
        assert_eq!(m.get(20), 20);
    }

    #[test]
    fn resolution_prefers_translucency_over_primary() {
        let t = table();
        let id = ImageId::new(1)
            .with_primary(Colour::Red)
            .with_translucency(ExtColour::translucent(Colour::Blue, 1));
        assert_eq!(palette_for_image(&t, id).unwrap().get(3), 9);
        assert!(palette_for_image(&t, ImageId::new(1)).is_none());
        assert!(palette_for_image(&t, ImageId::new(1).with_primary(Colour::Green)).is_none());
    }

    #[test]
    fn blend_tables_index_by_source_row() {
        let mut data = vec![0u8; 512];
        data[5] = 11;
        data[256 + 5] = 22;
        let m = PaletteMap::owned(data);
        assert_eq!(m.blend(1, 5), 11);
        assert_eq!(m.blend(2, 5), 22);
        let single = PaletteMap::identity();
        assert_eq!(single.blend(3, 5), 5);
    }
}
