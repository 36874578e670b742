// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! ImageId addresses a sprite in the catalog together with how to recolour it.
//!
//! The packed `u32` form is what string buffers and legacy callers carry:
//!
//! ```text
//! bit  0-18  sprite index
//! bit 19-23  primary colour      (19-26 translucency table when bit 30 set)
//! bit 24-28  secondary colour
//! bit 29     primary remap
//! bit 30     translucent
//! bit 31     secondary remap
//! ```
//!
//! Noise masks are not representable in the packed form.

use crate::render::palette::{Colour, ExtColour};
use serde::{Deserialize, Serialize};

pub const IMAGE_INDEX_MASK: u32 = 0x7FFFF;

const PRIMARY_SHIFT: u32 = 19;
const SECONDARY_SHIFT: u32 = 24;
const PRIMARY_FLAG: u32 = 1 << 29;
const TRANSLUCENT_FLAG: u32 = 1 << 30;
const SECONDARY_FLAG: u32 = 1 << 31;

#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageId {
    index: u32,
    primary: Option<Colour>,
    secondary: Option<Colour>,
    translucency: Option<ExtColour>,
    noise_mask: u8,
}

impl ImageId {
    pub const fn new(index: u32) -> Self {
        ImageId {
            index: index & IMAGE_INDEX_MASK,
            primary: None,
            secondary: None,
            translucency: None,
            noise_mask: 0,
        }
    }

    pub fn from_u32(v: u32) -> Self {
        let mut id = ImageId::new(v);
        if v & TRANSLUCENT_FLAG != 0 {
            id.translucency = Some(ExtColour(((v >> PRIMARY_SHIFT) & 0xFF) as u8));
        } else if v & PRIMARY_FLAG != 0 {
            id.primary = Some(Colour::from_bits((v >> PRIMARY_SHIFT) as u8));
        }
        if v & SECONDARY_FLAG != 0 && v & TRANSLUCENT_FLAG == 0 {
            id.secondary = Some(Colour::from_bits((v >> SECONDARY_SHIFT) as u8));
            // a secondary remap always carries a primary one
            if id.primary.is_none() {
                id.primary = Some(Colour::from_bits((v >> PRIMARY_SHIFT) as u8));
            }
        }
        id
    }

    pub fn to_u32(self) -> u32 {
        let mut v = self.index;
        if let Some(t) = self.translucency {
            v |= TRANSLUCENT_FLAG | ((t.0 as u32) << PRIMARY_SHIFT);
            return v;
        }
        if let Some(p) = self.primary {
            v |= PRIMARY_FLAG | ((p as u32) << PRIMARY_SHIFT);
        }
        if let Some(s) = self.secondary {
            v |= SECONDARY_FLAG | ((s as u32) << SECONDARY_SHIFT);
        }
        v
    }

    pub fn index(self) -> u32 {
        self.index
    }

    pub fn primary(self) -> Option<Colour> {
        self.primary
    }

    pub fn secondary(self) -> Option<Colour> {
        self.secondary
    }

    pub fn translucency(self) -> Option<ExtColour> {
        self.translucency
    }

    pub fn noise_mask(self) -> u8 {
        self.noise_mask
    }

    pub fn has_primary(self) -> bool {
        self.primary.is_some()
    }

    pub fn has_secondary(self) -> bool {
        self.secondary.is_some()
    }

    pub fn is_blended(self) -> bool {
        self.translucency.is_some()
    }

    pub fn has_noise_mask(self) -> bool {
        self.noise_mask != 0
    }

    pub fn with_index(self, index: u32) -> Self {
        ImageId {
            index: index & IMAGE_INDEX_MASK,
            ..self
        }
    }

    pub fn with_index_offset(self, offset: i32) -> Self {
        self.with_index(self.index.wrapping_add_signed(offset))
    }

    pub fn with_primary(self, c: Colour) -> Self {
        ImageId {
            primary: Some(c),
            ..self
        }
    }

    /// Implies a primary remap, black unless one is already set.
    pub fn with_secondary(self, c: Colour) -> Self {
        ImageId {
            primary: Some(self.primary.unwrap_or(Colour::Black)),
            secondary: Some(c),
            ..self
        }
    }

    pub fn with_translucency(self, t: ExtColour) -> Self {
        ImageId {
            translucency: Some(t),
            ..self
        }
    }

    /// Selector 1..=7 picks a noise mask sprite, 0 clears it.
    pub fn with_noise_mask(self, selector: u8) -> Self {
        ImageId {
            noise_mask: selector & 0x07,
            ..self
        }
    }
}

impl From<u32> for ImageId {
    fn from(v: u32) -> Self {
        ImageId::from_u32(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_masks_the_index_to_nineteen_bits() {
        let id = ImageId::from_u32(0x0008_1234);
        assert_eq!(id.index(), 0x0_1234);
        assert!(!id.has_primary());
    }

    #[test]
    fn it_decodes_packed_remaps() {
        let v = 42 | PRIMARY_FLAG | ((Colour::Red as u32) << PRIMARY_SHIFT);
        let id = ImageId::from_u32(v);
        assert_eq!(id.index(), 42);
        assert_eq!(id.primary(), Some(Colour::Red));
        assert_eq!(id.to_u32(), v);

        let id = ImageId::new(7).with_secondary(Colour::Blue);
        assert_eq!(id.primary(), Some(Colour::Black));
        assert_eq!(ImageId::from_u32(id.to_u32()), id);
    }

    #[test]
    fn translucency_uses_the_wide_field() {
        let id = ImageId::new(3).with_translucency(ExtColour(137));
        assert_eq!(ImageId::from_u32(id.to_u32()).translucency(), Some(ExtColour(137)));
    }

    #[test]
    fn index_offset_wraps_inside_the_mask() {
        let id = ImageId::new(100).with_primary(Colour::Grey);
        assert_eq!(id.with_index_offset(-40).index(), 60);
        assert_eq!(id.with_index_offset(-40).primary(), Some(Colour::Grey));
    }
}
