// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! # Render module
//!
//! Software rendering into 8-bit indexed frame buffers.
//!
//! ## Submodules
//! - `target`: render targets, views with zoom onto a frame buffer
//! - `palette`: colours, palette maps and recolouring
//! - `image_id`: packed sprite references with recolour flags
//! - `g1`: sprite elements, RLE rows and the sprite catalog
//! - `blit`: clipped, zoomed sprite drawing
//! - `rect`: rectangles, bevelled panels and lines
//! - `text`: control-code text measurement, wrapping and drawing
//! - `context`: the drawing context tying it all together

pub mod blit;
pub mod context;
pub mod g1;
pub mod image_id;
pub mod palette;
pub mod rect;
pub mod target;
pub mod text;

pub use context::{DrawingContext, StringFormatter, StringId, TextDrawFlags, TextState, FORMAT_BUFFER_SIZE};
pub use g1::{G1Element, G1Flags, SpriteCatalog, SpriteSheet};
pub use image_id::ImageId;
pub use palette::{AdvancedColour, Colour, ExtColour, PaletteCatalog, PaletteIndex, PaletteMap, PaletteTable};
pub use rect::{RectFlags, RectInsetFlags};
pub use target::{FrameBuffer, RenderTarget};
pub use text::{Font, FontMetrics};
