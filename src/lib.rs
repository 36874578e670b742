// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! pixel_gfx is a software renderer for 8-bit indexed colour games.
//!
//! It draws palette sprites (raw or RLE, at four zoom levels), flat,
//! translucent and bevelled rectangles, lines, and strings carrying in-band
//! control codes for fonts, colours, cursor moves and inline sprites.
//!
//! Sprites, palette tables and string templates come from the host through
//! the `SpriteCatalog`, `PaletteCatalog` and `StringFormatter` traits. All
//! text state lives in a `DrawingContext`, one per drawing thread.

/// errors reported by loaders and catalogs
pub mod error;
/// render configuration, global or per context
pub mod init;
/// log
#[cfg(feature = "log4rs")]
pub mod log;
/// Render module: render targets, palettes, sprites, primitives and text.
pub mod render;
/// points, rects and path helpers
pub mod util;

pub use error::GfxError;
