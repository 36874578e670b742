// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Text control-code engine.
//!
//! Strings are byte streams mixing glyph bytes with in-band control codes
//! ([`codes`]). [`Tokens`] parses them once for every consumer, so
//! measuring, wrapping, clipping and drawing agree on what each byte means.

pub mod codes;
mod draw;
mod font;
mod measure;
mod token;
mod wrap;

pub use codes::{ControlCode, TextColour};
pub use draw::join_wrapped;
pub use font::{Font, FontMetrics, FONT_COUNT, GLYPH_COUNT};
pub use measure::TextMetrics;
pub use token::{str_len, Token, Tokens};
pub use wrap::{wrap_string, wrapped_lines, WrapLayout, WrappedLines};
