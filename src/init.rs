// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Render configuration.
//!
//! Sprite ids and layout margins the renderer needs but that belong to the
//! asset set rather than to the code. A process-wide copy is kept in a
//! `OnceLock`, the same way game configuration is handled:
//!
//! ```ignore
//! let cfg = load_render_config("assets/render.json")?;
//! init_render_config(cfg);
//! let ctx = DrawingContext::new(&sprites, &palettes, &strings);
//! ```
//!
//! A `DrawingContext` copies the global config at construction, so tests can
//! override a single context without touching the process state.

use crate::error::GfxError;
use crate::util::get_abs_path;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// First glyph sprite of the regular medium font (character 32).
    pub glyph_image_base: u32,
    /// Sprite whose raw bytes hold four palette indices per text colour.
    pub text_palette_image: u32,
    /// Noise mask sprites, entry 0 means "no mask".
    pub noise_mask_images: [u32; 8],
    /// Tallest glyph, used to skip glyphs of lines outside the target.
    pub max_glyph_height: i32,
    /// How far left of the target a string may start and still be drawn.
    pub offscreen_left_margin: i32,
    /// How far above the target a string may start and still be drawn.
    pub offscreen_top_margin: i32,
    pub underline_offset: i32,
    /// Clip widths below this empty the string.
    pub clip_min_width: i16,
    pub ellipsis: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            glyph_image_base: 1116,
            text_palette_image: 1115,
            noise_mask_images: [0, 3612, 3613, 3614, 3615, 3616, 3617, 3618],
            max_glyph_height: 19,
            offscreen_left_margin: 1280,
            offscreen_top_margin: 90,
            underline_offset: 11,
            clip_min_width: 6,
            ellipsis: "...".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self, GfxError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, GfxError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sprite index of a noise mask selector, `None` for selector 0.
    pub fn noise_mask_image(&self, selector: u8) -> Option<u32> {
        match selector {
            0 => None,
            s => self.noise_mask_images.get(s as usize).copied(),
        }
    }
}

/// Global static render configuration
pub static RENDER_CONFIG: OnceLock<RenderConfig> = OnceLock::new();

/// Initialize the global render configuration. Later calls are ignored.
pub fn init_render_config(cfg: RenderConfig) {
    if RENDER_CONFIG.set(cfg).is_err() {
        info!("render config already initialised, keeping the first one");
    }
}

/// Get the global render configuration, defaults if never initialised.
pub fn get_render_config() -> &'static RenderConfig {
    RENDER_CONFIG.get_or_init(RenderConfig::default)
}

/// Reads a JSON render config, relative paths resolve from the crate root.
pub fn load_render_config(file_path: &str) -> Result<RenderConfig, GfxError> {
    let fpstr = get_abs_path(file_path);
    let json = fs::read_to_string(&fpstr)?;
    let cfg = RenderConfig::from_json(&json)?;
    info!("render config loaded from {}", fpstr);
    Ok(cfg)
}
