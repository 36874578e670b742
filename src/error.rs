// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Error type for the fallible, non-drawing parts of the crate.
//! Drawing itself never fails: clipped or missing inputs are silent no-ops.

use std::fmt;

#[derive(Debug)]
pub enum GfxError {
    Io(std::io::Error),
    Config(serde_json::Error),
    Log(String),
    InvalidSprite { index: u32, reason: String },
    Encode(String),
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GfxError::Io(e) => write!(f, "io error: {}", e),
            GfxError::Config(e) => write!(f, "bad render config: {}", e),
            GfxError::Log(msg) => write!(f, "log init failed: {}", msg),
            GfxError::InvalidSprite { index, reason } => {
                write!(f, "invalid sprite {}: {}", index, reason)
            }
            GfxError::Encode(msg) => write!(f, "sprite encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for GfxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GfxError::Io(e) => Some(e),
            GfxError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GfxError {
    fn from(e: std::io::Error) -> Self {
        GfxError::Io(e)
    }
}

impl From<serde_json::Error> for GfxError {
    fn from(e: serde_json::Error) -> Self {
        GfxError::Config(e)
    }
}
