use crate::foundation::error::{AviError, AviResult};

/// Bytes per stored pixel (B, G, R, X).
pub const BYTES_PER_PIXEL: u32 = 4;

/// Absolute 0-based frame index in stream timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Global pixel dimensions recorded in the main AVI header.
///
/// These are independent of the per-stream dimensions: a reader uses them as the
/// nominal movie size, while every stream describes its own raster in `strf`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Settings {
    /// Create validated settings with non-zero dimensions.
    pub fn new(width: u32, height: u32) -> AviResult<Self> {
        ensure_dimensions("settings", width, height)?;
        Ok(Self { width, height })
    }
}

pub(crate) fn ensure_dimensions(what: &str, width: u32, height: u32) -> AviResult<()> {
    if width == 0 || height == 0 {
        return Err(AviError::validation(format!(
            "{what} width/height must be non-zero (got {width}x{height})"
        )));
    }
    if height > i32::MAX as u32 {
        return Err(AviError::validation(format!(
            "{what} height {height} does not fit a signed 32-bit field"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_fps(fps: u32) -> AviResult<()> {
    if fps == 0 {
        return Err(AviError::validation("fps must be non-zero"));
    }
    Ok(())
}

/// Byte length of one `width x height` frame, checked against the u32 chunk length field.
pub(crate) fn frame_byte_len(width: u32, height: u32) -> AviResult<u32> {
    width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| {
            AviError::validation(format!(
                "a {width}x{height} frame does not fit a 32-bit chunk length"
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
