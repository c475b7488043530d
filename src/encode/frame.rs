/// One raster image in stored order: B, G, R, X per pixel, rows top-down.
///
/// The X byte is always zero; the uncompressed 32-bit `BI_RGB` layout carries no alpha.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    data: Box<[u8]>,
}

impl Frame {
    /// Reorder interleaved RGBA bytes into stored BGRX order.
    ///
    /// No length validation happens here: a trailing group shorter than four bytes is copied
    /// through unchanged. [`Stream::push_frame`](crate::Stream::push_frame) rejects frames of
    /// the wrong size.
    pub fn from_rgba(rgba: &[u8]) -> Self {
        let mut data = vec![0u8; rgba.len()];
        let mut src = rgba.chunks_exact(4);
        let mut dst = data.chunks_exact_mut(4);
        for (d, s) in (&mut dst).zip(&mut src) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
            d[3] = 0;
        }
        dst.into_remainder().copy_from_slice(src.remainder());
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Adopt bytes that are already in stored order.
    pub fn from_bgrx(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Return `true` for a zero-length payload.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the stored bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame").field("len", &self.data.len()).finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frame.rs"]
mod tests;
