/// MIME type declared for finished files.
pub const MIME_TYPE: &str = "video/avi";
/// Older spelling some hosts still expect; treated as equivalent to [`MIME_TYPE`].
pub const LEGACY_MIME_TYPE: &str = "video/msvideo";

/// Return `true` if `mime` names the AVI container (either spelling, case-insensitive).
pub fn is_avi_mime(mime: &str) -> bool {
    let mime = mime.trim();
    mime.eq_ignore_ascii_case(MIME_TYPE) || mime.eq_ignore_ascii_case(LEGACY_MIME_TYPE)
}

/// A finished AVI file, exclusively owned by the caller.
///
/// Materializing it (a file, a network body, a platform blob) is up to the host.
#[derive(Clone, PartialEq, Eq)]
pub struct AviBlob {
    bytes: Vec<u8>,
}

impl AviBlob {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    /// Borrow the file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the file bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// File length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Return `true` if the blob has no bytes (never the case for a built file).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for AviBlob {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for AviBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AviBlob")
            .field("mime", &MIME_TYPE)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Serializes as `{ "mime_type": ..., "bytes": [...] }`.
impl serde::Serialize for AviBlob {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct as _;

        let mut st = serializer.serialize_struct("AviBlob", 2)?;
        st.serialize_field("mime_type", MIME_TYPE)?;
        st.serialize_field("bytes", &self.bytes)?;
        st.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/blob.rs"]
mod tests;
