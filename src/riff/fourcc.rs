use std::str::FromStr;

use crate::foundation::error::AviError;

/// Four-character code identifying a RIFF chunk, list type or codec.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// Raw bytes, in file order.
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Lossy string view, for diagnostics.
    pub fn as_str(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl std::fmt::Debug for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FourCC(\"{}\")", self.as_str())
    }
}

impl std::fmt::Display for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// Parses a string of exactly four 7-bit ASCII characters.
impl FromStr for FourCC {
    type Err = AviError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 4] = s.as_bytes().try_into().map_err(|_| {
            AviError::validation(format!("fourcc '{s}' must be exactly 4 bytes"))
        })?;
        if !bytes.is_ascii() {
            return Err(AviError::validation(format!("fourcc '{s}' must be ASCII")));
        }
        Ok(Self(bytes))
    }
}

impl serde::Serialize for FourCC {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

/// Identifiers written by the AVI layout.
pub mod ids {
    use super::FourCC;

    /// Outer RIFF envelope.
    pub const RIFF: FourCC = FourCC(*b"RIFF");
    /// RIFF form type for AVI.
    pub const AVI: FourCC = FourCC(*b"AVI ");
    /// List chunk.
    pub const LIST: FourCC = FourCC(*b"LIST");
    /// Header list.
    pub const HDRL: FourCC = FourCC(*b"hdrl");
    /// Main AVI header.
    pub const AVIH: FourCC = FourCC(*b"avih");
    /// Per-stream list.
    pub const STRL: FourCC = FourCC(*b"strl");
    /// Stream header.
    pub const STRH: FourCC = FourCC(*b"strh");
    /// Stream format.
    pub const STRF: FourCC = FourCC(*b"strf");
    /// Stream index.
    pub const INDX: FourCC = FourCC(*b"indx");
    /// Movie data list.
    pub const MOVI: FourCC = FourCC(*b"movi");
    /// Video stream type.
    pub const VIDS: FourCC = FourCC(*b"vids");
    /// Uncompressed device-independent bitmap handler.
    pub const DIB: FourCC = FourCC(*b"DIB ");
}

#[cfg(test)]
#[path = "../../tests/unit/riff/fourcc.rs"]
mod tests;
