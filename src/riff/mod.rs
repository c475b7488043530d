//! RIFF building blocks: fourcc identifiers, byte-level encoders and chunk headers.

pub(crate) mod bytes;
/// Chunk and list header arithmetic.
pub mod chunk;
/// Four-character codes.
pub mod fourcc;
