use crate::riff::bytes::{write_tag, write_u32};
use crate::riff::fourcc::{FourCC, ids};

/// Chunk id + length.
pub const CHUNK_HEADER_LEN: usize = 8;
/// `LIST` + length + list type.
pub const LIST_HEADER_LEN: usize = 12;

/// Payload length rounded up to the next even byte.
pub const fn padded_len(payload_len: usize) -> usize {
    payload_len + (payload_len & 1)
}

/// Bytes one chunk occupies on disk: header, payload and the pad byte after an odd payload.
pub const fn chunk_len(payload_len: usize) -> usize {
    CHUNK_HEADER_LEN + padded_len(payload_len)
}

/// Writes a chunk header at `offset`. `payload_len` is the unpadded payload length.
/// Returns the number of header bytes written.
pub(crate) fn write_chunk_header(
    buf: &mut [u8],
    offset: usize,
    id: FourCC,
    payload_len: u32,
) -> usize {
    write_tag(buf, offset, id);
    write_u32(buf, offset + 4, payload_len);
    CHUNK_HEADER_LEN
}

/// Writes a `LIST` header at `offset`. `size` counts the list type tag plus every nested chunk.
pub(crate) fn write_list_header(
    buf: &mut [u8],
    offset: usize,
    list_type: FourCC,
    size: u32,
) -> usize {
    write_tag(buf, offset, ids::LIST);
    write_u32(buf, offset + 4, size);
    write_tag(buf, offset + 8, list_type);
    LIST_HEADER_LEN
}

#[cfg(test)]
#[path = "../../tests/unit/riff/chunk.rs"]
mod tests;
