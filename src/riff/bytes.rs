//! Little-endian primitives that write into a pre-sized buffer at absolute offsets.
//!
//! Nothing here allocates or grows the buffer. Callers size the destination from the layout
//! pass, so an out-of-range offset is a bug in that pass and panics like any slice overrun.

use byteorder::{ByteOrder, LittleEndian};

use crate::riff::fourcc::FourCC;

pub(crate) fn write_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

pub(crate) fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    LittleEndian::write_u16(&mut buf[offset..offset + 2], value);
}

/// Signed 16-bit fields (`rcFrame`). Values wider than 16 bits are truncated.
pub(crate) fn write_i16(buf: &mut [u8], offset: usize, value: i32) {
    LittleEndian::write_i16(&mut buf[offset..offset + 2], value as i16);
}

pub(crate) fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    LittleEndian::write_u32(&mut buf[offset..offset + 4], value);
}

/// Two's-complement 32-bit fields (negated `biHeight`, `dwQuality = -1`).
pub(crate) fn write_i32(buf: &mut [u8], offset: usize, value: i32) {
    LittleEndian::write_i32(&mut buf[offset..offset + 4], value);
}

/// A 32-bit value zero-extended into an 8-byte field.
pub(crate) fn write_u64_padded(buf: &mut [u8], offset: usize, value: u32) {
    LittleEndian::write_u64(&mut buf[offset..offset + 8], u64::from(value));
}

pub(crate) fn write_tag(buf: &mut [u8], offset: usize, tag: FourCC) {
    buf[offset..offset + 4].copy_from_slice(tag.as_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/riff/bytes.rs"]
mod tests;
