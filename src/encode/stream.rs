use crate::encode::frame::Frame;
use crate::foundation::core::{ensure_dimensions, ensure_fps, frame_byte_len};
use crate::foundation::error::{AviError, AviResult};
use crate::riff::bytes::{
    write_i16, write_i32, write_tag, write_u8, write_u16, write_u32, write_u64_padded,
};
use crate::riff::chunk::{
    CHUNK_HEADER_LEN, LIST_HEADER_LEN, chunk_len, write_chunk_header, write_list_header,
};
use crate::riff::fourcc::{FourCC, ids};

/// `AVISTREAMHEADER` payload.
const STRH_LEN: usize = 56;
/// `BITMAPINFOHEADER` payload.
const STRF_LEN: usize = 40;
/// `AVISTDINDEX` fields before the entry table.
const INDX_FIXED_LEN: usize = 24;
/// One `(offset, size)` index entry.
const INDEX_ENTRY_LEN: usize = 8;

/// Bytes of a stream header region with no frames: the `strl` list header, `strh`, `strf` and
/// the fixed part of `indx`.
pub const STREAM_HEADER_FIXED_LEN: usize =
    LIST_HEADER_LEN + CHUNK_HEADER_LEN + STRH_LEN + CHUNK_HEADER_LEN + STRF_LEN + CHUNK_HEADER_LEN
        + INDX_FIXED_LEN;

/// Streams addressable by a two-character chunk prefix.
pub const MAX_STREAMS: usize = 100;

const AVI_INDEX_OF_CHUNKS: u8 = 0x01;
const BITS_PER_PIXEL: u16 = 32;

/// Data chunk identifier for the stream at `index`: two digits followed by `db`.
///
/// The digits are the decimal rendering of `index`, zero-padded below 10. Files written by
/// earlier encoders use this scheme for indices 10-99 as well, even though the AVI convention
/// is hexadecimal (`0adb` rather than `10db`), and it is kept for compatibility with them.
pub fn stream_chunk_id(index: usize) -> AviResult<FourCC> {
    if index >= MAX_STREAMS {
        return Err(AviError::validation(format!(
            "stream index {index} has no two-character chunk prefix (max {})",
            MAX_STREAMS - 1
        )));
    }
    Ok(FourCC([
        b'0' + (index / 10) as u8,
        b'0' + (index % 10) as u8,
        b'd',
        b'b',
    ]))
}

/// Position and size of one frame chunk, as recorded in the `indx` chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct IndexEntry {
    /// Offset of the chunk header from the start of the stream's data run.
    pub offset: u32,
    /// Payload length plus the 8-byte chunk header.
    pub size: u32,
}

impl IndexEntry {
    /// Entry for a `len`-byte payload whose chunk header sits `offset` bytes into the data run.
    pub fn new(offset: usize, len: usize) -> AviResult<Self> {
        let size = len
            .checked_add(CHUNK_HEADER_LEN)
            .and_then(|size| u32::try_from(size).ok());
        match (u32::try_from(offset), size) {
            (Ok(offset), Some(size)) => Ok(Self { offset, size }),
            _ => Err(AviError::layout(format!(
                "index entry for a {len}-byte frame at offset {offset} does not fit 32 bits"
            ))),
        }
    }
}

/// One uncompressed video stream: frame rate, raster size and frames in temporal order.
#[derive(Clone, Debug)]
pub struct Stream {
    fps: u32,
    width: u32,
    height: u32,
    frame_len: u32,
    frames: Vec<Frame>,
}

impl Stream {
    /// Create an empty stream. `fps`, `width` and `height` must be non-zero.
    pub fn new(fps: u32, width: u32, height: u32) -> AviResult<Self> {
        ensure_fps(fps)?;
        ensure_dimensions("stream", width, height)?;
        let frame_len = frame_byte_len(width, height)?;
        if frame_len.checked_add(CHUNK_HEADER_LEN as u32).is_none() {
            return Err(AviError::validation(format!(
                "a {width}x{height} frame chunk does not fit a 32-bit size field"
            )));
        }
        Ok(Self {
            fps,
            width,
            height,
            frame_len,
            frames: Vec::new(),
        })
    }

    /// Frames per second (`dwRate`, with `dwScale = 1`).
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Expected byte length of every frame (`width * height * 4`).
    pub fn frame_len(&self) -> usize {
        self.frame_len as usize
    }

    /// Frames in temporal order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames appended so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Append a frame already in stored order. Its length must match the stream raster.
    pub fn push_frame(&mut self, frame: Frame) -> AviResult<()> {
        self.ensure_frame_len(frame.len())?;
        self.frames.push(frame);
        Ok(())
    }

    /// Append a frame given as interleaved RGBA bytes.
    pub fn push_rgba(&mut self, rgba: &[u8]) -> AviResult<()> {
        self.ensure_frame_len(rgba.len())?;
        self.frames.push(Frame::from_rgba(rgba));
        Ok(())
    }

    fn ensure_frame_len(&self, len: usize) -> AviResult<()> {
        if len != self.frame_len() {
            return Err(AviError::validation(format!(
                "frame is {len} bytes, expected {} for a {}x{} stream",
                self.frame_len, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Bytes [`Stream::write_header`] will write.
    pub fn header_len(&self) -> usize {
        STREAM_HEADER_FIXED_LEN + self.frames.len() * INDEX_ENTRY_LEN
    }

    /// Bytes [`Stream::write_data`] will write, pad bytes included.
    pub fn data_len(&self) -> usize {
        self.frames.iter().map(|f| chunk_len(f.len())).sum()
    }

    /// Index entries for the data run, offsets starting at 0.
    ///
    /// Offsets step over the pad byte that follows an odd-length frame, so
    /// `entries[i].offset` is always where frame `i`'s chunk header lands.
    ///
    /// Fails with [`AviError::Layout`] once an offset or size no longer fits 32 bits.
    pub fn index_entries(&self) -> AviResult<Vec<IndexEntry>> {
        let mut offset = 0usize;
        self.frames
            .iter()
            .map(|f| {
                let entry = IndexEntry::new(offset, f.len());
                offset += chunk_len(f.len());
                entry
            })
            .collect()
    }

    /// Write the `strl` list (`strh`, `strf`, `indx`) at offset 0 of `buf`.
    ///
    /// `data_offset` is the absolute file offset of this stream's first data chunk; index entry
    /// offsets are relative to it. Returns the bytes written, always [`Stream::header_len`].
    ///
    /// 32-bit fields are filled with `as` casts; [`Container`](crate::Container) rejects
    /// layouts whose sizes do not fit before any stream is written.
    pub fn write_header(&self, buf: &mut [u8], chunk_id: FourCC, data_offset: u32) -> usize {
        let n = self.frames.len();
        let width = self.width as i32;
        let height = self.height as i32;

        let mut at = write_list_header(
            buf,
            0,
            ids::STRL,
            (self.header_len() - CHUNK_HEADER_LEN) as u32,
        );

        at += write_chunk_header(buf, at, ids::STRH, STRH_LEN as u32);
        write_tag(buf, at, ids::VIDS);
        write_tag(buf, at + 4, ids::DIB);
        write_u32(buf, at + 8, 0); // flags
        write_u16(buf, at + 12, 1); // priority
        write_u16(buf, at + 14, 0); // language
        write_u32(buf, at + 16, 0); // initial frames
        write_u32(buf, at + 20, 1); // scale
        write_u32(buf, at + 24, self.fps); // rate
        write_u32(buf, at + 28, 0); // start
        write_u32(buf, at + 32, n as u32); // length
        write_u32(buf, at + 36, self.frame_len + CHUNK_HEADER_LEN as u32); // suggested buffer
        write_i32(buf, at + 40, -1); // quality: driver default
        write_u32(buf, at + 44, 0); // sample size: varies
        write_i16(buf, at + 48, 0);
        write_i16(buf, at + 50, 0);
        write_i16(buf, at + 52, width);
        write_i16(buf, at + 54, height);
        at += STRH_LEN;

        at += write_chunk_header(buf, at, ids::STRF, STRF_LEN as u32);
        write_u32(buf, at, STRF_LEN as u32);
        write_i32(buf, at + 4, width);
        // Negative height: rows are stored top-down.
        write_i32(buf, at + 8, -height);
        write_u16(buf, at + 12, 1); // planes
        write_u16(buf, at + 14, BITS_PER_PIXEL);
        write_u32(buf, at + 16, 0); // BI_RGB
        write_u32(buf, at + 20, 0); // image size, implied for BI_RGB
        write_u32(buf, at + 24, 0);
        write_u32(buf, at + 28, 0);
        write_u32(buf, at + 32, 0);
        write_u32(buf, at + 36, 0);
        at += STRF_LEN;

        let indx_len = INDX_FIXED_LEN + n * INDEX_ENTRY_LEN;
        at += write_chunk_header(buf, at, ids::INDX, indx_len as u32);
        write_u16(buf, at, (INDEX_ENTRY_LEN / 4) as u16); // longs per entry
        write_u8(buf, at + 2, 0); // sub-type
        write_u8(buf, at + 3, AVI_INDEX_OF_CHUNKS);
        write_u32(buf, at + 4, n as u32);
        write_tag(buf, at + 8, chunk_id);
        write_u64_padded(buf, at + 12, data_offset);
        write_u32(buf, at + 20, 0); // reserved
        at += INDX_FIXED_LEN;

        // Container::layout rejects files whose offsets would not fit u32.
        let mut offset = 0usize;
        for frame in &self.frames {
            debug_assert!(IndexEntry::new(offset, frame.len()).is_ok());
            write_u32(buf, at, offset as u32);
            write_u32(buf, at + 4, (frame.len() + CHUNK_HEADER_LEN) as u32);
            offset += chunk_len(frame.len());
            at += INDEX_ENTRY_LEN;
        }

        tracing::trace!(%chunk_id, frames = n, bytes = at, "wrote stream header");
        at
    }

    /// Write one `chunk_id` data chunk per frame at offset 0 of `buf`, each odd-length payload
    /// followed by a zero pad byte. Returns the bytes written, always [`Stream::data_len`].
    pub fn write_data(&self, buf: &mut [u8], chunk_id: FourCC) -> usize {
        let mut at = 0usize;
        for frame in &self.frames {
            at += write_chunk_header(buf, at, chunk_id, frame.len() as u32);
            buf[at..at + frame.len()].copy_from_slice(frame.as_bytes());
            at += frame.len();
            if frame.len() & 1 == 1 {
                write_u8(buf, at, 0);
                at += 1;
            }
        }

        tracing::trace!(%chunk_id, frames = self.frames.len(), bytes = at, "wrote stream data");
        at
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/stream.rs"]
mod tests;
