use crate::encode::blob::AviBlob;
use crate::encode::frame::Frame;
use crate::encode::stream::{MAX_STREAMS, Stream, stream_chunk_id};
use crate::foundation::core::Settings;
use crate::foundation::error::{AviError, AviResult};
use crate::riff::bytes::{write_tag, write_u32};
use crate::riff::chunk::{CHUNK_HEADER_LEN, LIST_HEADER_LEN, write_chunk_header, write_list_header};
use crate::riff::fourcc::{FourCC, ids};

/// `MainAVIHeader` payload.
const AVIH_LEN: usize = 56;
/// `RIFF` + size + `AVI `.
const RIFF_HEADER_LEN: usize = 12;
/// Where the first `strl` list starts: after the `hdrl` list header and the `avih` chunk.
const FIRST_STREAM_HEADER_OFFSET: usize =
    RIFF_HEADER_LEN + LIST_HEADER_LEN + CHUNK_HEADER_LEN + AVIH_LEN;

/// Fixed header bytes of a file with no streams: `RIFF`, the `hdrl` list with `avih`, and the
/// `movi` list header.
pub const CONTAINER_HEADER_LEN: usize = FIRST_STREAM_HEADER_OFFSET + LIST_HEADER_LEN;

/// Nominal frame duration in `avih`. Readers take timing from each stream's rate/scale.
const MICROSECONDS_PER_FRAME: u32 = 66_665;
const PADDING_GRANULARITY: u32 = 2;

/// Handle to a stream inside a [`Container`]; also its stream index.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct StreamId(pub usize);

/// Placement of one stream, from the layout pass.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct StreamLayout {
    /// Data chunk identifier (`00db`, `01db`, ...).
    pub chunk_id: FourCC,
    /// Absolute offset of the stream's `strl` list.
    pub header_offset: usize,
    /// Bytes of the `strl` list.
    pub header_len: usize,
    /// Offset of the first data chunk, relative to the start of the `movi` payload.
    pub data_offset: usize,
    /// Bytes of the data run, pad bytes included.
    pub data_len: usize,
    /// Number of frames.
    pub frames: usize,
}

/// Result of the size/offset pass: every length and offset the writer will use.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Layout {
    /// Fixed container header bytes ([`CONTAINER_HEADER_LEN`]).
    pub header_len: usize,
    /// Per-stream placement, in stream index order.
    pub streams: Vec<StreamLayout>,
    /// Absolute offset of the first data chunk (just past the `movi` tag).
    pub movi_offset: usize,
    /// Bytes of all data runs.
    pub movi_data_len: usize,
    /// Exact output length.
    pub total_len: usize,
    /// Frames across all streams.
    pub total_frames: usize,
}

impl Layout {
    /// Bytes of all `strl` lists.
    pub fn stream_headers_len(&self) -> usize {
        self.streams.iter().map(|s| s.header_len).sum()
    }

    /// Absolute offset of `stream`'s first data chunk, as recorded in its `indx` chunk.
    pub fn absolute_data_offset(&self, stream: StreamId) -> Option<usize> {
        self.streams
            .get(stream.0)
            .map(|s| self.movi_offset + s.data_offset)
    }
}

/// An AVI file under construction: global settings plus streams in index order.
///
/// The container is append-only. [`Container::to_bytes`] lays everything out, allocates one
/// buffer of the exact final size and fills it; it never mutates the container.
#[derive(Clone, Debug, Default)]
pub struct Container {
    settings: Settings,
    streams: Vec<Stream>,
}

impl Container {
    /// Create an empty container with unconfigured (0x0) settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container with validated settings.
    pub fn with_settings(settings: Settings) -> AviResult<Self> {
        let mut c = Self::new();
        c.configure(settings)?;
        Ok(c)
    }

    /// Replace the global settings. Width and height must be non-zero.
    pub fn configure(&mut self, settings: Settings) -> AviResult<()> {
        self.settings = Settings::new(settings.width, settings.height)?;
        Ok(())
    }

    /// Current global settings.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Append a stream; its position fixes its index and chunk identifier.
    pub fn add_stream(&mut self, fps: u32, width: u32, height: u32) -> AviResult<StreamId> {
        if self.streams.len() >= MAX_STREAMS {
            return Err(AviError::validation(format!(
                "a container holds at most {MAX_STREAMS} streams"
            )));
        }
        self.streams.push(Stream::new(fps, width, height)?);
        Ok(StreamId(self.streams.len() - 1))
    }

    /// Borrow a stream.
    pub fn stream(&self, id: StreamId) -> AviResult<&Stream> {
        self.streams.get(id.0).ok_or(AviError::UnknownStream(id.0))
    }

    fn stream_mut(&mut self, id: StreamId) -> AviResult<&mut Stream> {
        self.streams
            .get_mut(id.0)
            .ok_or(AviError::UnknownStream(id.0))
    }

    /// Streams in index order.
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Append an RGBA frame to `id`.
    pub fn push_rgba(&mut self, id: StreamId, rgba: &[u8]) -> AviResult<()> {
        self.stream_mut(id)?.push_rgba(rgba)
    }

    /// Append a stored-order frame to `id`.
    pub fn push_frame(&mut self, id: StreamId, frame: Frame) -> AviResult<()> {
        self.stream_mut(id)?.push_frame(frame)
    }

    /// Frames across all streams.
    pub fn frame_count(&self) -> usize {
        self.streams.iter().map(Stream::frame_count).sum()
    }

    /// Fixed header bytes, independent of the streams.
    pub fn header_len(&self) -> usize {
        CONTAINER_HEADER_LEN
    }

    /// Size/offset pass over the streams.
    ///
    /// Fails if the file would not fit the 32-bit RIFF size field.
    pub fn layout(&self) -> AviResult<Layout> {
        let mut streams = Vec::with_capacity(self.streams.len());
        let mut header_offset = FIRST_STREAM_HEADER_OFFSET;
        let mut data_offset = 0usize;
        let mut total_frames = 0usize;

        for (i, s) in self.streams.iter().enumerate() {
            let sl = StreamLayout {
                chunk_id: stream_chunk_id(i)?,
                header_offset,
                header_len: s.header_len(),
                data_offset,
                data_len: s.data_len(),
                frames: s.frame_count(),
            };
            header_offset += sl.header_len;
            data_offset += sl.data_len;
            total_frames += sl.frames;
            streams.push(sl);
        }

        let movi_offset = header_offset + LIST_HEADER_LEN;
        let total_len = movi_offset + data_offset;
        if total_len - CHUNK_HEADER_LEN > u32::MAX as usize {
            return Err(AviError::layout(format!(
                "{total_len} bytes exceeds the 4 GiB limit of a RIFF file"
            )));
        }

        Ok(Layout {
            header_len: CONTAINER_HEADER_LEN,
            streams,
            movi_offset,
            movi_data_len: data_offset,
            total_len,
            total_frames,
        })
    }

    /// Serialize the whole file into one exactly-sized buffer.
    #[tracing::instrument(skip(self), fields(streams = self.streams.len()))]
    pub fn to_bytes(&self) -> AviResult<Vec<u8>> {
        let layout = self.layout()?;
        tracing::debug!(
            total_len = layout.total_len,
            movi_offset = layout.movi_offset,
            frames = layout.total_frames,
            "computed avi layout"
        );

        let mut buf = vec![0u8; layout.total_len];

        write_tag(&mut buf, 0, ids::RIFF);
        write_tag(&mut buf, 8, ids::AVI);
        let mut at = RIFF_HEADER_LEN;

        let hdrl_len = 4 + CHUNK_HEADER_LEN + AVIH_LEN + layout.stream_headers_len();
        at += write_list_header(&mut buf, at, ids::HDRL, hdrl_len as u32);
        at += write_chunk_header(&mut buf, at, ids::AVIH, AVIH_LEN as u32);
        self.write_main_header(&mut buf[at..at + AVIH_LEN], layout.total_frames);
        at += AVIH_LEN;

        for (s, sl) in self.streams.iter().zip(&layout.streams) {
            debug_assert_eq!(at, sl.header_offset);
            let data_offset = (layout.movi_offset + sl.data_offset) as u32;
            let n = s.write_header(&mut buf[at..], sl.chunk_id, data_offset);
            debug_assert_eq!(n, sl.header_len);
            at += n;
        }

        at += write_list_header(
            &mut buf,
            at,
            ids::MOVI,
            (4 + layout.movi_data_len) as u32,
        );
        debug_assert_eq!(at, layout.movi_offset);

        for (s, sl) in self.streams.iter().zip(&layout.streams) {
            let n = s.write_data(&mut buf[at..], sl.chunk_id);
            debug_assert_eq!(n, sl.data_len);
            at += n;
        }
        debug_assert_eq!(at, layout.total_len);

        write_u32(&mut buf, 4, (at - CHUNK_HEADER_LEN) as u32);
        Ok(buf)
    }

    /// Serialize into an [`AviBlob`] for the host to materialize.
    pub fn finish(&self) -> AviResult<AviBlob> {
        self.to_bytes().map(AviBlob::new)
    }

    fn write_main_header(&self, avih: &mut [u8], total_frames: usize) {
        write_u32(avih, 0, MICROSECONDS_PER_FRAME);
        write_u32(avih, 4, 0); // max bytes per second
        write_u32(avih, 8, PADDING_GRANULARITY);
        write_u32(avih, 12, 0); // flags
        write_u32(avih, 16, total_frames as u32);
        write_u32(avih, 20, 0); // initial frames
        write_u32(avih, 24, self.streams.len() as u32);
        write_u32(avih, 28, 0); // suggested buffer size
        write_u32(avih, 32, self.settings.width);
        write_u32(avih, 36, self.settings.height);
        for reserved in 0..4 {
            write_u32(avih, 40 + reserved * 4, 0);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/container.rs"]
mod tests;
