//! rawavi builds RIFF/AVI files in memory from raw, uncompressed video frames.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: global [`Settings`] and one [`Stream`] per video track, in index order
//! 2. **Append**: RGBA frames, reordered on ingestion into stored BGRX [`Frame`]s
//! 3. **Lay out**: [`Container::layout`] computes every length and offset up front
//! 4. **Write**: [`Container::to_bytes`] allocates once and fills `hdrl`, the per-stream `indx`
//!    chunks and `movi`
//!
//! The output is a single buffer wrapped in an [`AviBlob`]; persisting it is the host's job.
//! Hosts that talk to the encoder through messages use a [`Session`].
//!
//! ```
//! use rawavi::{Container, Settings};
//!
//! let mut avi = Container::with_settings(Settings::new(4, 2)?)?;
//! let video = avi.add_stream(25, 4, 2)?;
//! avi.push_rgba(video, &[0u8; 4 * 2 * 4])?;
//! let blob = avi.finish()?;
//! assert_eq!(&blob.as_bytes()[..4], b"RIFF");
//! # Ok::<(), rawavi::AviError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod encode;
pub mod job;
pub mod riff;
pub mod session;

pub use encode::blob::{AviBlob, LEGACY_MIME_TYPE, MIME_TYPE, is_avi_mime};
pub use encode::container::{CONTAINER_HEADER_LEN, Container, Layout, StreamId, StreamLayout};
pub use encode::frame::Frame;
pub use encode::sink::{AviSink, FrameSink, RgbaFrame, SinkConfig};
pub use encode::stream::{
    IndexEntry, MAX_STREAMS, STREAM_HEADER_FIXED_LEN, Stream, stream_chunk_id,
};
pub use foundation::core::{FrameIndex, Settings};
pub use foundation::error::{AviError, AviResult};
pub use job::{EncodeJob, StreamJob};
pub use riff::fourcc::FourCC;
pub use session::{Request, Response, Session};
