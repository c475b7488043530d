use crate::encode::blob::AviBlob;
use crate::encode::container::{Container, StreamId};
use crate::foundation::core::{FrameIndex, Settings};
use crate::foundation::error::{AviError, AviResult};

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

/// Straight (non-premultiplied) RGBA8 raster, rows top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
}

/// Sink contract for consuming frames in timeline order.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> AviResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaFrame) -> AviResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> AviResult<()>;
}

/// Sink that collects frames into a single-stream AVI file.
///
/// The main header uses the sink dimensions as its global settings. The finished file is
/// available from [`AviSink::take_blob`] after [`FrameSink::end`].
#[derive(Debug, Default)]
pub struct AviSink {
    container: Option<Container>,
    stream: Option<StreamId>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    blob: Option<AviBlob>,
}

impl AviSink {
    /// Create an idle sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Take the finished file, once `end` has run.
    pub fn take_blob(&mut self) -> Option<AviBlob> {
        self.blob.take()
    }
}

impl FrameSink for AviSink {
    fn begin(&mut self, cfg: SinkConfig) -> AviResult<()> {
        let mut container = Container::with_settings(Settings::new(cfg.width, cfg.height)?)?;
        let stream = container.add_stream(cfg.fps, cfg.width, cfg.height)?;

        self.container = Some(container);
        self.stream = Some(stream);
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.blob = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbaFrame) -> AviResult<()> {
        let (Some(container), Some(stream), Some(cfg)) =
            (self.container.as_mut(), self.stream, self.cfg)
        else {
            return Err(AviError::validation("avi sink: push_frame called before begin"));
        };

        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(AviError::validation(format!(
                "avi sink: frame {} pushed after frame {}",
                idx.0, last.0
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(AviError::validation(format!(
                "avi sink: frame is {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        container.push_rgba(stream, &frame.data)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> AviResult<()> {
        let container = self
            .container
            .take()
            .ok_or_else(|| AviError::validation("avi sink: end called before begin"))?;
        self.stream = None;
        self.blob = Some(container.finish()?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
