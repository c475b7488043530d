//! Host-boundary session.
//!
//! A host that isolates encoding behind a message channel (a worker, a subprocess, an FFI
//! shim) keeps one [`Session`] per output file and feeds it [`Request`]s in order:
//! configure, add streams, add frames, finish. All encoder state lives in the session value
//! the host owns; nothing is global.

use crate::encode::blob::AviBlob;
use crate::encode::container::{Container, Layout, StreamId};
use crate::foundation::core::Settings;
use crate::foundation::error::AviResult;

/// One message across the host boundary. Serialized with an `op` tag, e.g.
/// `{"op":"add_stream","fps":25,"width":4,"height":2}`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    /// Set the global dimensions recorded in the main header.
    Configure {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Append a stream.
    AddStream {
        /// Frames per second.
        fps: u32,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Append one RGBA frame to a stream.
    AddFrame {
        /// Target stream.
        stream: StreamId,
        /// Interleaved RGBA bytes, `width * height * 4` long.
        rgba: Vec<u8>,
    },
    /// Build the file and reset the session.
    Finish,
}

/// Reply to a [`Request`], tagged by `reply` when serialized.
#[derive(Debug, serde::Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Response {
    /// Settings applied.
    Configured,
    /// Stream appended.
    StreamAdded {
        /// Handle of the new stream.
        stream: StreamId,
    },
    /// Frame appended; `frames` is the stream's new frame count.
    FrameAdded {
        /// Stream the frame went to.
        stream: StreamId,
        /// Frames now in that stream.
        frames: usize,
    },
    /// The finished file.
    Finished {
        /// File bytes and MIME type.
        blob: AviBlob,
    },
}

/// Encoder state for one output file, owned by the host.
#[derive(Debug, Default)]
pub struct Session {
    container: Container,
}

impl Session {
    /// Start a session with an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Container built so far.
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Set the global dimensions.
    pub fn configure(&mut self, settings: Settings) -> AviResult<()> {
        self.container.configure(settings)
    }

    /// Append a stream.
    pub fn add_stream(&mut self, fps: u32, width: u32, height: u32) -> AviResult<StreamId> {
        self.container.add_stream(fps, width, height)
    }

    /// Append an RGBA frame, returning the stream's new frame count.
    pub fn add_frame(&mut self, stream: StreamId, rgba: &[u8]) -> AviResult<usize> {
        self.container.push_rgba(stream, rgba)?;
        Ok(self.container.stream(stream)?.frame_count())
    }

    /// Layout the file would have if finished now.
    pub fn layout(&self) -> AviResult<Layout> {
        self.container.layout()
    }

    /// Build the file and start over with an empty container.
    ///
    /// On error the session keeps its container untouched.
    pub fn finish(&mut self) -> AviResult<AviBlob> {
        let blob = self.container.finish()?;
        self.container = Container::new();
        Ok(blob)
    }

    /// Dispatch one request.
    pub fn handle(&mut self, request: Request) -> AviResult<Response> {
        match request {
            Request::Configure { width, height } => {
                self.configure(Settings { width, height })?;
                Ok(Response::Configured)
            }
            Request::AddStream { fps, width, height } => {
                let id = self.add_stream(fps, width, height)?;
                tracing::debug!(stream = id.0, fps, width, height, "stream added");
                Ok(Response::StreamAdded { stream: id })
            }
            Request::AddFrame { stream, rgba } => {
                let frames = self.add_frame(stream, &rgba)?;
                Ok(Response::FrameAdded { stream, frames })
            }
            Request::Finish => {
                let blob = self.finish()?;
                tracing::debug!(len = blob.len(), "session finished");
                Ok(Response::Finished { blob })
            }
        }
    }

    /// Deserialize a JSON request, dispatch it and serialize the reply.
    pub fn handle_json(&mut self, json: &str) -> AviResult<String> {
        let request: Request = serde_json::from_str(json)?;
        let response = self.handle(request)?;
        Ok(serde_json::to_string(&response)?)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
