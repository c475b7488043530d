//! AVI assembly: frames, streams, the container layout engine and output sinks.
//!
//! Serialization is two-pass. Every component reports the exact bytes it will occupy
//! (`header_len`, `data_len`, [`container::Container::layout`]) before anything is written,
//! the container allocates the final buffer once, and each `write_*` call fills its region
//! and returns a byte count equal to the length reported earlier.

/// Finished output.
pub mod blob;
/// The container layout engine.
pub mod container;
/// Frame ingestion.
pub mod frame;
/// Frame-by-frame sinks.
pub mod sink;
/// Per-stream layout and serialization.
pub mod stream;
