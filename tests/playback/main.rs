//! End-to-end playback tests for `reel-rs`
//!
//! Frames are real PNG files written to a scratch directory and decoded by
//! [`FsFrameSource`](reel_rs::prelude::FsFrameSource) on loader threads.

mod fixtures;
mod pipeline;
