//! Core data types and playback state for the `reel-rs` project.
//!
//! # Overview
//!
//! - **Options**: [`options::SequenceOptions`], the construction-time settings of a sequence,
//!   loadable from TOML files and `REEL_*` environment variables
//! - **Sequence naming**: [`sequence::FrameRange`] and [`sequence::SequenceNaming`] map a
//!   logical frame to its zero-padded asset path
//! - **Playback**: [`playback::PlayMode`], the frame selector and the explicit
//!   [`playback::PlaybackState`] machine driven by an [`playback::Environment`]
//!
//! # Examples
//!
//! ```
//! use reel_types::prelude::*;
//!
//! let range = FrameRange::new(0, 120).unwrap();
//! let naming = SequenceNaming::new("frames/shot_", ".png", range.pad_width());
//! assert_eq!(naming.file_name(7), "frames/shot_007.png");
//!
//! assert_eq!(select_frame(0.5, range.len()), 60);
//! ```

pub mod error;
pub mod options;
pub mod playback;
pub mod sequence;

/// `use reel_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use error::ReelError;
