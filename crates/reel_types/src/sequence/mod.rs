//! Frame ranges and asset naming.
//!
//! A sequence is addressed two ways: by *slot* (`0..=len`, what playback
//! works with) and by *absolute index* (`start..=end`, what appears in the
//! file names on disk).

pub mod naming;
pub mod range;

pub use self::naming::{SequenceNaming, pad_frame_number};
pub use self::range::FrameRange;
