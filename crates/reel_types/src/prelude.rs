//! Prelude module for `reel_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and functions.
//!
//! # Examples
//!
//! ```
//! use reel_types::prelude::*;
//!
//! let options = SequenceOptions::new("canvas", "frames/f_", 0, 24).with_mode(PlayMode::Auto);
//! let mut state = PlaybackState::new(options.mode, options.start_paused);
//! state.synchronize(&VirtualEnvironment::new(), &options.timing().unwrap());
//! ```

#[doc(inline)]
pub use crate::error::ReelError;

#[doc(inline)]
pub use crate::options::SequenceOptions;

#[doc(inline)]
pub use crate::playback::{
	Environment, PlayMode, PlaybackState, ScrollBasis, Timing, VirtualEnvironment, select_frame,
	state::FrameStep,
};

#[doc(inline)]
pub use crate::sequence::{FrameRange, SequenceNaming, pad_frame_number};
