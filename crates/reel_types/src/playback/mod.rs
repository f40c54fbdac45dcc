//! Playback synchronization.
//!
//! Playback turns a driving signal into a frame slot in two steps:
//!
//! 1. [`PlaybackState::synchronize`] refreshes the normalized progress from
//!    the signal of the active [`PlayMode`] (scroll offset, elapsed time, or
//!    nothing at all for manual control)
//! 2. [`select_frame`] rounds that progress onto `0..=len`
//!
//! Everything the state machine needs from the outside world comes through
//! the [`Environment`] trait, so the whole pipeline runs against a
//! [`VirtualEnvironment`] in tests.

pub mod environment;
pub mod mode;
pub mod selector;
pub mod state;

pub use self::environment::{Environment, VirtualEnvironment};
pub use self::mode::{PlayMode, ScrollBasis};
pub use self::selector::select_frame;
pub use self::state::{PlaybackState, Timing, auto_progress, rebased_time_base, scroll_progress};
