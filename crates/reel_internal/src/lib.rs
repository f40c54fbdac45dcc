//! This module is separated into its own crate to enable simple dynamic linking for `reel-rs`, and should not be used directly.

/// `use reel_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use reel_player;
pub use reel_types;
pub use reel_vfs;

// Re-export commonly used types at crate root
pub use reel_player::{CanvasSequence, RgbaSurface, SequenceBuilder, SurfaceRegistry, SystemHost, drive};
pub use reel_types::{ReelError, options::SequenceOptions, playback::PlayMode};
pub use reel_vfs::{FsFrameSource, MemorySource};
