//! Prelude module for `reel_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use reel_internal::prelude::*;
//!
//! let mut surfaces = SurfaceRegistry::new();
//! surfaces.insert("canvas", RgbaSurface::new(320, 180));
//!
//! let mut env = VirtualEnvironment::new();
//! let options = SequenceOptions::new("canvas", "frames/f_", 0, 24).with_mode(PlayMode::Auto);
//! let sequence = SequenceBuilder::new(options)
//!     .build(&mut surfaces, MemorySource::new(), &mut env)
//!     .unwrap();
//! assert_eq!(sequence.phase(), SequencePhase::Loading);
//! ```

// Re-export everything from reel_types::prelude
#[doc(inline)]
pub use reel_types::prelude::*;

#[doc(inline)]
pub use reel_vfs::{FrameSource, FrameStore, FsFrameSource, MemorySource, PreloadReport, PreloadStatus, Preloader};

#[doc(inline)]
pub use reel_player::{
	CanvasSequence, Rect, RgbaSurface, SequenceBuilder, SequencePhase, Surface, SurfaceProvider, SurfaceRegistry,
	SystemHost, TickOutcome, drive,
};

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use reel_types;

#[doc(inline)]
pub use reel_vfs;

#[doc(inline)]
pub use reel_player;
