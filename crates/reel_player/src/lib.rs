//! Rendering side of `reel-rs`.
//!
//! - [`surface`]: the [`Surface`] drawing trait, [`RgbaSurface`] and surface lookup
//! - [`sequence`]: [`CanvasSequence`], its render loop and playback controls
//! - [`host`]: [`SystemHost`], a wall-clock environment, and the [`drive`] loop
//!
//! # Examples
//!
//! ```no_run
//! use reel_player::{RgbaSurface, SequenceBuilder, SurfaceRegistry, SystemHost, drive};
//! use reel_types::prelude::*;
//! use reel_vfs::FsFrameSource;
//!
//! # fn main() -> Result<(), ReelError> {
//! let mut surfaces = SurfaceRegistry::new();
//! surfaces.insert("hero", RgbaSurface::new(640, 360));
//!
//! let options = SequenceOptions::from_file("hero.toml")?;
//! let mut host = SystemHost::new();
//! let mut sequence = SequenceBuilder::new(options)
//!     .on_all_loaded(|| println!("ready"))
//!     .build(&mut surfaces, FsFrameSource::new(), &mut host)?;
//!
//! drive(&mut sequence, &mut host, Some(600));
//! if let Some(surface) = sequence.surface() {
//!     surface.save("last_frame.png")?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod host;
pub mod sequence;
pub mod surface;

pub use self::host::{DEFAULT_REFRESH_INTERVAL, SystemHost, drive};
pub use self::sequence::{CanvasSequence, SequenceBuilder, SequencePhase, TickOutcome};
pub use self::surface::{Rect, RgbaSurface, Surface, SurfaceProvider, SurfaceRegistry};
