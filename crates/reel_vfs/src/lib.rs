//! Frame asset loading for `reel-rs`.
//!
//! - [`source`]: where frame images come from ([`FsFrameSource`] for files on
//!   disk, [`MemorySource`] for images already in memory)
//! - [`store`]: the per-frame slots a sequence draws from
//! - [`preload`]: the all-settled barrier that gates playback start
//!
//! # Examples
//!
//! ```no_run
//! use reel_types::prelude::*;
//! use reel_vfs::{FrameStore, FsFrameSource, Preloader};
//!
//! # fn main() -> Result<(), ReelError> {
//! let options = SequenceOptions::new("canvas", "frames/f_", 0, 24);
//! let mut store = FrameStore::new(options.range()?, options.naming()?);
//! let mut preloader = Preloader::start(FsFrameSource::new(), &store, 0.0, None);
//!
//! let report = preloader.join(&mut store, None)?;
//! report.into_result(false)?;
//! assert!(store.get(0).is_some());
//! # Ok(())
//! # }
//! ```

pub mod preload;
pub mod source;
pub mod store;

pub use self::preload::{FrameFailure, PreloadReport, PreloadStatus, Preloader};
pub use self::source::{FrameSource, FsFrameSource, LoadCompletion, MemorySource};
pub use self::store::{FrameSlot, FrameStore};
