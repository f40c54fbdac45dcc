//! Error types shared by every `reel-rs` crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while configuring, loading or playing a sequence.
///
/// Playback itself is best effort: most of these end up in the log rather
/// than being returned to whoever constructed the sequence.
#[derive(Debug, Error)]
pub enum ReelError {
	/// The drawing surface named in the options does not exist
	#[error("Drawing surface not found: {id}")]
	SurfaceNotFound {
		/// Requested surface identifier
		id: String,
	},

	/// Options failed validation
	#[error("Invalid sequence options: {message}")]
	InvalidOptions {
		/// What was wrong
		message: String,
	},

	/// A single frame asset could not be loaded or decoded
	#[error("Failed to load frame asset {path}: {message}")]
	AssetLoad {
		/// Path that was requested
		path: PathBuf,
		/// Underlying failure
		message: String,
	},

	/// At least one frame failed during preloading
	#[error("Preload failed: {failed} of {total} frames could not be loaded")]
	PreloadFailed {
		/// Number of failed frames
		failed: usize,
		/// Number of frames requested
		total: usize,
	},

	/// The configured load timeout elapsed before every frame settled
	#[error("Preload timed out with {pending} of {total} frames still pending")]
	PreloadTimeout {
		/// Frames still outstanding
		pending: usize,
		/// Number of frames requested
		total: usize,
	},

	/// The frame source can no longer make progress on outstanding loads
	#[error("Preload stalled with {pending} frames that will never complete")]
	PreloadStalled {
		/// Frames still outstanding
		pending: usize,
	},

	/// A draw was attempted for a frame whose image is not available
	#[error("Frame {frame} has not finished loading")]
	FrameNotLoaded {
		/// Frame slot
		frame: usize,
	},

	/// Configuration source error
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl ReelError {
	/// Shorthand for [`ReelError::InvalidOptions`].
	pub fn invalid_options(message: impl Into<String>) -> Self {
		Self::InvalidOptions {
			message: message.into(),
		}
	}

	/// Shorthand for [`ReelError::AssetLoad`].
	pub fn asset_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
		Self::AssetLoad {
			path: path.into(),
			message: message.into(),
		}
	}
}
