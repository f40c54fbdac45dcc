//! Construction options for an image sequence.
//!
//! Options are plain data so they can come from a TOML file, the
//! environment, or code. Callbacks are attached separately when the sequence
//! is built.
//!
//! # File format
//!
//! ```toml
//! surface_id = "hero"
//! sequence_path = "assets/hero/frame_"
//! sequence_start = 0
//! sequence_end = 120
//! file_extension = ".png"
//! mode = "AUTO"
//! fps = 30
//! play_once = true
//! ```
//!
//! Any key can be overridden with a `REEL_`-prefixed environment variable,
//! e.g. `REEL_FPS=12`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
	ReelError,
	playback::{PlayMode, ScrollBasis, Timing},
	sequence::{FrameRange, SequenceNaming},
};

/// Default asset file extension
pub const DEFAULT_FILE_EXTENSION: &str = ".png";

/// Default autoplay frame rate
pub const DEFAULT_FPS: f64 = 24.0;

/// Prefix of environment variables layered over file options
pub const ENV_PREFIX: &str = "REEL";

fn default_file_extension() -> String {
	DEFAULT_FILE_EXTENSION.to_string()
}

fn default_fps() -> f64 {
	DEFAULT_FPS
}

/// Settings of one image sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceOptions {
	/// Identifier of the drawing surface to render into
	pub surface_id: String,
	/// Path prefix of the frame assets
	pub sequence_path: String,
	/// First absolute frame index (inclusive)
	pub sequence_start: i64,
	/// Last absolute frame index (inclusive)
	pub sequence_end: i64,
	/// Asset file extension, dot included
	#[serde(default = "default_file_extension")]
	pub file_extension: String,
	/// What drives playback
	#[serde(default)]
	pub mode: PlayMode,
	/// Autoplay frame rate
	#[serde(default = "default_fps")]
	pub fps: f64,
	/// Start with autoplay paused
	#[serde(default)]
	pub start_paused: bool,
	/// Pause automatically after the first full pass
	#[serde(default)]
	pub play_once: bool,
	/// Denominator used for scroll-driven progress
	#[serde(default)]
	pub scroll_basis: ScrollBasis,
	/// Start playback even when some frames failed to load
	#[serde(default)]
	pub skip_failed_frames: bool,
	/// Give up preloading after this many milliseconds
	#[serde(default)]
	pub load_timeout_ms: Option<u64>,
}

impl SequenceOptions {
	/// Creates options with every optional field at its default.
	pub fn new(
		surface_id: impl Into<String>,
		sequence_path: impl Into<String>,
		sequence_start: i64,
		sequence_end: i64,
	) -> Self {
		Self {
			surface_id: surface_id.into(),
			sequence_path: sequence_path.into(),
			sequence_start,
			sequence_end,
			file_extension: default_file_extension(),
			mode: PlayMode::default(),
			fps: DEFAULT_FPS,
			start_paused: false,
			play_once: false,
			scroll_basis: ScrollBasis::default(),
			skip_failed_frames: false,
			load_timeout_ms: None,
		}
	}

	/// Sets the file extension.
	pub fn with_file_extension(mut self, extension: impl Into<String>) -> Self {
		self.file_extension = extension.into();
		self
	}

	/// Sets the play mode.
	pub fn with_mode(mut self, mode: PlayMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the autoplay frame rate.
	pub fn with_fps(mut self, fps: f64) -> Self {
		self.fps = fps;
		self
	}

	/// Sets whether autoplay starts paused.
	pub fn with_start_paused(mut self, start_paused: bool) -> Self {
		self.start_paused = start_paused;
		self
	}

	/// Sets whether playback stops after one pass.
	pub fn with_play_once(mut self, play_once: bool) -> Self {
		self.play_once = play_once;
		self
	}

	/// Sets the scroll basis.
	pub fn with_scroll_basis(mut self, scroll_basis: ScrollBasis) -> Self {
		self.scroll_basis = scroll_basis;
		self
	}

	/// Sets whether failed frames are tolerated.
	pub fn with_skip_failed_frames(mut self, skip: bool) -> Self {
		self.skip_failed_frames = skip;
		self
	}

	/// Sets the preload timeout.
	pub fn with_load_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
		self.load_timeout_ms = timeout_ms;
		self
	}

	/// Checks the invariants the rest of the pipeline relies on.
	pub fn validate(&self) -> Result<(), ReelError> {
		if self.surface_id.is_empty() {
			return Err(ReelError::invalid_options("surface_id must not be empty"));
		}
		if self.sequence_path.is_empty() {
			return Err(ReelError::invalid_options("sequence_path must not be empty"));
		}
		if !self.fps.is_finite() || self.fps <= 0.0 {
			return Err(ReelError::invalid_options(format!(
				"fps must be a positive number, got {}",
				self.fps
			)));
		}
		FrameRange::new(self.sequence_start, self.sequence_end)?;
		Ok(())
	}

	/// Frame range described by the options.
	pub fn range(&self) -> Result<FrameRange, ReelError> {
		FrameRange::new(self.sequence_start, self.sequence_end)
	}

	/// Naming scheme for the frame assets.
	pub fn naming(&self) -> Result<SequenceNaming, ReelError> {
		let range = self.range()?;
		Ok(SequenceNaming::new(&self.sequence_path, &self.file_extension, range.pad_width()))
	}

	/// Timing parameters for the playback state machine.
	pub fn timing(&self) -> Result<Timing, ReelError> {
		Ok(Timing::new(self.range()?.len(), self.fps).with_scroll_basis(self.scroll_basis))
	}

	/// Loads options from a configuration file, with `REEL_*` overrides.
	///
	/// The format is picked from the file extension (TOML, JSON, YAML, ...).
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReelError> {
		let path = path.as_ref();
		log::debug!("Loading sequence options from {}", path.display());
		let settings = config::Config::builder()
			.add_source(config::File::from(path))
			.add_source(env_source())
			.build()?;
		Self::from_config(settings)
	}

	/// Loads options from a TOML string, with `REEL_*` overrides.
	pub fn from_toml_str(source: &str) -> Result<Self, ReelError> {
		let settings = config::Config::builder()
			.add_source(config::File::from_str(source, config::FileFormat::Toml))
			.add_source(env_source())
			.build()?;
		Self::from_config(settings)
	}

	fn from_config(settings: config::Config) -> Result<Self, ReelError> {
		let options: Self = settings.try_deserialize()?;
		options.validate()?;
		Ok(options)
	}
}

fn env_source() -> config::Environment {
	config::Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}
