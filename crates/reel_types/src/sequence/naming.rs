//! Zero-padded frame file naming.
//!
//! Every frame asset is fetched from `prefix + padded index + extension`.
//! The padding width is the printed length of the sequence end, so a
//! `0..=120` sequence reads `shot_000.png` to `shot_120.png`.

use std::path::PathBuf;

/// Left-pads a frame number with zeros to `width` characters.
///
/// Negative numbers keep their sign in front and count it towards the width,
/// so the magnitude is padded to `width - 1`. Numbers that are already wide
/// enough are never truncated.
///
/// # Examples
///
/// ```
/// use reel_types::sequence::pad_frame_number;
///
/// assert_eq!(pad_frame_number(7, 3), "007");
/// assert_eq!(pad_frame_number(7, 1), "7");
/// assert_eq!(pad_frame_number(-3, 3), "-03");
/// assert_eq!(pad_frame_number(1234, 2), "1234");
/// ```
pub fn pad_frame_number(n: i64, width: usize) -> String {
	let magnitude = n.unsigned_abs();
	if n < 0 {
		format!("-{magnitude:0>pad$}", pad = width.saturating_sub(1))
	} else {
		format!("{magnitude:0>width$}")
	}
}

/// Derives asset paths for every absolute frame index of a sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceNaming {
	prefix: String,
	extension: String,
	width: usize,
}

impl SequenceNaming {
	/// Creates a naming scheme.
	///
	/// # Arguments
	/// * `prefix` - Path prefix placed before the padded number (may include directories)
	/// * `extension` - Suffix placed after it, dot included (e.g. `.png`)
	/// * `width` - Zero-padding width, normally [`FrameRange::pad_width`](super::FrameRange::pad_width)
	pub fn new(prefix: impl Into<String>, extension: impl Into<String>, width: usize) -> Self {
		Self {
			prefix: prefix.into(),
			extension: extension.into(),
			width,
		}
	}

	/// Padding width in characters.
	pub fn width(&self) -> usize {
		self.width
	}

	/// Full file name for an absolute frame index.
	pub fn file_name(&self, index: i64) -> String {
		format!("{}{}{}", self.prefix, pad_frame_number(index, self.width), self.extension)
	}

	/// [`file_name`](Self::file_name) as a path.
	pub fn path(&self, index: i64) -> PathBuf {
		PathBuf::from(self.file_name(index))
	}
}
