//! Scratch sequences on disk.

use std::path::Path;

use image::{Rgba, RgbaImage};
use reel_rs::prelude::*;
use tempfile::TempDir;

/// A numbered PNG sequence in its own temp directory, removed on drop.
pub struct SequenceDir {
	root: TempDir,
}

impl SequenceDir {
	/// Writes frames `start..=end` as `frame_<padded>.png`.
	///
	/// Frame `i` is a 4x4 image whose red channel is `i`, so the frame on a
	/// surface can be read back from any pixel.
	pub fn create(name: &str, start: i64, end: i64) -> Self {
		let root = tempfile::Builder::new().prefix(&format!("reel-playback-{name}-")).tempdir().unwrap();

		let range = FrameRange::new(start, end).unwrap();
		let naming = SequenceNaming::new(prefix(root.path()), ".png", range.pad_width());
		for index in range.iter() {
			frame_image(index).save(naming.path(index)).unwrap();
		}
		Self {
			root,
		}
	}

	/// Path prefix to put in `sequence_path`.
	pub fn prefix(&self) -> String {
		prefix(self.root.path())
	}

	/// Deletes one frame file.
	pub fn remove(&self, file_name: &str) {
		std::fs::remove_file(self.root.path().join(file_name)).unwrap();
	}

	/// Overwrites one frame file with bytes that are not an image.
	pub fn corrupt(&self, file_name: &str) {
		std::fs::write(self.root.path().join(file_name), b"not a png").unwrap();
	}
}

fn prefix(root: &Path) -> String {
	format!("{}/frame_", root.display())
}

/// Image written for absolute frame `index`.
pub fn frame_image(index: i64) -> RgbaImage {
	RgbaImage::from_pixel(4, 4, Rgba([index as u8, 64, 128, 255]))
}

/// Absolute frame index shown on a surface, read from its top-left pixel.
pub fn shown_frame(surface: &RgbaSurface) -> Option<u8> {
	let pixel = surface.pixels().get_pixel(0, 0);
	(pixel.0[3] == 255).then_some(pixel.0[0])
}
