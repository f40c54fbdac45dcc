//! Benchmark helper utilities for reel-rs
//!
//! This module provides synthetic inputs shared by the benchmark suite: a
//! scripted clock for AUTO playback, scroll offsets for SCROLL playback, and
//! in-memory frame sources so no benchmark touches the filesystem.

use image::{Rgba, RgbaImage};
use reel_types::sequence::{FrameRange, SequenceNaming};
use reel_vfs::MemorySource;

/// Clock readings of `ticks` refreshes at `hz`, starting from zero.
pub fn refresh_timestamps(ticks: usize, hz: f64) -> Vec<f64> {
	let interval = 1000.0 / hz;
	(0..ticks).map(|tick| tick as f64 * interval).collect()
}

/// Scroll offsets sweeping `0..=height` in `steps` evenly spaced positions.
pub fn scroll_sweep(steps: usize, height: f64) -> Vec<f64> {
	if steps < 2 {
		return vec![0.0; steps];
	}
	(0..steps).map(|step| height * step as f64 / (steps - 1) as f64).collect()
}

/// Memory source holding one solid `width` x `height` frame per index of `range`.
///
/// Paths follow `naming`, so the source satisfies every request a store
/// built from the same range and naming makes.
pub fn memory_frames(range: FrameRange, naming: &SequenceNaming, width: u32, height: u32) -> MemorySource<RgbaImage> {
	let mut source = MemorySource::new();
	for index in range.iter() {
		let shade = (index.rem_euclid(256)) as u8;
		source.insert(naming.path(index), RgbaImage::from_pixel(width, height, Rgba([shade, shade, shade, 255])));
	}
	source
}
