//! Wall-clock host environment and frame loop.

use std::{
	thread,
	time::{Duration, Instant},
};

use reel_types::playback::Environment;
use reel_vfs::FrameSource;

use crate::{sequence::CanvasSequence, surface::Surface};

/// Refresh interval of a 60 Hz display.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_micros(16_667);

/// [`Environment`] driven by the real clock.
///
/// Scroll geometry is whatever the owner last set. Frame requests are
/// collected and handed out by [`take_request`](Self::take_request); the
/// [`drive`] loop paces them at [`interval`](Self::interval).
#[derive(Debug, Clone)]
pub struct SystemHost {
	epoch: Instant,
	interval: Duration,
	scroll_offset: f64,
	scrollable_height: f64,
	viewport_height: f64,
	pending_request: bool,
}

impl SystemHost {
	/// Creates a host whose clock starts now.
	pub fn new() -> Self {
		Self {
			epoch: Instant::now(),
			interval: DEFAULT_REFRESH_INTERVAL,
			scroll_offset: 0.0,
			scrollable_height: 0.0,
			viewport_height: 0.0,
			pending_request: false,
		}
	}

	/// Sets the refresh interval.
	pub fn with_interval(mut self, interval: Duration) -> Self {
		self.interval = interval;
		self
	}

	/// Refresh interval.
	pub fn interval(&self) -> Duration {
		self.interval
	}

	/// Sets the scroll offset and scrollable height.
	pub fn set_scroll(&mut self, offset: f64, scrollable_height: f64) {
		self.scroll_offset = offset;
		self.scrollable_height = scrollable_height;
	}

	/// Sets the viewport height.
	pub fn set_viewport_height(&mut self, height: f64) {
		self.viewport_height = height;
	}

	/// Consumes the pending frame request, returning whether there was one.
	pub fn take_request(&mut self) -> bool {
		std::mem::take(&mut self.pending_request)
	}
}

impl Default for SystemHost {
	fn default() -> Self {
		Self::new()
	}
}

impl Environment for SystemHost {
	fn scroll_offset(&self) -> f64 {
		self.scroll_offset
	}

	fn scrollable_height(&self) -> f64 {
		self.scrollable_height
	}

	fn viewport_height(&self) -> f64 {
		self.viewport_height
	}

	fn now_ms(&self) -> f64 {
		self.epoch.elapsed().as_secs_f64() * 1000.0
	}

	fn schedule_next_frame(&mut self) {
		self.pending_request = true;
	}
}

/// Runs the frame loop of `sequence` on the calling thread.
///
/// Sleeps one refresh interval per requested frame, then calls
/// [`CanvasSequence::on_frame`]. Returns the number of frames run, which is
/// fewer than `max_frames` when the sequence stops requesting frames.
/// Without a limit, a sequence that keeps running loops forever.
pub fn drive<S, F>(sequence: &mut CanvasSequence<S, F>, host: &mut SystemHost, max_frames: Option<usize>) -> usize
where
	S: Surface,
	F: FrameSource<Image = S::Image>,
{
	let mut frames = 0;
	while max_frames.is_none_or(|max| frames < max) && host.take_request() {
		thread::sleep(host.interval());
		sequence.on_frame(host);
		frames += 1;
	}
	log::debug!("Frame loop ran {} frames, ending {}", frames, sequence.phase());
	frames
}
