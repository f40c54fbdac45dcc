//! Explicit playback state machine.
//!
//! [`PlaybackState`] holds everything a render tick reads or writes: the
//! progress, the pause and loop-end flags, the time base used by autoplay,
//! and the last two selected frames. Its transitions are plain methods so a
//! tick can be replayed step by step against a virtual clock.

use super::{Environment, PlayMode, ScrollBasis, select_frame};

/// Fixed timing parameters of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
	/// Sequence length (`end - start`)
	pub length: usize,
	/// Autoplay frame rate
	pub fps: f64,
	/// How scroll offsets become progress
	pub scroll_basis: ScrollBasis,
}

impl Timing {
	/// Creates timing with the default scroll basis.
	pub fn new(length: usize, fps: f64) -> Self {
		Self {
			length,
			fps,
			scroll_basis: ScrollBasis::default(),
		}
	}

	/// Replaces the scroll basis.
	pub fn with_scroll_basis(mut self, scroll_basis: ScrollBasis) -> Self {
		self.scroll_basis = scroll_basis;
		self
	}

	/// Duration of one full pass through the sequence in milliseconds.
	pub fn loop_period_ms(&self) -> f64 {
		self.length as f64 / self.fps * 1000.0
	}
}

/// Progress derived from a scroll position.
///
/// Returns 0 when the denominator is not positive, i.e. when there is
/// nothing to scroll.
pub fn scroll_progress(offset: f64, scrollable_height: f64, viewport_height: f64, basis: ScrollBasis) -> f64 {
	let span = match basis {
		ScrollBasis::Document => scrollable_height,
		ScrollBasis::Viewport => scrollable_height - viewport_height,
	};
	if span.is_nan() || span <= 0.0 {
		return 0.0;
	}
	offset / span
}

/// Looping progress after `now - time_base` milliseconds of playback.
///
/// A non-positive period (single-frame sequence) always yields 0.
pub fn auto_progress(now_ms: f64, time_base_ms: f64, period_ms: f64) -> f64 {
	if period_ms.is_nan() || period_ms <= 0.0 {
		return 0.0;
	}
	(now_ms - time_base_ms).rem_euclid(period_ms) / period_ms
}

/// Time base that makes autoplay continue from `frame` at `now`.
pub fn rebased_time_base(now_ms: f64, frame: usize, fps: f64) -> f64 {
	now_ms - frame as f64 / fps * 1000.0
}

/// Result of selecting the frame for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
	/// Frame selected by the previous tick
	pub previous: usize,
	/// Frame selected by this tick
	pub current: usize,
	/// Whether the surface needs repainting
	pub redraw: bool,
}

/// Mutable playback state owned by a single sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
	mode: PlayMode,
	progress: f64,
	paused: bool,
	time_base: Option<f64>,
	rebase_pending: bool,
	loop_ended: bool,
	previous_frame: usize,
	current_frame: usize,
	first_tick: bool,
}

impl PlaybackState {
	/// Creates the state for a freshly built sequence.
	pub fn new(mode: PlayMode, start_paused: bool) -> Self {
		Self {
			mode,
			progress: 0.0,
			paused: start_paused,
			time_base: None,
			rebase_pending: false,
			loop_ended: false,
			previous_frame: 0,
			current_frame: 0,
			first_tick: true,
		}
	}

	/// Active play mode.
	pub fn mode(&self) -> PlayMode {
		self.mode
	}

	/// Progress computed by the last synchronization (or set manually).
	pub fn progress(&self) -> f64 {
		self.progress
	}

	/// Whether autoplay is paused.
	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Autoplay time base, once the first tick has set it.
	pub fn time_base(&self) -> Option<f64> {
		self.time_base
	}

	/// Whether the play position has reached the loop end since the last resume.
	pub fn loop_ended(&self) -> bool {
		self.loop_ended
	}

	/// Frame selected by the tick before the last one.
	pub fn previous_frame(&self) -> usize {
		self.previous_frame
	}

	/// Frame selected by the last tick.
	pub fn current_frame(&self) -> usize {
		self.current_frame
	}

	/// Whether no tick has completed yet.
	pub fn is_first_tick(&self) -> bool {
		self.first_tick
	}

	/// Refreshes progress from the driving signal of the active mode.
	pub fn synchronize<E: Environment + ?Sized>(&mut self, env: &E, timing: &Timing) {
		match self.mode {
			PlayMode::Scroll => {
				self.progress = scroll_progress(
					env.scroll_offset(),
					env.scrollable_height(),
					env.viewport_height(),
					timing.scroll_basis,
				);
			}
			PlayMode::Auto => self.synchronize_auto(env.now_ms(), timing),
			PlayMode::Manual => {}
		}
	}

	fn synchronize_auto(&mut self, now_ms: f64, timing: &Timing) {
		if self.rebase_pending {
			self.time_base = Some(rebased_time_base(now_ms, self.current_frame, timing.fps));
			self.rebase_pending = false;
		}
		let time_base = *self.time_base.get_or_insert(now_ms);

		if !self.paused {
			self.progress = auto_progress(now_ms, time_base, timing.loop_period_ms());
		}
	}

	/// Freezes autoplay. Returns whether the state changed.
	pub fn pause(&mut self) -> bool {
		!std::mem::replace(&mut self.paused, true)
	}

	/// Unpauses and clears the loop-end flag.
	///
	/// The time base is re-anchored on the next synchronization, using that
	/// tick's clock, so playback continues from the frame last shown. Does
	/// nothing unless paused; returns whether the state changed.
	pub fn resume(&mut self) -> bool {
		if !self.paused {
			return false;
		}
		self.paused = false;
		self.loop_ended = false;
		self.rebase_pending = true;
		true
	}

	/// Overrides progress until the next synchronization that recomputes it.
	pub fn set_progress(&mut self, progress: f64) {
		self.progress = progress;
	}

	/// Frame slot the current progress maps to.
	pub fn selected_frame(&self, length: usize) -> usize {
		select_frame(self.progress, length)
	}

	/// Shifts the current frame into `previous` and selects a new one.
	pub fn advance_frame(&mut self, length: usize) -> FrameStep {
		self.previous_frame = self.current_frame;
		self.current_frame = self.selected_frame(length);
		FrameStep {
			previous: self.previous_frame,
			current: self.current_frame,
			redraw: self.first_tick || self.current_frame != self.previous_frame,
		}
	}

	/// Sets the loop-end flag when the selected frame equals `loop_end_frame`.
	pub fn mark_loop_end(&mut self, length: usize, loop_end_frame: i64) {
		if self.selected_frame(length) as i64 == loop_end_frame {
			self.loop_ended = true;
		}
	}

	/// Marks the end of a tick.
	pub fn finish_tick(&mut self) {
		self.first_tick = false;
	}
}
