//! Host environment abstraction.

/// Everything playback reads from or asks of its host.
///
/// A browser-like host maps these onto the document scroll state, a
/// monotonic clock and its per-refresh callback queue. Scheduling is a
/// request, not a callback: after `schedule_next_frame` the host is expected
/// to call the sequence's frame handler once on the next refresh, and every
/// handler run that wants to keep going asks again.
pub trait Environment {
	/// Current vertical scroll offset in pixels.
	fn scroll_offset(&self) -> f64;

	/// Total scrollable height of the document in pixels.
	fn scrollable_height(&self) -> f64;

	/// Height of the visible viewport in pixels.
	fn viewport_height(&self) -> f64 {
		0.0
	}

	/// Monotonic clock reading in milliseconds.
	fn now_ms(&self) -> f64;

	/// Requests one more frame callback on the next display refresh.
	fn schedule_next_frame(&mut self);
}

/// Deterministic [`Environment`] with a hand-driven clock and scroll state.
///
/// # Examples
///
/// ```
/// use reel_types::playback::{Environment, VirtualEnvironment};
///
/// let mut env = VirtualEnvironment::new();
/// env.set_scroll(250.0, 1000.0);
/// env.advance(16.0);
/// env.schedule_next_frame();
///
/// assert_eq!(env.now_ms(), 16.0);
/// assert!(env.take_request());
/// assert!(!env.take_request());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VirtualEnvironment {
	now_ms: f64,
	scroll_offset: f64,
	scrollable_height: f64,
	viewport_height: f64,
	pending_request: bool,
	requests: usize,
}

impl VirtualEnvironment {
	/// Creates an environment at time zero with no scrollable content.
	pub fn new() -> Self {
		Self::default()
	}

	/// Moves the clock to an absolute time.
	pub fn set_time(&mut self, now_ms: f64) {
		self.now_ms = now_ms;
	}

	/// Moves the clock forward.
	pub fn advance(&mut self, delta_ms: f64) {
		self.now_ms += delta_ms;
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

	/// Whether a frame has been requested and not yet taken.
	pub fn has_request(&self) -> bool {
		self.pending_request
	}

	/// Total number of frame requests ever made.
	pub fn request_count(&self) -> usize {
		self.requests
	}
}

impl Environment for VirtualEnvironment {
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
		self.now_ms
	}

	fn schedule_next_frame(&mut self) {
		self.pending_request = true;
		self.requests += 1;
	}
}
