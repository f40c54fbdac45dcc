//! All-settled preloading barrier.
//!
//! [`Preloader::start`] issues one request per frame at once, with no limit
//! on how many are outstanding. The barrier resolves only after every
//! request has either loaded or failed; [`Preloader::poll`] checks it from a
//! frame loop and [`Preloader::join`] blocks on it.
//!
//! There is no timeout unless one is asked for. A load that never completes
//! keeps the barrier pending forever.

use std::{
	path::PathBuf,
	time::{Duration, Instant},
};

use reel_types::ReelError;

use crate::{
	source::{FrameSource, LoadCompletion},
	store::FrameStore,
};

/// One frame that failed to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameFailure {
	/// Frame slot
	pub slot: usize,
	/// Asset path that was requested
	pub path: PathBuf,
	/// Failure description
	pub message: String,
}

/// Outcome of a settled preload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadReport {
	/// Frames requested
	pub total: usize,
	/// Frames decoded successfully
	pub loaded: usize,
	/// Frames that failed, in completion order
	pub failures: Vec<FrameFailure>,
}

impl PreloadReport {
	/// Returns true if every frame loaded.
	pub fn is_complete(&self) -> bool {
		self.failures.is_empty() && self.loaded == self.total
	}

	/// Turns the report into a go/no-go decision for playback.
	///
	/// Any failure rejects the preload unless `skip_failed` is set, in which
	/// case playback may start with gaps as long as at least one frame loaded.
	pub fn into_result(self, skip_failed: bool) -> Result<Self, ReelError> {
		if self.is_complete() || (skip_failed && self.loaded > 0) {
			return Ok(self);
		}
		Err(ReelError::PreloadFailed {
			failed: self.failures.len(),
			total: self.total,
		})
	}
}

/// Progress of a preload as seen by [`Preloader::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadStatus {
	/// Loads are still outstanding
	Pending {
		/// Loads settled so far
		settled: usize,
		/// Loads requested
		total: usize,
	},
	/// Every load has settled
	Settled(PreloadReport),
	/// The configured timeout passed first
	TimedOut {
		/// Loads still outstanding
		pending: usize,
		/// Loads requested
		total: usize,
	},
}

/// Tracks outstanding frame loads of one sequence.
pub struct Preloader<S: FrameSource> {
	source: S,
	total: usize,
	settled: usize,
	loaded: usize,
	failures: Vec<FrameFailure>,
	deadline_ms: Option<f64>,
}

impl<S: FrameSource> Preloader<S> {
	/// Requests every frame of `store` from `source`.
	///
	/// # Arguments
	/// * `now_ms` - Clock reading used as the start of the timeout window
	/// * `timeout_ms` - Optional limit checked by [`poll`](Self::poll)
	pub fn start(
		mut source: S,
		store: &FrameStore<S::Image>,
		now_ms: f64,
		timeout_ms: Option<u64>,
	) -> Self {
		let total = store.len();
		log::info!("Preloading {} frames ({})", total, store.range());
		for (slot, path) in store.paths() {
			source.request(slot, &path);
		}
		Self {
			source,
			total,
			settled: 0,
			loaded: 0,
			failures: Vec::new(),
			deadline_ms: timeout_ms.map(|timeout| now_ms + timeout as f64),
		}
	}

	/// Frames requested.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Frames settled so far.
	pub fn settled(&self) -> usize {
		self.settled
	}

	/// Frames still outstanding.
	pub fn pending(&self) -> usize {
		self.total - self.settled
	}

	/// Drains finished loads into `store` without blocking.
	pub fn poll(&mut self, store: &mut FrameStore<S::Image>, now_ms: f64) -> PreloadStatus {
		while let Some(completion) = self.source.poll() {
			self.record(store, completion);
		}

		if self.settled == self.total {
			return PreloadStatus::Settled(self.report());
		}
		if let Some(deadline) = self.deadline_ms
			&& now_ms >= deadline
		{
			return PreloadStatus::TimedOut {
				pending: self.pending(),
				total: self.total,
			};
		}
		PreloadStatus::Pending {
			settled: self.settled,
			total: self.total,
		}
	}

	/// Blocks until every load has settled.
	///
	/// # Errors
	///
	/// - [`ReelError::PreloadTimeout`] if `timeout` elapses first
	/// - [`ReelError::PreloadStalled`] if the source reports that nothing
	///   else will complete
	pub fn join(
		&mut self,
		store: &mut FrameStore<S::Image>,
		timeout: Option<Duration>,
	) -> Result<PreloadReport, ReelError> {
		let deadline = timeout.map(|timeout| Instant::now() + timeout);

		loop {
			while let Some(completion) = self.source.poll() {
				self.record(store, completion);
			}
			if self.settled == self.total {
				return Ok(self.report());
			}

			let remaining = match deadline {
				Some(deadline) => {
					let remaining = deadline.saturating_duration_since(Instant::now());
					if remaining.is_zero() {
						return Err(self.timeout_error());
					}
					Some(remaining)
				}
				None => None,
			};

			match self.source.wait(remaining) {
				Some(completion) => self.record(store, completion),
				None if deadline.is_some_and(|deadline| Instant::now() >= deadline) => {
					return Err(self.timeout_error());
				}
				None => {
					return Err(ReelError::PreloadStalled {
						pending: self.pending(),
					});
				}
			}
		}
	}

	fn record(&mut self, store: &mut FrameStore<S::Image>, completion: LoadCompletion<S::Image>) {
		let LoadCompletion {
			slot,
			result,
		} = completion;

		if store.slot(slot).is_none_or(|state| state.is_settled()) {
			log::warn!("Dropping duplicate or unknown load result for frame slot {slot}");
			return;
		}

		match result {
			Ok(image) => {
				store.settle(slot, Some(image));
				self.loaded += 1;
			}
			Err(error) => {
				let path = store.path(slot);
				log::error!("Frame {} ({}) failed to load: {}", slot, path.display(), error);
				store.settle(slot, None);
				self.failures.push(FrameFailure {
					slot,
					path,
					message: error.to_string(),
				});
			}
		}

		self.settled += 1;
		if self.settled == self.total {
			log::info!(
				"Preload settled: {} loaded, {} failed",
				self.loaded,
				self.failures.len()
			);
		}
	}

	fn report(&self) -> PreloadReport {
		PreloadReport {
			total: self.total,
			loaded: self.loaded,
			failures: self.failures.clone(),
		}
	}

	fn timeout_error(&self) -> ReelError {
		ReelError::PreloadTimeout {
			pending: self.pending(),
			total: self.total,
		}
	}
}
