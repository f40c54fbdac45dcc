//! Frame image sources.
//!
//! A [`FrameSource`] accepts load requests and reports completions later.
//! Requests never block; the caller drains finished loads with
//! [`FrameSource::poll`] from its own frame loop, or waits on one with
//! [`FrameSource::wait`].

use std::{
	collections::{HashMap, VecDeque},
	path::{Path, PathBuf},
	time::Duration,
};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use image::RgbaImage;
use rayon::{ThreadPool, ThreadPoolBuilder};
use reel_types::ReelError;

/// Outcome of one load request.
#[derive(Debug)]
pub struct LoadCompletion<I> {
	/// Slot passed to [`FrameSource::request`]
	pub slot: usize,
	/// Decoded image or the reason it is missing
	pub result: Result<I, ReelError>,
}

impl<I> LoadCompletion<I> {
	/// Creates a completion.
	pub fn new(slot: usize, result: Result<I, ReelError>) -> Self {
		Self {
			slot,
			result,
		}
	}
}

/// Asynchronous image loader.
pub trait FrameSource {
	/// Decoded image type
	type Image;

	/// Starts loading `path` for `slot`. Must not block.
	fn request(&mut self, slot: usize, path: &Path);

	/// Returns one finished load, if any, without blocking.
	fn poll(&mut self) -> Option<LoadCompletion<Self::Image>>;

	/// Waits for one finished load.
	///
	/// `None` for `timeout` waits indefinitely. Returns `None` when the
	/// timeout elapses or the source knows nothing else will complete.
	fn wait(&mut self, timeout: Option<Duration>) -> Option<LoadCompletion<Self::Image>>;
}

/// Loads frames from the filesystem on a bounded decode pool.
///
/// Requests are queued as `image::open` jobs on a rayon pool: rayon's global
/// pool by default, or a dedicated one from
/// [`with_threads`](Self::with_threads). However many frames are requested,
/// at most that many decode at once. Results come back over a channel and are
/// handed out by `poll`/`wait` on the caller's thread.
#[derive(Debug)]
pub struct FsFrameSource {
	pool: Option<ThreadPool>,
	tx: Sender<LoadCompletion<RgbaImage>>,
	rx: Receiver<LoadCompletion<RgbaImage>>,
	in_flight: usize,
}

impl FsFrameSource {
	/// Creates a source decoding on rayon's global pool.
	pub fn new() -> Self {
		let (tx, rx) = unbounded();
		Self {
			pool: None,
			tx,
			rx,
			in_flight: 0,
		}
	}

	/// Creates a source with its own pool of `threads` decoder threads.
	pub fn with_threads(threads: usize) -> Result<Self, ReelError> {
		if threads == 0 {
			return Err(ReelError::invalid_options("loader threads must be >= 1"));
		}
		let pool = ThreadPoolBuilder::new()
			.num_threads(threads)
			.thread_name(|i| format!("reel-load-{i}"))
			.build()
			.map_err(|e| std::io::Error::other(format!("failed to build loader pool: {e}")))?;
		log::debug!("Frame loader pool started with {} threads", threads);
		Ok(Self {
			pool: Some(pool),
			..Self::new()
		})
	}

	/// Maximum number of frames decoded at once.
	pub fn threads(&self) -> usize {
		match &self.pool {
			Some(pool) => pool.current_num_threads(),
			None => rayon::current_num_threads(),
		}
	}

	/// Number of requests that have not been handed out yet.
	pub fn in_flight(&self) -> usize {
		self.in_flight
	}

	/// Decodes one file into RGBA8.
	pub fn load(path: &Path) -> Result<RgbaImage, ReelError> {
		image::open(path)
			.map(image::DynamicImage::into_rgba8)
			.map_err(|e| ReelError::asset_load(path, e.to_string()))
	}

	fn handed_out(&mut self, completion: LoadCompletion<RgbaImage>) -> LoadCompletion<RgbaImage> {
		self.in_flight = self.in_flight.saturating_sub(1);
		completion
	}
}

impl Default for FsFrameSource {
	fn default() -> Self {
		Self::new()
	}
}

impl FrameSource for FsFrameSource {
	type Image = RgbaImage;

	fn request(&mut self, slot: usize, path: &Path) {
		self.in_flight += 1;
		let tx = self.tx.clone();
		let owned = path.to_path_buf();
		let job = move || {
			let result = Self::load(&owned);
			// The receiver only disappears when the source is dropped
			let _ = tx.send(LoadCompletion::new(slot, result));
		};
		match &self.pool {
			Some(pool) => pool.spawn(job),
			None => rayon::spawn(job),
		}
	}

	fn poll(&mut self) -> Option<LoadCompletion<RgbaImage>> {
		let completion = self.rx.try_recv().ok()?;
		Some(self.handed_out(completion))
	}

	fn wait(&mut self, timeout: Option<Duration>) -> Option<LoadCompletion<RgbaImage>> {
		if self.in_flight == 0 {
			return self.poll();
		}
		let completion = match timeout {
			Some(timeout) => match self.rx.recv_timeout(timeout) {
				Ok(completion) => completion,
				Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
			},
			None => self.rx.recv().ok()?,
		};
		Some(self.handed_out(completion))
	}
}

enum Entry<I> {
	Ready(I),
	Broken(String),
	Stalled,
}

/// In-memory frame source.
///
/// Paths are registered up front as ready, failing or stalled. A request
/// completes on the next `poll` in request order, except stalled paths,
/// which never complete. Unregistered paths fail as not found.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reel_vfs::{FrameSource, MemorySource};
///
/// let mut source = MemorySource::new();
/// source.insert("f_0.png", 7u8);
/// source.request(0, Path::new("f_0.png"));
/// source.request(1, Path::new("f_1.png"));
///
/// assert_eq!(source.poll().unwrap().result.unwrap(), 7);
/// assert!(source.poll().unwrap().result.is_err());
/// assert!(source.poll().is_none());
/// ```
pub struct MemorySource<I> {
	entries: HashMap<PathBuf, Entry<I>>,
	queue: VecDeque<LoadCompletion<I>>,
	requests: Vec<PathBuf>,
}

impl<I: Clone> MemorySource<I> {
	/// Creates an empty source.
	pub fn new() -> Self {
		Self {
			entries: HashMap::new(),
			queue: VecDeque::new(),
			requests: Vec::new(),
		}
	}

	/// Registers an image that loads successfully.
	pub fn insert(&mut self, path: impl Into<PathBuf>, image: I) {
		self.entries.insert(path.into(), Entry::Ready(image));
	}

	/// Registers a path whose load fails with `message`.
	pub fn fail(&mut self, path: impl Into<PathBuf>, message: impl Into<String>) {
		self.entries.insert(path.into(), Entry::Broken(message.into()));
	}

	/// Registers a path whose load never completes.
	pub fn stall(&mut self, path: impl Into<PathBuf>) {
		self.entries.insert(path.into(), Entry::Stalled);
	}

	/// Paths requested so far, in request order.
	pub fn requests(&self) -> &[PathBuf] {
		&self.requests
	}
}

impl<I: Clone> Default for MemorySource<I> {
	fn default() -> Self {
		Self::new()
	}
}

impl<I: Clone> FrameSource for MemorySource<I> {
	type Image = I;

	fn request(&mut self, slot: usize, path: &Path) {
		self.requests.push(path.to_path_buf());
		let result = match self.entries.get(path) {
			Some(Entry::Ready(image)) => Ok(image.clone()),
			Some(Entry::Broken(message)) => Err(ReelError::asset_load(path, message.clone())),
			Some(Entry::Stalled) => return,
			None => Err(ReelError::asset_load(path, "not found")),
		};
		self.queue.push_back(LoadCompletion::new(slot, result));
	}

	fn poll(&mut self) -> Option<LoadCompletion<I>> {
		self.queue.pop_front()
	}

	fn wait(&mut self, _timeout: Option<Duration>) -> Option<LoadCompletion<I>> {
		self.queue.pop_front()
	}
}
