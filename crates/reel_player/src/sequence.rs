//! Canvas image sequence: render loop and playback controller.
//!
//! A [`CanvasSequence`] moves through a small lifecycle:
//!
//! ```text
//! build ──► Loading ──► Running ──► Stopped
//!   │          │
//!   ▼          ▼
//! Inert      Failed
//! ```
//!
//! While `Loading`, each scheduled frame polls the preloader. Once every
//! load has settled the first render tick runs immediately and the
//! `on_all_loaded` callback fires. From then on every tick reschedules
//! itself through [`Environment::schedule_next_frame`] until [`stop`] is
//! called.
//!
//! [`stop`]: CanvasSequence::stop

use std::{fmt, time::Duration};

use reel_types::{
	ReelError,
	options::SequenceOptions,
	playback::{Environment, PlayMode, PlaybackState, Timing, state::FrameStep},
};
use reel_vfs::{FrameSource, FrameStore, PreloadReport, PreloadStatus, Preloader};

use crate::surface::{Surface, SurfaceProvider};

type LoadedCallback = Box<dyn FnOnce()>;
type FrameChangeCallback = Box<dyn FnMut(usize, usize)>;

/// Lifecycle phase of a [`CanvasSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
	/// No surface was found; nothing will ever happen
	Inert,
	/// Waiting for frame assets
	Loading,
	/// Render loop active
	Running,
	/// Preload rejected; the render loop never started
	Failed,
	/// Render loop cancelled
	Stopped,
}

impl fmt::Display for SequencePhase {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Inert => "inert",
			Self::Loading => "loading",
			Self::Running => "running",
			Self::Failed => "failed",
			Self::Stopped => "stopped",
		};
		f.write_str(name)
	}
}

/// What a call to [`CanvasSequence::on_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
	/// Nothing ran and no further frame was requested
	Idle,
	/// Assets are still loading; another frame was requested
	Loading {
		/// Loads settled so far
		settled: usize,
		/// Loads requested
		total: usize,
	},
	/// A render tick ran
	Rendered(FrameStep),
	/// The preload was rejected on this frame
	Failed,
}

enum Lifecycle<F: FrameSource> {
	Inert,
	Loading(Preloader<F>),
	Running,
	Failed,
	Stopped,
}

impl<F: FrameSource> Lifecycle<F> {
	fn phase(&self) -> SequencePhase {
		match self {
			Self::Inert => SequencePhase::Inert,
			Self::Loading(_) => SequencePhase::Loading,
			Self::Running => SequencePhase::Running,
			Self::Failed => SequencePhase::Failed,
			Self::Stopped => SequencePhase::Stopped,
		}
	}
}

/// Builder attaching callbacks to a sequence before it starts loading.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use reel_player::{RgbaSurface, SequenceBuilder, SurfaceRegistry};
/// use reel_types::prelude::*;
/// use reel_vfs::MemorySource;
///
/// let mut surfaces = SurfaceRegistry::new();
/// surfaces.insert("canvas", RgbaSurface::new(8, 8));
///
/// let mut source = MemorySource::new();
/// for i in 0..=2 {
///     source.insert(format!("f_{i}.png"), RgbaImage::from_pixel(2, 2, Rgba([i * 100, 0, 0, 255])));
/// }
///
/// let mut env = VirtualEnvironment::new();
/// let options = SequenceOptions::new("canvas", "f_", 0, 2).with_mode(PlayMode::Manual);
/// let mut sequence = SequenceBuilder::new(options)
///     .on_frame_change(|previous, current| println!("{previous} -> {current}"))
///     .build(&mut surfaces, source, &mut env)
///     .unwrap();
///
/// sequence.set_progress(1.0);
/// while env.take_request() {
///     sequence.on_frame(&mut env);
///     if sequence.current_frame() == 2 {
///         break;
///     }
/// }
/// assert!(sequence.is_running());
/// ```
pub struct SequenceBuilder {
	options: SequenceOptions,
	on_all_loaded: Option<LoadedCallback>,
	on_frame_change: Option<FrameChangeCallback>,
}

impl SequenceBuilder {
	/// Starts a builder from options.
	pub fn new(options: SequenceOptions) -> Self {
		Self {
			options,
			on_all_loaded: None,
			on_frame_change: None,
		}
	}

	/// Called once, right after the first frame is drawn.
	pub fn on_all_loaded(mut self, callback: impl FnOnce() + 'static) -> Self {
		self.on_all_loaded = Some(Box::new(callback));
		self
	}

	/// Called with `(previous, current)` frame slots after every redraw.
	pub fn on_frame_change(mut self, callback: impl FnMut(usize, usize) + 'static) -> Self {
		self.on_frame_change = Some(Box::new(callback));
		self
	}

	/// Resolves the surface and starts preloading.
	///
	/// Every frame is requested from `source` at once and one frame callback
	/// is requested from `env` to start polling. If the surface cannot be
	/// found the error is logged and the returned sequence is inert: it loads
	/// nothing and never schedules a frame.
	///
	/// # Errors
	///
	/// Returns [`ReelError::InvalidOptions`] if the options fail validation.
	/// Nothing that happens after construction is reported here.
	pub fn build<P, F, E>(
		self,
		provider: &mut P,
		source: F,
		env: &mut E,
	) -> Result<CanvasSequence<P::Surface, F>, ReelError>
	where
		P: SurfaceProvider + ?Sized,
		F: FrameSource<Image = <P::Surface as Surface>::Image>,
		E: Environment + ?Sized,
	{
		let Self {
			options,
			on_all_loaded,
			on_frame_change,
		} = self;

		options.validate()?;
		let store = FrameStore::new(options.range()?, options.naming()?);
		let timing = options.timing()?;
		let state = PlaybackState::new(options.mode, options.start_paused);

		let surface = provider.take_surface(&options.surface_id);
		let lifecycle = if surface.is_some() {
			let preloader = Preloader::start(source, &store, env.now_ms(), options.load_timeout_ms);
			env.schedule_next_frame();
			Lifecycle::Loading(preloader)
		} else {
			log::error!(
				"{}",
				ReelError::SurfaceNotFound {
					id: options.surface_id.clone(),
				}
			);
			Lifecycle::Inert
		};

		Ok(CanvasSequence {
			options,
			timing,
			state,
			store,
			surface,
			lifecycle,
			on_all_loaded,
			on_frame_change,
		})
	}
}

/// An image sequence bound to one drawing surface.
pub struct CanvasSequence<S: Surface, F: FrameSource<Image = S::Image>> {
	options: SequenceOptions,
	timing: Timing,
	state: PlaybackState,
	store: FrameStore<S::Image>,
	surface: Option<S>,
	lifecycle: Lifecycle<F>,
	on_all_loaded: Option<LoadedCallback>,
	on_frame_change: Option<FrameChangeCallback>,
}

impl<S: Surface, F: FrameSource<Image = S::Image>> CanvasSequence<S, F> {
	/// Frame callback. Call once per frame the environment was asked for.
	pub fn on_frame<E: Environment + ?Sized>(&mut self, env: &mut E) -> TickOutcome {
		let status = match &mut self.lifecycle {
			Lifecycle::Loading(preloader) => preloader.poll(&mut self.store, env.now_ms()),
			Lifecycle::Running => return TickOutcome::Rendered(self.render_tick(env)),
			Lifecycle::Inert | Lifecycle::Failed | Lifecycle::Stopped => return TickOutcome::Idle,
		};

		match status {
			PreloadStatus::Pending {
				settled,
				total,
			} => {
				env.schedule_next_frame();
				TickOutcome::Loading {
					settled,
					total,
				}
			}
			PreloadStatus::Settled(report) => match report.into_result(self.options.skip_failed_frames) {
				Ok(report) => TickOutcome::Rendered(self.start_playback(env, &report)),
				Err(e) => {
					self.fail(&e);
					TickOutcome::Failed
				}
			},
			PreloadStatus::TimedOut {
				pending,
				total,
			} => {
				self.fail(&ReelError::PreloadTimeout {
					pending,
					total,
				});
				TickOutcome::Failed
			}
		}
	}

	/// Blocks until every frame has settled, then renders the first tick.
	///
	/// Returns immediately if the sequence is already running or stopped.
	/// A rejected preload moves the sequence to [`SequencePhase::Failed`]. A
	/// timeout or stall leaves it loading, so the frame loop can keep polling.
	///
	/// # Errors
	///
	/// - [`ReelError::SurfaceNotFound`] for an inert sequence
	/// - [`ReelError::PreloadFailed`] if a frame failed and failures are not skipped
	/// - [`ReelError::PreloadTimeout`] or [`ReelError::PreloadStalled`] from the join
	pub fn wait_until_loaded<E: Environment + ?Sized>(
		&mut self,
		env: &mut E,
		timeout: Option<Duration>,
	) -> Result<(), ReelError> {
		let report = match &mut self.lifecycle {
			Lifecycle::Loading(preloader) => preloader.join(&mut self.store, timeout)?,
			Lifecycle::Running | Lifecycle::Stopped => return Ok(()),
			Lifecycle::Inert => {
				return Err(ReelError::SurfaceNotFound {
					id: self.options.surface_id.clone(),
				});
			}
			Lifecycle::Failed => {
				return Err(ReelError::PreloadFailed {
					failed: self.store.failed_count(),
					total: self.store.len(),
				});
			}
		};

		match report.into_result(self.options.skip_failed_frames) {
			Ok(report) => {
				self.start_playback(env, &report);
				Ok(())
			}
			Err(e) => {
				self.fail(&e);
				Err(e)
			}
		}
	}

	/// Freezes autoplay on the current frame.
	pub fn pause(&mut self) {
		if self.state.pause() {
			log::debug!("Paused at frame {}", self.state.current_frame());
		}
	}

	/// Continues autoplay from the frame last shown. No-op unless paused.
	pub fn resume(&mut self) {
		if self.state.resume() {
			log::debug!("Resuming from frame {}", self.state.current_frame());
		}
	}

	/// Same as [`resume`](Self::resume).
	pub fn play(&mut self) {
		self.resume();
	}

	/// Sets the progress used by the next tick.
	///
	/// Only sticks in [`PlayMode::Manual`]; the other modes overwrite it on
	/// their next synchronization. Non-finite values are ignored.
	pub fn set_progress(&mut self, progress: f64) {
		if !progress.is_finite() {
			log::warn!("Ignoring non-finite progress {progress}");
			return;
		}
		self.state.set_progress(progress);
	}

	/// Cancels the render loop. No further frames are requested.
	pub fn stop(&mut self) {
		if matches!(self.lifecycle, Lifecycle::Stopped) {
			return;
		}
		log::debug!("Stopping sequence '{}' ({})", self.options.surface_id, self.lifecycle.phase());
		self.lifecycle = Lifecycle::Stopped;
	}

	/// Lifecycle phase.
	pub fn phase(&self) -> SequencePhase {
		self.lifecycle.phase()
	}

	/// Whether the render loop is active.
	pub fn is_running(&self) -> bool {
		matches!(self.lifecycle, Lifecycle::Running)
	}

	/// Progress used by the last tick.
	pub fn progress(&self) -> f64 {
		self.state.progress()
	}

	/// Frame slot drawn by the last tick.
	pub fn current_frame(&self) -> usize {
		self.state.current_frame()
	}

	/// Whether autoplay is paused.
	pub fn is_paused(&self) -> bool {
		self.state.is_paused()
	}

	/// Active play mode.
	pub fn mode(&self) -> PlayMode {
		self.state.mode()
	}

	/// Options the sequence was built from.
	pub fn options(&self) -> &SequenceOptions {
		&self.options
	}

	/// Playback state.
	pub fn state(&self) -> &PlaybackState {
		&self.state
	}

	/// Drawing surface, unless the sequence is inert.
	pub fn surface(&self) -> Option<&S> {
		self.surface.as_ref()
	}

	/// Mutable drawing surface, e.g. to resize it between frames.
	pub fn surface_mut(&mut self) -> Option<&mut S> {
		self.surface.as_mut()
	}

	/// Frame images.
	pub fn store(&self) -> &FrameStore<S::Image> {
		&self.store
	}

	/// Consumes the sequence, returning its surface.
	pub fn into_surface(self) -> Option<S> {
		self.surface
	}

	fn start_playback<E: Environment + ?Sized>(&mut self, env: &mut E, report: &PreloadReport) -> FrameStep {
		if !report.failures.is_empty() {
			log::warn!(
				"Starting '{}' with {} of {} frames missing",
				self.options.surface_id,
				report.failures.len(),
				report.total
			);
		}
		self.lifecycle = Lifecycle::Running;
		let step = self.render_tick(env);
		if let Some(callback) = self.on_all_loaded.take() {
			callback();
		}
		step
	}

	fn fail(&mut self, error: &ReelError) {
		log::error!("Sequence '{}' will not play: {}", self.options.surface_id, error);
		self.lifecycle = Lifecycle::Failed;
	}

	fn render_tick<E: Environment + ?Sized>(&mut self, env: &mut E) -> FrameStep {
		let length = self.timing.length;

		self.state.synchronize(env, &self.timing);
		if self.options.play_once && self.state.loop_ended() && self.state.pause() {
			log::debug!("Reached the end of '{}', pausing", self.options.surface_id);
		}
		env.schedule_next_frame();

		let step = self.state.advance_frame(length);
		if step.redraw {
			log::debug!("Frame {} -> {}", step.previous, step.current);
			self.draw(step.current);
			if let Some(callback) = self.on_frame_change.as_mut() {
				callback(step.previous, step.current);
			}
		}

		self.state.mark_loop_end(length, self.options.sequence_end - 1);
		self.state.finish_tick();
		step
	}

	fn draw(&mut self, slot: usize) {
		let Some(surface) = self.surface.as_mut() else {
			return;
		};
		let Some(image) = self.store.get(slot) else {
			log::warn!(
				"{}",
				ReelError::FrameNotLoaded {
					frame: slot,
				}
			);
			return;
		};
		let bounds = surface.bounds();
		surface.clear_rect(bounds);
		surface.draw_image(image, bounds);
	}
}
