//! Image sequence utility.
//!
//! Provides two subcommands:
//! - `render`: play a sequence headlessly against a virtual clock and save
//!   the final surface as an image, optionally dumping every frame change as JSON.
//! - `names`: print the frame file names a sequence expects, optionally only
//!   the ones missing on disk.
//!
//! # Usage
//!
//! ```bash
//! # Play 2 seconds of an AUTO sequence at 60 Hz and keep the last frame
//! cargo run --example sequence_utils -- render hero.toml --frames 120 -o last.png
//!
//! # Scroll halfway down over 30 frames and record the frame changes
//! cargo run --example sequence_utils -- render hero.toml --scroll-to 0.5 --trace trace.json
//!
//! # List the files that still need to be exported
//! cargo run --example sequence_utils -- names hero.toml --missing
//! ```

use std::{
	cell::{Cell, RefCell},
	fs::File,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
	rc::Rc,
	time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;
use reel_rs::prelude::*;
use serde::Serialize;

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Render(args) => run_render(args),
		Command::Names(args) => run_names(args),
	}
}

#[derive(Parser)]
#[command(name = "sequence_utils")]
#[command(author = "reel-rs project")]
#[command(version)]
#[command(about = "Render and inspect image sequences", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Play a sequence headlessly and save the final frame
	Render(RenderArgs),
	/// Print the frame file names of a sequence
	Names(NamesArgs),
}

#[derive(Args)]
struct RenderArgs {
	/// Sequence options file (TOML, JSON, ...)
	#[arg(value_name = "OPTIONS")]
	options: PathBuf,

	/// Number of frames to run after loading
	#[arg(short, long, value_name = "COUNT", default_value_t = 120)]
	frames: usize,

	/// Virtual time between frames in milliseconds
	#[arg(long, value_name = "MS", default_value_t = 1000.0 / 60.0)]
	step_ms: f64,

	/// Surface width in pixels
	#[arg(long, default_value_t = 640)]
	width: u32,

	/// Surface height in pixels
	#[arg(long, default_value_t = 360)]
	height: u32,

	/// Scroll position, as a fraction of the scrollable height, reached on the last frame
	#[arg(long, value_name = "FRACTION", default_value_t = 1.0)]
	scroll_to: f64,

	/// Progress for MANUAL sequences
	#[arg(long, value_name = "FRACTION", default_value_t = 0.0)]
	progress: f64,

	/// Give up if loading takes longer than this
	#[arg(long, value_name = "MS")]
	load_timeout_ms: Option<u64>,

	/// Decode frames on a dedicated pool of this many threads
	#[arg(long, value_name = "COUNT")]
	threads: Option<usize>,

	/// Output image path
	#[arg(short, long, value_name = "FILE", default_value = "last_frame.png")]
	output: PathBuf,

	/// Write the frame-change trace to this JSON file
	#[arg(short, long, value_name = "FILE")]
	trace: Option<PathBuf>,
}

#[derive(Args)]
struct NamesArgs {
	/// Sequence options file (TOML, JSON, ...)
	#[arg(value_name = "OPTIONS")]
	options: PathBuf,

	/// Only print files that do not exist
	#[arg(short, long, default_value_t = false)]
	missing: bool,
}

/// Virtual scrollable height used for SCROLL sequences
const SCROLL_HEIGHT: f64 = 10_000.0;

#[derive(Debug, Serialize)]
struct FrameChange {
	time_ms: f64,
	previous: usize,
	current: usize,
}

#[derive(Debug, Serialize)]
struct RenderTrace {
	surface_id: String,
	mode: PlayMode,
	frames_run: usize,
	final_frame: usize,
	changes: Vec<FrameChange>,
}

fn run_render(args: RenderArgs) -> Result<()> {
	if args.width == 0 || args.height == 0 {
		bail!("Surface size must be non-zero, got {}x{}", args.width, args.height);
	}
	if !args.step_ms.is_finite() || args.step_ms <= 0.0 {
		bail!("step-ms must be a positive number");
	}

	let options = SequenceOptions::from_file(&args.options)
		.with_context(|| format!("Cannot load options from {}", args.options.display()))?;
	let surface_id = options.surface_id.clone();
	let mode = options.mode;
	info!(
		"Rendering '{}' ({} mode, frames {}..={})",
		surface_id, mode, options.sequence_start, options.sequence_end
	);

	let mut surfaces = SurfaceRegistry::new();
	surfaces.insert(surface_id.clone(), RgbaSurface::new(args.width, args.height));
	let source = match args.threads {
		Some(threads) => FsFrameSource::with_threads(threads)?,
		None => FsFrameSource::new(),
	};

	let mut env = VirtualEnvironment::new();
	env.set_scroll(0.0, SCROLL_HEIGHT);

	let clock = Rc::new(Cell::new(0.0));
	let changes = Rc::new(RefCell::new(Vec::new()));
	let mut sequence = SequenceBuilder::new(options)
		.on_all_loaded(|| info!("All frames loaded"))
		.on_frame_change({
			let clock = clock.clone();
			let changes = changes.clone();
			move |previous, current| {
				changes.borrow_mut().push(FrameChange {
					time_ms: clock.get(),
					previous,
					current,
				});
			}
		})
		.build(&mut surfaces, source, &mut env)?;

	if mode == PlayMode::Manual {
		sequence.set_progress(args.progress);
	}
	sequence
		.wait_until_loaded(&mut env, args.load_timeout_ms.map(Duration::from_millis))
		.context("Sequence did not finish loading")?;

	let mut frames_run = 0;
	for tick in 1..=args.frames {
		if !env.take_request() {
			break;
		}
		env.advance(args.step_ms);
		clock.set(env.now_ms());
		if mode == PlayMode::Scroll {
			let fraction = args.scroll_to * tick as f64 / args.frames as f64;
			env.set_scroll(fraction * SCROLL_HEIGHT, SCROLL_HEIGHT);
		}
		sequence.on_frame(&mut env);
		frames_run += 1;
	}
	sequence.stop();

	let final_frame = sequence.current_frame();
	info!("Ran {} frames, showing frame slot {}", frames_run, final_frame);

	let surface = sequence.surface().context("Sequence has no surface")?;
	surface.save(&args.output)?;
	info!("Saved {}", args.output.display());

	if let Some(path) = args.trace {
		let trace = RenderTrace {
			surface_id,
			mode,
			frames_run,
			final_frame,
			changes: changes.take(),
		};
		write_trace(&path, &trace)?;
		info!("Wrote {} frame changes to {}", trace.changes.len(), path.display());
	}

	Ok(())
}

fn write_trace(path: &Path, trace: &RenderTrace) -> Result<()> {
	let file = File::create(path).with_context(|| format!("Cannot create {}", path.display()))?;
	let mut writer = BufWriter::new(file);
	serde_json::to_writer_pretty(&mut writer, trace)?;
	writer.flush().with_context(|| format!("Cannot write {}", path.display()))?;
	Ok(())
}

fn run_names(args: NamesArgs) -> Result<()> {
	let options = SequenceOptions::from_file(&args.options)
		.with_context(|| format!("Cannot load options from {}", args.options.display()))?;
	let range = options.range()?;
	let naming = options.naming()?;

	let mut missing = 0;
	for index in range.iter() {
		let path = naming.path(index);
		let exists = path.exists();
		if !exists {
			missing += 1;
		}
		if !args.missing || !exists {
			println!("{}", path.display());
		}
	}

	info!("{} frames, {} missing", range.frame_count(), missing);
	Ok(())
}
