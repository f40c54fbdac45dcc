//! Full pipeline: options, file loading, render loop, surface contents.

use std::{
	cell::RefCell,
	io::Write,
	rc::Rc,
	thread,
	time::{Duration, Instant},
};

use reel_rs::prelude::*;

use crate::fixtures::{SequenceDir, shown_frame};

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

type FileSequence = CanvasSequence<RgbaSurface, FsFrameSource>;

fn build(options: SequenceOptions, env: &mut VirtualEnvironment) -> FileSequence {
	let mut surfaces = SurfaceRegistry::new();
	surfaces.insert(options.surface_id.clone(), RgbaSurface::new(8, 8));
	SequenceBuilder::new(options).build(&mut surfaces, FsFrameSource::new(), env).unwrap()
}

fn shown(sequence: &FileSequence) -> Option<u8> {
	shown_frame(sequence.surface().unwrap())
}

#[test_log::test]
fn auto_mode_loops_over_files() {
	let dir = SequenceDir::create("auto", 0, 24);
	let mut env = VirtualEnvironment::new();
	let options = SequenceOptions::new("hero", dir.prefix(), 0, 24).with_mode(PlayMode::Auto);
	let mut sequence = build(options, &mut env);

	sequence.wait_until_loaded(&mut env, Some(LOAD_TIMEOUT)).unwrap();
	assert_eq!(sequence.store().loaded_count(), 25);
	assert_eq!(shown(&sequence), Some(0));

	assert!(env.take_request());
	env.set_time(500.0);
	sequence.on_frame(&mut env);
	assert_eq!(shown(&sequence), Some(12));

	assert!(env.take_request());
	env.set_time(1_500.0);
	sequence.on_frame(&mut env);
	assert_eq!(sequence.current_frame(), 12);
	assert!(env.has_request());
}

#[test]
fn scroll_mode_maps_offset_to_absolute_frame() {
	let dir = SequenceDir::create("scroll", 1, 10);
	let mut env = VirtualEnvironment::new();
	let mut sequence = build(SequenceOptions::new("hero", dir.prefix(), 1, 10), &mut env);
	sequence.wait_until_loaded(&mut env, Some(LOAD_TIMEOUT)).unwrap();
	assert_eq!(shown(&sequence), Some(1));

	env.set_scroll(300.0, 900.0);
	assert!(env.take_request());
	sequence.on_frame(&mut env);
	assert_eq!(sequence.current_frame(), 3);
	assert_eq!(shown(&sequence), Some(4));

	env.set_scroll(2_000.0, 900.0);
	assert!(env.take_request());
	sequence.on_frame(&mut env);
	assert_eq!(shown(&sequence), Some(10));
}

#[test]
fn manual_mode_polls_loader_threads() {
	let dir = SequenceDir::create("manual", 0, 8);
	let mut env = VirtualEnvironment::new();
	let loaded = Rc::new(RefCell::new(false));
	let changes = Rc::new(RefCell::new(Vec::new()));

	let mut surfaces = SurfaceRegistry::new();
	surfaces.insert("hero", RgbaSurface::new(8, 8));
	let options = SequenceOptions::new("hero", dir.prefix(), 0, 8).with_mode(PlayMode::Manual);
	let mut sequence = SequenceBuilder::new(options)
		.on_all_loaded({
			let loaded = loaded.clone();
			move || *loaded.borrow_mut() = true
		})
		.on_frame_change({
			let changes = changes.clone();
			move |previous, current| changes.borrow_mut().push((previous, current))
		})
		.build(&mut surfaces, FsFrameSource::with_threads(2).unwrap(), &mut env)
		.unwrap();

	let deadline = Instant::now() + LOAD_TIMEOUT;
	while !sequence.is_running() {
		assert!(Instant::now() < deadline, "frames never finished loading");
		assert!(env.take_request());
		if let TickOutcome::Loading {
			..
		} = sequence.on_frame(&mut env)
		{
			assert!(!*loaded.borrow());
			assert!(sequence.surface().unwrap().pixels().pixels().all(|pixel| pixel.0[3] == 0));
		}
		thread::sleep(Duration::from_millis(1));
	}
	assert!(*loaded.borrow());

	for progress in [0.25, 0.25, 0.5, 1.0] {
		sequence.set_progress(progress);
		assert!(env.take_request());
		sequence.on_frame(&mut env);
	}
	assert_eq!(*changes.borrow(), vec![(0, 0), (0, 2), (2, 4), (4, 8)]);
	assert_eq!(shown(&sequence), Some(8));
}

#[test_log::test]
fn missing_file_keeps_surface_blank() {
	let dir = SequenceDir::create("missing", 0, 5);
	dir.remove("frame_3.png");
	let mut env = VirtualEnvironment::new();
	let mut sequence = build(SequenceOptions::new("hero", dir.prefix(), 0, 5), &mut env);

	let result = sequence.wait_until_loaded(&mut env, Some(LOAD_TIMEOUT));
	assert!(matches!(
		result,
		Err(ReelError::PreloadFailed {
			failed: 1,
			total: 6
		})
	));
	assert_eq!(sequence.phase(), SequencePhase::Failed);
	assert_eq!(shown(&sequence), None);
	assert_eq!(sequence.on_frame(&mut env), TickOutcome::Idle);
}

#[test_log::test]
fn corrupt_frame_is_skipped_when_allowed() {
	let dir = SequenceDir::create("corrupt", 0, 4);
	dir.corrupt("frame_2.png");
	let mut env = VirtualEnvironment::new();
	let options = SequenceOptions::new("hero", dir.prefix(), 0, 4)
		.with_mode(PlayMode::Manual)
		.with_skip_failed_frames(true);
	let mut sequence = build(options, &mut env);

	sequence.wait_until_loaded(&mut env, Some(LOAD_TIMEOUT)).unwrap();
	assert_eq!(sequence.store().failed_count(), 1);

	sequence.set_progress(0.25);
	assert!(env.take_request());
	sequence.on_frame(&mut env);
	assert_eq!(shown(&sequence), Some(1));

	sequence.set_progress(0.5);
	assert!(env.take_request());
	sequence.on_frame(&mut env);
	assert_eq!(sequence.current_frame(), 2);
	assert_eq!(shown(&sequence), Some(1));
}

#[test]
fn options_file_drives_playback() {
	let dir = SequenceDir::create("options", 0, 12);
	let mut options_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
	write!(
		options_file,
		"surface_id = \"hero\"\nsequence_path = \"{}\"\nsequence_start = 0\nsequence_end = 12\nmode = \"AUTO\"\nfps = 12.0\nplay_once = true\n",
		dir.prefix().replace('\\', "/")
	)
	.unwrap();
	options_file.flush().unwrap();

	let options = SequenceOptions::from_file(options_file.path()).unwrap();
	assert_eq!(options.mode, PlayMode::Auto);
	assert!(options.play_once);

	let mut env = VirtualEnvironment::new();
	let mut sequence = build(options, &mut env);
	sequence.wait_until_loaded(&mut env, Some(LOAD_TIMEOUT)).unwrap();

	// frame 11 is reached at 11 / 12 s
	for time in [500.0, 920.0, 950.0, 1_400.0, 3_000.0] {
		assert!(env.take_request());
		env.set_time(time);
		sequence.on_frame(&mut env);
	}
	assert!(sequence.is_paused());
	assert_eq!(shown(&sequence), Some(11));
}

#[test]
fn system_host_drives_loaded_sequence() {
	let dir = SequenceDir::create("host", 0, 4);
	let mut host = SystemHost::new().with_interval(Duration::from_millis(1));
	host.set_scroll(750.0, 1_000.0);

	let mut surfaces = SurfaceRegistry::new();
	surfaces.insert("hero", RgbaSurface::new(8, 8));
	let options = SequenceOptions::new("hero", dir.prefix(), 0, 4);
	let mut sequence = SequenceBuilder::new(options).build(&mut surfaces, FsFrameSource::new(), &mut host).unwrap();

	sequence.wait_until_loaded(&mut host, Some(LOAD_TIMEOUT)).unwrap();
	assert_eq!(drive(&mut sequence, &mut host, Some(3)), 3);
	assert_eq!(sequence.current_frame(), 3);

	sequence.stop();
	assert_eq!(drive(&mut sequence, &mut host, Some(3)), 1);
	assert!(!host.take_request());
}
