//! Benchmark suite for playback hot paths
//!
//! These run once per display refresh, so they need to stay far below a
//! frame budget even for long sequences.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use reel_benches::{memory_frames, refresh_timestamps, scroll_sweep};
use reel_player::{RgbaSurface, SequenceBuilder, Surface, SurfaceRegistry};
use reel_types::{
	options::SequenceOptions,
	playback::{PlayMode, PlaybackState, Timing, VirtualEnvironment, auto_progress, select_frame},
	sequence::{FrameRange, SequenceNaming, pad_frame_number},
};
use std::hint::black_box;

/// Benchmark progress to frame mapping
fn bench_select_frame(c: &mut Criterion) {
	let mut group = c.benchmark_group("select_frame");
	let progress: Vec<f64> = (0..=1000).map(|i| f64::from(i) / 1000.0).collect();

	for length in [24usize, 240, 2400] {
		group.throughput(Throughput::Elements(progress.len() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(length), &length, |b, &length| {
			b.iter(|| {
				let mut sum = 0usize;
				for &p in &progress {
					sum = sum.wrapping_add(select_frame(black_box(p), length));
				}
				black_box(sum)
			});
		});
	}

	group.finish();
}

/// Benchmark time-driven synchronization
fn bench_auto_sync(c: &mut Criterion) {
	let mut group = c.benchmark_group("auto_sync");
	let timestamps = refresh_timestamps(600, 60.0);
	let timing = Timing::new(240, 24.0);

	group.throughput(Throughput::Elements(timestamps.len() as u64));
	group.bench_function("auto_progress", |b| {
		b.iter(|| {
			let period = timing.loop_period_ms();
			let mut sum = 0.0;
			for &now in &timestamps {
				sum += auto_progress(black_box(now), 0.0, period);
			}
			black_box(sum)
		});
	});

	group.bench_function("state_tick", |b| {
		b.iter(|| {
			let mut env = VirtualEnvironment::new();
			let mut state = PlaybackState::new(PlayMode::Auto, false);
			let mut redraws = 0u32;
			for &now in &timestamps {
				env.set_time(now);
				state.synchronize(&env, &timing);
				if state.advance_frame(timing.length).redraw {
					redraws += 1;
				}
				state.finish_tick();
			}
			black_box(redraws)
		});
	});

	group.finish();
}

/// Benchmark zero-padded file naming
fn bench_naming(c: &mut Criterion) {
	let mut group = c.benchmark_group("naming");
	let range = FrameRange::new(0, 9999).unwrap();
	let naming = SequenceNaming::new("assets/hero/frame_", ".png", range.pad_width());

	group.throughput(Throughput::Elements(range.frame_count() as u64));
	group.bench_function("pad_frame_number", |b| {
		b.iter(|| {
			let mut total = 0usize;
			for index in range.iter() {
				total += pad_frame_number(black_box(index), 4).len();
			}
			black_box(total)
		});
	});

	group.bench_function("file_name", |b| {
		b.iter(|| {
			let mut total = 0usize;
			for index in range.iter() {
				total += naming.file_name(black_box(index)).len();
			}
			black_box(total)
		});
	});

	group.finish();
}

/// Benchmark full render ticks onto an RGBA surface
fn bench_render_ticks(c: &mut Criterion) {
	let mut group = c.benchmark_group("render_tick");
	let offsets = scroll_sweep(120, 10_000.0);

	for (width, height) in [(320u32, 180u32), (1280, 720)] {
		let options = SequenceOptions::new("canvas", "frame_", 0, 59);
		let range = options.range().unwrap();
		let naming = options.naming().unwrap();

		group.throughput(Throughput::Elements(offsets.len() as u64));
		group.bench_with_input(
			BenchmarkId::new("scroll_sweep", format!("{width}x{height}")),
			&(width, height),
			|b, &(width, height)| {
				b.iter_batched(
					|| {
						let mut surfaces = SurfaceRegistry::new();
						surfaces.insert("canvas", RgbaSurface::new(width, height));
						let mut env = VirtualEnvironment::new();
						let source = memory_frames(range, &naming, width / 2, height / 2);
						let mut sequence = SequenceBuilder::new(options.clone())
							.build(&mut surfaces, source, &mut env)
							.unwrap();
						sequence.wait_until_loaded(&mut env, None).unwrap();
						(sequence, env)
					},
					|(mut sequence, mut env)| {
						for &offset in &offsets {
							env.set_scroll(offset, 10_000.0);
							env.take_request();
							sequence.on_frame(&mut env);
						}
						black_box(sequence.surface().map(Surface::width))
					},
					BatchSize::SmallInput,
				);
			},
		);
	}

	group.finish();
}

criterion_group!(benches, bench_select_frame, bench_auto_sync, bench_naming, bench_render_ticks);
criterion_main!(benches);
