//! Progress to frame slot mapping.

/// Maps normalized progress onto a frame slot in `0..=length`.
///
/// Progress is scaled, rounded to the nearest slot and clamped, so scroll
/// overshoot or any other out-of-range input still lands on a valid frame.
/// NaN selects slot 0; infinite progress clamps to the nearest end.
///
/// # Examples
///
/// ```
/// use reel_types::playback::select_frame;
///
/// assert_eq!(select_frame(0.0, 24), 0);
/// assert_eq!(select_frame(0.5, 24), 12);
/// assert_eq!(select_frame(1.0, 24), 24);
/// assert_eq!(select_frame(1.7, 24), 24);
/// assert_eq!(select_frame(-0.2, 24), 0);
/// assert_eq!(select_frame(f64::INFINITY, 24), 24);
/// ```
pub fn select_frame(progress: f64, length: usize) -> usize {
	// inf * 0 is NaN as well
	let frame = (progress * length as f64).round();
	if frame.is_nan() {
		return 0;
	}
	frame.clamp(0.0, length as f64) as usize
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_endpoints_are_exact() {
		for length in [0, 1, 7, 24, 120, 1000] {
			assert_eq!(select_frame(0.0, length), 0);
			assert_eq!(select_frame(1.0, length), length);
		}
	}

	#[test]
	fn test_bounded_and_monotonic() {
		let length = 37;
		let mut last = 0;
		for step in 0..=1000 {
			let frame = select_frame(f64::from(step) / 1000.0, length);
			assert!(frame <= length);
			assert!(frame >= last, "frame went backwards at step {step}");
			last = frame;
		}
	}

	#[test]
	fn test_rounds_instead_of_truncating() {
		assert_eq!(select_frame(0.49 / 10.0, 10), 0);
		assert_eq!(select_frame(0.51 / 10.0, 10), 1);
		assert_eq!(select_frame(0.96, 10), 10);
	}

	#[test]
	fn test_nan_progress_selects_first_slot() {
		assert_eq!(select_frame(f64::NAN, 10), 0);
		assert_eq!(select_frame(f64::NAN, 0), 0);
	}

	#[test]
	fn test_infinite_progress_clamps_to_ends() {
		assert_eq!(select_frame(f64::INFINITY, 24), 24);
		assert_eq!(select_frame(f64::NEG_INFINITY, 24), 0);
		assert_eq!(select_frame(f64::INFINITY, 0), 0);
	}
}
