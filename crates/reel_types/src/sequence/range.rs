//! Inclusive frame index range of a sequence.

use crate::ReelError;

/// Inclusive range of absolute frame indices `start..=end`.
///
/// # Examples
///
/// ```
/// use reel_types::sequence::FrameRange;
///
/// let range = FrameRange::new(1, 24).unwrap();
/// assert_eq!(range.len(), 23);
/// assert_eq!(range.frame_count(), 24);
/// assert_eq!(range.absolute(0), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRange {
	start: i64,
	end: i64,
}

impl FrameRange {
	/// Creates a range, rejecting `start > end` and spans whose frame count
	/// does not fit in `usize`.
	pub fn new(start: i64, end: i64) -> Result<Self, ReelError> {
		if start > end {
			return Err(ReelError::invalid_options(format!(
				"sequence_start ({start}) must not exceed sequence_end ({end})"
			)));
		}
		let fits = end
			.checked_sub(start)
			.and_then(|span| usize::try_from(span).ok())
			.is_some_and(|len| len < usize::MAX);
		if !fits {
			return Err(ReelError::invalid_options(format!("frame range {start}..={end} is too large")));
		}
		Ok(Self {
			start,
			end,
		})
	}

	/// First absolute index.
	pub fn start(&self) -> i64 {
		self.start
	}

	/// Last absolute index.
	pub fn end(&self) -> i64 {
		self.end
	}

	/// Sequence length, `end - start`. Also the highest valid slot.
	///
	/// Cannot overflow: [`new`](Self::new) rejects spans that do not fit.
	#[allow(clippy::len_without_is_empty)]
	pub fn len(&self) -> usize {
		(self.end - self.start) as usize
	}

	/// Number of frames, `len() + 1`.
	pub fn frame_count(&self) -> usize {
		self.len() + 1
	}

	/// Absolute index of a slot.
	pub fn absolute(&self, slot: usize) -> i64 {
		self.start + slot as i64
	}

	/// Slot of an absolute index, if it falls inside the range.
	pub fn slot_of(&self, absolute: i64) -> Option<usize> {
		(self.start..=self.end).contains(&absolute).then(|| (absolute - self.start) as usize)
	}

	/// Zero-padding width for file names: the printed length of `end`.
	pub fn pad_width(&self) -> usize {
		self.end.to_string().len()
	}

	/// Iterates absolute indices from `start` to `end` inclusive.
	pub fn iter(&self) -> impl Iterator<Item = i64> + use<> {
		self.start..=self.end
	}
}

impl std::fmt::Display for FrameRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}..={}", self.start, self.end)
	}
}
