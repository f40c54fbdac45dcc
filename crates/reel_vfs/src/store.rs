//! Per-frame image storage.

use std::path::PathBuf;

use reel_types::sequence::{FrameRange, SequenceNaming};

/// Load state of a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameSlot<I> {
	/// Requested, not yet settled
	Pending,
	/// Decoded and ready to draw
	Loaded(I),
	/// Load failed
	Failed,
}

impl<I> FrameSlot<I> {
	/// Returns true once the load has settled either way.
	pub fn is_settled(&self) -> bool {
		!matches!(self, Self::Pending)
	}
}

/// Ordered frame images of one sequence.
///
/// Slots are addressed `0..=range.len()`. Images are only ever lent out
/// immutably.
#[derive(Debug, Clone)]
pub struct FrameStore<I> {
	range: FrameRange,
	naming: SequenceNaming,
	slots: Vec<FrameSlot<I>>,
}

impl<I> FrameStore<I> {
	/// Creates a store with every slot pending.
	pub fn new(range: FrameRange, naming: SequenceNaming) -> Self {
		let slots = (0..range.frame_count()).map(|_| FrameSlot::Pending).collect();
		Self {
			range,
			naming,
			slots,
		}
	}

	/// Frame range covered by the store.
	pub fn range(&self) -> FrameRange {
		self.range
	}

	/// Naming scheme used for asset paths.
	pub fn naming(&self) -> &SequenceNaming {
		&self.naming
	}

	/// Number of slots.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Always false; a range holds at least one frame.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Asset path of a slot.
	pub fn path(&self, slot: usize) -> PathBuf {
		self.naming.path(self.range.absolute(slot))
	}

	/// Asset paths of every slot, in order.
	pub fn paths(&self) -> impl Iterator<Item = (usize, PathBuf)> + '_ {
		(0..self.len()).map(|slot| (slot, self.path(slot)))
	}

	/// Load state of a slot.
	pub fn slot(&self, slot: usize) -> Option<&FrameSlot<I>> {
		self.slots.get(slot)
	}

	/// Image of a slot, if it loaded.
	pub fn get(&self, slot: usize) -> Option<&I> {
		match self.slots.get(slot)? {
			FrameSlot::Loaded(image) => Some(image),
			FrameSlot::Pending | FrameSlot::Failed => None,
		}
	}

	/// Returns true if the slot holds a decoded image.
	pub fn is_loaded(&self, slot: usize) -> bool {
		self.get(slot).is_some()
	}

	/// Records the outcome of a load: `Some` for a decoded image, `None` for
	/// a failure. Returns false for slots outside the range.
	pub fn settle(&mut self, slot: usize, image: Option<I>) -> bool {
		let Some(entry) = self.slots.get_mut(slot) else {
			log::warn!("Ignoring load result for unknown frame slot {slot}");
			return false;
		};
		*entry = match image {
			Some(image) => FrameSlot::Loaded(image),
			None => FrameSlot::Failed,
		};
		true
	}

	/// Number of slots holding an image.
	pub fn loaded_count(&self) -> usize {
		self.slots.iter().filter(|slot| matches!(slot, FrameSlot::Loaded(_))).count()
	}

	/// Number of slots whose load failed.
	pub fn failed_count(&self) -> usize {
		self.slots.iter().filter(|slot| matches!(slot, FrameSlot::Failed)).count()
	}

	/// Number of slots still waiting on a load.
	pub fn pending_count(&self) -> usize {
		self.slots.iter().filter(|slot| !slot.is_settled()).count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> FrameStore<u8> {
		let range = FrameRange::new(8, 11).unwrap();
		FrameStore::new(range, SequenceNaming::new("seq/f_", ".png", range.pad_width()))
	}

	#[test]
	fn test_paths_use_absolute_indices() {
		let store = store();
		assert_eq!(store.len(), 4);
		assert_eq!(store.path(0), PathBuf::from("seq/f_08.png"));
		assert_eq!(store.path(3), PathBuf::from("seq/f_11.png"));
		assert_eq!(store.paths().count(), 4);
	}

	#[test]
	fn test_settle_counts() {
		let mut store = store();
		assert_eq!(store.pending_count(), 4);

		assert!(store.settle(0, Some(1)));
		assert!(store.settle(2, None));
		assert!(!store.settle(9, Some(5)));

		assert_eq!(store.loaded_count(), 1);
		assert_eq!(store.failed_count(), 1);
		assert_eq!(store.pending_count(), 2);
		assert_eq!(store.get(0), Some(&1));
		assert!(!store.is_loaded(2));
		assert_eq!(store.slot(1), Some(&FrameSlot::Pending));
	}
}
