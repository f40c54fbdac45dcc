//! Play modes and scroll progress bases.

use std::{fmt::Formatter, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ReelError;

/// Policy deciding what drives playback progress.
///
/// The mode is fixed when a sequence is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayMode {
	/// Progress follows the scroll position relative to the document height
	#[default]
	#[serde(alias = "scroll")]
	Scroll,
	/// Progress follows elapsed time and loops, like a regular video
	#[serde(alias = "auto")]
	Auto,
	/// Progress is only changed through `set_progress`
	#[serde(alias = "manual")]
	Manual,
}

impl std::fmt::Display for PlayMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Scroll => write!(f, "SCROLL"),
			Self::Auto => write!(f, "AUTO"),
			Self::Manual => write!(f, "MANUAL"),
		}
	}
}

impl FromStr for PlayMode {
	type Err = ReelError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_uppercase().as_str() {
			"SCROLL" => Ok(Self::Scroll),
			"AUTO" => Ok(Self::Auto),
			"MANUAL" => Ok(Self::Manual),
			_ => Err(ReelError::invalid_options(format!("unknown play mode '{s}'"))),
		}
	}
}

/// Denominator used to turn a scroll offset into progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBasis {
	/// `offset / scrollable_height`
	#[default]
	Document,
	/// `offset / (scrollable_height - viewport_height)`, reaching 1 at the bottom of the page
	Viewport,
}

impl std::fmt::Display for ScrollBasis {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Document => write!(f, "document"),
			Self::Viewport => write!(f, "viewport"),
		}
	}
}

impl FromStr for ScrollBasis {
	type Err = ReelError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"document" => Ok(Self::Document),
			"viewport" => Ok(Self::Viewport),
			_ => Err(ReelError::invalid_options(format!("unknown scroll basis '{s}'"))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_play_mode_round_trips_through_display() {
		for mode in [PlayMode::Scroll, PlayMode::Auto, PlayMode::Manual] {
			assert_eq!(mode.to_string().parse::<PlayMode>().unwrap(), mode);
		}
		assert_eq!("auto".parse::<PlayMode>().unwrap(), PlayMode::Auto);
		assert!("video".parse::<PlayMode>().is_err());
	}

	#[test]
	fn test_defaults() {
		assert_eq!(PlayMode::default(), PlayMode::Scroll);
		assert_eq!(ScrollBasis::default(), ScrollBasis::Document);
	}
}
