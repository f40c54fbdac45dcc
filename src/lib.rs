#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `reel-rs` plays a numbered sequence of still images onto a raster surface.
//!
//! The frame on screen is picked from the page scroll position, from elapsed
//! time (looping autoplay), or from a value the owner sets by hand.
//!
pub use reel_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use reel_dylib;
