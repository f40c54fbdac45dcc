//! Forces dynamic linking of `reel_internal` when the `dynamic_linking` feature is on.

#[allow(unused_imports)]
#[allow(clippy::single_component_path_imports)]
use reel_internal;
