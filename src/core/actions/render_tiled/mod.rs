pub mod coloured_algorithm;
pub mod ports;
#[allow(clippy::module_inception)]
pub mod render_tiled;
