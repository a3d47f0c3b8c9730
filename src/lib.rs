mod adapters;
mod controllers;
mod core;

pub use adapters::pixel_format::{PixelFormatError, copy_colours_to_rgba, pixel_buffer_to_rgba};
pub use controllers::interactive::{
    CoordinatorConfig, CoordinatorConfigError, DisplayedRaster, FrameData, RenderCoordinator,
    RenderState,
};
pub use crate::core::actions::cancellation::{
    CancelFlag, CancelSignal, CancelToken, Cancelled, NeverCancel,
};
pub use crate::core::actions::render_tiled::coloured_algorithm::ColouredAlgorithm;
pub use crate::core::actions::render_tiled::ports::colour_map::ColourMap;
pub use crate::core::actions::render_tiled::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::render_tiled::render_tiled::{
    render_iterations_tiled, render_tiled, render_tiled_with,
};
pub use crate::core::data::band::Band;
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::complex_rect::{ComplexRect, ComplexRectError};
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
pub use crate::core::data::point::Point;
pub use crate::core::data::vec2::Vec2;
pub use crate::core::fractals::mandelbrot::algorithm::{MandelbrotAlgorithm, evaluate};
pub use crate::core::fractals::mandelbrot::colour_maps::hue_gradient::MandelbrotHueGradient;
pub use crate::core::fractals::mandelbrot::errors::MandelbrotError;
pub use crate::core::util::calculate_bands_in_pixel_rect::calculate_bands_in_pixel_rect;
pub use crate::core::util::pixel_to_complex_coords::{
    PixelToComplex, PixelToComplexCoordsError, pixel_to_complex_coords,
};
pub use crate::core::util::worker_counts::available_workers;
pub use crate::core::viewport::viewport_state::{FAST_ZOOM_FACTOR, ViewportState, ZOOM_FACTOR};
