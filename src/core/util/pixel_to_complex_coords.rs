use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PixelToComplexCoordsError {
    PointOutsideRect { point: Point, pixel_rect: PixelRect },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideRect { point, pixel_rect } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the rectangle with coords top-left: (x: {}, y: {}) bottom-right: (x: {}, y: {})",
                    point.x,
                    point.y,
                    pixel_rect.top_left().x,
                    pixel_rect.top_left().y,
                    pixel_rect.bottom_right().x,
                    pixel_rect.bottom_right().y
                )
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

/// Precomputed mapping from raster pixels to points of a region.
///
/// The first pixel of each axis lands on the region's origin and the last on
/// its far edge. An axis only one pixel long maps entirely to the origin edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelToComplex {
    top_left: Point,
    origin: Complex,
    width: f64,
    height: f64,
    x_divisor: f64,
    y_divisor: f64,
}

fn axis_divisor(extent: u32) -> f64 {
    f64::from(extent.saturating_sub(1).max(1))
}

impl PixelToComplex {
    #[must_use]
    pub fn new(pixel_rect: PixelRect, complex_rect: ComplexRect) -> Self {
        Self {
            top_left: pixel_rect.top_left(),
            origin: complex_rect.origin(),
            width: complex_rect.width(),
            height: complex_rect.height(),
            x_divisor: axis_divisor(pixel_rect.width()),
            y_divisor: axis_divisor(pixel_rect.height()),
        }
    }

    /// Unchecked: pixels outside the raster extrapolate past the region.
    #[inline]
    #[must_use]
    pub fn map(&self, pixel: Point) -> Complex {
        let relative_x = f64::from(pixel.x - self.top_left.x);
        let relative_y = f64::from(pixel.y - self.top_left.y);

        Complex {
            real: self.origin.real + relative_x * self.width / self.x_divisor,
            imag: self.origin.imag + relative_y * self.height / self.y_divisor,
        }
    }
}

pub fn pixel_to_complex_coords(
    pixel_position: Point,
    pixel_rect: PixelRect,
    complex_rect: ComplexRect,
) -> Result<Complex, PixelToComplexCoordsError> {
    if !pixel_rect.contains_point(pixel_position) {
        return Err(PixelToComplexCoordsError::PointOutsideRect {
            point: pixel_position,
            pixel_rect,
        });
    }

    Ok(PixelToComplex::new(pixel_rect, complex_rect).map(pixel_position))
}
