use crate::core::actions::render_tiled::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::util::pixel_to_complex_coords::PixelToComplex;

/// Escape-time count for `c` under `z -> z^2 + c`, starting from zero.
///
/// Returns the first iteration `i < max_iterations` after which either
/// component of `z` is no longer finite, or `max_iterations` if the orbit
/// stays finite throughout. There is no escape radius: divergence is detected
/// by IEEE overflow, so counts are larger than a `|z| > 2` test would give.
#[must_use]
pub fn evaluate(c: Complex, max_iterations: u32) -> u32 {
    let mut z = Complex::ZERO;

    for iteration in 0..max_iterations {
        z = z * z + c;

        if !z.is_finite() {
            return iteration;
        }
    }

    max_iterations
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    mapping: PixelToComplex,
    max_iterations: u32,
}

impl MandelbrotAlgorithm {
    pub fn new(
        pixel_rect: PixelRect,
        complex_rect: ComplexRect,
        max_iterations: u32,
    ) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterationsError);
        }

        Ok(Self::with_bound(pixel_rect, complex_rect, max_iterations))
    }

    /// Skips the zero-bound check; a zero bound makes every pixel count as
    /// interior.
    pub(crate) fn with_bound(
        pixel_rect: PixelRect,
        complex_rect: ComplexRect,
        max_iterations: u32,
    ) -> Self {
        Self {
            mapping: PixelToComplex::new(pixel_rect, complex_rect),
            max_iterations,
        }
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u32;

    #[inline]
    fn compute(&self, pixel: Point) -> u32 {
        evaluate(self.mapping.map(pixel), self.max_iterations)
    }
}
