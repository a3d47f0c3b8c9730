use crate::core::data::complex::Complex;
use crate::core::data::pixel_rect::PixelRect;
use std::error::Error;
use std::fmt;

/// Height of the default view; its width follows the raster's aspect ratio.
const DEFAULT_VIEW_HEIGHT: f64 = 3.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ComplexRectError {
    InvalidSize { width: f64, height: f64 },
}

impl fmt::Display for ComplexRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(
                    f,
                    "complex rect size must be positive and finite: {}x{}",
                    width, height
                )
            }
        }
    }
}

impl Error for ComplexRectError {}

/// Axis-aligned region of the complex plane, stored as origin + size.
///
/// The origin is the corner that pixel `(0, 0)` maps to; the far corner
/// `origin + size` is where the last pixel lands.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComplexRect {
    origin: Complex,
    width: f64,
    height: f64,
}

impl ComplexRect {
    pub fn new(top_left: Complex, bottom_right: Complex) -> Result<Self, ComplexRectError> {
        Self::from_origin_size(
            top_left,
            bottom_right.real - top_left.real,
            bottom_right.imag - top_left.imag,
        )
    }

    pub fn from_origin_size(
        origin: Complex,
        width: f64,
        height: f64,
    ) -> Result<Self, ComplexRectError> {
        let valid = |extent: f64| extent.is_finite() && extent > 0.0;

        if !valid(width) || !valid(height) || !origin.is_finite() {
            return Err(ComplexRectError::InvalidSize { width, height });
        }

        Ok(Self {
            origin,
            width,
            height,
        })
    }

    /// The start-up view: three units tall, as wide as the raster's aspect
    /// ratio demands, centred on zero.
    #[must_use]
    pub fn centered_for_aspect(pixel_rect: PixelRect) -> Self {
        let aspect = f64::from(pixel_rect.width()) / f64::from(pixel_rect.height());
        let width = DEFAULT_VIEW_HEIGHT * aspect;

        Self {
            origin: Complex {
                real: -width / 2.0,
                imag: -DEFAULT_VIEW_HEIGHT / 2.0,
            },
            width,
            height: DEFAULT_VIEW_HEIGHT,
        }
    }

    #[must_use]
    pub fn origin(&self) -> Complex {
        self.origin
    }

    #[must_use]
    pub fn top_left(&self) -> Complex {
        self.origin
    }

    #[must_use]
    pub fn bottom_right(&self) -> Complex {
        Complex {
            real: self.origin.real + self.width,
            imag: self.origin.imag + self.height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[must_use]
    pub fn contains_point(&self, point: Complex) -> bool {
        let bottom_right = self.bottom_right();

        self.origin.real <= point.real
            && self.origin.imag <= point.imag
            && bottom_right.real >= point.real
            && bottom_right.imag >= point.imag
    }
}
