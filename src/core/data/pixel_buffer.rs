use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() as usize
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "pixel rect size {} does not match buffer size {}",
                    pixel_rect_size, buffer_size
                )
            }
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of PixelRect bounds top:{}, left:{}, bottom:{}, right:{}",
                    pixel.x,
                    pixel.y,
                    pixel_rect.top_left().y,
                    pixel_rect.top_left().x,
                    pixel_rect.bottom_right().y,
                    pixel_rect.bottom_right().x
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

/// Row-major raster: one `T` per pixel of `pixel_rect`.
///
/// Display rasters hold [`Colour`]s; diagnostic renders use `u32` iteration
/// counts.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T = Colour> {
    pixel_rect: PixelRect,
    buffer: Vec<T>,
}

impl<T: Clone + Default> PixelBuffer<T> {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self::filled(pixel_rect, T::default())
    }
}

impl<T: Clone> PixelBuffer<T> {
    #[must_use]
    pub fn filled(pixel_rect: PixelRect, value: T) -> Self {
        Self {
            pixel_rect,
            buffer: vec![value; pixel_rect_to_buffer_size(pixel_rect)],
        }
    }
}

impl<T> PixelBuffer<T> {
    pub fn from_data(pixel_rect: PixelRect, buffer: Vec<T>) -> Result<Self, PixelBufferError> {
        let buffer_size = pixel_rect_to_buffer_size(pixel_rect);

        if buffer_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size: buffer_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixel_rect.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixel_rect.height()
    }

    #[must_use]
    pub fn buffer(&self) -> &[T] {
        &self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Mutable access to the backing storage, for the tile scheduler to split
    /// into per-band slices.
    pub(crate) fn buffer_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }

    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.buffer
    }

    pub fn get_pixel(&self, pixel: Point) -> Result<&T, PixelBufferError> {
        let index = self.index_of(pixel)?;
        Ok(&self.buffer[index])
    }

    pub fn set_pixel(&mut self, pixel: Point, value: T) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;
        self.buffer[index] = value;

        Ok(())
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let relative_x = (pixel.x - self.pixel_rect.top_left().x) as usize;
        let relative_y = (pixel.y - self.pixel_rect.top_left().y) as usize;

        Ok(relative_y * self.pixel_rect.width() as usize + relative_x)
    }
}
