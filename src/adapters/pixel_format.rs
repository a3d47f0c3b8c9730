//! Pixel format conversion helpers for presentation adapters.

use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::PixelBuffer;
use rayon::prelude::*;
use std::error::Error;
use std::fmt;

const RGBA_BYTES_PER_PIXEL: usize = 4;
const OPAQUE: u8 = 255;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelFormatError {
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for PixelFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "dst length {} does not match expected {}",
                    actual, expected
                )
            }
        }
    }
}

impl Error for PixelFormatError {}

/// Writes `src` into `dst` as RGBA8 with opaque alpha, the layout texture
/// uploads expect. `dst` must hold exactly four bytes per source pixel.
pub fn copy_colours_to_rgba(src: &[Colour], dst: &mut [u8]) -> Result<(), PixelFormatError> {
    let expected = src.len() * RGBA_BYTES_PER_PIXEL;

    if dst.len() != expected {
        return Err(PixelFormatError::SizeMismatch {
            expected,
            actual: dst.len(),
        });
    }

    dst.par_chunks_exact_mut(RGBA_BYTES_PER_PIXEL)
        .zip(src.par_iter())
        .for_each(|(dst_pixel, colour)| {
            dst_pixel.copy_from_slice(&[colour.r, colour.g, colour.b, OPAQUE]);
        });

    Ok(())
}

#[must_use]
pub fn pixel_buffer_to_rgba(raster: &PixelBuffer) -> Vec<u8> {
    let mut rgba = vec![0; raster.buffer_size() * RGBA_BYTES_PER_PIXEL];

    raster
        .buffer()
        .par_iter()
        .zip(rgba.par_chunks_exact_mut(RGBA_BYTES_PER_PIXEL))
        .for_each(|(colour, dst_pixel)| {
            dst_pixel.copy_from_slice(&[colour.r, colour.g, colour.b, OPAQUE]);
        });

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::pixel_rect::PixelRect;

    fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }

    #[test]
    fn test_copy_colours_to_rgba_known_values() {
        let src = vec![
            rgb(255, 0, 0),
            rgb(0, 255, 0),
            rgb(0, 0, 255),
            rgb(255, 255, 255),
        ];
        let mut dst = vec![0; src.len() * 4];

        copy_colours_to_rgba(&src, &mut dst).unwrap();

        assert_eq!(
            dst,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 255
            ]
        );
    }

    #[test]
    fn test_copy_colours_to_rgba_empty_buffers() {
        let mut dst: Vec<u8> = vec![];

        copy_colours_to_rgba(&[], &mut dst).unwrap();

        assert!(dst.is_empty());
    }

    #[test]
    fn test_copy_colours_to_rgba_rejects_wrong_size() {
        let src = vec![rgb(1, 2, 3); 2];
        let mut dst = vec![0; 7];

        assert_eq!(
            copy_colours_to_rgba(&src, &mut dst),
            Err(PixelFormatError::SizeMismatch {
                expected: 8,
                actual: 7
            })
        );
        assert!(dst.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pixel_buffer_to_rgba() {
        let pixel_rect = PixelRect::from_size(2, 1).unwrap();
        let raster = PixelBuffer::from_data(pixel_rect, vec![rgb(10, 20, 30), rgb(40, 50, 60)])
            .unwrap();

        assert_eq!(
            pixel_buffer_to_rgba(&raster),
            vec![10, 20, 30, 255, 40, 50, 60, 255]
        );
    }
}
