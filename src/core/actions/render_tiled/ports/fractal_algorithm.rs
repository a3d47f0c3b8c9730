use crate::core::data::point::Point;

/// Per-pixel computation run by the tile scheduler. Implementations must be
/// total: every pixel of the raster they were built for yields a value.
pub trait FractalAlgorithm {
    type Success;

    fn compute(&self, pixel: Point) -> Self::Success;
}
