use crate::core::data::complex::Complex;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::vec2::Vec2;

pub const ZOOM_FACTOR: f64 = 1.1;
pub const FAST_ZOOM_FACTOR: f64 = 1.3;

/// The visible region of the complex plane plus a dirty flag.
///
/// Mutations take screen-space inputs (pixel deltas, cursor positions and the
/// viewport's pixel size) and translate them into region changes. A screen
/// point `p` corresponds to `origin + p * size / viewport_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    region: ComplexRect,
    dirty: bool,
}

fn region_size(region: &ComplexRect) -> Vec2 {
    Vec2::new(region.width(), region.height())
}

fn offset(origin: Complex, delta: Vec2) -> Complex {
    Complex {
        real: origin.real + delta.x,
        imag: origin.imag + delta.y,
    }
}

impl ViewportState {
    /// Starts dirty so the first frame renders.
    #[must_use]
    pub fn new(region: ComplexRect) -> Self {
        Self {
            region,
            dirty: true,
        }
    }

    #[must_use]
    pub fn for_raster(pixel_rect: PixelRect) -> Self {
        Self::new(ComplexRect::centered_for_aspect(pixel_rect))
    }

    #[must_use]
    pub fn region(&self) -> ComplexRect {
        self.region
    }

    pub fn set_region(&mut self, region: ComplexRect) {
        self.region = region;
        self.dirty = true;
    }

    /// Back to the start-up view for a raster of this shape.
    pub fn reset(&mut self, pixel_rect: PixelRect) {
        self.set_region(ComplexRect::centered_for_aspect(pixel_rect));
    }

    /// Drags the view by `pixel_delta` screen pixels: content follows the
    /// cursor, so the origin moves the opposite way.
    pub fn pan(&mut self, pixel_delta: Vec2, viewport_size: Vec2) {
        if pixel_delta.is_zero() {
            return;
        }

        let size = region_size(&self.region);
        let origin = offset(self.region.origin(), -(pixel_delta * size / viewport_size));

        self.apply(origin, size);
    }

    /// Scales the region by `factor^wheel_ticks` about `anchor_pixel`, which
    /// keeps pointing at the same complex coordinate. Positive ticks enlarge
    /// the visible region.
    pub fn zoom(&mut self, anchor_pixel: Vec2, viewport_size: Vec2, wheel_ticks: f64, fast: bool) {
        if wheel_ticks == 0.0 {
            return;
        }

        let factor = if fast { FAST_ZOOM_FACTOR } else { ZOOM_FACTOR };
        let size = region_size(&self.region);
        let anchored = offset(self.region.origin(), anchor_pixel * size / viewport_size);

        let new_size = size * factor.powf(wheel_ticks);
        let origin = offset(anchored, -(anchor_pixel * new_size / viewport_size));

        self.apply(origin, new_size);
    }

    #[must_use]
    pub fn screen_to_complex(&self, pixel: Vec2, viewport_size: Vec2) -> Complex {
        offset(
            self.region.origin(),
            pixel * region_size(&self.region) / viewport_size,
        )
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the view changed since the last call, clearing the
    /// flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn apply(&mut self, origin: Complex, size: Vec2) {
        match ComplexRect::from_origin_size(origin, size.x, size.y) {
            Ok(region) => self.set_region(region),
            Err(err) => log::warn!("ignoring viewport change: {}", err),
        }
    }
}
