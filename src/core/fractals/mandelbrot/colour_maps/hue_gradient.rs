use crate::core::actions::render_tiled::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

const HUE_SPAN_DEGREES: f64 = 300.0;
const HUE_OFFSET_DEGREES: f64 = -60.0;

/// Sweeps the hue wheel from magenta (escaped immediately) through red,
/// yellow and green, ending on blue for points that never escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandelbrotHueGradient {
    max_iterations: u32,
}

impl MandelbrotHueGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    #[must_use]
    pub fn interior() -> Colour {
        Colour::from_hue(HUE_SPAN_DEGREES + HUE_OFFSET_DEGREES)
    }
}

impl ColourMap for MandelbrotHueGradient {
    type T = u32;

    fn map(&self, iterations: u32) -> Colour {
        if iterations >= self.max_iterations {
            return Self::interior();
        }

        let hue = f64::from(iterations) * HUE_SPAN_DEGREES / f64::from(self.max_iterations)
            + HUE_OFFSET_DEGREES;

        Colour::from_hue(hue)
    }
}
