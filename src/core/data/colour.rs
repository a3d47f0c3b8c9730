#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Converts hue (degrees, any sign or range) at full saturation and value
    /// to 8-bit RGB.
    #[must_use]
    pub fn from_hue(hue: f64) -> Self {
        let sector_position = hue.rem_euclid(360.0) / 60.0;
        let sector = sector_position.floor();
        let rising = sector_position - sector;
        let falling = 1.0 - rising;

        let (r, g, b) = match sector as u8 {
            0 => (1.0, rising, 0.0),
            1 => (falling, 1.0, 0.0),
            2 => (0.0, 1.0, rising),
            3 => (0.0, falling, 1.0),
            4 => (rising, 0.0, 1.0),
            _ => (1.0, 0.0, falling),
        };

        Self {
            r: unit_to_u8(r),
            g: unit_to_u8(g),
            b: unit_to_u8(b),
        }
    }
}

fn unit_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
