use std::ops::{Add, Div, Mul, Neg, Sub};

/// Sub-pixel screen-space vector: cursor positions, drag deltas and viewport
/// sizes as the host reports them.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

// component-wise
impl Mul for Vec2 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        Self::new(self.x * scale, self.y * scale)
    }
}

// component-wise
impl Div for Vec2 {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_wise_ops() {
        let a = Vec2::new(6.0, 8.0);
        let b = Vec2::new(2.0, 4.0);

        assert_eq!(a + b, Vec2::new(8.0, 12.0));
        assert_eq!(a - b, Vec2::new(4.0, 4.0));
        assert_eq!(a * b, Vec2::new(12.0, 32.0));
        assert_eq!(a / b, Vec2::new(3.0, 2.0));
        assert_eq!(-a, Vec2::new(-6.0, -8.0));
        assert_eq!(a * 0.5, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_is_zero() {
        assert!(Vec2::default().is_zero());
        assert!(!Vec2::new(0.0, -1.0).is_zero());
    }
}
