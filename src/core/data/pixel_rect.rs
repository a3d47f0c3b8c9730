use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelRectError {
    InvalidSize { width: i64, height: i64 },
}

impl fmt::Display for PixelRectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "pixel rect size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for PixelRectError {}

/// Inclusive pixel rectangle; both corners are part of the rect.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    top_left: Point,
    bottom_right: Point,
}

impl PixelRect {
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, PixelRectError> {
        let width = i64::from(bottom_right.x) - i64::from(top_left.x) + 1;
        let height = i64::from(bottom_right.y) - i64::from(top_left.y) + 1;

        if width < 1 || height < 1 {
            return Err(PixelRectError::InvalidSize { width, height });
        }

        Ok(Self {
            top_left,
            bottom_right,
        })
    }

    /// A `width` x `height` rect anchored at `(0, 0)`.
    pub fn from_size(width: u32, height: u32) -> Result<Self, PixelRectError> {
        let invalid = PixelRectError::InvalidSize {
            width: i64::from(width),
            height: i64::from(height),
        };

        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let right = i32::try_from(width - 1).map_err(|_| invalid)?;
        let bottom = i32::try_from(height - 1).map_err(|_| invalid)?;

        Self::new(Point { x: 0, y: 0 }, Point { x: right, y: bottom })
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        (self.bottom_right.x - self.top_left.x + 1) as u32
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        (self.bottom_right.y - self.top_left.y + 1) as u32
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        self.top_left.x <= point.x
            && self.top_left.y <= point.y
            && self.bottom_right.x >= point.x
            && self.bottom_right.y >= point.y
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_new_valid() {
        let top_left = Point { x: 0, y: 0 };
        let bottom_right = Point { x: 100, y: 100 };

        let rect = PixelRect::new(top_left, bottom_right).unwrap();

        assert_eq!(rect.top_left(), top_left);
        assert_eq!(rect.bottom_right(), bottom_right);
    }

    #[test]
    fn test_pixel_rect_dimensions() {
        let rect = PixelRect::new(Point { x: -10, y: -20 }, Point { x: 110, y: 80 }).unwrap();

        assert_eq!(rect.width(), 121);
        assert_eq!(rect.height(), 101);
        assert_eq!(rect.size(), 12221);
    }

    #[test]
    fn test_pixel_rect_dimensions_must_be_positive() {
        let rect_negative_width = PixelRect::new(Point { x: 0, y: 0 }, Point { x: -100, y: 10 });
        let rect_negative_height = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 100, y: -10 });

        assert_eq!(
            rect_negative_width,
            Err(PixelRectError::InvalidSize {
                width: -99,
                height: 11
            })
        );
        assert_eq!(
            rect_negative_height,
            Err(PixelRectError::InvalidSize {
                width: 101,
                height: -9
            })
        );
    }

    #[test]
    fn test_single_pixel_and_single_row_are_valid() {
        let single_pixel = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 0, y: 0 }).unwrap();
        let one_pixel_tall = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 3, y: 0 }).unwrap();

        assert_eq!(single_pixel.size(), 1);
        assert_eq!(one_pixel_tall.width(), 4);
        assert_eq!(one_pixel_tall.height(), 1);
    }

    #[test]
    fn test_from_size() {
        let rect = PixelRect::from_size(4, 3).unwrap();

        assert_eq!(rect.top_left(), Point { x: 0, y: 0 });
        assert_eq!(rect.bottom_right(), Point { x: 3, y: 2 });
        assert_eq!(
            PixelRect::from_size(0, 3),
            Err(PixelRectError::InvalidSize {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn test_pixel_rect_contains_point() {
        let rect = PixelRect::new(Point { x: -50, y: -50 }, Point { x: 100, y: 100 }).unwrap();

        assert!(rect.contains_point(Point { x: 50, y: 50 }));
        assert!(rect.contains_point(Point { x: -50, y: -50 }));
        assert!(rect.contains_point(Point { x: 100, y: 100 }));
        assert!(!rect.contains_point(Point { x: 101, y: 50 }));
        assert!(!rect.contains_point(Point { x: 50, y: -51 }));
    }
}
