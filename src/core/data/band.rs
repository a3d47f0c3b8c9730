use std::ops::Range;

/// A contiguous run of full-width raster rows assigned to one worker.
///
/// Bands may be empty when a render uses more workers than the raster has
/// rows.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Band {
    pub top: u32,
    pub height: u32,
}

impl Band {
    #[must_use]
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    #[must_use]
    pub fn rows(&self) -> Range<u32> {
        self.top..self.bottom()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let band = Band { top: 3, height: 4 };

        assert_eq!(band.bottom(), 7);
        assert_eq!(band.rows(), 3..7);
        assert!(!band.is_empty());
    }

    #[test]
    fn test_empty_band() {
        let band = Band { top: 5, height: 0 };

        assert!(band.is_empty());
        assert_eq!(band.rows().count(), 0);
    }
}
