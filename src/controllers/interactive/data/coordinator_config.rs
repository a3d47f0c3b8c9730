use crate::core::data::pixel_rect::PixelRect;
use crate::core::util::worker_counts::available_workers;
use std::error::Error;
use std::fmt;

const DEFAULT_WIDTH: u32 = 1920;
const DEFAULT_HEIGHT: u32 = 1080;
const DEFAULT_PREVIEW_DIVISOR: u32 = 4;
const DEFAULT_PREVIEW_MAX_ITERATIONS: u32 = 100;
const DEFAULT_PRIMARY_MAX_ITERATIONS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorConfigError {
    EmptyRaster { width: u32, height: u32 },
    ZeroPreviewDivisor,
    ZeroMaxIterations,
    ZeroWorkers,
}

impl fmt::Display for CoordinatorConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRaster { width, height } => {
                write!(f, "raster size must be at least 1x1, got {}x{}", width, height)
            }
            Self::ZeroPreviewDivisor => write!(f, "preview divisor must be greater than zero"),
            Self::ZeroMaxIterations => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::ZeroWorkers => write!(f, "worker ceiling must be greater than zero"),
        }
    }
}

impl Error for CoordinatorConfigError {}

/// Settings for a [`RenderCoordinator`](crate::RenderCoordinator).
///
/// `width` x `height` is the primary raster; the preview raster is that size
/// divided by `preview_divisor`, never smaller than 1x1. `worker_ceiling`
/// caps how many threads a single render may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub width: u32,
    pub height: u32,
    pub preview_divisor: u32,
    pub preview_max_iterations: u32,
    pub primary_max_iterations: u32,
    pub worker_ceiling: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            preview_divisor: DEFAULT_PREVIEW_DIVISOR,
            preview_max_iterations: DEFAULT_PREVIEW_MAX_ITERATIONS,
            primary_max_iterations: DEFAULT_PRIMARY_MAX_ITERATIONS,
            worker_ceiling: available_workers(),
        }
    }
}

impl CoordinatorConfig {
    /// Defaults for everything except the primary raster size.
    pub fn new(width: u32, height: u32) -> Result<Self, CoordinatorConfigError> {
        let config = Self {
            width,
            height,
            ..Self::default()
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoordinatorConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(CoordinatorConfigError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }

        if self.preview_divisor == 0 {
            return Err(CoordinatorConfigError::ZeroPreviewDivisor);
        }

        if self.preview_max_iterations == 0 || self.primary_max_iterations == 0 {
            return Err(CoordinatorConfigError::ZeroMaxIterations);
        }

        if self.worker_ceiling == 0 {
            return Err(CoordinatorConfigError::ZeroWorkers);
        }

        Ok(())
    }

    pub(crate) fn primary_rect(&self) -> Result<PixelRect, CoordinatorConfigError> {
        PixelRect::from_size(self.width, self.height).map_err(|_| {
            CoordinatorConfigError::EmptyRaster {
                width: self.width,
                height: self.height,
            }
        })
    }

    pub(crate) fn preview_rect(&self) -> Result<PixelRect, CoordinatorConfigError> {
        let divisor = self.preview_divisor.max(1);
        let width = (self.width / divisor).max(1);
        let height = (self.height / divisor).max(1);

        PixelRect::from_size(width, height)
            .map_err(|_| CoordinatorConfigError::EmptyRaster { width, height })
    }
}
