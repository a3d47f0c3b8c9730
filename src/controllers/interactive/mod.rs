//! Interactive render coordination.
//!
//! Turns viewport changes into renders: a fast preview on the frame thread,
//! then a full-resolution render in the background that is cancelled as soon
//! as the view changes again.

mod coordinator;
pub mod data;
mod types;

pub use coordinator::RenderCoordinator;
pub use data::coordinator_config::{CoordinatorConfig, CoordinatorConfigError};
pub use data::frame_data::FrameData;
pub use types::{DisplayedRaster, RenderState};
