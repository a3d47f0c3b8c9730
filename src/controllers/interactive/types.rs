//! States and outputs of the render coordinator.

/// Where the coordinator is in its preview/primary cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderState {
    /// Nothing to do; the displayed raster matches the view.
    Idle,
    /// The view changed; the next tick renders a fresh preview.
    PreviewDirty,
    /// A preview is on screen; the next quiet tick starts the primary render.
    PrimaryPending,
    /// A background render of the primary raster is in flight.
    PrimaryRunning,
}

/// Which raster the host should present this frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisplayedRaster {
    Preview,
    Primary,
}
