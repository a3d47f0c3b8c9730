use crate::controllers::interactive::data::coordinator_config::{
    CoordinatorConfig, CoordinatorConfigError,
};
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::types::{DisplayedRaster, RenderState};
use crate::core::actions::cancellation::{CancelFlag, CancelToken, NeverCancel};
use crate::core::actions::render_tiled::render_tiled::render_tiled;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::vec2::Vec2;
use crate::core::util::worker_counts::{background_workers, preview_workers};
use crate::core::viewport::viewport_state::ViewportState;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

struct BackgroundJob {
    generation: u64,
    cancel: CancelFlag,
    results: Receiver<FrameData>,
    handle: JoinHandle<()>,
}

impl BackgroundJob {
    /// Waits for the render thread. Returns `false` if it panicked.
    fn join(self) -> bool {
        if self.handle.join().is_err() {
            log::error!("primary render generation {} panicked", self.generation);
            return false;
        }

        true
    }
}

/// Drives the two-tier render: a cheap synchronous preview whenever the view
/// changes, then a full-resolution render on a background thread once the
/// view has been still for a frame.
///
/// The host calls [`tick`](Self::tick) once per frame and presents whichever
/// raster it names. At most one background render is in flight; changing the
/// view cancels it, and a cancelled render's result is never displayed.
pub struct RenderCoordinator {
    config: CoordinatorConfig,
    primary_rect: PixelRect,
    viewport: ViewportState,
    preview: PixelBuffer,
    /// `None` while the raster is lent to a background job, or after a
    /// cancelled job took it with it.
    primary: Option<PixelBuffer>,
    state: RenderState,
    displayed: DisplayedRaster,
    generation: u64,
    job: Option<BackgroundJob>,
    last_render_duration: Option<Duration>,
}

impl RenderCoordinator {
    pub fn new(config: CoordinatorConfig) -> Result<Self, CoordinatorConfigError> {
        config.validate()?;

        let primary_rect = config.primary_rect()?;
        let preview_rect = config.preview_rect()?;

        Ok(Self {
            config,
            primary_rect,
            viewport: ViewportState::for_raster(primary_rect),
            preview: PixelBuffer::new(preview_rect),
            primary: Some(PixelBuffer::new(primary_rect)),
            state: RenderState::PreviewDirty,
            displayed: DisplayedRaster::Preview,
            generation: 0,
            job: None,
            last_render_duration: None,
        })
    }

    /// Advances the state machine by one frame and returns the raster to
    /// present.
    pub fn tick(&mut self) -> DisplayedRaster {
        self.sync_viewport();

        match self.state {
            RenderState::PreviewDirty => {
                self.render_preview();
                self.set_state(RenderState::PrimaryPending);
            }
            RenderState::PrimaryPending => self.start_primary(),
            RenderState::PrimaryRunning => self.poll_primary(),
            RenderState::Idle => {}
        }

        self.displayed
    }

    pub fn pan(&mut self, pixel_delta: Vec2, viewport_size: Vec2) {
        self.viewport.pan(pixel_delta, viewport_size);
        self.sync_viewport();
    }

    pub fn zoom(&mut self, anchor_pixel: Vec2, viewport_size: Vec2, wheel_ticks: f64, fast: bool) {
        self.viewport.zoom(anchor_pixel, viewport_size, wheel_ticks, fast);
        self.sync_viewport();
    }

    pub fn reset_view(&mut self) {
        self.viewport.reset(self.primary_rect);
        self.sync_viewport();
    }

    /// Reallocates both rasters for a new primary size. Zero sizes (a
    /// minimised window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        let config = CoordinatorConfig {
            width,
            height,
            ..self.config
        };

        let (Ok(primary_rect), Ok(preview_rect)) = (config.primary_rect(), config.preview_rect())
        else {
            return;
        };

        self.abandon_background();

        self.config = config;
        self.primary_rect = primary_rect;
        self.preview = PixelBuffer::new(preview_rect);
        self.primary = Some(PixelBuffer::new(primary_rect));
        self.displayed = DisplayedRaster::Preview;

        self.viewport.mark_dirty();
        self.sync_viewport();
    }

    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    /// Direct viewport access; changes are picked up on the next tick.
    pub fn viewport_mut(&mut self) -> &mut ViewportState {
        &mut self.viewport
    }

    #[must_use]
    pub fn preview(&self) -> &PixelBuffer {
        &self.preview
    }

    /// The last completed primary raster, if it isn't out on a background
    /// job.
    #[must_use]
    pub fn primary(&self) -> Option<&PixelBuffer> {
        self.primary.as_ref()
    }

    #[must_use]
    pub fn displayed(&self) -> DisplayedRaster {
        self.displayed
    }

    #[must_use]
    pub fn displayed_raster(&self) -> &PixelBuffer {
        match (self.displayed, &self.primary) {
            (DisplayedRaster::Primary, Some(primary)) => primary,
            _ => &self.preview,
        }
    }

    #[must_use]
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Id of the most recently started background render; 0 before the first.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn last_render_duration(&self) -> Option<Duration> {
        self.last_render_duration
    }

    fn set_state(&mut self, state: RenderState) {
        if self.state != state {
            log::trace!("render state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    fn sync_viewport(&mut self) {
        if self.viewport.take_dirty() {
            self.abandon_background();
            self.set_state(RenderState::PreviewDirty);
        }
    }

    /// Signals the in-flight job and lets it go without waiting. Its thread
    /// stops at the next pixel and its raster is dropped with it.
    fn abandon_background(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel.cancel();
            log::trace!("cancelled primary render generation {}", job.generation);
        }
    }

    fn render_preview(&mut self) {
        self.abandon_background();

        let start = Instant::now();

        if let Err(err) = render_tiled(
            &mut self.preview,
            self.viewport.region(),
            self.config.preview_max_iterations,
            preview_workers(self.config.worker_ceiling),
            &NeverCancel,
        ) {
            log::warn!("preview render stopped early: {}", err);
        }

        log::debug!(
            "preview {}x{} rendered in {:?}",
            self.preview.width(),
            self.preview.height(),
            start.elapsed()
        );

        self.displayed = DisplayedRaster::Preview;
    }

    fn start_primary(&mut self) {
        self.generation += 1;

        let generation = self.generation;
        let cancel = CancelFlag::new();
        let signal = cancel.signal();
        let region = self.viewport.region();
        let max_iterations = self.config.primary_max_iterations;
        let workers = background_workers(self.config.worker_ceiling);
        let mut raster = self
            .primary
            .take()
            .unwrap_or_else(|| PixelBuffer::new(self.primary_rect));
        let (sender, results) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name(format!("primary-render-{}", generation))
            .spawn(move || {
                let start = Instant::now();

                if render_tiled(&mut raster, region, max_iterations, workers, &signal).is_err() {
                    log::trace!("primary render generation {} stopped", generation);
                    return;
                }

                let frame = FrameData {
                    generation,
                    pixel_buffer: raster,
                    render_duration: start.elapsed(),
                };

                if sender.send(frame).is_err() {
                    log::trace!("coordinator gone before generation {} finished", generation);
                }
            });

        match spawned {
            Ok(handle) => {
                log::debug!(
                    "started primary render generation {} on {} workers",
                    generation,
                    workers
                );

                self.job = Some(BackgroundJob {
                    generation,
                    cancel,
                    results,
                    handle,
                });
                self.set_state(RenderState::PrimaryRunning);
            }
            Err(err) => {
                log::error!("failed to spawn primary render thread: {}", err);
                self.set_state(RenderState::Idle);
            }
        }
    }

    fn poll_primary(&mut self) {
        let Some(job) = self.job.as_ref() else {
            self.set_state(RenderState::Idle);
            return;
        };

        let frame = match job.results.try_recv() {
            Ok(frame) => frame,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                log::warn!(
                    "primary render generation {} ended without a result",
                    job.generation
                );
                self.reap_job();
                self.set_state(RenderState::Idle);
                return;
            }
        };

        if job.cancel.is_cancelled() || frame.generation != job.generation {
            log::trace!("discarding stale frame for generation {}", frame.generation);
            return;
        }

        log::info!(
            "primary render generation {} took {:?}",
            frame.generation,
            frame.render_duration
        );

        self.last_render_duration = Some(frame.render_duration);
        self.primary = Some(frame.pixel_buffer);
        self.displayed = DisplayedRaster::Primary;
        self.reap_job();
        self.set_state(RenderState::Idle);
    }

    /// Releases a job whose thread has finished or is about to. Only joins
    /// when that can't block the frame.
    fn reap_job(&mut self) {
        let Some(job) = self.job.take() else {
            return;
        };

        if job.handle.is_finished() {
            job.join();
        }
    }
}

impl Drop for RenderCoordinator {
    fn drop(&mut self) {
        if let Some(job) = self.job.take() {
            job.cancel.cancel();
            job.join();
        }
    }
}
