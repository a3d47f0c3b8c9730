use mandelbrot_explorer::{
    CoordinatorConfig, DisplayedRaster, PixelFormatError, RenderCoordinator, RenderState, Vec2,
    copy_colours_to_rgba,
};
use std::thread;
use std::time::{Duration, Instant};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Scripted input for one frame: a drag delta and wheel ticks at the centre.
struct FrameInput {
    drag: Vec2,
    wheel_ticks: f64,
}

fn scripted_input() -> Vec<FrameInput> {
    let drags = (0..10).map(|_| FrameInput {
        drag: Vec2::new(12.0, -4.0),
        wheel_ticks: 0.0,
    });
    let zooms = (0..8).map(|_| FrameInput {
        drag: Vec2::default(),
        wheel_ticks: -1.0,
    });

    drags.chain(zooms).collect()
}

/// Stands in for a texture upload: converts the displayed raster to RGBA8.
fn present(
    coordinator: &RenderCoordinator,
    displayed: DisplayedRaster,
    rgba: &mut Vec<u8>,
) -> Result<(), PixelFormatError> {
    let raster = coordinator.displayed_raster();
    rgba.resize(raster.buffer_size() * 4, 0);
    copy_colours_to_rgba(raster.buffer(), rgba)?;

    log::trace!(
        "presenting {:?} raster {}x{}",
        displayed,
        raster.width(),
        raster.height()
    );

    Ok(())
}

fn run_until_settled(
    coordinator: &mut RenderCoordinator,
    rgba: &mut Vec<u8>,
) -> Result<DisplayedRaster, PixelFormatError> {
    let start = Instant::now();

    loop {
        let displayed = coordinator.tick();
        present(coordinator, displayed, rgba)?;

        if coordinator.state() == RenderState::Idle || start.elapsed() >= SETTLE_TIMEOUT {
            return Ok(displayed);
        }

        thread::sleep(FRAME_INTERVAL);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = CoordinatorConfig::new(960, 540)?;
    let viewport_size = Vec2::new(f64::from(config.width), f64::from(config.height));
    let centre = Vec2::new(viewport_size.x / 2.0, viewport_size.y / 2.0);

    let mut coordinator = RenderCoordinator::new(config)?;
    let mut rgba = Vec::new();

    run_until_settled(&mut coordinator, &mut rgba)?;

    for input in scripted_input() {
        coordinator.pan(input.drag, viewport_size);
        coordinator.zoom(centre, viewport_size, input.wheel_ticks, false);

        let displayed = coordinator.tick();
        present(&coordinator, displayed, &mut rgba)?;

        thread::sleep(FRAME_INTERVAL);
    }

    let displayed = run_until_settled(&mut coordinator, &mut rgba)?;
    let region = coordinator.viewport().region();

    log::info!(
        "settled on {:?} after {} generations; region origin ({}, {}) size {}x{}; last render {:?}",
        displayed,
        coordinator.generation(),
        region.origin().real,
        region.origin().imag,
        region.width(),
        region.height(),
        coordinator.last_render_duration()
    );

    Ok(())
}
