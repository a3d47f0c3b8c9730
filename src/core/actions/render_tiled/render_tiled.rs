use std::panic;
use std::thread;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::render_tiled::coloured_algorithm::ColouredAlgorithm;
use crate::core::actions::render_tiled::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::band::Band;
use crate::core::data::colour::Colour;
use crate::core::data::complex_rect::ComplexRect;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_maps::hue_gradient::MandelbrotHueGradient;
use crate::core::util::calculate_bands_in_pixel_rect::calculate_bands_in_pixel_rect;

fn render_band<Alg, C>(
    pixels: &mut [Alg::Success],
    band: Band,
    pixel_rect: PixelRect,
    algorithm: &Alg,
    cancel: &C,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
{
    let left = pixel_rect.top_left().x;
    let top = pixel_rect.top_left().y;
    let row_width = pixel_rect.width() as usize;

    for (row, row_pixels) in band.rows().zip(pixels.chunks_exact_mut(row_width)) {
        let y = top + row as i32;

        for (column, pixel) in row_pixels.iter_mut().enumerate() {
            cancel.check()?;

            *pixel = algorithm.compute(Point {
                x: left + column as i32,
                y,
            });
        }
    }

    Ok(())
}

/// Fills `raster` by running `algorithm` for every pixel, split into
/// `workers` horizontal bands.
///
/// The first `workers - 1` bands each get a scoped thread; the calling thread
/// renders the last band, and the call returns once every band is finished.
/// Each band writes only to its own slice of the raster.
///
/// `cancel` is polled before every pixel. Once it fires, workers stop, the
/// remaining pixels keep whatever they held before the call and the result is
/// [`Cancelled`]. Zero workers leaves the raster untouched.
pub fn render_tiled_with<Alg, C>(
    raster: &mut PixelBuffer<Alg::Success>,
    algorithm: &Alg,
    workers: usize,
    cancel: &C,
) -> Result<(), Cancelled>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send,
    C: CancelToken,
{
    let pixel_rect = raster.pixel_rect();
    let bands = calculate_bands_in_pixel_rect(pixel_rect.height(), workers);

    let Some((last_band, leading_bands)) = bands.split_last() else {
        return Ok(());
    };

    log::trace!(
        "rendering {}x{} raster in {} bands",
        pixel_rect.width(),
        pixel_rect.height(),
        bands.len()
    );

    let row_width = pixel_rect.width() as usize;

    thread::scope(|scope| {
        let mut remaining = raster.buffer_mut();
        let mut handles = Vec::with_capacity(leading_bands.len());

        for &band in leading_bands {
            let (band_pixels, rest) =
                std::mem::take(&mut remaining).split_at_mut(band.height as usize * row_width);
            remaining = rest;

            handles.push(
                scope.spawn(move || render_band(band_pixels, band, pixel_rect, algorithm, cancel)),
            );
        }

        let last = render_band(remaining, *last_band, pixel_rect, algorithm, cancel);

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| panic::resume_unwind(payload)))
            .fold(last, Result::and)
    })
}

/// Renders the Mandelbrot set over `region` into a colour raster, using the
/// hue gradient for colouring.
pub fn render_tiled<C: CancelToken>(
    raster: &mut PixelBuffer<Colour>,
    region: ComplexRect,
    max_iterations: u32,
    workers: usize,
    cancel: &C,
) -> Result<(), Cancelled> {
    let algorithm = ColouredAlgorithm::new(
        MandelbrotAlgorithm::with_bound(raster.pixel_rect(), region, max_iterations),
        MandelbrotHueGradient::new(max_iterations),
    );

    render_tiled_with(raster, &algorithm, workers, cancel)
}

/// Same dispatch as [`render_tiled`], but keeps raw escape counts.
pub fn render_iterations_tiled<C: CancelToken>(
    raster: &mut PixelBuffer<u32>,
    region: ComplexRect,
    max_iterations: u32,
    workers: usize,
    cancel: &C,
) -> Result<(), Cancelled> {
    let algorithm = MandelbrotAlgorithm::with_bound(raster.pixel_rect(), region, max_iterations);

    render_tiled_with(raster, &algorithm, workers, cancel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::{CancelFlag, NeverCancel};
    use crate::core::actions::render_tiled::ports::colour_map::ColourMap;
    use crate::core::data::complex::Complex;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SENTINEL: u64 = u64::MAX;

    #[derive(Debug)]
    struct StubAlgorithm {}

    impl FractalAlgorithm for StubAlgorithm {
        type Success = u64;

        fn compute(&self, pixel: Point) -> u64 {
            (pixel.x as u64) * 1000 + pixel.y as u64
        }
    }

    /// Records which thread computed each row.
    #[derive(Default)]
    struct ThreadRecordingAlgorithm {
        rows: Mutex<Vec<(i32, thread::ThreadId)>>,
    }

    impl FractalAlgorithm for ThreadRecordingAlgorithm {
        type Success = u8;

        fn compute(&self, pixel: Point) -> u8 {
            if pixel.x == 0 {
                self.rows
                    .lock()
                    .unwrap()
                    .push((pixel.y, thread::current().id()));
            }
            1
        }
    }

    fn serial_render(pixel_rect: PixelRect) -> Vec<u64> {
        let algorithm = StubAlgorithm {};
        (pixel_rect.top_left().y..=pixel_rect.bottom_right().y)
            .flat_map(|y| {
                (pixel_rect.top_left().x..=pixel_rect.bottom_right().x)
                    .map(move |x| Point { x, y })
            })
            .map(|pixel| algorithm.compute(pixel))
            .collect()
    }

    fn region(real: f64, imag: f64, width: f64, height: f64) -> ComplexRect {
        ComplexRect::from_origin_size(Complex { real, imag }, width, height).unwrap()
    }

    #[test]
    fn test_parallel_generates_same_results_as_sequential() {
        let pixel_rect = PixelRect::new(Point { x: 0, y: 0 }, Point { x: 10, y: 8 }).unwrap();

        for workers in 1..=12 {
            let mut raster = PixelBuffer::filled(pixel_rect, SENTINEL);
            render_tiled_with(&mut raster, &StubAlgorithm {}, workers, &NeverCancel).unwrap();

            assert_eq!(raster.buffer(), serial_render(pixel_rect).as_slice());
        }
    }

    #[test]
    fn test_offset_pixel_rect_uses_absolute_coordinates() {
        let pixel_rect = PixelRect::new(Point { x: 5, y: 7 }, Point { x: 8, y: 12 }).unwrap();
        let mut raster = PixelBuffer::filled(pixel_rect, SENTINEL);

        render_tiled_with(&mut raster, &StubAlgorithm {}, 3, &NeverCancel).unwrap();

        assert_eq!(raster.buffer(), serial_render(pixel_rect).as_slice());
    }

    #[test]
    fn test_zero_workers_is_a_no_op() {
        let mut raster = PixelBuffer::filled(PixelRect::from_size(4, 4).unwrap(), SENTINEL);

        let result = render_tiled_with(&mut raster, &StubAlgorithm {}, 0, &NeverCancel);

        assert_eq!(result, Ok(()));

        assert!(raster.buffer().iter().all(|&v| v == SENTINEL));
    }

    #[test]
    fn test_more_workers_than_rows() {
        let pixel_rect = PixelRect::from_size(6, 2).unwrap();
        let mut raster = PixelBuffer::filled(pixel_rect, SENTINEL);

        render_tiled_with(&mut raster, &StubAlgorithm {}, 7, &NeverCancel).unwrap();

        assert_eq!(raster.buffer(), serial_render(pixel_rect).as_slice());
    }

    #[test]
    fn test_each_band_is_rendered_by_one_thread() {
        let pixel_rect = PixelRect::from_size(3, 12).unwrap();
        let mut raster = PixelBuffer::filled(pixel_rect, 0u8);
        let algorithm = ThreadRecordingAlgorithm::default();

        render_tiled_with(&mut raster, &algorithm, 4, &NeverCancel).unwrap();

        let rows = algorithm.rows.into_inner().unwrap();
        assert_eq!(rows.len(), 12);

        let threads: HashSet<_> = rows.iter().map(|&(_, id)| id).collect();
        assert_eq!(threads.len(), 4);

        for band in calculate_bands_in_pixel_rect(12, 4) {
            let band_threads: HashSet<_> = rows
                .iter()
                .filter(|&&(y, _)| band.rows().contains(&(y as u32)))
                .map(|&(_, id)| id)
                .collect();
            assert_eq!(band_threads.len(), 1);
        }

        let last_band_thread = rows
            .iter()
            .find(|&&(y, _)| y == 11)
            .map(|&(_, id)| id)
            .unwrap();
        assert_eq!(last_band_thread, thread::current().id());
    }

    #[test]
    fn test_pre_cancelled_token_leaves_raster_untouched() {
        let flag = CancelFlag::new();
        flag.cancel();
        let mut raster = PixelBuffer::filled(PixelRect::from_size(64, 64).unwrap(), SENTINEL);

        let result = render_tiled_with(&mut raster, &StubAlgorithm {}, 4, &flag.signal());

        assert_eq!(result, Err(Cancelled));

        assert!(raster.buffer().iter().all(|&v| v == SENTINEL));
    }

    #[test]
    fn test_cancel_is_polled_before_every_pixel() {
        let polls = AtomicUsize::new(0);
        let token = || {
            polls.fetch_add(1, Ordering::Relaxed);
            false
        };
        let mut raster = PixelBuffer::filled(PixelRect::from_size(5, 6).unwrap(), SENTINEL);

        let result = render_tiled_with(&mut raster, &StubAlgorithm {}, 3, &token);

        assert_eq!(result, Ok(()));

        assert_eq!(polls.load(Ordering::Relaxed), 30);
    }

    #[test]
    fn test_cancel_mid_render_stops_writing() {
        let polls = AtomicUsize::new(0);
        let token = || polls.fetch_add(1, Ordering::Relaxed) >= 10;
        let mut raster = PixelBuffer::filled(PixelRect::from_size(8, 8).unwrap(), SENTINEL);

        let result = render_tiled_with(&mut raster, &StubAlgorithm {}, 1, &token);

        assert_eq!(result, Err(Cancelled));

        let written = raster.buffer().iter().filter(|&&v| v != SENTINEL).count();
        assert_eq!(written, 10);
        assert!(raster.buffer()[10..].iter().all(|&v| v == SENTINEL));
    }

    #[test]
    fn test_cancel_seen_by_one_band_fails_the_render() {
        let polls = AtomicUsize::new(0);
        let token = || polls.fetch_add(1, Ordering::Relaxed) == 5;
        let mut raster = PixelBuffer::filled(PixelRect::from_size(4, 8).unwrap(), SENTINEL);

        let result = render_tiled_with(&mut raster, &StubAlgorithm {}, 4, &token);

        assert_eq!(result, Err(Cancelled));
        assert!(raster.buffer().iter().any(|&v| v == SENTINEL));
    }

    #[test]
    fn test_single_row_escape_counts() {
        let mut raster = PixelBuffer::filled(PixelRect::from_size(4, 1).unwrap(), 0u32);

        render_iterations_tiled(&mut raster, region(-2.0, -1.0, 3.0, 2.0), 10, 1, &NeverCancel)
            .unwrap();
        assert_eq!(raster.buffer(), &[10, 10, 10, 10]);

        render_iterations_tiled(&mut raster, region(-2.0, -1.0, 3.0, 2.0), 20, 1, &NeverCancel)
            .unwrap();
        assert_eq!(raster.buffer(), &[11, 12, 20, 11]);
    }

    #[test]
    fn test_small_raster_escape_counts_for_any_worker_count() {
        let expected = [11, 12, 20, 11, 20, 20, 20, 11, 11, 12, 20, 11];

        for workers in 1..=5 {
            let mut raster = PixelBuffer::filled(PixelRect::from_size(4, 3).unwrap(), 0u32);

            render_iterations_tiled(
                &mut raster,
                region(-2.0, -1.0, 3.0, 2.0),
                20,
                workers,
                &NeverCancel,
            )
            .unwrap();

            assert_eq!(raster.buffer(), &expected, "workers = {}", workers);
        }
    }

    #[test]
    fn test_colour_render_uses_hue_gradient() {
        let mut raster: PixelBuffer = PixelBuffer::new(PixelRect::from_size(4, 1).unwrap());

        render_tiled(&mut raster, region(-2.0, -1.0, 3.0, 2.0), 20, 2, &NeverCancel).unwrap();

        let gradient = MandelbrotHueGradient::new(20);
        let expected: Vec<Colour> = [11, 12, 20, 11]
            .into_iter()
            .map(|i| gradient.map(i))
            .collect();

        assert_eq!(raster.buffer(), expected.as_slice());
        assert_eq!(raster.buffer()[2], MandelbrotHueGradient::interior());
    }
}
