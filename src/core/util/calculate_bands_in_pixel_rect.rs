use crate::core::data::band::Band;

/// Splits `height` rows into `num_bands` contiguous bands sized as evenly as
/// possible.
///
/// Band `k` covers `height * k / num_bands .. height * (k + 1) / num_bands`, so
/// the bands always tile the rows exactly. When there are more bands than rows
/// some bands are empty. Zero bands yields an empty partition.
#[must_use]
pub fn calculate_bands_in_pixel_rect(height: u32, num_bands: usize) -> Vec<Band> {
    let boundary = |k: usize| (u64::from(height) * k as u64 / num_bands as u64) as u32;

    (0..num_bands)
        .map(|k| {
            let top = boundary(k);
            Band {
                top,
                height: boundary(k + 1) - top,
            }
        })
        .collect()
}
