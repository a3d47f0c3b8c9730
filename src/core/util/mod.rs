pub mod calculate_bands_in_pixel_rect;
pub mod pixel_to_complex_coords;
pub mod worker_counts;
