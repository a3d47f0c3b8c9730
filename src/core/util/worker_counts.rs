/// Number of hardware threads, falling back to one when the platform can't
/// tell.
#[must_use]
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Preview renders block the frame, so they use every worker allowed.
#[must_use]
pub fn preview_workers(ceiling: usize) -> usize {
    ceiling.max(1)
}

/// Background renders take half the ceiling, leaving the rest for the frame
/// loop and the next preview.
#[must_use]
pub fn background_workers(ceiling: usize) -> usize {
    (ceiling / 2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_workers_is_at_least_one() {
        assert!(available_workers() >= 1);
    }

    #[test]
    fn test_preview_uses_full_ceiling() {
        assert_eq!(preview_workers(0), 1);
        assert_eq!(preview_workers(1), 1);
        assert_eq!(preview_workers(8), 8);
    }

    #[test]
    fn test_background_uses_half_the_ceiling() {
        assert_eq!(background_workers(0), 1);
        assert_eq!(background_workers(1), 1);
        assert_eq!(background_workers(2), 1);
        assert_eq!(background_workers(7), 3);
        assert_eq!(background_workers(16), 8);
    }
}
