use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;

    /// Result-shaped check for callers that want to bail out with `?`.
    fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Owning side of a render generation's cancellation flag.
///
/// Only the holder of the flag can raise it; workers get a [`CancelSignal`]
/// which can observe it but never write it. A flag is never reset, so every
/// generation needs a fresh one.
#[derive(Debug, Default)]
pub struct CancelFlag {
    raised: Arc<AtomicBool>,
}

impl CancelFlag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.raised.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            raised: Arc::clone(&self.raised),
        }
    }
}

/// Read-only view of a [`CancelFlag`], handed to workers.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    raised: Arc<AtomicBool>,
}

impl CancelToken for CancelSignal {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.raised.load(Ordering::Relaxed)
    }
}
