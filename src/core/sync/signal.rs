/*!
 * Interrupt Signal
 *
 * Pending-interrupt flag owned by a session. Raising it cancels the
 * session's next (or current) blocking wait.
 */

use std::sync::atomic::{AtomicBool, Ordering};

/// Pending-interrupt flag
///
/// Mirrors a pending signal: it stays raised until a wait observes it and
/// reports `Interrupted`, which consumes it.
#[derive(Debug, Default)]
pub struct InterruptSignal {
    pending: AtomicBool,
}

impl InterruptSignal {
    #[inline]
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    /// Mark an interrupt as pending
    #[inline]
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume a pending interrupt, returning whether one was pending
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Discard any pending interrupt
    #[inline]
    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }
}
