//! Deferred block-finished notification.

use core::sync::atomic::{AtomicU32, Ordering};

use super::shared::Shared;

/// Count of finished blocks not yet reported to the planner.
///
/// Incremented by the tick engine, decremented by the completion notifier,
/// which the tick engine may preempt mid-decrement.
#[derive(Debug, Default)]
pub struct FinishedCount(AtomicU32);

impl FinishedCount {
    /// Create a zero count.
    pub const fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    /// Record one finished block.
    #[inline]
    pub fn signal(&self) {
        self.0.fetch_add(1, Ordering::Release);
    }

    /// Consume one finished block, if any.
    #[inline]
    pub fn take(&self) -> bool {
        self.0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok()
    }

    /// Blocks finished but not yet taken.
    #[inline]
    pub fn pending(&self) -> u32 {
        self.0.load(Ordering::Acquire)
    }
}

/// Completion context: reports finished blocks to the planner.
///
/// The tick engine only pends the soft interrupt; call
/// [`on_deferred`](Self::on_deferred) from that interrupt's handler, so the
/// callback's cost never lands on the tick path.
pub struct CompletionNotifier<'a> {
    shared: &'a Shared,
    callback: Option<fn()>,
}

impl<'a> CompletionNotifier<'a> {
    pub(crate) fn new(shared: &'a Shared, callback: Option<fn()>) -> Self {
        Self { shared, callback }
    }

    /// Invoke the callback once per finished block. Returns how many were reported.
    pub fn on_deferred(&mut self) -> u32 {
        let mut reported = 0;
        while self.shared.finished.take() {
            reported += 1;
            if let Some(callback) = self.callback {
                callback();
            }
        }
        reported
    }

    /// Finished blocks not yet reported.
    pub fn pending(&self) -> u32 {
        self.shared.finished.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::AtomicU32;

    use crate::config::units::Hertz;

    static CALLS: AtomicU32 = AtomicU32::new(0);

    fn on_finished() {
        CALLS.fetch_add(1, Ordering::Relaxed);
    }

    #[test]
    fn test_take_never_underflows() {
        let count = FinishedCount::new();
        assert!(!count.take());
        count.signal();
        count.signal();
        assert_eq!(count.pending(), 2);
        assert!(count.take());
        assert!(count.take());
        assert!(!count.take());
        assert_eq!(count.pending(), 0);
    }

    #[test]
    fn test_callback_once_per_block() {
        let shared = Shared::new(Hertz(100_000.0));
        let mut notifier = CompletionNotifier::new(&shared, Some(on_finished));

        assert_eq!(notifier.on_deferred(), 0);

        shared.finished.signal();
        shared.finished.signal();
        shared.finished.signal();
        assert_eq!(notifier.pending(), 3);
        assert_eq!(notifier.on_deferred(), 3);
        assert_eq!(CALLS.load(Ordering::Relaxed), 3);
        assert_eq!(notifier.pending(), 0);
    }

    #[test]
    fn test_no_callback_still_drains() {
        let shared = Shared::new(Hertz(100_000.0));
        let mut notifier = CompletionNotifier::new(&shared, None);
        shared.finished.signal();
        assert_eq!(notifier.on_deferred(), 1);
        assert_eq!(notifier.pending(), 0);
    }
}
