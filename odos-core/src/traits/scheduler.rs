//! Frame scheduler trait
//!
//! Abstracts "call me back on the next display refresh". The host owns
//! the actual timing source (display refresh, timer, or manual stepping)
//! and delivers each fired token back to the component that requested it.

use alloc::vec::Vec;

/// Handle for one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameToken(pub u32);

/// Trait for frame scheduling sources
pub trait FrameScheduler {
    /// Request a callback at the next refresh
    fn schedule_next(&mut self) -> FrameToken;

    /// Cancel a pending callback
    ///
    /// Cancelling a token that already fired or was never issued is a
    /// no-op.
    fn cancel(&mut self, token: FrameToken);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn schedule_next(&mut self) -> FrameToken {
        (**self).schedule_next()
    }

    fn cancel(&mut self, token: FrameToken) {
        (**self).cancel(token)
    }
}

/// Scheduler stepped by hand
///
/// Tokens queue up in request order; the caller pops them with
/// [`take_next`](Self::take_next) and delivers them itself.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u32,
    pending: Vec<FrameToken>,
    cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest pending token
    pub fn take_next(&mut self) -> Option<FrameToken> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    /// Tokens waiting to fire
    pub fn pending(&self) -> &[FrameToken] {
        &self.pending
    }

    /// Check if nothing is waiting to fire
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of tokens cancelled while still pending
    pub fn cancelled_count(&self) -> u32 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next(&mut self) -> FrameToken {
        self.next_id = self.next_id.wrapping_add(1);
        let token = FrameToken(self.next_id);
        self.pending.push(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        if let Some(pos) = self.pending.iter().position(|t| *t == token) {
            self.pending.remove(pos);
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique_and_fifo() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_next();
        let b = sched.schedule_next();
        assert_ne!(a, b);
        assert_eq!(sched.pending(), &[a, b]);

        assert_eq!(sched.take_next(), Some(a));
        assert_eq!(sched.take_next(), Some(b));
        assert_eq!(sched.take_next(), None);
        assert!(sched.is_idle());
    }

    #[test]
    fn test_cancel_pending_only() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_next();
        let b = sched.schedule_next();

        sched.cancel(a);
        assert_eq!(sched.pending(), &[b]);
        assert_eq!(sched.cancelled_count(), 1);

        // Already cancelled, and unknown tokens, are ignored
        sched.cancel(a);
        sched.cancel(FrameToken(999));
        assert_eq!(sched.cancelled_count(), 1);
    }

    #[test]
    fn test_scheduler_through_mut_ref() {
        fn schedule_and_cancel<S: FrameScheduler>(mut scheduler: S) {
            let token = scheduler.schedule_next();
            scheduler.cancel(token);
        }

        let mut sched = ManualScheduler::new();
        schedule_and_cancel(&mut sched);
        assert!(sched.is_idle());
        assert_eq!(sched.cancelled_count(), 1);
    }
}
