//! Frame and timer capabilities handed to the controller.
//!
//! The controller never reaches for a global clock or event loop. It asks
//! a [`FrameScheduler`] for the next frame and a [`TimerService`] for
//! one-shot timeouts, and the host calls back into it when those fire.
//! [`FrameQueue`] and [`TimerQueue`] are in-memory implementations. Time
//! only moves when the host advances it, so tests can run on a fake clock
//! and the windowed host can feed real elapsed time.

use std::time::Duration;

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

/// Identifies one pending timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

/// Per-frame callback scheduling, like `requestAnimationFrame`.
pub trait FrameScheduler {
    /// Ask for one callback at the next frame.
    fn request_frame(&mut self) -> FrameId;

    /// Withdraw a request. Cancelling a stale or fired id is harmless.
    fn cancel_frame(&mut self, id: FrameId);
}

/// One-shot timeouts, like `setTimeout` / `clearTimeout`.
pub trait TimerService {
    /// Fire once after `delay` has elapsed.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timeout. Clearing a stale or fired id is harmless.
    fn clear_timeout(&mut self, id: TimerId);
}

/// Frame requests waiting for the host to deliver them.
///
/// Like the browser primitive, every request gets its own id and several
/// may be pending at once; the host delivers them all at the next frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every pending request, oldest first.
    pub fn take_pending(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending.push(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.pending.retain(|pending| *pending != id);
    }
}

/// Timeouts ordered by deadline on a clock the host advances.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: Vec<(TimerId, Duration)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time on this queue's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward to `now` and return the timers that came due,
    /// earliest deadline first. Fired timers are removed.
    ///
    /// The clock never runs backwards; an earlier `now` only fires what is
    /// already due.
    pub fn advance_to(&mut self, now: Duration) -> Vec<TimerId> {
        self.now = self.now.max(now);
        let mut due: Vec<(TimerId, Duration)> = Vec::new();
        let current = self.now;
        self.entries.retain(|&(id, deadline)| {
            if deadline <= current {
                due.push((id, deadline));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(id, deadline)| (deadline, id.0));
        due.into_iter().map(|(id, _)| id).collect()
    }

    /// Advance the clock by `delta`.
    pub fn advance_by(&mut self, delta: Duration) -> Vec<TimerId> {
        let now = self.now + delta;
        self.advance_to(now)
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|&(_, deadline)| deadline).min()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|&(pending, _)| pending == id)
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }
}

impl TimerService for TimerQueue {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.entries.push((id, self.now + delay));
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.entries.retain(|&(pending, _)| pending != id);
    }
}
