use log::trace;

use crate::config::positive_or;
use crate::constants::DEFAULT_AUTOPLAY_MS;

/// Identifies one schedule of the timer. A firing whose token is no longer current belongs to a
/// cancelled schedule and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: TimerToken,
    started_ms: u64,
    due_ms: u64,
}

/// Single recurring deadline polled by the event loop.
///
/// Every `start` (and every firing) waits a full fresh interval from the moment it happens. There
/// is never more than one pending deadline.
#[derive(Debug, Clone)]
pub struct AutoplayTimer {
    interval_ms: u64,
    pending: Option<Pending>,
    generation: u64,
}

impl AutoplayTimer {
    /// Non-positive intervals fall back to the default.
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms: positive_or(interval_ms, DEFAULT_AUTOPLAY_MS),
            pending: None,
            generation: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Schedules the next firing one full interval after `now_ms`, replacing any pending one.
    pub fn start(&mut self, now_ms: u64) -> TimerToken {
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.pending = Some(Pending {
            token,
            started_ms: now_ms,
            due_ms: now_ms.saturating_add(self.interval_ms),
        });
        token
    }

    /// Cancels the pending firing, if any.
    pub fn stop(&mut self) {
        if self.pending.take().is_some() {
            trace!("autoplay timer stopped");
        }
    }

    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending.map(|p| p.token)
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        self.pending.is_some_and(|p| p.token == token)
    }

    /// Returns the token of a due firing and reschedules a fresh interval from `now_ms`.
    ///
    /// At most one firing is reported per poll, however late the poll is.
    pub fn poll(&mut self, now_ms: u64) -> Option<TimerToken> {
        let pending = self.pending?;
        if now_ms < pending.due_ms {
            return None;
        }
        trace!("autoplay timer fired at {}ms (due {}ms)", now_ms, pending.due_ms);
        self.start(now_ms);
        Some(pending.token)
    }

    /// Fraction of the current interval that has elapsed, in `0.0..=1.0`. Zero when stopped.
    pub fn elapsed_fraction(&self, now_ms: u64) -> f32 {
        match self.pending {
            Some(p) => {
                let elapsed = now_ms.saturating_sub(p.started_ms);
                (elapsed as f32 / self.interval_ms as f32).min(1.0)
            }
            None => 0.0,
        }
    }
}
