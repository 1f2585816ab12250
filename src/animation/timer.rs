//! Deferred one-shot timers driven by the frame clock.
//!
//! A queue belongs to exactly one owner. Tearing it down cancels every
//! pending timer and turns later scheduling into a no-op, so nothing fires
//! against state that has already been released.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

#[derive(Debug)]
pub struct TimerQueue<E> {
    next_id: u64,
    pending: Vec<Timer<E>>,
    torn_down: bool,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
            torn_down: false,
        }
    }

    /// Schedules `event` to fire once the clock reaches `due`.
    ///
    /// Returns `None` after teardown.
    pub fn schedule(&mut self, due: Duration, event: E) -> Option<TimerId> {
        if self.torn_down {
            log::debug!("Ignoring timer scheduled after teardown");
            return None;
        }

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer { id, due, event });
        Some(id)
    }

    /// Returns whether a pending timer was removed.
    #[cfg(test)]
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Removes and returns every event due at `now`, earliest first. Timers
    /// due at the same instant fire in the order they were scheduled.
    pub fn drain_due(&mut self, now: Duration) -> Vec<E> {
        if self.torn_down {
            return Vec::new();
        }

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|timer| timer.due <= now);
        self.pending = pending;

        due.sort_by_key(|timer| (timer.due, timer.id.0));
        due.into_iter().map(|timer| timer.event).collect()
    }

    pub fn teardown(&mut self) {
        self.cancel_all();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending due time.
    #[cfg(test)]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|timer| timer.due).min()
    }
}
