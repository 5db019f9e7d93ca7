//! Deferred alarm delivery
//!
//! The game never waits on its own. Whenever it needs something to happen
//! later it hands an alarm and a delay to its caller. [`Scheduler`] is a
//! ready-made queue for that: a host loop pushes alarms into it, moves its
//! virtual clock forward (in real time or in tests), and feeds the alarms
//! that fall due back into the game.
//!
//! Alarms fire in due order. Alarms due at the same instant fire in the
//! order they were scheduled. Dropping the scheduler, or calling
//! [`Scheduler::cancel_all`], discards every pending alarm.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    time::Duration,
};

use derive_where::derive_where;

/// An alarm waiting in the queue
#[derive(Debug)]
struct Scheduled<M> {
    due: Duration,
    seq: u64,
    message: M,
}

impl<M> PartialEq for Scheduled<M> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<M> Eq for Scheduled<M> {}

impl<M> PartialOrd for Scheduled<M> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<M> Ord for Scheduled<M> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A virtual-clock alarm queue
#[derive(Debug)]
#[derive_where(Default)]
pub struct Scheduler<M> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled<M>>>,
}

impl<M> Scheduler<M> {
    /// Creates an empty scheduler with its clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `message` to fire `delay` after the current instant
    pub fn schedule(&mut self, message: M, delay: Duration) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Scheduled {
            due: self.now + delay,
            seq,
            message,
        }));
    }

    /// Returns a closure suitable for the game's `schedule_message` parameter
    pub fn scheduler(&mut self) -> impl FnMut(M, Duration) + '_ {
        move |message, delay| self.schedule(message, delay)
    }

    /// The current instant of the virtual clock
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Time left until the next alarm is due, if any is pending
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .peek()
            .map(|Reverse(scheduled)| scheduled.due.saturating_sub(self.now))
    }

    /// Removes and returns the earliest alarm if it is due
    pub fn pop_due(&mut self) -> Option<M> {
        let Reverse(next) = self.queue.peek()?;
        if next.due > self.now {
            return None;
        }
        self.queue.pop().map(|Reverse(scheduled)| scheduled.message)
    }

    /// Moves the clock to the earliest pending alarm and returns it
    ///
    /// This is the building block for stepping through a session one
    /// alarm at a time. Alarms that a handler schedules in response are
    /// picked up by the next call.
    pub fn advance_to_next(&mut self) -> Option<M> {
        let Reverse(next) = self.queue.pop()?;
        self.now = self.now.max(next.due);
        Some(next.message)
    }

    /// Moves the clock forward by `elapsed`
    ///
    /// Due alarms are not returned here; drain them with [`Self::pop_due`]
    /// so that handlers can schedule follow-ups between deliveries.
    pub fn advance_clock(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Discards every pending alarm, returning how many were dropped
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Number of pending alarms
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no alarm is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule("late", secs(3));
        scheduler.schedule("early", secs(1));
        scheduler.schedule("middle", secs(2));

        assert_eq!(scheduler.advance_to_next(), Some("early"));
        assert_eq!(scheduler.now(), secs(1));
        assert_eq!(scheduler.advance_to_next(), Some("middle"));
        assert_eq!(scheduler.advance_to_next(), Some("late"));
        assert_eq!(scheduler.now(), secs(3));
        assert_eq!(scheduler.advance_to_next(), None);
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, secs(1));
        scheduler.schedule(2, secs(1));
        scheduler.schedule(3, secs(1));

        assert_eq!(scheduler.advance_to_next(), Some(1));
        assert_eq!(scheduler.advance_to_next(), Some(2));
        assert_eq!(scheduler.advance_to_next(), Some(3));
    }

    #[test]
    fn test_pop_due_respects_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule('a', secs(2));

        assert_eq!(scheduler.pop_due(), None);
        scheduler.advance_clock(secs(1));
        assert_eq!(scheduler.pop_due(), None);
        assert_eq!(scheduler.next_due_in(), Some(secs(1)));
        scheduler.advance_clock(secs(1));
        assert_eq!(scheduler.pop_due(), Some('a'));
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_clock(secs(10));
        scheduler.schedule((), secs(1));
        assert_eq!(scheduler.next_due_in(), Some(secs(1)));
        scheduler.advance_to_next();
        assert_eq!(scheduler.now(), secs(11));
    }

    #[test]
    fn test_cancel_all_drops_pending() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1, secs(1));
        scheduler.schedule(2, secs(2));

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.advance_to_next(), None);
    }

    #[test]
    fn test_scheduler_closure_queues() {
        let mut scheduler = Scheduler::new();
        {
            let mut schedule = scheduler.scheduler();
            schedule("x", secs(5));
            schedule("y", secs(4));
        }
        assert_eq!(scheduler.len(), 2);
        assert_eq!(scheduler.advance_to_next(), Some("y"));
    }
}
