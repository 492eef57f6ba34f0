// SPDX-License-Identifier: MPL-2.0
//! Cancelable, delayed message delivery on a single logical thread.
//!
//! The scheduler keeps its own monotonic clock. A driver advances it with the
//! real elapsed time, tests advance it by hand. Each due timer is popped and
//! delivered one at a time, so a delivery that cancels or supersedes another
//! timer takes effect before that timer could be popped.
//!
//! Every scheduled timer is owned by a [`TimerHandle`]. Dropping the handle
//! cancels the timer, which is how controllers guarantee that nothing fires
//! after they are torn down.
//!
//! # Example
//!
//! ```
//! use sunshine_gallery::runtime::Scheduler;
//! use std::time::Duration;
//!
//! let scheduler: Scheduler<&str> = Scheduler::new();
//! let _keep = scheduler.schedule(Duration::from_millis(240), |_| "closed");
//! let dropped = scheduler.schedule(Duration::from_millis(100), |_| "never");
//! drop(dropped);
//!
//! let mut fired = Vec::new();
//! scheduler.advance(Duration::from_millis(300), |msg| fired.push(msg));
//! assert_eq!(fired, vec!["closed"]);
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Identifies one scheduled timer. Ids are never reused by a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

struct Queue<M> {
    now: Duration,
    next_id: u64,
    /// Ordered by deadline, then by id so equal deadlines fire in schedule order.
    entries: BTreeMap<(Duration, TimerId), M>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<M> Queue<M> {
    fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.entries.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }
}

/// Shared handle to the timer queue.
///
/// Cloning is cheap and every clone refers to the same queue and clock.
pub struct Scheduler<M> {
    queue: Rc<RefCell<Queue<M>>>,
}

impl<M> Scheduler<M> {
    /// Creates an empty scheduler whose clock starts at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Queue {
                now: Duration::ZERO,
                next_id: 0,
                entries: BTreeMap::new(),
                deadlines: HashMap::new(),
            })),
        }
    }

    /// Current scheduler time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.queue.borrow().now
    }

    /// Schedules a message `delay` after the current scheduler time.
    ///
    /// `make` receives the new timer's id so the message can name the timer
    /// it came from.
    pub fn schedule(&self, delay: Duration, make: impl FnOnce(TimerId) -> M) -> TimerHandle<M> {
        let mut queue = self.queue.borrow_mut();
        let id = TimerId(queue.next_id);
        queue.next_id += 1;

        let deadline = queue.now.saturating_add(delay);
        queue.entries.insert((deadline, id), make(id));
        queue.deadlines.insert(id, deadline);

        TimerHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Number of timers that are scheduled and not yet fired or canceled.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().entries.len()
    }

    /// Returns true if the timer is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.borrow().deadlines.contains_key(&id)
    }

    /// Absolute deadline of the earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue
            .borrow()
            .entries
            .first_key_value()
            .map(|((deadline, _), _)| *deadline)
    }

    /// Time left until the earliest pending timer is due.
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        let queue = self.queue.borrow();
        queue
            .entries
            .first_key_value()
            .map(|((deadline, _), _)| deadline.saturating_sub(queue.now))
    }

    /// Removes and returns the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline, so anything scheduled while
    /// handling the message is measured from the moment it fired.
    pub fn pop_due(&self, until: Duration) -> Option<M> {
        let mut queue = self.queue.borrow_mut();
        let (deadline, id) = *queue.entries.first_key_value()?.0;
        if deadline > until {
            return None;
        }

        queue.deadlines.remove(&id);
        let message = queue.entries.remove(&(deadline, id))?;
        queue.now = queue.now.max(deadline);
        Some(message)
    }

    /// Moves the clock forward by `elapsed`, delivering every timer that
    /// comes due on the way. Returns how many messages were delivered.
    ///
    /// Timers scheduled by `deliver` that fall inside the window are
    /// delivered in the same call.
    pub fn advance(&self, elapsed: Duration, mut deliver: impl FnMut(M)) -> usize {
        let target = self.now().saturating_add(elapsed);
        let mut delivered = 0;

        while let Some(message) = self.pop_due(target) {
            deliver(message);
            delivered += 1;
        }

        let mut queue = self.queue.borrow_mut();
        queue.now = queue.now.max(target);
        delivered
    }
}

impl<M> Default for Scheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for Scheduler<M> {
    fn clone(&self) -> Self {
        Self {
            queue: Rc::clone(&self.queue),
        }
    }
}

impl<M> fmt::Debug for Scheduler<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queue = self.queue.borrow();
        f.debug_struct("Scheduler")
            .field("now", &queue.now)
            .field("pending", &queue.entries.len())
            .finish()
    }
}

/// Exclusive owner of one scheduled timer.
///
/// Dropping the handle cancels the timer if it has not fired yet. Dropping
/// it after the timer fired, or after the scheduler itself is gone, does
/// nothing.
#[must_use = "dropping a TimerHandle cancels its timer"]
pub struct TimerHandle<M> {
    id: TimerId,
    queue: Weak<RefCell<Queue<M>>>,
}

impl<M> TimerHandle<M> {
    /// Id of the owned timer.
    #[must_use]
    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Returns true if the timer has neither fired nor been canceled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        let queue = queue.borrow();
        queue.deadlines.contains_key(&self.id)
    }

    /// Cancels the timer now. Same as dropping the handle.
    pub fn cancel(self) {}
}

impl<M> Drop for TimerHandle<M> {
    fn drop(&mut self) {
        let Some(queue) = self.queue.upgrade() else {
            return;
        };
        // Handles are never dropped while the queue is borrowed: delivery
        // happens after `pop_due` has released it.
        let Ok(mut queue) = queue.try_borrow_mut() else {
            return;
        };
        queue.cancel(self.id);
    }
}

impl<M> fmt::Debug for TimerHandle<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TimerHandle").field(&self.id).finish()
    }
}
