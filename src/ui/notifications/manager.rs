// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` handles queuing, display timing, and dismissal of notifications.
//! It limits the number of visible toasts and owns one auto-dismiss timer per
//! visible toast. A queued toast starts its timer when it is promoted.

use super::notification::{Notification, NotificationId};
use crate::runtime::{Scheduler, TimerHandle};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// Messages for notification state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// The auto-dismiss timer of a notification fired.
    Expired(NotificationId),
}

/// Manages the notification queue and visible notifications.
pub struct Manager<M> {
    /// Currently visible notifications (newest first).
    visible: VecDeque<Notification>,
    /// Queued notifications waiting to be displayed.
    queue: VecDeque<Notification>,
    timers: HashMap<NotificationId, TimerHandle<M>>,
    scheduler: Scheduler<M>,
    wrap: fn(Message) -> M,
    duration: Duration,
    max_visible: usize,
}

impl<M> Manager<M> {
    /// Creates an empty manager. `max_visible` is at least one.
    pub fn new(
        scheduler: &Scheduler<M>,
        wrap: fn(Message) -> M,
        duration: Duration,
        max_visible: usize,
    ) -> Self {
        Self {
            visible: VecDeque::new(),
            queue: VecDeque::new(),
            timers: HashMap::new(),
            scheduler: scheduler.clone(),
            wrap,
            duration,
            max_visible: max_visible.max(1),
        }
    }

    /// Pushes a new notification to be displayed.
    ///
    /// If fewer than `max_visible` notifications are showing, it's displayed
    /// immediately. Otherwise, it's added to the queue and shown when space
    /// becomes available.
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!(
            severity = notification.severity().tone(),
            text = notification.text(),
            "toast"
        );
        if self.visible.len() < self.max_visible {
            self.start_timer(&notification);
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Dismisses a notification by its ID, canceling its timer.
    ///
    /// Returns `true` if the notification was found and removed.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.timers.remove(&id);

        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }

        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }

        false
    }

    /// Handles a notification message.
    pub fn handle(&mut self, message: Message) {
        match message {
            Message::Dismiss(id) | Message::Expired(id) => {
                self.dismiss(id);
            }
        }
    }

    /// Returns the currently visible notifications.
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether there are any notifications (visible or queued).
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.visible.is_empty() || !self.queue.is_empty()
    }

    /// Clears all notifications and cancels their timers.
    pub fn clear(&mut self) {
        self.visible.clear();
        self.queue.clear();
        self.timers.clear();
    }

    fn start_timer(&mut self, notification: &Notification) {
        let id = notification.id();
        let wrap = self.wrap;
        let duration = notification
            .custom_dismiss_duration()
            .unwrap_or(self.duration);
        let handle = self
            .scheduler
            .schedule(duration, move |_| wrap(Message::Expired(id)));
        self.timers.insert(id, handle);
    }

    /// Promotes notifications from the queue while there's space.
    fn promote_from_queue(&mut self) {
        while self.visible.len() < self.max_visible {
            let Some(notification) = self.queue.pop_front() else {
                break;
            };
            self.start_timer(&notification);
            self.visible.push_front(notification);
        }
    }
}

impl<M> fmt::Debug for Manager<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("visible", &self.visible)
            .field("queued", &self.queue.len())
            .field("max_visible", &self.max_visible)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(2_400);
    const MAX_VISIBLE: usize = 3;

    fn manager(scheduler: &Scheduler<Message>) -> Manager<Message> {
        Manager::new(scheduler, |m| m, DURATION, MAX_VISIBLE)
    }

    fn advance(manager: &mut Manager<Message>, scheduler: &Scheduler<Message>, ms: u64) {
        scheduler.advance(Duration::from_millis(ms), |m| manager.handle(m));
    }

    #[test]
    fn new_manager_is_empty() {
        let scheduler = Scheduler::new();
        let manager = manager(&scheduler);
        assert_eq!(manager.visible_count(), 0);
        assert_eq!(manager.queued_count(), 0);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn push_queues_when_visible_is_full() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);

        for i in 0..MAX_VISIBLE {
            manager.push(Notification::success(format!("test-{i}")));
        }
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);

        manager.push(Notification::success("queued"));
        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 1);
        // Queued toasts have no timer yet.
        assert_eq!(scheduler.pending_count(), MAX_VISIBLE);
    }

    #[test]
    fn toast_expires_after_duration() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        manager.push(Notification::success("Inquiry sent ✅"));

        advance(&mut manager, &scheduler, 2_399);
        assert_eq!(manager.visible_count(), 1);

        advance(&mut manager, &scheduler, 1);
        assert_eq!(manager.visible_count(), 0);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn error_toasts_expire_too() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        manager.push(Notification::error("Inquiry failed to send. Please try again."));

        advance(&mut manager, &scheduler, 2_400);
        assert!(!manager.has_notifications());
    }

    #[test]
    fn dismiss_cancels_timer_and_promotes_from_queue() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);

        let first = Notification::success("visible-0");
        let first_id = first.id();
        manager.push(first);
        for i in 1..MAX_VISIBLE {
            manager.push(Notification::success(format!("visible-{i}")));
        }
        manager.push(Notification::success("queued"));

        assert!(manager.dismiss(first_id));

        assert_eq!(manager.visible_count(), MAX_VISIBLE);
        assert_eq!(manager.queued_count(), 0);
        assert_eq!(scheduler.pending_count(), MAX_VISIBLE);
    }

    #[test]
    fn promoted_toast_is_shown_newest_first() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        let oldest = Notification::success("visible-0");
        let oldest_id = oldest.id();
        manager.push(oldest);
        for i in 1..MAX_VISIBLE {
            manager.push(Notification::success(format!("visible-{i}")));
        }
        manager.push(Notification::success("queued"));

        manager.dismiss(oldest_id);

        let texts: Vec<_> = manager.visible().map(Notification::text).collect();
        assert_eq!(texts, vec!["queued", "visible-2", "visible-1"]);
    }

    #[test]
    fn promoted_toast_gets_a_full_duration() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        for i in 0..MAX_VISIBLE {
            manager.push(Notification::info(format!("first-{i}")));
        }
        advance(&mut manager, &scheduler, 1_000);
        manager.push(Notification::info("late"));

        advance(&mut manager, &scheduler, 1_400);
        let texts: Vec<_> = manager.visible().map(Notification::text).collect();
        assert_eq!(texts, vec!["late"]);

        advance(&mut manager, &scheduler, 2_399);
        assert_eq!(manager.visible_count(), 1);
        advance(&mut manager, &scheduler, 1);
        assert_eq!(manager.visible_count(), 0);
    }

    #[test]
    fn dismiss_nonexistent_returns_false() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        let fake_id = Notification::success("temp").id();

        assert!(!manager.dismiss(fake_id));
    }

    #[test]
    fn clear_removes_all_and_cancels_timers() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        for i in 0..5 {
            manager.push(Notification::success(format!("test-{i}")));
        }

        manager.clear();
        assert!(!manager.has_notifications());
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn custom_duration_overrides_default() {
        let scheduler = Scheduler::new();
        let mut manager = manager(&scheduler);
        manager.push(Notification::info("quick").auto_dismiss(Duration::from_millis(500)));

        advance(&mut manager, &scheduler, 500);
        assert_eq!(manager.visible_count(), 0);
    }
}
