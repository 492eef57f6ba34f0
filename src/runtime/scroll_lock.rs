// SPDX-License-Identifier: MPL-2.0
//! Page-wide "body scroll disabled" resource.
//!
//! Scrolling is disabled by acquiring a [`ScrollLockGuard`]. Guards are
//! counted: the first one remembers the scroll state it found and the last
//! one to drop puts it back, in whatever order the holders release. A lock
//! taken while scrolling was already disabled leaves it disabled.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug)]
struct BodyScroll {
    enabled: bool,
    holders: usize,
    /// State to put back when the last holder releases.
    restore: bool,
}

/// Shared handle to the body scroll state. Clones refer to the same state.
#[derive(Debug, Clone)]
pub struct ScrollLock {
    body: Rc<RefCell<BodyScroll>>,
}

impl ScrollLock {
    /// Creates the resource with scrolling enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            body: Rc::new(RefCell::new(BodyScroll {
                enabled: true,
                holders: 0,
                restore: true,
            })),
        }
    }

    /// Returns true if the page can currently scroll.
    #[must_use]
    pub fn is_scroll_enabled(&self) -> bool {
        self.body.borrow().enabled
    }

    /// Returns true if at least one guard is alive.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.body.borrow().holders > 0
    }

    /// Number of live guards.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.body.borrow().holders
    }

    /// Sets the scroll state directly, as the page itself might.
    pub fn set_scroll_enabled(&self, enabled: bool) {
        self.body.borrow_mut().enabled = enabled;
    }

    /// Disables scrolling until the returned guard is dropped.
    pub fn acquire(&self, owner: &'static str) -> ScrollLockGuard {
        let mut body = self.body.borrow_mut();
        if body.holders == 0 {
            body.restore = body.enabled;
        }
        body.enabled = false;
        body.holders += 1;
        tracing::trace!(owner, holders = body.holders, "scroll lock acquired");

        ScrollLockGuard {
            body: Rc::downgrade(&self.body),
            owner,
        }
    }
}

impl Default for ScrollLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped hold on the scroll lock.
#[derive(Debug)]
#[must_use = "dropping a ScrollLockGuard releases the scroll lock"]
pub struct ScrollLockGuard {
    body: Weak<RefCell<BodyScroll>>,
    owner: &'static str,
}

impl ScrollLockGuard {
    /// Who acquired this guard.
    #[must_use]
    pub fn owner(&self) -> &'static str {
        self.owner
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let Some(body) = self.body.upgrade() else {
            return;
        };
        let Ok(mut body) = body.try_borrow_mut() else {
            return;
        };
        body.holders = body.holders.saturating_sub(1);
        if body.holders == 0 {
            body.enabled = body.restore;
        }
        tracing::trace!(owner = self.owner, holders = body.holders, "scroll lock released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_disables_and_restores_scroll() {
        let lock = ScrollLock::new();
        assert!(lock.is_scroll_enabled());

        let guard = lock.acquire("panel");
        assert!(!lock.is_scroll_enabled());
        assert!(lock.is_locked());
        assert_eq!(guard.owner(), "panel");

        drop(guard);
        assert!(lock.is_scroll_enabled());
        assert!(!lock.is_locked());
    }

    #[test]
    fn release_restores_previous_disabled_state() {
        let lock = ScrollLock::new();
        lock.set_scroll_enabled(false);

        let guard = lock.acquire("sheet");
        drop(guard);

        assert!(!lock.is_scroll_enabled());
    }

    #[test]
    fn nested_guards_restore_in_reverse_order() {
        let lock = ScrollLock::new();
        let outer = lock.acquire("panel");
        let inner = lock.acquire("lightbox");
        assert_eq!(lock.holders(), 2);

        drop(inner);
        assert!(!lock.is_scroll_enabled());
        assert_eq!(lock.holders(), 1);

        drop(outer);
        assert!(lock.is_scroll_enabled());
        assert_eq!(lock.holders(), 0);
    }

    #[test]
    fn out_of_order_release_keeps_lock_until_last_holder() {
        let lock = ScrollLock::new();
        let about = lock.acquire("about");
        let contact = lock.acquire("contact");

        drop(about);
        assert!(!lock.is_scroll_enabled());

        drop(contact);
        assert!(lock.is_scroll_enabled());
    }

    #[test]
    fn sequential_guards_each_restore_cleanly() {
        let lock = ScrollLock::new();
        for _ in 0..3 {
            let guard = lock.acquire("panel");
            assert!(!lock.is_scroll_enabled());
            drop(guard);
            assert!(lock.is_scroll_enabled());
        }
    }
}
