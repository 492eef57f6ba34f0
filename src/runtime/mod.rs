// SPDX-License-Identifier: MPL-2.0
//! Single-threaded services shared by the controllers.
//!
//! - [`scheduler`] - cancelable delayed messages on a manual clock
//! - [`scroll_lock`] - scoped "body scroll disabled" resource
//! - [`keyboard`] - key listeners tied to owned subscriptions
//!
//! All three hand out RAII handles. Controllers keep those handles only while
//! they need the resource, so dropping a controller releases everything it
//! held.

pub mod keyboard;
pub mod scheduler;
pub mod scroll_lock;

pub use keyboard::{Key, KeySubscription, KeyboardHub, ListenerId};
pub use scheduler::{Scheduler, TimerHandle, TimerId};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};

use std::fmt;

/// The services a controller is wired to, bundled for construction.
pub struct Runtime<M> {
    pub scheduler: Scheduler<M>,
    pub keyboard: KeyboardHub<M>,
    pub scroll_lock: ScrollLock,
}

impl<M: 'static> Runtime<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheduler: Scheduler::new(),
            keyboard: KeyboardHub::new(),
            scroll_lock: ScrollLock::new(),
        }
    }
}

impl<M: 'static> Default for Runtime<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for Runtime<M> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            keyboard: self.keyboard.clone(),
            scroll_lock: self.scroll_lock.clone(),
        }
    }
}

impl<M> fmt::Debug for Runtime<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("scheduler", &self.scheduler)
            .field("keyboard", &self.keyboard)
            .field("scroll_lock", &self.scroll_lock)
            .finish()
    }
}
