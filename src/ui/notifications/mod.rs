// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications appear temporarily to confirm an inquiry was sent or to
//! report that something went wrong, without blocking interaction.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`manager`] - `Manager` for queuing and timed dismissal
//!
//! # Usage
//!
//! ```
//! use sunshine_gallery::runtime::Scheduler;
//! use sunshine_gallery::ui::notifications::{Manager, Notification, NotificationMessage};
//! use std::time::Duration;
//!
//! let scheduler: Scheduler<NotificationMessage> = Scheduler::new();
//! let mut manager = Manager::new(&scheduler, |m| m, Duration::from_millis(2_400), 3);
//!
//! manager.push(Notification::success("Inquiry (demo) sent ✅"));
//! assert_eq!(manager.visible_count(), 1);
//!
//! scheduler.advance(Duration::from_millis(2_400), |m| manager.handle(m));
//! assert_eq!(manager.visible_count(), 0);
//! ```

mod manager;
mod notification;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
