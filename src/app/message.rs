// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::runtime::Key;
use crate::ui::contact_form;
use crate::ui::lightbox;
use crate::ui::notifications;
use crate::ui::overlay;

use super::Route;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Navigate(Route),
    About(overlay::Message),
    Contact(overlay::Message),
    Booking(overlay::Message),
    ContactForm(contact_form::Message),
    BookingForm(contact_form::Message),
    Lightbox(lightbox::Message),
    Notification(notifications::NotificationMessage),
    KeyPressed(Key),
}

/// Runtime flags passed from the command line.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional config directory override (`--config-dir`).
    pub config_dir: Option<String>,
    /// Category to open at startup (`--category`).
    pub category: Option<String>,
    /// Log filter directive (`--log`).
    pub log: Option<String>,
}
