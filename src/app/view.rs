// SPDX-License-Identifier: MPL-2.0
//! Render snapshots of the application state.
//!
//! The render layer reads a [`Snapshot`] after every update. `Display`
//! prints the same data as plain text for the demo driver.

use super::{App, Route};
use crate::ui::contact_form::{Field, FormSnapshot};
use crate::ui::lightbox::LightboxSnapshot;
use crate::ui::notifications::{Notification, NotificationId};
use crate::ui::overlay::OverlaySnapshot;
use std::fmt;
use std::time::Duration;

/// Hint shown on the disabled booking button.
pub const BOOKING_DISABLED_HINT: &str = "Add your Calendly link when ready";

/// State of the "Book a Consult" button in the Contact panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    Link(String),
    Disabled { hint: &'static str },
}

/// A home page category card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub cover: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastView {
    pub id: NotificationId,
    pub tone: &'static str,
    pub text: String,
}

impl From<&Notification> for ToastView {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id(),
            tone: notification.severity().tone(),
            text: notification.text().to_string(),
        }
    }
}

/// Everything the render layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub route: Route,
    pub heading: String,
    /// Category cards, on the home page only.
    pub categories: Vec<CategoryCard>,
    pub about: OverlaySnapshot,
    pub contact: OverlaySnapshot,
    pub booking: OverlaySnapshot,
    pub contact_form: FormSnapshot,
    pub booking_form: FormSnapshot,
    pub booking_action: BookingAction,
    pub gallery: Option<LightboxSnapshot>,
    pub toasts: Vec<ToastView>,
    pub scroll_locked: bool,
    pub key_listeners: usize,
    pub pending_timers: usize,
    pub clock: Duration,
    pub year: i32,
}

impl App {
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let heading = match &self.page {
            Some(page) => page.category.title.clone(),
            None => "Portfolio".to_string(),
        };
        let categories = if self.route == Route::Home {
            self.catalog
                .categories()
                .iter()
                .map(|category| CategoryCard {
                    slug: category.slug.clone(),
                    title: category.title.clone(),
                    description: category.description.clone(),
                    cover: category.cover.clone(),
                    href: Route::Category(category.slug.clone()).path(),
                })
                .collect()
        } else {
            Vec::new()
        };
        let booking_action = if self.config.contact_live() {
            BookingAction::Link(self.config.booking_url().to_string())
        } else {
            BookingAction::Disabled {
                hint: BOOKING_DISABLED_HINT,
            }
        };

        Snapshot {
            route: self.route.clone(),
            heading,
            categories,
            about: self.about.snapshot(),
            contact: self.contact.snapshot(),
            booking: self.booking.snapshot(),
            contact_form: self.contact_form.snapshot(),
            booking_form: self.booking_form.snapshot(),
            booking_action,
            gallery: self.page.as_ref().map(|page| page.lightbox.snapshot()),
            toasts: self.notifications.visible().map(ToastView::from).collect(),
            scroll_locked: !self.runtime.scroll_lock.is_scroll_enabled(),
            key_listeners: self.runtime.keyboard.listener_count(),
            pending_timers: self.runtime.scheduler.pending_count(),
            clock: self.runtime.scheduler.now(),
            year: self.year,
        }
    }
}

fn write_overlay(f: &mut fmt::Formatter<'_>, title: &str, overlay: &OverlaySnapshot) -> fmt::Result {
    writeln!(
        f,
        "  {title:<8} {} ({}){}",
        overlay.phase,
        overlay.anchor.label(),
        if overlay.visible { " visible" } else { "" }
    )
}

fn write_form(f: &mut fmt::Formatter<'_>, title: &str, form: &FormSnapshot) -> fmt::Result {
    writeln!(
        f,
        "  {title} form: [{}]{}",
        form.submit_label,
        if form.can_submit { "" } else { " disabled" }
    )?;
    for field in Field::ALL {
        let value = match field {
            Field::Name => &form.values.name,
            Field::Email => &form.values.email,
            Field::Message => &form.values.message,
        };
        write!(f, "    {:<8} {value:?}", field.name())?;
        match form.errors.get(field) {
            Some(error) => writeln!(f, "  ! {error}")?,
            None => writeln!(f)?,
        }
    }
    Ok(())
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[{}ms] {} - {}",
            self.clock.as_millis(),
            self.route,
            self.heading
        )?;
        for card in &self.categories {
            writeln!(f, "  * {} ({}) {}", card.title, card.href, card.description)?;
        }
        if let Some(gallery) = &self.gallery {
            if gallery.open {
                writeln!(
                    f,
                    "  lightbox {} {} - {}",
                    gallery.position, gallery.current.title, gallery.current.subtitle
                )?;
            } else {
                writeln!(f, "  gallery  {} tiles", gallery.len)?;
            }
        }

        write_overlay(f, "about", &self.about)?;
        write_overlay(f, "contact", &self.contact)?;
        if self.contact.mounted {
            match &self.booking_action {
                BookingAction::Link(url) => writeln!(f, "    book a consult -> {url}")?,
                BookingAction::Disabled { hint } => {
                    writeln!(f, "    book a consult (disabled: {hint})")?;
                }
            }
            write_form(f, "contact", &self.contact_form)?;
        }
        write_overlay(f, "booking", &self.booking)?;
        if self.booking.mounted {
            write_form(f, "booking", &self.booking_form)?;
        }

        for toast in &self.toasts {
            writeln!(f, "  toast [{}] {}", toast.tone, toast.text)?;
        }
        write!(
            f,
            "  scroll {} | listeners {} | timers {} | (c) {}",
            if self.scroll_locked { "locked" } else { "free" },
            self.key_listeners,
            self.pending_timers,
            self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{App, BookingAction, Message, Route};
    use crate::config::{Config, ContactConfig};
    use crate::portfolio::Catalog;
    use crate::ui::lightbox;

    fn app(config: Config) -> App {
        App::new(config, Catalog::embedded().expect("embedded catalog"))
    }

    #[test]
    fn home_snapshot_lists_category_cards() {
        let snapshot = app(Config::default()).snapshot();

        let hrefs: Vec<_> = snapshot.categories.iter().map(|c| c.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "/portfolio/traditional",
                "/portfolio/neo-traditional",
                "/portfolio/blackwork"
            ]
        );
        assert!(snapshot.gallery.is_none());
        assert!(!snapshot.scroll_locked);
    }

    #[test]
    fn booking_is_disabled_until_contact_is_live() {
        let snapshot = app(Config::default()).snapshot();
        assert_eq!(
            snapshot.booking_action,
            BookingAction::Disabled {
                hint: "Add your Calendly link when ready"
            }
        );

        let live = Config {
            contact: ContactConfig {
                live: Some(true),
                booking_url: None,
            },
            ..Config::default()
        };
        assert_eq!(
            app(live).snapshot().booking_action,
            BookingAction::Link("https://calendly.com/yourname/consult".to_string())
        );
    }

    #[test]
    fn gallery_snapshot_prints_position() {
        let mut app = app(Config::default());
        app.update(Message::Navigate(Route::Category("blackwork".into())));
        app.update(Message::Lightbox(lightbox::Message::OpenAt(11)));

        let snapshot = app.snapshot();
        assert!(snapshot.categories.is_empty());
        assert_eq!(snapshot.heading, "Blackwork");
        let text = snapshot.to_string();
        assert!(text.contains("lightbox 12/12 Blackwork - Flash tile • #12"), "{text}");
        assert!(text.contains("scroll locked"), "{text}");
    }
}
