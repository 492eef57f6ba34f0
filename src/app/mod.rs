// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between pages and overlays.
//!
//! The `App` owns one controller per role (About panel, Contact panel,
//! Booking sheet, the two inquiry forms, the toast stack) plus the category
//! page, which exists only while its route is active. Every input, keyboard
//! event and fired timer goes through [`App::update`].

pub mod driver;
mod message;
pub mod paths;
mod route;
mod view;

pub use message::{Flags, Message};
pub use route::Route;
pub use view::{BookingAction, CategoryCard, Snapshot, ToastView};

use crate::config::{self, Config};
use crate::error::Result;
use crate::portfolio::{Catalog, Category};
use crate::runtime::{Key, Runtime};
use crate::ui::contact_form::{self, ContactForm, Field, FormSettings};
use crate::ui::lightbox::{self, Lightbox};
use crate::ui::notifications::{self, Notification};
use crate::ui::overlay::{self, Anchor, Overlay, OverlaySettings};
use chrono::Datelike;
use std::fmt;
use std::time::Duration;

/// Which overlay hosts a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormHost {
    Contact,
    Booking,
}

/// The mounted category page.
pub struct CategoryPage {
    category: Category,
    lightbox: Lightbox<Message>,
}

impl CategoryPage {
    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox<Message> {
        &self.lightbox
    }
}

/// Root application state.
pub struct App {
    runtime: Runtime<Message>,
    config: Config,
    catalog: Catalog,
    route: Route,
    about: Overlay<Message>,
    contact: Overlay<Message>,
    booking: Overlay<Message>,
    contact_form: ContactForm<Message>,
    booking_form: ContactForm<Message>,
    page: Option<CategoryPage>,
    notifications: notifications::Manager<Message>,
    year: i32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route)
            .field("about", &self.about.phase())
            .field("contact", &self.contact.phase())
            .field("booking", &self.booking.phase())
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the application on the home page with everything closed.
    #[must_use]
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let runtime = Runtime::new();

        let about = Overlay::new(
            OverlaySettings::panel("about", Anchor::Left, config.panel_close_delay()),
            &runtime,
            Message::About,
        );
        let contact = Overlay::new(
            OverlaySettings::panel("contact", Anchor::Right, config.panel_close_delay()),
            &runtime,
            Message::Contact,
        );
        let booking = Overlay::new(
            OverlaySettings::sheet(
                "booking",
                config.sheet_close_delay(),
                config.sheet_enter_handshake(),
            ),
            &runtime,
            Message::Booking,
        );
        let contact_form = ContactForm::new(
            FormSettings::panel(&config),
            &runtime.scheduler,
            Message::ContactForm,
        );
        let booking_form = ContactForm::new(
            FormSettings::sheet(&config),
            &runtime.scheduler,
            Message::BookingForm,
        );
        let notifications = notifications::Manager::new(
            &runtime.scheduler,
            Message::Notification,
            config.toast_duration(),
            config.toast_max_visible(),
        );

        Self {
            about,
            contact,
            booking,
            contact_form,
            booking_form,
            notifications,
            page: None,
            route: Route::Home,
            year: chrono::Local::now().year(),
            runtime,
            config,
            catalog,
        }
    }

    /// Processes one message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Navigate(route) => self.navigate(route),
            Message::About(msg) => {
                self.about.handle(msg);
            }
            Message::Contact(msg) => {
                if self.contact.handle(msg) == overlay::Effect::Closed {
                    self.contact_form.reset();
                }
            }
            Message::Booking(msg) => {
                if self.booking.handle(msg) == overlay::Effect::Closed {
                    self.booking_form.reset();
                }
            }
            Message::ContactForm(msg) => self.handle_form(FormHost::Contact, msg),
            Message::BookingForm(msg) => self.handle_form(FormHost::Booking, msg),
            Message::Lightbox(msg) => match &mut self.page {
                Some(page) => page.lightbox.handle(msg),
                None => tracing::debug!(?msg, "no gallery mounted"),
            },
            Message::Notification(msg) => self.notifications.handle(msg),
            Message::KeyPressed(key) => self.key(&key),
        }
    }

    /// Delivers a key press to every active listener.
    pub fn key(&mut self, key: &Key) {
        let messages = self.runtime.keyboard.dispatch(key);
        if messages.is_empty() {
            tracing::trace!(%key, "key not handled");
        }
        for message in messages {
            self.update(message);
        }
    }

    /// Moves the clock forward, processing each timer that comes due in
    /// deadline order. Returns the number of timers processed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let scheduler = self.runtime.scheduler.clone();
        scheduler.advance(elapsed, |message| self.update(message))
    }

    /// Time until the next pending timer, if any.
    #[must_use]
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.runtime.scheduler.time_until_next()
    }

    /// Shows a toast.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Types into the form of the open host and leaves the field.
    ///
    /// The booking sheet sits above the contact panel, so its form wins.
    pub fn fill_field(&mut self, field: Field, value: impl Into<String>) {
        let Some(host) = self.active_form_host() else {
            tracing::debug!(field = field.name(), "no form is open");
            return;
        };
        let wrap = Self::form_message(host);
        self.update(wrap(contact_form::Message::Input(field, value.into())));
        self.update(wrap(contact_form::Message::Blur(field)));
    }

    /// Submits the form of the open host.
    pub fn submit_active_form(&mut self) {
        match self.active_form_host() {
            Some(host) => self.update(Self::form_message(host)(contact_form::Message::Submit)),
            None => tracing::debug!("no form is open"),
        }
    }

    /// Closes whatever sits on top: the gallery, then the sheet, then the panels.
    pub fn close_topmost(&mut self) {
        if let Some(page) = self.page.as_mut().filter(|page| page.lightbox.is_open()) {
            page.lightbox.close();
        } else if self.booking.is_mounted() {
            self.update(Message::Booking(overlay::Message::RequestClose));
        } else if self.contact.is_mounted() {
            self.update(Message::Contact(overlay::Message::RequestClose));
        } else if self.about.is_mounted() {
            self.update(Message::About(overlay::Message::RequestClose));
        } else {
            tracing::debug!("nothing to close");
        }
    }

    #[must_use]
    pub fn route(&self) -> &Route {
        &self.route
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn runtime(&self) -> &Runtime<Message> {
        &self.runtime
    }

    #[must_use]
    pub fn page(&self) -> Option<&CategoryPage> {
        self.page.as_ref()
    }

    #[must_use]
    pub fn about(&self) -> &Overlay<Message> {
        &self.about
    }

    #[must_use]
    pub fn contact(&self) -> &Overlay<Message> {
        &self.contact
    }

    #[must_use]
    pub fn booking(&self) -> &Overlay<Message> {
        &self.booking
    }

    #[must_use]
    pub fn contact_form(&self) -> &ContactForm<Message> {
        &self.contact_form
    }

    #[must_use]
    pub fn booking_form(&self) -> &ContactForm<Message> {
        &self.booking_form
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager<Message> {
        &self.notifications
    }

    fn navigate(&mut self, route: Route) {
        let (route, page) = match route {
            Route::Home => (Route::Home, None),
            Route::Category(slug) => match self.mount_category(&slug) {
                Ok(page) => (Route::Category(slug), Some(page)),
                Err(err) => {
                    tracing::warn!(%slug, error = %err, "redirecting to home");
                    (Route::Home, None)
                }
            },
        };

        if route == self.route {
            tracing::trace!(%route, "already on route");
            return;
        }

        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.about.request_close();
        self.contact.request_close();
        // Replacing the page drops the previous gallery and its listener.
        self.page = page;
        self.route = route;
    }

    fn mount_category(&self, slug: &str) -> Result<CategoryPage> {
        let items = self.catalog.placeholders(slug)?;
        let category = self
            .catalog
            .find(slug)
            .cloned()
            .ok_or_else(|| crate::error::ContentError::UnknownCategory(slug.to_string()))?;
        let lightbox = Lightbox::new(items, &self.runtime, Message::Lightbox)?;
        Ok(CategoryPage { category, lightbox })
    }

    fn handle_form(&mut self, host: FormHost, msg: contact_form::Message) {
        let (overlay, form) = match host {
            FormHost::Contact => (&self.contact, &mut self.contact_form),
            FormHost::Booking => (&self.booking, &mut self.booking_form),
        };
        if !overlay.is_mounted() {
            tracing::debug!(?host, "form message while host is closed");
            return;
        }

        match form.handle(msg) {
            contact_form::Effect::None => {}
            contact_form::Effect::Notify(notification) => self.notifications.push(notification),
            contact_form::Effect::CloseHost => match host {
                FormHost::Contact => self.contact.request_close(),
                FormHost::Booking => self.booking.request_close(),
            },
        }
    }

    fn active_form_host(&self) -> Option<FormHost> {
        if self.booking.is_mounted() {
            Some(FormHost::Booking)
        } else if self.contact.is_mounted() {
            Some(FormHost::Contact)
        } else {
            None
        }
    }

    fn form_message(host: FormHost) -> fn(contact_form::Message) -> Message {
        match host {
            FormHost::Contact => Message::ContactForm,
            FormHost::Booking => Message::BookingForm,
        }
    }
}

/// Entry point used by `main.rs`: loads settings and content, then drives the
/// application from stdin until `quit` or end of input.
pub fn run(flags: Flags) -> Result<()> {
    paths::init_cli_overrides(flags.config_dir);

    let (config, warning) = config::load();
    let catalog = Catalog::embedded()?;
    let mut app = App::new(config, catalog);

    if let Some(warning) = warning {
        app.notify(Notification::error(warning));
    }
    if let Some(slug) = flags.category {
        app.update(Message::Navigate(Route::Category(slug)));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = runtime.block_on(driver::run(&mut app, stdin, &mut std::io::stdout()));
    // A pending stdin read would otherwise keep shutdown waiting.
    runtime.shutdown_background();
    result
}
