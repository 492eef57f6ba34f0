// SPDX-License-Identifier: MPL-2.0
//! Inquiry form with client-side validation and a simulated submission.
//!
//! Nothing leaves the process: submitting waits a fixed round-trip delay,
//! reports the outcome as a toast, then resets after a second delay. When
//! hosted in the booking sheet, the reset also asks the host to close.

use crate::config::Config;
use crate::runtime::{Scheduler, TimerHandle, TimerId};
use crate::ui::notifications::Notification;
use crate::ui::state::TransitionDelay;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

const NAME_MIN_CHARS: usize = 2;
const MESSAGE_MIN_CHARS: usize = 10;

pub const NAME_ERROR: &str = "Name must be at least 2 characters.";
pub const EMAIL_ERROR: &str = "Enter a valid email address.";
pub const MESSAGE_ERROR: &str = "Message must be at least 10 characters.";

pub const SENT_LIVE: &str = "Inquiry sent ✅";
pub const SENT_DEMO: &str = "Inquiry (demo) sent ✅";
pub const SEND_FAILED: &str = "Inquiry failed to send. Please try again.";

/// Form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Parses a lowercase field name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Field::Name),
            "email" => Some(Field::Email),
            "message" => Some(Field::Message),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormValues {
    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    /// Validation errors for every field, touched or not.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            name: (field_length(&self.name) < NAME_MIN_CHARS).then_some(NAME_ERROR),
            email: (!is_valid_email(&self.email)).then_some(EMAIL_ERROR),
            message: (field_length(&self.message) < MESSAGE_MIN_CHARS).then_some(MESSAGE_ERROR),
        }
    }
}

/// Which fields the user has left at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touched {
    pub name: bool,
    pub email: bool,
    pub message: bool,
}

impl Touched {
    fn mark(&mut self, field: Field) {
        match field {
            Field::Name => self.name = true,
            Field::Email => self.email = true,
            Field::Message => self.message = true,
        }
    }

    fn all() -> Self {
        Self {
            name: true,
            email: true,
            message: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.message.is_none()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Name => self.name,
            Field::Email => self.email,
            Field::Message => self.message,
        }
    }

    fn only_touched(self, touched: Touched) -> Self {
        Self {
            name: self.name.filter(|_| touched.name),
            email: self.email.filter(|_| touched.email),
            message: self.message.filter(|_| touched.message),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Success,
}

/// Timings and behavior of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSettings {
    pub submit_delay: TransitionDelay,
    pub reset_delay: TransitionDelay,
    /// Ask the host overlay to close once the form resets.
    pub closes_host: bool,
    pub live: bool,
    pub simulate_failure: bool,
}

impl FormSettings {
    /// The form inside the Contact panel.
    #[must_use]
    pub fn panel(config: &Config) -> Self {
        Self {
            submit_delay: config.submit_delay(),
            reset_delay: config.panel_reset_delay(),
            closes_host: false,
            live: config.contact_live(),
            simulate_failure: config.simulate_failure(),
        }
    }

    /// The form inside the Booking sheet.
    #[must_use]
    pub fn sheet(config: &Config) -> Self {
        Self {
            reset_delay: config.sheet_reset_delay(),
            closes_host: true,
            // The booking sheet always confirms with the live wording.
            live: true,
            ..Self::panel(config)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Input(Field, String),
    Blur(Field),
    Submit,
    SubmitElapsed(TimerId),
    ResetElapsed(TimerId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Show a toast.
    Notify(Notification),
    /// The host overlay should start closing.
    CloseHost,
}

/// Render-facing view of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub values: FormValues,
    pub errors: FieldErrors,
    pub status: SubmitStatus,
    pub submit_label: &'static str,
    pub can_submit: bool,
}

pub struct ContactForm<M> {
    settings: FormSettings,
    values: FormValues,
    touched: Touched,
    status: SubmitStatus,
    pending: Option<TimerHandle<M>>,
    scheduler: Scheduler<M>,
    wrap: fn(Message) -> M,
}

impl<M> ContactForm<M> {
    pub fn new(settings: FormSettings, scheduler: &Scheduler<M>, wrap: fn(Message) -> M) -> Self {
        Self {
            settings,
            values: FormValues::default(),
            touched: Touched::default(),
            status: SubmitStatus::Idle,
            pending: None,
            scheduler: scheduler.clone(),
            wrap,
        }
    }

    /// Handle a form message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Input(field, value) => {
                *self.values.get_mut(field) = value;
                Effect::None
            }
            Message::Blur(field) => {
                self.touched.mark(field);
                Effect::None
            }
            Message::Submit => {
                self.submit();
                Effect::None
            }
            Message::SubmitElapsed(id) => self.complete_submit(id),
            Message::ResetElapsed(id) => self.complete_reset(id),
        }
    }

    /// Validates and, if everything passes, starts the simulated round-trip.
    pub fn submit(&mut self) {
        self.touched = Touched::all();
        if self.status == SubmitStatus::Submitting {
            tracing::trace!("submit ignored while submitting");
            return;
        }
        if !self.is_valid() {
            tracing::debug!(errors = ?self.values.validate(), "inquiry rejected");
            return;
        }

        let wrap = self.wrap;
        self.pending = Some(self.scheduler.schedule(
            self.settings.submit_delay.as_duration(),
            move |id| wrap(Message::SubmitElapsed(id)),
        ));
        self.status = SubmitStatus::Submitting;
        tracing::debug!("inquiry submitting");
    }

    /// Clears values and touched flags and cancels any pending timer.
    pub fn reset(&mut self) {
        self.values = FormValues::default();
        self.touched = Touched::default();
        self.status = SubmitStatus::Idle;
        self.pending = None;
    }

    fn complete_submit(&mut self, id: TimerId) -> Effect {
        if self.status != SubmitStatus::Submitting || !self.owns_timer(id) {
            tracing::trace!(?id, "stale submit timer");
            return Effect::None;
        }

        if self.settings.simulate_failure {
            self.pending = None;
            self.status = SubmitStatus::Idle;
            tracing::warn!("simulated inquiry failure");
            return Effect::Notify(Notification::error(SEND_FAILED));
        }

        let wrap = self.wrap;
        self.pending = Some(self.scheduler.schedule(
            self.settings.reset_delay.as_duration(),
            move |id| wrap(Message::ResetElapsed(id)),
        ));
        self.status = SubmitStatus::Success;
        tracing::info!(live = self.settings.live, "inquiry sent");

        let text = if self.settings.live {
            SENT_LIVE
        } else {
            SENT_DEMO
        };
        Effect::Notify(Notification::success(text))
    }

    fn complete_reset(&mut self, id: TimerId) -> Effect {
        if self.status != SubmitStatus::Success || !self.owns_timer(id) {
            tracing::trace!(?id, "stale reset timer");
            return Effect::None;
        }

        self.reset();
        if self.settings.closes_host {
            Effect::CloseHost
        } else {
            Effect::None
        }
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.pending.as_ref().is_some_and(|handle| handle.id() == id)
    }

    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    #[must_use]
    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    #[must_use]
    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// Errors to display: only for touched fields.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.values.validate().only_touched(self.touched)
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.values.validate().is_empty()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_valid() && self.status != SubmitStatus::Submitting
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.status {
            SubmitStatus::Idle => "Send Inquiry",
            SubmitStatus::Submitting => "Sending...",
            SubmitStatus::Success => "Sent ✔️",
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors(),
            status: self.status,
            submit_label: self.submit_label(),
            can_submit: self.can_submit(),
        }
    }
}

impl<M> fmt::Debug for ContactForm<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactForm")
            .field("settings", &self.settings)
            .field("values", &self.values)
            .field("status", &self.status)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern")
});

/// Checks the address shape. Surrounding whitespace is ignored.
#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input.trim())
}

/// Length as a browser text field reports it, in UTF-16 code units.
fn field_length(value: &str) -> usize {
    value.trim().encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::Severity;
    use std::time::Duration;

    fn settings() -> FormSettings {
        FormSettings::panel(&Config::default())
    }

    fn form(scheduler: &Scheduler<Message>, settings: FormSettings) -> ContactForm<Message> {
        ContactForm::new(settings, scheduler, |m| m)
    }

    fn fill_valid(form: &mut ContactForm<Message>) {
        form.handle(Message::Input(Field::Name, "Ana".into()));
        form.handle(Message::Input(Field::Email, "ana@example.com".into()));
        form.handle(Message::Input(Field::Message, "Forearm rose, palm size".into()));
    }

    fn advance(
        form: &mut ContactForm<Message>,
        scheduler: &Scheduler<Message>,
        ms: u64,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        scheduler.advance(Duration::from_millis(ms), |m| effects.push(form.handle(m)));
        effects.retain(|effect| *effect != Effect::None);
        effects
    }

    #[test]
    fn email_validation_matches_local_at_domain_dot_tld() {
        for valid in ["a@b.co", "ana@example.com", "  first.last@sub.example.org  ", "x@.a.b"] {
            assert!(is_valid_email(valid), "{valid}");
        }
        for invalid in ["", "ana", "ana@", "@example.com", "ana@example", "ana@example.", "ana@.com", "a b@c.de", "a@b@c.de"] {
            assert!(!is_valid_email(invalid), "{invalid}");
        }
    }

    #[test]
    fn errors_only_show_for_touched_fields() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, settings());
        assert!(form.errors().is_empty());

        form.handle(Message::Blur(Field::Email));
        let errors = form.errors();
        assert_eq!(errors.email, Some(EMAIL_ERROR));
        assert_eq!(errors.name, None);
        assert_eq!(errors.message, None);
    }

    #[test]
    fn trimmed_lengths_are_checked() {
        let values = FormValues {
            name: "  A  ".into(),
            email: "a@b.co".into(),
            message: "   short   ".into(),
        };
        let errors = values.validate();
        assert_eq!(errors.name, Some(NAME_ERROR));
        assert_eq!(errors.message, Some(MESSAGE_ERROR));
        assert_eq!(errors.email, None);
    }

    #[test]
    fn lengths_count_utf16_units_like_the_browser() {
        let values = FormValues {
            name: "😀".into(),
            email: "a@b.co".into(),
            message: "🌹🌹🌹🌹🌹".into(),
        };
        let errors = values.validate();
        assert_eq!(errors.name, None);
        assert_eq!(errors.message, None);

        let short = FormValues {
            name: "é".into(),
            ..values
        };
        assert_eq!(short.validate().name, Some(NAME_ERROR));
    }

    #[test]
    fn invalid_submit_touches_everything_and_schedules_nothing() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, settings());

        form.handle(Message::Submit);

        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(scheduler.pending_count(), 0);
        let errors = form.errors();
        assert_eq!(errors.name, Some(NAME_ERROR));
        assert_eq!(errors.email, Some(EMAIL_ERROR));
        assert_eq!(errors.message, Some(MESSAGE_ERROR));
    }

    #[test]
    fn successful_submit_notifies_then_resets() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, settings());
        fill_valid(&mut form);
        assert!(form.can_submit());

        form.handle(Message::Submit);
        assert_eq!(form.status(), SubmitStatus::Submitting);
        assert_eq!(form.submit_label(), "Sending...");
        assert!(!form.can_submit());

        let effects = advance(&mut form, &scheduler, 650);
        assert_eq!(form.status(), SubmitStatus::Success);
        assert_eq!(form.submit_label(), "Sent ✔️");
        match effects.as_slice() {
            [Effect::Notify(toast)] => {
                assert_eq!(toast.severity(), Severity::Success);
                assert_eq!(toast.text(), SENT_DEMO);
            }
            other => panic!("expected one toast, got {other:?}"),
        }

        assert!(advance(&mut form, &scheduler, 1_099).is_empty());
        assert_eq!(form.status(), SubmitStatus::Success);
        assert!(advance(&mut form, &scheduler, 1).is_empty());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.values(), &FormValues::default());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn live_channel_uses_live_wording() {
        let scheduler = Scheduler::new();
        let mut form = form(
            &scheduler,
            FormSettings {
                live: true,
                ..settings()
            },
        );
        fill_valid(&mut form);
        form.submit();

        let effects = advance(&mut form, &scheduler, 650);
        assert!(matches!(effects.as_slice(), [Effect::Notify(toast)] if toast.text() == SENT_LIVE));
    }

    #[test]
    fn sheet_form_asks_host_to_close_after_reset() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, FormSettings::sheet(&Config::default()));
        fill_valid(&mut form);
        form.submit();

        advance(&mut form, &scheduler, 650);
        let effects = advance(&mut form, &scheduler, 900);
        assert_eq!(effects, vec![Effect::CloseHost]);
    }

    #[test]
    fn sheet_form_confirms_with_live_wording_even_in_demo_mode() {
        let scheduler = Scheduler::new();
        let config = Config::default();
        assert!(!config.contact_live());
        let mut form = form(&scheduler, FormSettings::sheet(&config));
        fill_valid(&mut form);
        form.submit();

        let effects = advance(&mut form, &scheduler, 650);
        assert!(matches!(effects.as_slice(), [Effect::Notify(toast)] if toast.text() == SENT_LIVE));
    }

    #[test]
    fn simulated_failure_returns_to_idle_with_error_toast() {
        let scheduler = Scheduler::new();
        let mut form = form(
            &scheduler,
            FormSettings {
                simulate_failure: true,
                ..settings()
            },
        );
        fill_valid(&mut form);
        form.submit();

        let effects = advance(&mut form, &scheduler, 650);
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.values().name, "Ana");
        assert!(matches!(
            effects.as_slice(),
            [Effect::Notify(toast)] if toast.severity() == Severity::Error && toast.text() == SEND_FAILED
        ));
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn second_submit_while_submitting_is_ignored() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, settings());
        fill_valid(&mut form);

        form.submit();
        form.submit();
        assert_eq!(scheduler.pending_count(), 1);
    }

    #[test]
    fn reset_cancels_pending_round_trip() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, settings());
        fill_valid(&mut form);
        form.submit();

        form.reset();
        assert_eq!(scheduler.pending_count(), 0);
        assert!(advance(&mut form, &scheduler, 5_000).is_empty());
        assert_eq!(form.status(), SubmitStatus::Idle);
    }

    #[test]
    fn dropping_form_cancels_its_timer() {
        let scheduler = Scheduler::new();
        let mut form = form(&scheduler, settings());
        fill_valid(&mut form);
        form.submit();

        drop(form);
        assert_eq!(scheduler.pending_count(), 0);
    }
}
