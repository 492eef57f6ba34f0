// SPDX-License-Identifier: MPL-2.0
//! Lifecycle controller for slide-in panels and bottom sheets.
//!
//! An overlay moves through [`Phase::Closed`], [`Phase::Opening`],
//! [`Phase::Open`] and [`Phase::Closing`]. Closing is deferred: the overlay
//! stays mounted for its exit animation and only unmounts when the close
//! timer fires. At most one timer is pending at a time.
//!
//! While mounted the overlay holds a scroll lock guard and an Escape key
//! subscription. Both are released when the close completes, and both are
//! released by drop if the controller itself goes away first.

use crate::runtime::{Key, KeySubscription, Runtime, ScrollLockGuard, TimerHandle, TimerId};
use crate::ui::state::TransitionDelay;
use std::fmt;

/// Discrete lifecycle state of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    /// Mounted, waiting one frame before the enter animation starts.
    Opening,
    Open,
    /// Mounted, playing the exit animation.
    Closing,
}

impl Phase {
    /// Whether the overlay is in the render tree.
    #[must_use]
    pub fn is_mounted(self) -> bool {
        self != Phase::Closed
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phase::Closed => "closed",
            Phase::Opening => "opening",
            Phase::Open => "open",
            Phase::Closing => "closing",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Edge the overlay slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Right,
    Bottom,
}

impl Anchor {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::Bottom => "bottom",
        }
    }
}

/// Construction-time settings of one overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySettings {
    /// Used in logs and as the scroll lock owner.
    pub label: &'static str,
    pub anchor: Anchor,
    pub close_delay: TransitionDelay,
    /// Pass through `Opening` for one scheduler tick before `Open`.
    pub enter_handshake: bool,
}

impl OverlaySettings {
    /// A side panel that opens straight into `Open`.
    #[must_use]
    pub fn panel(label: &'static str, anchor: Anchor, close_delay: TransitionDelay) -> Self {
        Self {
            label,
            anchor,
            close_delay,
            enter_handshake: false,
        }
    }

    /// A bottom sheet.
    #[must_use]
    pub fn sheet(label: &'static str, close_delay: TransitionDelay, enter_handshake: bool) -> Self {
        Self {
            label,
            anchor: Anchor::Bottom,
            close_delay,
            enter_handshake,
        }
    }
}

/// Messages for the overlay controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Open,
    RequestClose,
    CancelPendingClose,
    /// Escape pressed while subscribed.
    Escape,
    /// Enter handshake timer fired.
    EnterFrame(TimerId),
    /// Exit animation timer fired.
    CloseElapsed(TimerId),
}

/// Effects produced by overlay transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The overlay just unmounted. Emitted exactly once per close.
    Closed,
}

/// Render-facing view of an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySnapshot {
    pub label: &'static str,
    pub anchor: Anchor,
    pub phase: Phase,
    pub mounted: bool,
    /// Whether the slid-in styling applies.
    pub visible: bool,
    pub scroll_locked: bool,
    pub listening: bool,
    pub timer_pending: bool,
}

/// Overlay lifecycle state machine.
pub struct Overlay<M> {
    settings: OverlaySettings,
    phase: Phase,
    pending: Option<TimerHandle<M>>,
    scroll_guard: Option<ScrollLockGuard>,
    key_subscription: Option<KeySubscription<M>>,
    runtime: Runtime<M>,
    wrap: fn(Message) -> M,
}

impl<M: 'static> Overlay<M> {
    /// Creates a closed overlay wired to the given runtime.
    ///
    /// `wrap` lifts overlay messages into the application message type, so
    /// timer and keyboard messages come back through the app's update loop.
    pub fn new(settings: OverlaySettings, runtime: &Runtime<M>, wrap: fn(Message) -> M) -> Self {
        Self {
            settings,
            phase: Phase::Closed,
            pending: None,
            scroll_guard: None,
            key_subscription: None,
            runtime: runtime.clone(),
            wrap,
        }
    }

    /// Handle an overlay message.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Open => {
                self.open();
                Effect::None
            }
            Message::RequestClose | Message::Escape => {
                self.request_close();
                Effect::None
            }
            Message::CancelPendingClose => {
                self.cancel_pending_close();
                Effect::None
            }
            Message::EnterFrame(id) => {
                self.complete_enter(id);
                Effect::None
            }
            Message::CloseElapsed(id) => self.complete_close(id),
        }
    }

    /// Opens the overlay, or reverts an in-flight close.
    pub fn open(&mut self) {
        match self.phase {
            Phase::Closed => {
                self.acquire_resources();
                if self.settings.enter_handshake {
                    let wrap = self.wrap;
                    self.pending = Some(
                        self.runtime
                            .scheduler
                            .schedule(std::time::Duration::ZERO, move |id| {
                                wrap(Message::EnterFrame(id))
                            }),
                    );
                    self.set_phase(Phase::Opening);
                } else {
                    self.set_phase(Phase::Open);
                }
            }
            Phase::Closing => {
                self.pending = None;
                self.acquire_resources();
                self.set_phase(Phase::Open);
            }
            Phase::Opening | Phase::Open => {
                tracing::trace!(overlay = self.settings.label, phase = %self.phase, "open ignored");
            }
        }
    }

    /// Starts the exit animation. The overlay unmounts after the close delay.
    ///
    /// Repeated requests while closing keep the original deadline.
    pub fn request_close(&mut self) {
        match self.phase {
            Phase::Open | Phase::Opening => {
                let wrap = self.wrap;
                // Replacing the handle cancels a pending enter frame.
                self.pending = Some(self.runtime.scheduler.schedule(
                    self.settings.close_delay.as_duration(),
                    move |id| wrap(Message::CloseElapsed(id)),
                ));
                self.set_phase(Phase::Closing);
            }
            Phase::Closing | Phase::Closed => {
                tracing::trace!(overlay = self.settings.label, phase = %self.phase, "close request ignored");
            }
        }
    }

    /// Cancels an in-flight close and returns to `Open`.
    pub fn cancel_pending_close(&mut self) {
        if self.phase == Phase::Closing {
            self.pending = None;
            self.set_phase(Phase::Open);
        } else {
            tracing::trace!(overlay = self.settings.label, phase = %self.phase, "nothing to cancel");
        }
    }

    /// Unmounts immediately, skipping the exit animation.
    pub fn close_now(&mut self) -> Effect {
        if self.phase.is_mounted() {
            self.release();
            Effect::Closed
        } else {
            Effect::None
        }
    }

    fn complete_enter(&mut self, id: TimerId) {
        if self.phase == Phase::Opening && self.owns_timer(id) {
            self.pending = None;
            self.set_phase(Phase::Open);
        } else {
            tracing::trace!(overlay = self.settings.label, ?id, "stale enter frame");
        }
    }

    fn complete_close(&mut self, id: TimerId) -> Effect {
        if self.phase == Phase::Closing && self.owns_timer(id) {
            self.release();
            Effect::Closed
        } else {
            tracing::trace!(overlay = self.settings.label, ?id, "stale close timer");
            Effect::None
        }
    }

    fn owns_timer(&self, id: TimerId) -> bool {
        self.pending.as_ref().is_some_and(|handle| handle.id() == id)
    }

    fn acquire_resources(&mut self) {
        if self.scroll_guard.is_none() {
            self.scroll_guard = Some(self.runtime.scroll_lock.acquire(self.settings.label));
        }
        if self.key_subscription.is_none() {
            let wrap = self.wrap;
            self.key_subscription = Some(
                self.runtime
                    .keyboard
                    .subscribe(move |key| (*key == Key::Escape).then(|| wrap(Message::Escape))),
            );
        }
    }

    fn release(&mut self) {
        self.pending = None;
        self.key_subscription = None;
        self.scroll_guard = None;
        self.set_phase(Phase::Closed);
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(overlay = self.settings.label, from = %self.phase, to = %phase, "overlay phase");
        self.phase = phase;
    }
}

impl<M> Overlay<M> {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.phase.is_mounted()
    }

    /// Whether a transition timer is waiting to fire.
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.pending.as_ref().is_some_and(TimerHandle::is_pending)
    }

    #[must_use]
    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            label: self.settings.label,
            anchor: self.settings.anchor,
            phase: self.phase,
            mounted: self.phase.is_mounted(),
            visible: self.phase == Phase::Open,
            scroll_locked: self.scroll_guard.is_some(),
            listening: self.key_subscription.is_some(),
            timer_pending: self.has_pending_timer(),
        }
    }
}

impl<M> Drop for Overlay<M> {
    fn drop(&mut self) {
        if self.phase.is_mounted() {
            tracing::debug!(overlay = self.settings.label, phase = %self.phase, "overlay torn down while mounted");
        }
    }
}

impl<M> fmt::Debug for Overlay<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overlay")
            .field("settings", &self.settings)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Scheduler;
    use std::time::Duration;

    fn panel(runtime: &Runtime<Message>) -> Overlay<Message> {
        Overlay::new(
            OverlaySettings::panel("about", Anchor::Left, TransitionDelay::new(240)),
            runtime,
            |m| m,
        )
    }

    fn sheet(runtime: &Runtime<Message>) -> Overlay<Message> {
        Overlay::new(
            OverlaySettings::sheet("booking", TransitionDelay::new(300), true),
            runtime,
            |m| m,
        )
    }

    fn advance(
        overlay: &mut Overlay<Message>,
        scheduler: &Scheduler<Message>,
        ms: u64,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        scheduler.advance(Duration::from_millis(ms), |m| effects.push(overlay.handle(m)));
        effects.retain(|effect| *effect != Effect::None);
        effects
    }

    fn press(overlay: &mut Overlay<Message>, runtime: &Runtime<Message>, key: Key) {
        for msg in runtime.keyboard.dispatch(&key) {
            overlay.handle(msg);
        }
    }

    #[test]
    fn open_close_cycle_releases_everything_and_notifies_once() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);

        overlay.open();
        assert_eq!(overlay.phase(), Phase::Open);
        assert!(runtime.scroll_lock.is_locked());

        overlay.request_close();
        assert_eq!(overlay.phase(), Phase::Closing);
        assert!(overlay.is_mounted());

        assert!(advance(&mut overlay, &runtime.scheduler, 239).is_empty());
        assert_eq!(overlay.phase(), Phase::Closing);

        let effects = advance(&mut overlay, &runtime.scheduler, 1);
        assert_eq!(effects, vec![Effect::Closed]);
        assert_eq!(overlay.phase(), Phase::Closed);
        assert!(!runtime.scroll_lock.is_locked());
        assert!(runtime.scroll_lock.is_scroll_enabled());

        assert!(advance(&mut overlay, &runtime.scheduler, 1_000).is_empty());
    }

    #[test]
    fn request_close_twice_keeps_a_single_timer() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);
        overlay.open();

        overlay.request_close();
        advance(&mut overlay, &runtime.scheduler, 100);
        overlay.request_close();
        assert_eq!(runtime.scheduler.pending_count(), 1);

        // The original deadline still holds.
        let effects = advance(&mut overlay, &runtime.scheduler, 140);
        assert_eq!(effects, vec![Effect::Closed]);
    }

    #[test]
    fn reopen_while_closing_cancels_the_close() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);
        overlay.open();
        overlay.request_close();

        overlay.open();
        assert_eq!(overlay.phase(), Phase::Open);
        assert_eq!(runtime.scheduler.pending_count(), 0);

        assert!(advance(&mut overlay, &runtime.scheduler, 240).is_empty());
        assert_eq!(overlay.phase(), Phase::Open);
        assert!(runtime.scroll_lock.is_locked());
    }

    #[test]
    fn cancel_pending_close_returns_to_open() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);
        overlay.open();
        overlay.request_close();

        overlay.cancel_pending_close();
        assert_eq!(overlay.phase(), Phase::Open);
        assert!(!overlay.has_pending_timer());
        assert!(advance(&mut overlay, &runtime.scheduler, 500).is_empty());
    }

    #[test]
    fn teardown_while_closing_cancels_timer_and_releases_lock() {
        let runtime: Runtime<Message> = Runtime::new();
        let mut overlay = panel(&runtime);
        overlay.open();
        overlay.request_close();
        assert_eq!(runtime.scheduler.pending_count(), 1);

        drop(overlay);

        assert_eq!(runtime.scheduler.pending_count(), 0);
        assert!(!runtime.scroll_lock.is_locked());
        assert_eq!(runtime.keyboard.listener_count(), 0);
        let delivered = runtime
            .scheduler
            .advance(Duration::from_millis(1_000), |_| panic!("timer fired after teardown"));
        assert_eq!(delivered, 0);
    }

    #[test]
    fn escape_requests_close_only_while_open() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);

        press(&mut overlay, &runtime, Key::Escape);
        assert_eq!(overlay.phase(), Phase::Closed);

        overlay.open();
        press(&mut overlay, &runtime, Key::ArrowLeft);
        assert_eq!(overlay.phase(), Phase::Open);

        press(&mut overlay, &runtime, Key::Escape);
        assert_eq!(overlay.phase(), Phase::Closing);

        press(&mut overlay, &runtime, Key::Escape);
        assert_eq!(runtime.scheduler.pending_count(), 1);
    }

    #[test]
    fn listener_count_returns_to_baseline_after_cycle() {
        let runtime = Runtime::new();
        let baseline = runtime.keyboard.listener_count();
        let mut overlay = panel(&runtime);

        overlay.open();
        assert_eq!(runtime.keyboard.listener_count(), baseline + 1);
        overlay.request_close();
        advance(&mut overlay, &runtime.scheduler, 240);

        assert_eq!(runtime.keyboard.listener_count(), baseline);
    }

    #[test]
    fn sheet_passes_through_opening_on_next_tick() {
        let runtime = Runtime::new();
        let mut overlay = sheet(&runtime);

        overlay.open();
        assert_eq!(overlay.phase(), Phase::Opening);
        assert!(overlay.snapshot().mounted);
        assert!(!overlay.snapshot().visible);

        advance(&mut overlay, &runtime.scheduler, 0);
        assert_eq!(overlay.phase(), Phase::Open);
        assert!(overlay.snapshot().visible);
    }

    #[test]
    fn close_from_opening_cancels_enter_frame() {
        let runtime = Runtime::new();
        let mut overlay = sheet(&runtime);
        overlay.open();

        overlay.request_close();
        assert_eq!(overlay.phase(), Phase::Closing);
        assert_eq!(runtime.scheduler.pending_count(), 1);

        let effects = advance(&mut overlay, &runtime.scheduler, 300);
        assert_eq!(effects, vec![Effect::Closed]);
    }

    #[test]
    fn close_now_skips_animation() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);
        assert_eq!(overlay.close_now(), Effect::None);

        overlay.open();
        overlay.request_close();
        assert_eq!(overlay.close_now(), Effect::Closed);
        assert_eq!(overlay.phase(), Phase::Closed);
        assert_eq!(runtime.scheduler.pending_count(), 0);
        assert!(!runtime.scroll_lock.is_locked());
    }

    #[test]
    fn stale_close_message_is_ignored() {
        let runtime = Runtime::new();
        let mut overlay = panel(&runtime);
        overlay.open();
        overlay.request_close();
        let stale = runtime
            .scheduler
            .schedule(Duration::ZERO, |id| Message::CloseElapsed(id));
        let stale_id = stale.id();
        drop(stale);

        assert_eq!(overlay.handle(Message::CloseElapsed(stale_id)), Effect::None);
        assert_eq!(overlay.phase(), Phase::Closing);
    }

    #[test]
    fn closed_overlay_holds_nothing() {
        let runtime = Runtime::new();
        let overlay = panel(&runtime);
        let snapshot = overlay.snapshot();

        assert_eq!(snapshot.phase, Phase::Closed);
        assert!(!snapshot.mounted);
        assert!(!snapshot.scroll_locked);
        assert!(!snapshot.listening);
        assert!(!snapshot.timer_pending);
    }
}
