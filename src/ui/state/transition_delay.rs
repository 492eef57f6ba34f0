// SPDX-License-Identifier: MPL-2.0
//! Transition delay domain type for overlay and form timings.
//!
//! This module provides a type-safe wrapper for the millisecond delays
//! that separate a visual "closed" signal from the actual unmount.

use crate::config::{MAX_TRANSITION_MS, MIN_TRANSITION_MS};
use std::time::Duration;

/// Transition delay in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (0–5000 ms).
///
/// # Example
///
/// ```
/// use sunshine_gallery::ui::state::TransitionDelay;
///
/// let delay = TransitionDelay::new(240);
/// assert_eq!(delay.millis(), 240);
///
/// // Values outside range are clamped
/// let too_long = TransitionDelay::new(60_000);
/// assert_eq!(too_long.millis(), 5_000); // Clamped to max
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransitionDelay(u64);

impl TransitionDelay {
    /// Creates a new delay, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_TRANSITION_MS, MAX_TRANSITION_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if the transition happens on the next tick.
    #[must_use]
    pub fn is_immediate(self) -> bool {
        self.0 == 0
    }
}

impl From<TransitionDelay> for Duration {
    fn from(delay: TransitionDelay) -> Self {
        delay.as_duration()
    }
}
