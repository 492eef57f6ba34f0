// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Transitions**: Exit animation delays for panels and sheets
//! - **Form**: Simulated submission round-trip and reset delays
//! - **Toast**: Notification display duration and stacking
//! - **Contact**: Booking link fallback

// ==========================================================================
// Transition Defaults
// ==========================================================================

/// Exit animation delay for slide-in panels (in milliseconds).
pub const DEFAULT_PANEL_CLOSE_MS: u64 = 240;

/// Exit animation delay for bottom sheets (in milliseconds).
pub const DEFAULT_SHEET_CLOSE_MS: u64 = 300;

/// Minimum transition delay (in milliseconds). Zero closes on the next tick.
pub const MIN_TRANSITION_MS: u64 = 0;

/// Maximum transition delay (in milliseconds).
pub const MAX_TRANSITION_MS: u64 = 5_000;

// ==========================================================================
// Form Defaults
// ==========================================================================

/// Simulated network round-trip for the inquiry form (in milliseconds).
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 650;

/// Delay before a panel-hosted form resets after success (in milliseconds).
pub const DEFAULT_PANEL_RESET_MS: u64 = 1_100;

/// Delay before a sheet-hosted form resets and closes its sheet (in milliseconds).
pub const DEFAULT_SHEET_RESET_MS: u64 = 900;

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// How long a toast stays on screen (in milliseconds).
pub const DEFAULT_TOAST_DURATION_MS: u64 = 2_400;

/// Minimum toast duration (in milliseconds).
pub const MIN_TOAST_DURATION_MS: u64 = 500;

/// Maximum toast duration (in milliseconds).
pub const MAX_TOAST_DURATION_MS: u64 = 30_000;

/// Maximum number of toasts visible at once.
pub const DEFAULT_TOAST_MAX_VISIBLE: usize = 3;

/// Upper bound for `max_visible`.
pub const MAX_TOAST_MAX_VISIBLE: usize = 10;

// ==========================================================================
// Contact Defaults
// ==========================================================================

/// Booking page offered once the contact channel is live.
pub const DEFAULT_BOOKING_URL: &str = "https://calendly.com/yourname/consult";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Transition validation
    assert!(MAX_TRANSITION_MS > MIN_TRANSITION_MS);
    assert!(DEFAULT_PANEL_CLOSE_MS <= MAX_TRANSITION_MS);
    assert!(DEFAULT_SHEET_CLOSE_MS <= MAX_TRANSITION_MS);

    // Form validation
    assert!(DEFAULT_SUBMIT_DELAY_MS <= MAX_TRANSITION_MS);
    assert!(DEFAULT_PANEL_RESET_MS <= MAX_TRANSITION_MS);
    assert!(DEFAULT_SHEET_RESET_MS <= MAX_TRANSITION_MS);

    // Toast validation
    assert!(MIN_TOAST_DURATION_MS > 0);
    assert!(MAX_TOAST_DURATION_MS >= MIN_TOAST_DURATION_MS);
    assert!(DEFAULT_TOAST_DURATION_MS >= MIN_TOAST_DURATION_MS);
    assert!(DEFAULT_TOAST_DURATION_MS <= MAX_TOAST_DURATION_MS);
    assert!(DEFAULT_TOAST_MAX_VISIBLE >= 1);
    assert!(DEFAULT_TOAST_MAX_VISIBLE <= MAX_TOAST_MAX_VISIBLE);
};
