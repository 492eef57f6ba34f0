// SPDX-License-Identifier: MPL-2.0
//! UI state value types shared by the controllers.

pub mod transition_delay;

pub use transition_delay::TransitionDelay;
