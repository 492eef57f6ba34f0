// SPDX-License-Identifier: MPL-2.0
//! `sunshine_gallery` is the interaction engine of a tattoo portfolio site.
//!
//! It drives the slide-in panels and booking sheet through their animated
//! lifecycle, the full-screen gallery viewer, a simulated inquiry form and
//! toast notifications. Everything runs on one logical thread with a
//! manually advanced timer clock, so every transition is deterministic and
//! testable without a browser.

#![doc(html_root_url = "https://docs.rs/sunshine_gallery/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod portfolio;
pub mod runtime;
pub mod ui;
