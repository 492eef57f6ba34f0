// SPDX-License-Identifier: MPL-2.0
//! Interactive controllers driven by the application shell.
//!
//! Each controller follows the same shape: a `Message` enum, a
//! `handle(msg)` entry point, and a `snapshot()` for the render layer.
//! Controllers that schedule work or listen to keys are generic over the
//! application message type and receive a `wrap` function to lift their own
//! messages into it.

pub mod contact_form;
pub mod lightbox;
pub mod notifications;
pub mod overlay;
pub mod state;
