// SPDX-License-Identifier: MPL-2.0
//! Full-screen image viewer over an immutable gallery.
//!
//! Navigation wraps around in both directions. While open the viewer listens
//! for ArrowLeft, ArrowRight and Escape, and holds the scroll lock. Closing
//! is immediate.

use crate::error::{ContentError, Result};
use crate::portfolio::GalleryItem;
use crate::runtime::{Key, KeySubscription, Runtime, ScrollLockGuard};
use std::fmt;
use std::rc::Rc;

/// Messages for the lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    OpenAt(usize),
    Close,
    Next,
    Prev,
}

/// Render-facing view of the lightbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxSnapshot {
    pub open: bool,
    pub active_index: usize,
    pub len: usize,
    /// One-based position, e.g. `"3/12"`.
    pub position: String,
    pub current: GalleryItem,
}

/// Gallery navigation controller.
pub struct Lightbox<M> {
    items: Rc<[GalleryItem]>,
    active_index: usize,
    open: bool,
    runtime: Runtime<M>,
    wrap: fn(Message) -> M,
    key_subscription: Option<KeySubscription<M>>,
    scroll_guard: Option<ScrollLockGuard>,
}

impl<M: 'static> Lightbox<M> {
    /// Creates a closed lightbox positioned on the first item.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::EmptyGallery`] if `items` is empty.
    pub fn new(
        items: impl Into<Rc<[GalleryItem]>>,
        runtime: &Runtime<M>,
        wrap: fn(Message) -> M,
    ) -> Result<Self> {
        let items = items.into();
        if items.is_empty() {
            return Err(ContentError::EmptyGallery.into());
        }

        Ok(Self {
            items,
            active_index: 0,
            open: false,
            runtime: runtime.clone(),
            wrap,
            key_subscription: None,
            scroll_guard: None,
        })
    }

    /// Handle a lightbox message.
    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::OpenAt(index) => self.open_at(index),
            Message::Close => self.close(),
            Message::Next => self.next(),
            Message::Prev => self.prev(),
        }
    }

    /// Shows the item at `index`. Out-of-range indices are ignored.
    pub fn open_at(&mut self, index: usize) {
        if index >= self.items.len() {
            tracing::warn!(index, len = self.items.len(), "lightbox index out of range");
            return;
        }

        self.active_index = index;
        if !self.open {
            self.open = true;
            self.scroll_guard = Some(self.runtime.scroll_lock.acquire("lightbox"));
            let wrap = self.wrap;
            self.key_subscription = Some(self.runtime.keyboard.subscribe(move |key| {
                let msg = match key {
                    Key::ArrowRight => Message::Next,
                    Key::ArrowLeft => Message::Prev,
                    Key::Escape => Message::Close,
                    _ => return None,
                };
                Some(wrap(msg))
            }));
        }
        tracing::debug!(index, "lightbox open");
    }

    /// Hides the viewer. Safe to call when already closed.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.key_subscription = None;
        self.scroll_guard = None;
        tracing::debug!(index = self.active_index, "lightbox closed");
    }

    pub fn next(&mut self) {
        if self.open {
            self.active_index = (self.active_index + 1) % self.items.len();
        }
    }

    pub fn prev(&mut self) {
        if self.open {
            let len = self.items.len();
            self.active_index = (self.active_index + len - 1) % len;
        }
    }
}

impl<M> Lightbox<M> {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Number of items. Never zero.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    #[must_use]
    pub fn current(&self) -> &GalleryItem {
        &self.items[self.active_index]
    }

    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.active_index + 1, self.items.len())
    }

    #[must_use]
    pub fn snapshot(&self) -> LightboxSnapshot {
        LightboxSnapshot {
            open: self.open,
            active_index: self.active_index,
            len: self.items.len(),
            position: self.position_label(),
            current: self.current().clone(),
        }
    }
}

impl<M> fmt::Debug for Lightbox<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lightbox")
            .field("len", &self.items.len())
            .field("active_index", &self.active_index)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}
