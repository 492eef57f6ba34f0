// SPDX-License-Identifier: MPL-2.0
//! Global key-observation stream with owned subscriptions.
//!
//! A listener maps a key press to an optional message. [`KeyboardHub::subscribe`]
//! returns a [`KeySubscription`]; dropping it removes the listener, so a
//! controller that stores the subscription only while open can never leave a
//! dangling handler behind.
//!
//! ```
//! use sunshine_gallery::runtime::{Key, KeyboardHub};
//!
//! let hub: KeyboardHub<&str> = KeyboardHub::new();
//! let subscription = hub.subscribe(|key| (*key == Key::Escape).then_some("close"));
//! assert_eq!(hub.dispatch(&Key::Escape), vec!["close"]);
//!
//! drop(subscription);
//! assert_eq!(hub.listener_count(), 0);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A key press, named after the DOM `KeyboardEvent.key` values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Enter,
    Tab,
    /// Any other key, by name.
    Other(String),
}

impl Key {
    /// Parses a key name such as `"Escape"` or `"ArrowLeft"`.
    ///
    /// Legacy short names (`"Esc"`, `"Left"`, `"Right"`) are accepted too.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            other => Key::Other(other.to_string()),
        }
    }

    /// The canonical key name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Key::Escape => "Escape",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::Enter => "Enter",
            Key::Tab => "Tab",
            Key::Other(name) => name,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::from_name(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<M> = Box<dyn Fn(&Key) -> Option<M>>;

struct Registry<M> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<M>)>,
}

/// Shared registry of key listeners. Clones share the same registry.
pub struct KeyboardHub<M> {
    registry: Rc<RefCell<Registry<M>>>,
}

impl<M: 'static> KeyboardHub<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Registers a listener until the returned subscription is dropped.
    pub fn subscribe(&self, listener: impl Fn(&Key) -> Option<M> + 'static) -> KeySubscription<M> {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));

        KeySubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Offers a key press to every listener in registration order and
    /// collects the messages they produce.
    pub fn dispatch(&self, key: &Key) -> Vec<M> {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter_map(|(_, listener)| listener(key))
            .collect()
    }

    /// Number of active listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<M: 'static> Default for KeyboardHub<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for KeyboardHub<M> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<M> fmt::Debug for KeyboardHub<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardHub")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a KeySubscription removes the listener"]
pub struct KeySubscription<M> {
    id: ListenerId,
    registry: Weak<RefCell<Registry<M>>>,
}

impl<M> KeySubscription<M> {
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl<M> Drop for KeySubscription<M> {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = registry.try_borrow_mut() else {
            return;
        };
        registry.listeners.retain(|(id, _)| *id != self.id);
    }
}

impl<M> fmt::Debug for KeySubscription<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("KeySubscription").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip() {
        for name in ["Escape", "ArrowLeft", "ArrowRight", "Enter", "Tab", "q"] {
            assert_eq!(Key::from_name(name).name(), name);
        }
    }

    #[test]
    fn legacy_names_are_accepted() {
        assert_eq!(Key::from("Esc"), Key::Escape);
        assert_eq!(Key::from("Left"), Key::ArrowLeft);
        assert_eq!(Key::from("Right"), Key::ArrowRight);
    }

    #[test]
    fn dispatch_reaches_listeners_in_registration_order() {
        let hub = KeyboardHub::new();
        let _a = hub.subscribe(|_| Some("a"));
        let _b = hub.subscribe(|key| (*key == Key::Enter).then_some("b"));

        assert_eq!(hub.dispatch(&Key::Enter), vec!["a", "b"]);
        assert_eq!(hub.dispatch(&Key::Tab), vec!["a"]);
    }

    #[test]
    fn dropping_subscription_removes_only_that_listener() {
        let hub = KeyboardHub::new();
        let first = hub.subscribe(|_| Some(1));
        let _second = hub.subscribe(|_| Some(2));
        assert_eq!(hub.listener_count(), 2);

        drop(first);
        assert_eq!(hub.listener_count(), 1);
        assert_eq!(hub.dispatch(&Key::Escape), vec![2]);
    }

    #[test]
    fn subscription_outliving_hub_drops_quietly() {
        let hub: KeyboardHub<()> = KeyboardHub::new();
        let subscription = hub.subscribe(|_| None);
        drop(hub);
        drop(subscription);
    }
}
