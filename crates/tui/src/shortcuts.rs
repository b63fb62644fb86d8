//! Global keyboard shortcuts.
//!
//! The [`ShortcutHub`] sees every key event before focused components do. A
//! listener registers the chords it cares about and receives a
//! [`ShortcutSubscription`]; dropping the subscription detaches the listener.
//! When a chord matches, the hub consumes the event so no focused component
//! also acts on it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use atrium_types::ShortcutAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

/// A key plus the modifier that must be held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifier: KeyModifiers,
}

impl KeyChord {
    pub const fn new(code: KeyCode, modifier: KeyModifiers) -> Self {
        Self { code, modifier }
    }

    /// Only presses count; repeats and releases never fire a shortcut.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press && key.code == self.code && key.modifiers.contains(self.modifier)
    }
}

/// Ctrl+K, or Cmd/Super+K on terminals that report the super modifier.
pub const PALETTE_CHORDS: [KeyChord; 2] = [
    KeyChord::new(KeyCode::Char('k'), KeyModifiers::CONTROL),
    KeyChord::new(KeyCode::Char('k'), KeyModifiers::SUPER),
];

#[derive(Debug)]
struct Listener {
    id: u64,
    chords: Vec<KeyChord>,
    action: ShortcutAction,
}

#[derive(Debug, Default)]
struct HubInner {
    listeners: Vec<Listener>,
    next_id: u64,
    attach_count: usize,
    detach_count: usize,
}

/// Document-level key listener registry.
///
/// Cloning the hub yields another handle to the same listener set.
#[derive(Debug, Clone, Default)]
pub struct ShortcutHub {
    inner: Rc<RefCell<HubInner>>,
}

impl ShortcutHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a listener for `chords` and returns its handle.
    pub fn subscribe(&self, chords: &[KeyChord], action: ShortcutAction) -> ShortcutSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.attach_count += 1;
        inner.listeners.push(Listener {
            id,
            chords: chords.to_vec(),
            action,
        });
        debug!(id, ?action, "shortcut listener attached");
        ShortcutSubscription {
            hub: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Offers `key` to the attached listeners.
    ///
    /// Returns the action of the first matching listener; the caller must then
    /// stop propagating the event.
    pub fn dispatch(&self, key: &KeyEvent) -> Option<ShortcutAction> {
        self.inner
            .borrow()
            .listeners
            .iter()
            .find(|listener| listener.chords.iter().any(|chord| chord.matches(key)))
            .map(|listener| listener.action)
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Total attaches over the hub's lifetime.
    pub fn attach_count(&self) -> usize {
        self.inner.borrow().attach_count
    }

    /// Total detaches over the hub's lifetime.
    pub fn detach_count(&self) -> usize {
        self.inner.borrow().detach_count
    }
}

/// Handle to an attached listener. Detaches exactly once, on drop.
#[derive(Debug)]
pub struct ShortcutSubscription {
    hub: Weak<RefCell<HubInner>>,
    id: u64,
}

impl ShortcutSubscription {
    /// Detaches now instead of at the end of the owner's scope.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ShortcutSubscription {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let mut inner = hub.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|listener| listener.id != self.id);
        if inner.listeners.len() != before {
            inner.detach_count += 1;
            debug!(id = self.id, "shortcut listener detached");
        }
    }
}
