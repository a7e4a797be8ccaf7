//! Form state and the observable store that holds it
//!
//! The store keeps one `FormState`. Updates come in two flavours:
//! - `update`: mutate silently, nobody is told
//! - `commit`: mutate and hand back a [`Notification`] for every subscriber
//!
//! Notifications are delivered by the caller once it has released any borrow
//! on the store, so listeners are free to read the form again.

use super::field::{FieldErrors, FormValues};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// Snapshot of a form's overall state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormState {
    /// Set at submission when any value differs from its default
    pub is_dirty: bool,
    /// Set at submission when every registered field passed validation
    pub is_valid: bool,
    pub values: FormValues,
    /// Present only after a failed submission
    pub errors: Option<FieldErrors>,
    pub submit_count: u32,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl FormState {
    /// Initial state for a freshly constructed form
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            ..Default::default()
        }
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.get(name))
    }

    pub fn is_submitted(&self) -> bool {
        self.submit_count > 0
    }
}

/// Handle returned by [`FormStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(&FormState)>;

/// Pending delivery of a committed state to subscribers
#[must_use = "subscribers are only told once the notification is delivered"]
pub struct Notification {
    state: FormState,
    listeners: Vec<Listener>,
}

impl Notification {
    pub fn deliver(self) {
        for listener in &self.listeners {
            listener(&self.state);
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }
}

/// Single state object with silent updates and observable commits
pub struct FormStore {
    current: FormState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl FormStore {
    pub fn new(initial: FormState) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.current
    }

    /// Mutate the state without notifying subscribers
    pub fn update(&mut self, f: impl FnOnce(&mut FormState)) {
        f(&mut self.current);
    }

    /// Mutate the state and prepare a notification for all subscribers
    pub fn commit(&mut self, f: impl FnOnce(&mut FormState)) -> Notification {
        f(&mut self.current);
        Notification {
            state: self.current.clone(),
            listeners: self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&FormState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let listener: Listener = Rc::new(listener);
        self.listeners.push((id, listener));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for FormStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormStore")
            .field("current", &self.current)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
