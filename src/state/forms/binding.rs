//! Events exchanged with the UI layer and the props returned by `register`

use super::surface::Binder;
use std::fmt;
use std::rc::Rc;

/// A value change delivered by an input surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub value: String,
}

impl ChangeEvent {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A submission event whose default action can be suppressed
#[derive(Debug, Clone, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Change handler wired to one field
#[derive(Clone)]
pub struct ChangeHandler(Rc<dyn Fn(ChangeEvent)>);

impl ChangeHandler {
    pub(crate) fn new(handler: impl Fn(ChangeEvent) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, event: ChangeEvent) {
        (self.0)(event);
    }

    /// Shorthand for `call(ChangeEvent::new(value))`
    pub fn change(&self, value: impl Into<String>) {
        self.call(ChangeEvent::new(value));
    }
}

impl fmt::Debug for ChangeHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ChangeHandler")
    }
}

/// What the UI layer wires into a rendered input for one field
#[derive(Debug, Clone)]
pub struct BindingProps {
    /// Initial value for the input
    pub default_value: String,
    pub on_change: ChangeHandler,
    /// Present in surface-binding mode only
    pub binder: Option<Binder>,
}
