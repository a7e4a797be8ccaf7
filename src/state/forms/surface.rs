//! Live input surfaces and the non-owning links the engine keeps to them
//!
//! In surface-binding mode the rendered input owns its value. The engine only
//! holds a [`SurfaceRef`] (a `Weak` pointer) to it while the UI layer keeps it
//! bound, and treats a dropped or unbound surface as "no value".

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A rendered input whose current value can be read and written in place
#[cfg_attr(test, mockall::automock)]
pub trait InputSurface {
    /// Current value shown by the surface
    fn value(&self) -> String;

    /// Overwrite the value shown by the surface
    fn set_value(&self, value: &str);
}

/// In-memory single-line text input
#[derive(Debug, Default)]
pub struct TextSurface {
    value: RefCell<String>,
}

impl TextSurface {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(initial.into()),
        }
    }

    pub fn push_char(&self, c: char) {
        self.value.borrow_mut().push(c);
    }

    pub fn pop_char(&self) {
        self.value.borrow_mut().pop();
    }

    pub fn clear(&self) {
        self.value.borrow_mut().clear();
    }
}

impl InputSurface for TextSurface {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }
}

/// Non-owning back-reference to a live surface
#[derive(Clone)]
pub struct SurfaceRef(Weak<dyn InputSurface>);

impl SurfaceRef {
    pub fn new<S: InputSurface + 'static>(surface: &Rc<S>) -> Self {
        let surface: Rc<dyn InputSurface> = surface.clone();
        Self(Rc::downgrade(&surface))
    }

    /// The surface, if it is still alive
    pub fn upgrade(&self) -> Option<Rc<dyn InputSurface>> {
        self.0.upgrade()
    }

    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl fmt::Debug for SurfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceRef")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Callback handed to the UI layer to attach (mount) or detach (unmount)
/// the surface for one field
#[derive(Clone)]
pub struct Binder {
    field: String,
    callback: Rc<dyn Fn(Option<SurfaceRef>)>,
}

impl Binder {
    pub(crate) fn new(field: &str, callback: impl Fn(Option<SurfaceRef>) + 'static) -> Self {
        Self {
            field: field.to_string(),
            callback: Rc::new(callback),
        }
    }

    /// Field this binder belongs to
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Raw binder call: `Some` on mount, `None` on unmount
    pub fn call(&self, surface: Option<SurfaceRef>) {
        (self.callback)(surface);
    }

    pub fn bind<S: InputSurface + 'static>(&self, surface: &Rc<S>) {
        self.call(Some(SurfaceRef::new(surface)));
    }

    pub fn unbind(&self) {
        self.call(None);
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder").field("field", &self.field).finish()
    }
}
