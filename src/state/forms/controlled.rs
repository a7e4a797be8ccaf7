//! Value-mirroring (controlled) strategy
//!
//! The engine's own store is the source of truth. Change handlers copy the
//! new value into the store; the UI layer re-reads it when it renders.

use super::binding::{BindingProps, ChangeHandler};
use super::engine::{FormCore, FormEngine, SubmitOutcome};
use super::error::FormError;
use super::field::{FieldOption, FormValues};
use super::form_state::{FormState, SubscriptionId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone)]
pub struct ControlledForm {
    inner: Rc<RefCell<FormCore>>,
}

impl ControlledForm {
    /// Create a form whose field set is fixed by `default_values`
    pub fn new(default_values: FormValues) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FormCore::new(default_values))),
        }
    }

    fn write_value(core: &RefCell<FormCore>, name: &str, value: &str) {
        let mut core = core.borrow_mut();
        tracing::trace!(form_id = %core.id, field = name, "value changed");
        core.store.update(|state| state.values = state.values.assign(name, value));
    }
}

impl FormEngine for ControlledForm {
    fn register(&self, name: &str, option: Option<FieldOption>) -> Result<BindingProps, FormError> {
        let mut core = self.inner.borrow_mut();
        core.register_option(name, option)?;

        let default_value = core
            .store
            .state()
            .values
            .get(name)
            .unwrap_or_default()
            .to_string();
        let weak: Weak<RefCell<FormCore>> = Rc::downgrade(&self.inner);
        let field = name.to_string();
        let on_change = ChangeHandler::new(move |event| {
            if let Some(core) = weak.upgrade() {
                Self::write_value(&core, &field, &event.value);
            }
        });

        Ok(BindingProps {
            default_value,
            on_change,
            binder: None,
        })
    }

    fn get_value(&self, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .store
            .state()
            .values
            .get(name)
            .map(str::to_string)
    }

    fn set_value(&self, name: &str, value: &str) -> Result<(), FormError> {
        self.inner.borrow().ensure_field(name)?;
        Self::write_value(&self.inner, name, value);
        Ok(())
    }

    fn snapshot(&self) -> FormValues {
        self.inner.borrow().store.state().values.clone()
    }

    fn submit(&self) -> SubmitOutcome {
        let (outcome, notification) = {
            let mut core = self.inner.borrow_mut();
            let snapshot = core.store.state().values.clone();
            core.finish_submission(snapshot)
        };
        notification.deliver();
        outcome
    }

    fn reset(&self) {
        let notification = self.inner.borrow_mut().reset_state();
        notification.deliver();
    }

    fn form_state(&self) -> FormState {
        self.inner.borrow().store.state().clone()
    }

    fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> SubscriptionId {
        self.inner.borrow_mut().store.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().store.unsubscribe(id)
    }
}
