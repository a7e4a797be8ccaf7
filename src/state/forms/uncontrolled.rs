//! Surface-binding (uncontrolled) strategy
//!
//! The live input surface is the source of truth. The engine keeps a weak
//! link per field, set and cleared through the [`Binder`] handed out by
//! `register`, and reads or writes values directly through it. A field with
//! no live surface has no value: reads yield `None`, writes are dropped and
//! submission snapshots it as empty.

use super::binding::{BindingProps, ChangeHandler};
use super::engine::{FormCore, FormEngine, SubmitOutcome};
use super::error::FormError;
use super::field::{FieldOption, FormValues};
use super::form_state::{FormState, SubscriptionId};
use super::surface::{Binder, InputSurface, SurfaceRef};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Field name -> currently bound surface
#[derive(Debug, Default)]
struct SurfaceRegistry {
    surfaces: HashMap<String, SurfaceRef>,
}

impl SurfaceRegistry {
    fn set(&mut self, name: &str, surface: Option<SurfaceRef>) {
        match surface {
            Some(surface) => {
                self.surfaces.insert(name.to_string(), surface);
            }
            None => {
                self.surfaces.remove(name);
            }
        }
    }

    fn live(&self, name: &str) -> Option<Rc<dyn InputSurface>> {
        self.surfaces.get(name).and_then(SurfaceRef::upgrade)
    }
}

#[derive(Debug)]
struct BindingCore {
    core: FormCore,
    surfaces: SurfaceRegistry,
}

impl BindingCore {
    fn live(&self, name: &str) -> Option<Rc<dyn InputSurface>> {
        self.surfaces.live(name)
    }

    /// Every declared field paired with its live surface, if any
    fn live_surfaces(&self) -> Vec<(String, Option<Rc<dyn InputSurface>>)> {
        self.core
            .defaults
            .names()
            .into_iter()
            .map(|name| (name.to_string(), self.live(name)))
            .collect()
    }
}

/// Read each surface; fields without one snapshot as empty
fn read_surfaces(surfaces: Vec<(String, Option<Rc<dyn InputSurface>>)>) -> FormValues {
    surfaces
        .into_iter()
        .map(|(name, surface)| {
            let value = surface.map(|s| s.value()).unwrap_or_default();
            (name, value)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct UncontrolledForm {
    inner: Rc<RefCell<BindingCore>>,
}

impl UncontrolledForm {
    /// Create a form whose field set is fixed by `default_values`
    pub fn new(default_values: FormValues) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BindingCore {
                core: FormCore::new(default_values),
                surfaces: SurfaceRegistry::default(),
            })),
        }
    }

    /// Whether `name` currently has a live surface
    pub fn is_bound(&self, name: &str) -> bool {
        self.inner.borrow().live(name).is_some()
    }

    fn write_through(inner: &RefCell<BindingCore>, name: &str, value: &str) {
        // Release the borrow before touching the surface
        let (form_id, surface) = {
            let inner = inner.borrow();
            (inner.core.id, inner.live(name))
        };
        match surface {
            Some(surface) => {
                tracing::trace!(%form_id, field = name, "value written to surface");
                surface.set_value(value);
            }
            None => {
                tracing::warn!(%form_id, field = name, "change for unbound field dropped");
            }
        }
    }
}

impl FormEngine for UncontrolledForm {
    fn register(&self, name: &str, option: Option<FieldOption>) -> Result<BindingProps, FormError> {
        let (surface, fallback) = {
            let mut inner = self.inner.borrow_mut();
            inner.core.register_option(name, option)?;
            let fallback = inner.core.defaults.get(name).unwrap_or_default().to_string();
            (inner.live(name), fallback)
        };
        let default_value = match surface {
            Some(surface) => surface.value(),
            None => fallback,
        };

        let weak: Weak<RefCell<BindingCore>> = Rc::downgrade(&self.inner);
        let field = name.to_string();
        let on_change = ChangeHandler::new(move |event| {
            if let Some(inner) = weak.upgrade() {
                Self::write_through(&inner, &field, &event.value);
            }
        });

        let weak: Weak<RefCell<BindingCore>> = Rc::downgrade(&self.inner);
        let field = name.to_string();
        let binder = Binder::new(name, move |surface: Option<SurfaceRef>| {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.borrow_mut();
                tracing::debug!(
                    form_id = %inner.core.id,
                    field = %field,
                    bound = surface.is_some(),
                    "surface binding changed"
                );
                inner.surfaces.set(&field, surface);
            }
        });

        Ok(BindingProps {
            default_value,
            on_change,
            binder: Some(binder),
        })
    }

    fn get_value(&self, name: &str) -> Option<String> {
        let surface = self.inner.borrow().live(name)?;
        Some(surface.value())
    }

    fn set_value(&self, name: &str, value: &str) -> Result<(), FormError> {
        self.inner.borrow().core.ensure_field(name)?;
        Self::write_through(&self.inner, name, value);
        Ok(())
    }

    fn snapshot(&self) -> FormValues {
        let surfaces = self.inner.borrow().live_surfaces();
        read_surfaces(surfaces)
    }

    fn submit(&self) -> SubmitOutcome {
        let snapshot = self.snapshot();
        let (outcome, notification) = self.inner.borrow_mut().core.finish_submission(snapshot);
        notification.deliver();
        outcome
    }

    fn reset(&self) {
        let (defaults, surfaces) = {
            let inner = self.inner.borrow();
            let defaults = inner.core.defaults.clone();
            let surfaces: Vec<_> = defaults
                .names()
                .into_iter()
                .filter_map(|name| inner.live(name).map(|s| (name.to_string(), s)))
                .collect();
            (defaults, surfaces)
        };
        for (name, surface) in surfaces {
            surface.set_value(defaults.get(&name).unwrap_or_default());
        }
        let notification = self.inner.borrow_mut().core.reset_state();
        notification.deliver();
    }

    fn form_state(&self) -> FormState {
        self.inner.borrow().core.store.state().clone()
    }

    fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> SubscriptionId {
        self.inner.borrow_mut().core.store.subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.borrow_mut().core.store.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::surface::{MockInputSurface, TextSurface};
    use crate::state::forms::FieldErrors;
    use pretty_assertions::assert_eq;

    fn signup() -> UncontrolledForm {
        UncontrolledForm::new(FormValues::from([("name", ""), ("email", "")]))
    }

    /// Register `name` and mount a text surface initialised from its props
    fn mount(
        form: &UncontrolledForm,
        name: &str,
        option: Option<FieldOption>,
    ) -> (BindingProps, Rc<TextSurface>) {
        let props = form.register(name, option).unwrap();
        let surface = Rc::new(TextSurface::new(props.default_value.clone()));
        props.binder.as_ref().unwrap().bind(&surface);
        (props, surface)
    }

    #[test]
    fn test_register_returns_binder() {
        let form = signup();
        let props = form.register("name", None).unwrap();
        assert_eq!(props.binder.as_ref().map(Binder::field), Some("name"));
        assert_eq!(props.default_value, "");
    }

    #[test]
    fn test_register_unknown_field_fails() {
        let form = signup();
        assert_eq!(
            form.register("phone", None).unwrap_err(),
            FormError::unknown_field("phone")
        );
    }

    #[test]
    fn test_get_value_before_binding_is_none() {
        let form = signup();
        form.register("name", None).unwrap();
        assert!(!form.is_bound("name"));
        assert_eq!(form.get_value("name"), None);
        assert_eq!(form.get_value("phone"), None);
    }

    #[test]
    fn test_change_writes_through_to_surface() {
        let form = signup();
        let (props, surface) = mount(&form, "name", None);

        props.on_change.change("Kim");

        assert_eq!(surface.value(), "Kim");
        assert_eq!(form.get_value("name"), Some("Kim".to_string()));
    }

    #[test]
    fn test_change_writes_through_mock_surface() {
        let form = signup();
        let props = form.register("email", None).unwrap();
        let mut mock = MockInputSurface::new();
        mock.expect_set_value()
            .withf(|value| value.to_owned() == "a@b.com")
            .times(1)
            .return_const(());
        mock.expect_value().return_const("a@b.com".to_string());
        let mock = Rc::new(mock);
        props.binder.as_ref().unwrap().bind(&mock);

        props.on_change.change("a@b.com");

        assert_eq!(form.get_value("email"), Some("a@b.com".to_string()));
    }

    #[test]
    fn test_surface_edits_are_seen_without_change_events() {
        let form = signup();
        let (_props, surface) = mount(&form, "name", None);

        surface.push_char('K');

        assert_eq!(form.get_value("name"), Some("K".to_string()));
    }

    #[test]
    fn test_change_for_unbound_field_is_dropped() {
        let form = signup();
        let props = form.register("name", None).unwrap();

        props.on_change.change("Kim");

        assert_eq!(form.get_value("name"), None);
        assert_eq!(form.snapshot().get("name"), Some(""));
    }

    #[test]
    fn test_default_snapshot_equals_defaults() {
        let defaults = FormValues::from([("name", "Kim"), ("email", "k@m.io")]);
        let form = UncontrolledForm::new(defaults.clone());
        let _name = mount(&form, "name", None);
        let _email = mount(&form, "email", None);

        assert_eq!(form.submit(), SubmitOutcome::Success(defaults));
        assert!(!form.form_state().is_dirty);
    }

    #[test]
    fn test_snapshot_is_frozen_at_submission() {
        let form = signup();
        let (_props, surface) = mount(&form, "name", None);
        surface.set_value("Kim");

        let outcome = form.submit();
        surface.set_value("Lee");

        assert_eq!(outcome.values().and_then(|v| v.get("name")), Some("Kim"));
        assert_eq!(form.form_state().values.get("name"), Some("Kim"));
    }

    #[test]
    fn test_unmounted_required_field_fails_without_panicking() {
        let form = signup();
        let (props, surface) = mount(&form, "email", Some(FieldOption::required("msg")));
        surface.set_value("a@b.com");

        props.binder.as_ref().unwrap().unbind();

        assert_eq!(
            form.submit(),
            SubmitOutcome::Failure(FieldErrors::from([("email", "msg")]))
        );
    }

    #[test]
    fn test_dropped_surface_counts_as_unbound() {
        let form = signup();
        let (_props, surface) = mount(&form, "name", None);
        assert!(form.is_bound("name"));

        drop(surface);

        assert!(!form.is_bound("name"));
        assert_eq!(form.get_value("name"), None);
    }

    #[test]
    fn test_rebinding_replaces_surface() {
        let form = signup();
        let (props, first) = mount(&form, "name", None);
        let second = Rc::new(TextSurface::new("second"));

        props.binder.as_ref().unwrap().bind(&second);
        props.on_change.change("typed");

        assert_eq!(first.value(), "");
        assert_eq!(second.value(), "typed");
    }

    #[test]
    fn test_reregister_keeps_bound_value() {
        let form = signup();
        let (_props, surface) = mount(&form, "email", Some(FieldOption::required("first")));
        surface.set_value("a@b.com");

        let props = form
            .register("email", Some(FieldOption::required("second")))
            .unwrap();
        assert_eq!(props.default_value, "a@b.com");

        surface.clear();
        assert_eq!(form.submit().errors().and_then(|e| e.get("email")), Some("second"));
    }

    #[test]
    fn test_reset_writes_defaults_to_bound_surfaces() {
        let form = UncontrolledForm::new(FormValues::from([("name", "Kim")]));
        let (_props, surface) = mount(&form, "name", None);
        surface.set_value("Lee");
        form.submit();

        form.reset();

        assert_eq!(surface.value(), "Kim");
        assert_eq!(form.form_state().submit_count, 0);
    }

    #[test]
    fn test_set_value_on_unbound_field_is_ok() {
        let form = signup();
        assert!(form.set_value("name", "Kim").is_ok());
        assert!(form.set_value("phone", "1").is_err());
    }

    #[test]
    fn test_remount_after_unbound_submit_starts_from_default() {
        let form = UncontrolledForm::new(FormValues::from([("name", "Kim")]));
        let props = form.register("name", None).unwrap();
        assert_eq!(props.default_value, "Kim");

        assert_eq!(form.submit().values(), Some(&FormValues::from([("name", "")])));

        let (props, _surface) = mount(&form, "name", None);
        assert_eq!(props.default_value, "Kim");
        form.submit();
        assert!(!form.form_state().is_dirty);
    }

    /// Surface that reads the form back whenever its value is taken
    struct ReadingSurface {
        form: RefCell<Option<UncontrolledForm>>,
        reads: RefCell<Vec<u32>>,
    }

    impl InputSurface for ReadingSurface {
        fn value(&self) -> String {
            if let Some(form) = self.form.borrow().as_ref() {
                self.reads.borrow_mut().push(form.form_state().submit_count);
                assert!(form.is_bound("name"));
            }
            "Kim".to_string()
        }

        fn set_value(&self, _value: &str) {}
    }

    #[test]
    fn test_surface_may_read_form_while_being_read() {
        let form = signup();
        let props = form.register("name", None).unwrap();
        let surface = Rc::new(ReadingSurface {
            form: RefCell::new(Some(form.clone())),
            reads: RefCell::new(Vec::new()),
        });
        props.binder.as_ref().unwrap().bind(&surface);

        let props = form.register("name", None).unwrap();
        assert_eq!(props.default_value, "Kim");
        assert_eq!(form.submit().values().and_then(|v| v.get("name")), Some("Kim"));

        assert_eq!(*surface.reads.borrow(), vec![0, 0]);
        surface.form.borrow_mut().take();
    }
}
