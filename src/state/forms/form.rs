//! Strategy selection: one form type, two value strategies

use super::binding::BindingProps;
use super::controlled::ControlledForm;
use super::engine::{FormEngine, SubmitOutcome};
use super::error::FormError;
use super::field::{FieldOption, FormValues};
use super::form_state::{FormState, SubscriptionId};
use super::uncontrolled::UncontrolledForm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which strategy keeps field values current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormMode {
    /// Engine store is the source of truth
    #[default]
    Controlled,
    /// Live input surfaces are the source of truth
    Uncontrolled,
}

impl FormMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Controlled => Self::Uncontrolled,
            Self::Uncontrolled => Self::Controlled,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Controlled => "controlled",
            Self::Uncontrolled => "uncontrolled",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "controlled" | "value-mirroring" => Ok(Self::Controlled),
            "uncontrolled" | "surface-binding" => Ok(Self::Uncontrolled),
            other => Err(format!("unknown form mode: {other}")),
        }
    }
}

/// A form using one of the two strategies, chosen at construction
#[derive(Debug, Clone)]
pub enum Form {
    Controlled(ControlledForm),
    Uncontrolled(UncontrolledForm),
}

impl Form {
    pub fn new(mode: FormMode, default_values: FormValues) -> Self {
        match mode {
            FormMode::Controlled => Form::Controlled(ControlledForm::new(default_values)),
            FormMode::Uncontrolled => Form::Uncontrolled(UncontrolledForm::new(default_values)),
        }
    }

    pub fn mode(&self) -> FormMode {
        match self {
            Form::Controlled(_) => FormMode::Controlled,
            Form::Uncontrolled(_) => FormMode::Uncontrolled,
        }
    }

    /// Whether `name` has a live surface. Controlled forms never bind surfaces.
    pub fn is_bound(&self, name: &str) -> bool {
        match self {
            Form::Controlled(_) => false,
            Form::Uncontrolled(f) => f.is_bound(name),
        }
    }
}

impl FormEngine for Form {
    fn register(&self, name: &str, option: Option<FieldOption>) -> Result<BindingProps, FormError> {
        match self {
            Form::Controlled(f) => f.register(name, option),
            Form::Uncontrolled(f) => f.register(name, option),
        }
    }

    fn get_value(&self, name: &str) -> Option<String> {
        match self {
            Form::Controlled(f) => f.get_value(name),
            Form::Uncontrolled(f) => f.get_value(name),
        }
    }

    fn set_value(&self, name: &str, value: &str) -> Result<(), FormError> {
        match self {
            Form::Controlled(f) => f.set_value(name, value),
            Form::Uncontrolled(f) => f.set_value(name, value),
        }
    }

    fn snapshot(&self) -> FormValues {
        match self {
            Form::Controlled(f) => f.snapshot(),
            Form::Uncontrolled(f) => f.snapshot(),
        }
    }

    fn submit(&self) -> SubmitOutcome {
        match self {
            Form::Controlled(f) => f.submit(),
            Form::Uncontrolled(f) => f.submit(),
        }
    }

    fn reset(&self) {
        match self {
            Form::Controlled(f) => f.reset(),
            Form::Uncontrolled(f) => f.reset(),
        }
    }

    fn form_state(&self) -> FormState {
        match self {
            Form::Controlled(f) => f.form_state(),
            Form::Uncontrolled(f) => f.form_state(),
        }
    }

    fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> SubscriptionId {
        match self {
            Form::Controlled(f) => f.subscribe(listener),
            Form::Uncontrolled(f) => f.subscribe(listener),
        }
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self {
            Form::Controlled(f) => f.unsubscribe(id),
            Form::Uncontrolled(f) => f.unsubscribe(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldErrors, InputSurface, SubmitEvent, TextSurface};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Called {
        Success(FormValues),
        Failure(FieldErrors),
    }

    /// Wires `name` the way a UI layer would for either mode and returns a
    /// setter simulating the user typing a full value
    fn wire(
        form: &Form,
        name: &str,
        option: Option<FieldOption>,
    ) -> (Box<dyn Fn(&str)>, Option<Rc<TextSurface>>) {
        let props = form.register(name, option).unwrap();
        match &props.binder {
            Some(binder) => {
                let surface = Rc::new(TextSurface::new(props.default_value.clone()));
                binder.bind(&surface);
                let on_change = props.on_change.clone();
                (Box::new(move |v: &str| on_change.change(v)), Some(surface))
            }
            None => {
                let on_change = props.on_change.clone();
                (Box::new(move |v: &str| on_change.change(v)), None)
            }
        }
    }

    fn run_signup_scenario(mode: FormMode) {
        let form = Form::new(mode, FormValues::from([("name", ""), ("email", "")]));
        let (_set_name, _name_surface) = wire(&form, "name", None);
        let (set_email, _email_surface) =
            wire(&form, "email", Some(FieldOption::required("Email is required")));

        let calls = Rc::new(RefCell::new(Vec::new()));
        let (ok, err) = (Rc::clone(&calls), Rc::clone(&calls));
        let handler = form.handle_submit(
            move |values| ok.borrow_mut().push(Called::Success(values)),
            move |errors| err.borrow_mut().push(Called::Failure(errors)),
        );

        let mut event = SubmitEvent::new();
        handler(Some(&mut event));
        set_email("a@b.com");
        handler(None);

        assert!(event.is_default_prevented());
        assert_eq!(
            *calls.borrow(),
            vec![
                Called::Failure(FieldErrors::from([("email", "Email is required")])),
                Called::Success(FormValues::from([("name", ""), ("email", "a@b.com")])),
            ]
        );
        let state = form.form_state();
        assert!(state.is_valid);
        assert!(state.is_dirty);
        assert_eq!(state.submit_count, 2);
    }

    #[test]
    fn test_signup_scenario_controlled() {
        run_signup_scenario(FormMode::Controlled);
    }

    #[test]
    fn test_signup_scenario_uncontrolled() {
        run_signup_scenario(FormMode::Uncontrolled);
    }

    #[test]
    fn test_round_trip_in_both_modes() {
        for mode in [FormMode::Controlled, FormMode::Uncontrolled] {
            let form = Form::new(mode, FormValues::from([("name", "")]));
            let (set_name, surface) = wire(&form, "name", None);

            set_name("Kim");

            assert_eq!(form.get_value("name"), Some("Kim".to_string()), "{mode}");
            if let Some(surface) = surface {
                assert_eq!(surface.value(), "Kim");
            }
        }
    }

    #[test]
    fn test_mode_matches_variant() {
        let form = Form::new(FormMode::Uncontrolled, FormValues::new());
        assert_eq!(form.mode(), FormMode::Uncontrolled);
        assert!(matches!(form, Form::Uncontrolled(_)));
        assert!(!Form::new(FormMode::Controlled, FormValues::new()).is_bound("x"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Uncontrolled".parse::<FormMode>(), Ok(FormMode::Uncontrolled));
        assert_eq!("surface-binding".parse::<FormMode>(), Ok(FormMode::Uncontrolled));
        assert_eq!(" controlled ".parse::<FormMode>(), Ok(FormMode::Controlled));
        assert!("reactive".parse::<FormMode>().is_err());
    }

    #[test]
    fn test_mode_toggle_and_serde() {
        assert_eq!(FormMode::Controlled.toggle(), FormMode::Uncontrolled);
        assert_eq!(FormMode::Uncontrolled.toggle(), FormMode::Controlled);
        let json = serde_json::to_string(&FormMode::Uncontrolled).unwrap();
        assert_eq!(json, r#""uncontrolled""#);
    }

    #[test]
    fn test_unsubscribe_through_form() {
        let form = Form::new(FormMode::Controlled, FormValues::new());
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = form.subscribe(move |_| *counter.borrow_mut() += 1);

        form.submit();
        assert!(form.unsubscribe(id));
        form.submit();

        assert_eq!(*calls.borrow(), 1);
    }
}
