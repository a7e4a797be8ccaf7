//! Engine contract shared by both value strategies, plus the submission pipeline

use super::binding::{BindingProps, SubmitEvent};
use super::error::FormError;
use super::field::{FieldErrors, FieldOption, FieldOptionRegistry, FormValues};
use super::form_state::{FormState, FormStore, Notification, SubscriptionId};
use chrono::Utc;
use uuid::Uuid;

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every registered field passed; carries the frozen snapshot
    Success(FormValues),
    /// At least one field failed; carries one message per failing field
    Failure(FieldErrors),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn values(&self) -> Option<&FormValues> {
        match self {
            Self::Success(values) => Some(values),
            Self::Failure(_) => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Success(_) => None,
            Self::Failure(errors) => Some(errors),
        }
    }
}

/// Handler bound to a submission event. `None` means programmatic submission.
pub type SubmitHandler = Box<dyn Fn(Option<&mut SubmitEvent>)>;

/// Operations every form strategy provides
pub trait FormEngine {
    /// Record `option` (or an empty one) for `name` and return the props the
    /// UI layer wires into its input. Re-registering overwrites the option but
    /// leaves the current value alone.
    fn register(&self, name: &str, option: Option<FieldOption>) -> Result<BindingProps, FormError>;

    /// Current value of `name`, or `None` when unknown or unavailable
    fn get_value(&self, name: &str) -> Option<String>;

    /// Programmatic write through the strategy's usual write path
    fn set_value(&self, name: &str, value: &str) -> Result<(), FormError>;

    /// Values as they would be frozen by a submission right now
    fn snapshot(&self) -> FormValues;

    /// Run the validation pipeline and commit the resulting state
    fn submit(&self) -> SubmitOutcome;

    /// Restore every value to its default and clear submission state
    fn reset(&self);

    fn form_state(&self) -> FormState;

    fn subscribe(&self, listener: impl Fn(&FormState) + 'static) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId) -> bool;

    /// Build a submission handler invoking exactly one of the callbacks
    fn handle_submit<S, F>(&self, on_success: S, on_failure: F) -> SubmitHandler
    where
        Self: Clone + 'static,
        S: Fn(FormValues) + 'static,
        F: Fn(FieldErrors) + 'static,
    {
        let form = self.clone();
        Box::new(move |event: Option<&mut SubmitEvent>| {
            if let Some(event) = event {
                event.prevent_default();
            }
            match form.submit() {
                SubmitOutcome::Success(values) => on_success(values),
                SubmitOutcome::Failure(errors) => on_failure(errors),
            }
        })
    }
}

/// State shared by both strategies: defaults, option registry and the store
#[derive(Debug)]
pub(crate) struct FormCore {
    pub(crate) id: Uuid,
    pub(crate) defaults: FormValues,
    pub(crate) options: FieldOptionRegistry,
    pub(crate) store: FormStore,
}

impl FormCore {
    pub(crate) fn new(defaults: FormValues) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(form_id = %id, fields = defaults.len(), "created form");
        Self {
            id,
            store: FormStore::new(FormState::new(defaults.clone())),
            defaults,
            options: FieldOptionRegistry::new(),
        }
    }

    pub(crate) fn ensure_field(&self, name: &str) -> Result<(), FormError> {
        if self.defaults.contains(name) {
            Ok(())
        } else {
            Err(FormError::unknown_field(name))
        }
    }

    pub(crate) fn register_option(
        &mut self,
        name: &str,
        option: Option<FieldOption>,
    ) -> Result<(), FormError> {
        self.ensure_field(name)?;
        let replaced = self
            .options
            .upsert(name, option.unwrap_or_default())
            .is_some();
        tracing::debug!(form_id = %self.id, field = name, replaced, "registered field");
        Ok(())
    }

    /// Validate `snapshot`, commit the new state and decide the outcome.
    /// The notification must be delivered after the caller drops its borrow.
    pub(crate) fn finish_submission(
        &mut self,
        snapshot: FormValues,
    ) -> (SubmitOutcome, Notification) {
        let errors = validate(&self.options, &snapshot);
        let is_valid = errors.is_empty();
        let is_dirty = is_dirty(&self.defaults, &snapshot);
        tracing::debug!(
            form_id = %self.id,
            is_valid,
            is_dirty,
            failures = errors.len(),
            "form submitted"
        );

        let outcome = if is_valid {
            SubmitOutcome::Success(snapshot.clone())
        } else {
            SubmitOutcome::Failure(errors.clone())
        };
        let notification = self.store.commit(|state| {
            state.values = snapshot;
            state.is_valid = is_valid;
            state.is_dirty = is_dirty;
            state.errors = (!is_valid).then_some(errors);
            state.submit_count += 1;
            state.submitted_at = Some(Utc::now());
        });
        (outcome, notification)
    }

    pub(crate) fn reset_state(&mut self) -> Notification {
        tracing::debug!(form_id = %self.id, "form reset");
        let defaults = self.defaults.clone();
        self.store.commit(move |state| *state = FormState::new(defaults))
    }
}

/// Check every registered field against its option
pub(crate) fn validate(options: &FieldOptionRegistry, values: &FormValues) -> FieldErrors {
    options
        .iter()
        .filter_map(|(name, option)| {
            option
                .check(values.get(name))
                .map(|message| (name.to_string(), message.to_string()))
        })
        .collect()
}

/// True when any field differs from its default
pub(crate) fn is_dirty(defaults: &FormValues, values: &FormValues) -> bool {
    defaults
        .iter()
        .any(|(name, default)| values.get(name).unwrap_or_default() != default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_only_checks_registered_fields() {
        let mut options = FieldOptionRegistry::new();
        options.upsert("email", FieldOption::required("Email is required"));
        let values = FormValues::from([("name", ""), ("email", "")]);

        let errors = validate(&options, &values);

        assert_eq!(errors, FieldErrors::from([("email", "Email is required")]));
    }

    #[test]
    fn test_validate_missing_value_is_empty() {
        let mut options = FieldOptionRegistry::new();
        options.upsert("email", FieldOption::required("msg"));

        let errors = validate(&options, &FormValues::new());

        assert_eq!(errors.get("email"), Some("msg"));
    }

    #[test]
    fn test_validate_passes_filled_fields() {
        let mut options = FieldOptionRegistry::new();
        options.upsert("email", FieldOption::required("msg"));
        options.upsert("name", FieldOption::new());
        let values = FormValues::from([("name", ""), ("email", "a@b.com")]);

        assert!(validate(&options, &values).is_empty());
    }

    #[test]
    fn test_is_dirty_compares_field_by_field() {
        let defaults = FormValues::from([("name", ""), ("email", "")]);
        assert!(!is_dirty(&defaults, &defaults.clone()));
        assert!(is_dirty(&defaults, &defaults.assign("name", "Kim")));
    }

    #[test]
    fn test_is_dirty_treats_missing_as_empty() {
        let defaults = FormValues::from([("name", "Kim")]);
        assert!(is_dirty(&defaults, &FormValues::new()));
        assert!(!is_dirty(&FormValues::from([("name", "")]), &FormValues::new()));
    }

    #[test]
    fn test_core_rejects_unknown_field() {
        let mut core = FormCore::new(FormValues::from([("name", "")]));
        assert_eq!(
            core.register_option("phone", None),
            Err(FormError::unknown_field("phone"))
        );
        assert!(core.options.is_empty());
    }

    #[test]
    fn test_finish_submission_records_errors_only_on_failure() {
        let mut core = FormCore::new(FormValues::from([("email", "")]));
        core.register_option("email", Some(FieldOption::required("msg")))
            .unwrap();

        let (outcome, notification) = core.finish_submission(core.defaults.clone());
        notification.deliver();
        assert_eq!(outcome, SubmitOutcome::Failure(FieldErrors::from([("email", "msg")])));
        assert_eq!(core.store.state().error("email"), Some("msg"));

        let (outcome, notification) =
            core.finish_submission(FormValues::from([("email", "a@b.com")]));
        notification.deliver();
        assert!(outcome.is_success());
        let state = core.store.state();
        assert!(state.errors.is_none());
        assert!(state.is_valid);
        assert!(state.is_dirty);
        assert_eq!(state.submit_count, 2);
        assert!(state.submitted_at.is_some());
    }
}
