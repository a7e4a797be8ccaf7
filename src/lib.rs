//! Formbind - form-state engine
//!
//! Tracks field values, dirtiness, validity and per-field errors for a form,
//! hands out bindings for each input, and produces one validated snapshot on
//! submission. Values are kept either in the engine's own store (controlled)
//! or in the live inputs themselves (uncontrolled).
//!
//! ```
//! use formbind::state::forms::{FieldOption, Form, FormEngine, FormMode, FormValues};
//!
//! let form = Form::new(FormMode::Controlled, FormValues::from([("name", ""), ("email", "")]));
//! let email = form.register("email", Some(FieldOption::required("Email is required"))).unwrap();
//!
//! assert!(!form.submit().is_success());
//! email.on_change.change("a@b.com");
//! assert!(form.submit().is_success());
//! ```

pub mod state;
