//! Form domain layer
//!
//! A form is created from a map of default values that fixes its field set.
//! The UI layer registers each field as it renders it and wires the returned
//! [`BindingProps`] into its input. Two strategies keep values current:
//! - [`ControlledForm`]: the engine's store holds every value
//! - [`UncontrolledForm`]: values live in the rendered inputs, reached
//!   through weak [`SurfaceRef`]s
//!
//! Both share the option registry and submission pipeline, and [`Form`]
//! picks one at construction.

mod binding;
mod controlled;
mod definition;
mod engine;
mod error;
mod field;
mod form;
mod form_state;
mod surface;
mod uncontrolled;

pub use binding::{BindingProps, ChangeEvent, ChangeHandler, SubmitEvent};
pub use controlled::ControlledForm;
pub use definition::{FieldDefinition, FormDefinition};
pub use engine::{FormEngine, SubmitHandler, SubmitOutcome};
pub use error::FormError;
pub use field::{FieldErrors, FieldOption, FieldOptionRegistry, FormValues};
pub use form::{Form, FormMode};
pub use form_state::{FormState, FormStore, Notification, SubscriptionId};
pub use surface::{Binder, InputSurface, SurfaceRef, TextSurface};
pub use uncontrolled::UncontrolledForm;
