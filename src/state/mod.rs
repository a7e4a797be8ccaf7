//! State definitions

pub mod forms;

pub use forms::{
    Form, FormDefinition, FormEngine, FormError, FormMode, FormState, FormValues, SubmitOutcome,
};
