pub mod controller;
pub mod input;
pub mod validate;

pub use controller::{FormController, FormState, ResultLink, SubmitOutcome};
pub use input::{clean_value, draft_from_values, fill_form};
pub use validate::{ValidationError, ValidationMode, validate, validate_strict, validation_message};
