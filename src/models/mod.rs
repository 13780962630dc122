pub mod todo;
pub mod user;

pub use todo::{TodoItem, TodoItemDto};
pub use user::User;

use std::borrow::Cow;
use validator::{validate_length, ValidationError, ValidationErrors};

/// Records a `required` error when `value` is empty or whitespace only.
/// Returns whether the value was present.
pub(crate) fn check_required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &'static str,
) -> bool {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::from(message));
        errors.add(field, error);
        return false;
    }
    true
}

/// Records a `length` error when `value` is longer than `max` characters.
pub(crate) fn check_max_length(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    max: u64,
    message: &'static str,
) {
    if !validate_length(value, None, Some(max), None) {
        let mut error = ValidationError::new("length");
        error.message = Some(Cow::from(message));
        error.add_param(Cow::from("max"), &max);
        errors.add(field, error);
    }
}

pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
