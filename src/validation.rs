use thiserror::Error;

use crate::todos::TodoPayload;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The {0} field is required")]
    MissingField(&'static str),
    #[error("The {0} field must not be blank")]
    BlankField(&'static str),
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) | Self::BlankField(field) => field,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TodoValidator;

impl TodoValidator {
    /// Checks a create payload; `name` is checked before `description`.
    pub fn validate(&self, payload: &TodoPayload) -> Result<(), ValidationError> {
        if is_missing(payload.name.as_deref()) {
            return Err(ValidationError::MissingField("name"));
        }
        if is_missing(payload.description.as_deref()) {
            return Err(ValidationError::MissingField("description"));
        }
        Ok(())
    }

    /// Absent fields are fine in a patch, blank ones are not.
    pub fn validate_patch(&self, patch: &TodoPayload) -> Result<(), ValidationError> {
        if patch.name.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::BlankField("name"));
        }
        if patch.description.as_deref().is_some_and(is_blank) {
            return Err(ValidationError::BlankField("description"));
        }
        Ok(())
    }
}

fn is_missing(value: Option<&str>) -> bool {
    value.is_none_or(is_blank)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
