use thiserror::Error;

/// Errors produced while validating a component payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// A field holds a value the component kind cannot represent
    #[error("{component}.{field} is invalid: {reason}")]
    InvalidField {
        component: &'static str,
        field: &'static str,
        reason: &'static str,
    },
}

impl ComponentError {
    pub fn invalid_field(component: &'static str, field: &'static str, reason: &'static str) -> Self {
        ComponentError::InvalidField {
            component,
            field,
            reason,
        }
    }
}
