//! Field-level validation errors for image submissions.

/// Why a submission was rejected. Each variant maps to exactly one input
/// field (see [`ValidationError::field`]) so callers can attach the message
/// next to it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("this field is required")]
    Required { field: &'static str },
    #[error("ensure this value has at most {max} characters (it has {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    #[error("enter a valid http or https URL")]
    InvalidUrl,
    #[error("the given URL does not match valid image extensions")]
    InvalidExtension,
    #[error("enter a valid slug consisting of lowercase letters, numbers or hyphens")]
    InvalidSlug(String),
    #[error("the title must contain at least one letter or digit")]
    EmptySlug,
}

impl ValidationError {
    /// Name of the submission field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field } | ValidationError::TooLong { field, .. } => field,
            ValidationError::InvalidUrl | ValidationError::InvalidExtension => "url",
            ValidationError::InvalidSlug(_) => "slug",
            ValidationError::EmptySlug => "title",
        }
    }
}
