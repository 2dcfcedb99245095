/// Transient user-facing notices (the status line under the form)

use crate::error::{ApiError, IngestError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A single notice: short title plus a longer description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: Severity::Success }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: Severity::Error }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Notice {
    /// Notice for a blocked generate action, if the user should see one
    pub fn for_validation(e: ValidationError) -> Option<Self> {
        e.field_message()
            .map(|(title, description)| Notice::error(title, description))
    }
}

impl From<&IngestError> for Notice {
    fn from(e: &IngestError) -> Self {
        Notice::error(e.title(), e.description())
    }
}

impl From<&ApiError> for Notice {
    fn from(e: &ApiError) -> Self {
        Notice::error("Generation failed", e.user_message())
    }
}
