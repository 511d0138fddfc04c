/// Convenience result type used across the checklist engine.
pub type ChecklistResult<T> = Result<T, ChecklistError>;

/// Top-level error taxonomy used by checklist APIs.
///
/// Unknown checkpoint transitions are not errors; they are no-ops.
#[derive(thiserror::Error, Debug)]
pub enum ChecklistError {
    /// Registry or session operation attempted without an active session.
    #[error("checklist scope error: {0}")]
    Scope(String),

    /// Invalid caller-provided data (check ids, options, replay scripts).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChecklistError {
    /// Build a [`ChecklistError::Scope`] value.
    pub fn scope(msg: impl Into<String>) -> Self {
        Self::Scope(msg.into())
    }

    /// Build a [`ChecklistError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChecklistError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for [`ChecklistError::Scope`].
    pub fn is_scope(&self) -> bool {
        matches!(self, Self::Scope(_))
    }
}

impl From<serde_json::Error> for ChecklistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
