use thiserror::Error;

/// Failure reported by a lead sink. Any variant keeps the gate locked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("Lead store unavailable: {0}")]
    Unavailable(String),
    #[error("Lead rejected: {0}")]
    Rejected(String),
}

/// Transitions the form modal refuses to perform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    #[error("A submission is already in progress")]
    SubmissionInProgress,
    #[error("No submission is in progress")]
    NotSubmitting,
    #[error("The form has already been submitted")]
    AlreadyUnlocked,
}
