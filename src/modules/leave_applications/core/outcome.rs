// Tri-state result of a submission attempt, as shown to the user.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Step 1 failed; nothing was created.
    #[error("leave application submission failed")]
    Creation,

    /// Step 2 failed; the leave record exists but carries no attachment.
    #[error("attachment upload failed")]
    Attachment,

    #[error("submission already in progress")]
    AlreadyInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Success,
    Error {
        reason: SubmissionError,
    },
}

impl SubmissionOutcome {
    pub fn failed(reason: SubmissionError) -> Self {
        SubmissionOutcome::Error { reason }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionOutcome::Idle)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success)
    }

    pub fn error(&self) -> Option<SubmissionError> {
        match self {
            SubmissionOutcome::Error { reason } => Some(*reason),
            _ => None,
        }
    }
}
