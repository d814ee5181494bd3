// Field level validation errors.
//
// Responsibilities
// - Name every form field that can fail and the message shown next to it.
// - Collect all failures of one validation pass; nothing here short circuits.

use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LeaveField {
    WorkerName,
    WorkerId,
    LeaveType,
    StartDate,
    EndDate,
    Reason,
    Attachment,
}

impl LeaveField {
    /// Form field name, as the UI keys its inputs.
    pub fn name(&self) -> &'static str {
        match self {
            LeaveField::WorkerName => "workerName",
            LeaveField::WorkerId => "workerID",
            LeaveField::LeaveType => "leaveType",
            LeaveField::StartDate => "startDate",
            LeaveField::EndDate => "endDate",
            LeaveField::Reason => "reason",
            LeaveField::Attachment => "mcFile",
        }
    }
}

impl fmt::Display for LeaveField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Worker name must be at least 2 characters.")]
    WorkerNameTooShort,

    #[error("Worker ID is required.")]
    WorkerIdRequired,

    #[error("Please select a leave type.")]
    LeaveTypeRequired,

    #[error("Unknown leave type \"{0}\".")]
    LeaveTypeUnknown(String),

    #[error("Start date is required.")]
    StartDateRequired,

    #[error("Start date \"{0}\" is not a valid date.")]
    StartDateInvalid(String),

    #[error("End date is required.")]
    EndDateRequired,

    #[error("End date \"{0}\" is not a valid date.")]
    EndDateInvalid(String),

    #[error("Reason for leave is required.")]
    ReasonRequired,

    #[error("File is {size} bytes; max file size is {limit} bytes.")]
    AttachmentTooLarge { size: u64, limit: u64 },

    #[error("Only PDF, JPG and PNG files are accepted.")]
    AttachmentTypeNotAccepted,

    #[error("A medical certificate is required for medical leave.")]
    AttachmentRequired,
}

impl FieldError {
    pub fn field(&self) -> LeaveField {
        match self {
            FieldError::WorkerNameTooShort => LeaveField::WorkerName,
            FieldError::WorkerIdRequired => LeaveField::WorkerId,
            FieldError::LeaveTypeRequired | FieldError::LeaveTypeUnknown(_) => {
                LeaveField::LeaveType
            }
            FieldError::StartDateRequired | FieldError::StartDateInvalid(_) => {
                LeaveField::StartDate
            }
            FieldError::EndDateRequired | FieldError::EndDateInvalid(_) => LeaveField::EndDate,
            FieldError::ReasonRequired => LeaveField::Reason,
            FieldError::AttachmentTooLarge { .. }
            | FieldError::AttachmentTypeNotAccepted
            | FieldError::AttachmentRequired => LeaveField::Attachment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: LeaveField) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |error| error.field() == field)
    }

    pub fn contains(&self, error: &FieldError) -> bool {
        self.errors.contains(error)
    }

    pub fn fields(&self) -> BTreeSet<LeaveField> {
        self.errors.iter().map(FieldError::field).collect()
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
