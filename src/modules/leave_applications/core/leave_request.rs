// Leave request shapes before and after validation, and the backend record id.
//
// Purpose
// - LeaveRequestInput mirrors the form exactly as typed: free text and optional raw values.
// - ValidatedLeaveRequest is the typed record produced by the validator for one attempt.
//
// Boundaries
// - No validation logic here; see use_cases/validate_leave_request.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};
use std::fmt;

use crate::modules::leave_applications::core::attachment::Attachment;
use crate::modules::leave_applications::core::leave_type::LeaveType;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveRequestInput {
    pub worker_name: String,
    pub worker_id: String,
    /// Raw leave type code as selected, if any.
    pub leave_type: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub reason: String,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLeaveRequest {
    pub worker_name: String,
    pub worker_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    /// Present only for medical leave.
    pub attachment: Option<Attachment>,
}

impl ValidatedLeaveRequest {
    /// The attachment that has to be uploaded after the record is created, if any.
    pub fn medical_attachment(&self) -> Option<&Attachment> {
        if self.leave_type.takes_attachment() {
            self.attachment.as_ref()
        } else {
            None
        }
    }
}

/// Identifier the backend assigns to a created leave record.
/// Lives only for the submission attempt that received it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaveRecordId(String);

impl LeaveRecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeaveRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LeaveRecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Float(f64),
            Str(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Unsigned(id) => Ok(LeaveRecordId(id.to_string())),
            RawId::Signed(id) => Ok(LeaveRecordId(id.to_string())),
            // Some services emit whole ids as floats, e.g. 42.0.
            RawId::Float(id) if id.is_finite() && id.fract() == 0.0 => {
                Ok(LeaveRecordId(format!("{id:.0}")))
            }
            RawId::Float(id) => Err(de::Error::custom(format!(
                "leave id must be a whole number, got {id}"
            ))),
            RawId::Str(id) => Ok(LeaveRecordId(id)),
        }
    }
}
