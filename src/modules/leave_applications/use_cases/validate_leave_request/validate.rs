// Pure validation of a raw leave request.
//
// Purpose
// - Turn LeaveRequestInput into a ValidatedLeaveRequest, or report every failing field.
//
// Responsibilities
// - Check each field independently and collect all failures.
// - Apply the medical attachment rule as a composite check after the per field checks.
// - Normalize text (trimmed) and dates (calendar dates).
// - Never perform input or output.

use chrono::{DateTime, NaiveDate};

use crate::modules::leave_applications::core::attachment::{Attachment, MAX_ATTACHMENT_BYTES};
use crate::modules::leave_applications::core::leave_request::{
    LeaveRequestInput, ValidatedLeaveRequest,
};
use crate::modules::leave_applications::core::leave_type::LeaveType;
use crate::modules::leave_applications::use_cases::validate_leave_request::field_errors::{
    FieldError, FieldErrors,
};

pub const MIN_WORKER_NAME_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub max_attachment_bytes: u64,
    pub require_medical_attachment: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            require_medical_attachment: false,
        }
    }
}

pub fn validate(input: &LeaveRequestInput) -> Result<ValidatedLeaveRequest, FieldErrors> {
    validate_with(input, &ValidationPolicy::default())
}

pub fn validate_with(
    input: &LeaveRequestInput,
    policy: &ValidationPolicy,
) -> Result<ValidatedLeaveRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    let worker_name = input.worker_name.trim();
    if worker_name.chars().count() < MIN_WORKER_NAME_CHARS {
        errors.push(FieldError::WorkerNameTooShort);
    }

    let worker_id = input.worker_id.trim();
    if worker_id.is_empty() {
        errors.push(FieldError::WorkerIdRequired);
    }

    let leave_type = check_leave_type(input.leave_type.as_deref(), &mut errors);

    let start_date = check_date(
        input.start_date.as_deref(),
        FieldError::StartDateRequired,
        FieldError::StartDateInvalid,
        &mut errors,
    );
    let end_date = check_date(
        input.end_date.as_deref(),
        FieldError::EndDateRequired,
        FieldError::EndDateInvalid,
        &mut errors,
    );

    let reason = input.reason.trim();
    if reason.is_empty() {
        errors.push(FieldError::ReasonRequired);
    }

    let attachment = match leave_type {
        Some(leave_type) if leave_type.takes_attachment() => {
            check_medical_attachment(input.attachment.as_ref(), policy, &mut errors)
        }
        _ => None,
    };

    match (leave_type, start_date, end_date) {
        (Some(leave_type), Some(start_date), Some(end_date)) if errors.is_empty() => {
            Ok(ValidatedLeaveRequest {
                worker_name: worker_name.to_string(),
                worker_id: worker_id.to_string(),
                leave_type,
                start_date,
                end_date,
                reason: reason.to_string(),
                attachment: attachment.cloned(),
            })
        }
        _ => Err(errors),
    }
}

// Leave type codes come from a fixed list and are matched as given.
fn check_leave_type(raw: Option<&str>, errors: &mut FieldErrors) -> Option<LeaveType> {
    match raw {
        None | Some("") => {
            errors.push(FieldError::LeaveTypeRequired);
            None
        }
        Some(code) => match code.parse::<LeaveType>() {
            Ok(leave_type) => Some(leave_type),
            Err(_) => {
                errors.push(FieldError::LeaveTypeUnknown(code.to_string()));
                None
            }
        },
    }
}

fn check_date(
    raw: Option<&str>,
    missing: FieldError,
    invalid: fn(String) -> FieldError,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => {
            errors.push(missing);
            None
        }
        Some(raw) => {
            let parsed = parse_date(raw);
            if parsed.is_none() {
                errors.push(invalid(raw.to_string()));
            }
            parsed
        }
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; a timestamp keeps its own calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|at| at.date_naive()))
}

fn check_medical_attachment<'a>(
    attachment: Option<&'a Attachment>,
    policy: &ValidationPolicy,
    errors: &mut FieldErrors,
) -> Option<&'a Attachment> {
    let Some(attachment) = attachment else {
        if policy.require_medical_attachment {
            errors.push(FieldError::AttachmentRequired);
        }
        return None;
    };

    if attachment.size() > policy.max_attachment_bytes {
        errors.push(FieldError::AttachmentTooLarge {
            size: attachment.size(),
            limit: policy.max_attachment_bytes,
        });
    }
    if attachment.kind().is_none() {
        errors.push(FieldError::AttachmentTypeNotAccepted);
    }
    Some(attachment)
}
