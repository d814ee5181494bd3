// Ports define what the core needs from the leave backend, without implementing it.
//
// Purpose
// - Describe the two backend calls of a submission: create the leave record, then
//   upload an attachment bound to the record id.
//
// Boundaries
// - No concrete input or output here. Adapters implement LeaveBackend in the adapters layer.
//
// Testing guidance
// - Use the in memory backend for handler and controller tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modules::leave_applications::core::attachment::Attachment;
use crate::modules::leave_applications::core::leave_request::{
    LeaveRecordId, ValidatedLeaveRequest,
};
use crate::modules::leave_applications::core::leave_type::LeaveType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("backend rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend misconfigured: {0}")]
    Configuration(String),
}

/// Body of the create-leave-record request. The attachment never travels here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeavePayload {
    pub worker_name: String,
    #[serde(rename = "workerID")]
    pub worker_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub submission_date_time: DateTime<Utc>,
}

impl CreateLeavePayload {
    pub fn new(request: &ValidatedLeaveRequest, submitted_at: DateTime<Utc>) -> Self {
        Self {
            worker_name: request.worker_name.clone(),
            worker_id: request.worker_id.clone(),
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason.clone(),
            submission_date_time: submitted_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLeave {
    #[serde(default)]
    pub leave_id: Option<LeaveRecordId>,
}

impl CreatedLeave {
    pub fn with_id(leave_id: LeaveRecordId) -> Self {
        Self {
            leave_id: Some(leave_id),
        }
    }

    /// The record id, unless the backend left it out or sent an empty one.
    pub fn into_leave_id(self) -> Option<LeaveRecordId> {
        self.leave_id.filter(|id| !id.as_str().trim().is_empty())
    }
}

#[async_trait]
pub trait LeaveBackend: Send + Sync {
    async fn create_leave(
        &self,
        payload: &CreateLeavePayload,
    ) -> Result<CreatedLeave, BackendError>;

    async fn upload_attachment(
        &self,
        leave_id: &LeaveRecordId,
        attachment: &Attachment,
    ) -> Result<(), BackendError>;
}
