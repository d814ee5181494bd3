// Submission coordinator orchestrates the two step write flow.
//
// Responsibilities
// - Create the leave record through the backend port.
// - Upload the medical certificate bound to the returned record id, only for medical leave.
// - Convert every backend failure into a SubmissionOutcome; nothing raw leaves this module.
// - Allow one attempt in flight at a time; a second call fails fast.
//
// Boundaries
// - No retries and no rollback. A failed upload leaves the created record in place.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::modules::leave_applications::core::leave_request::ValidatedLeaveRequest;
use crate::modules::leave_applications::core::outcome::{SubmissionError, SubmissionOutcome};
use crate::modules::leave_applications::core::ports::{CreateLeavePayload, LeaveBackend};

pub struct SubmissionCoordinator<TBackend>
where
    TBackend: LeaveBackend + 'static,
{
    backend: Arc<TBackend>,
    in_flight: Mutex<()>,
}

impl<TBackend> SubmissionCoordinator<TBackend>
where
    TBackend: LeaveBackend + 'static,
{
    pub fn new(backend: Arc<TBackend>) -> Self {
        Self {
            backend,
            in_flight: Mutex::new(()),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    pub async fn submit(&self, request: ValidatedLeaveRequest) -> SubmissionOutcome {
        let Ok(_in_flight) = self.in_flight.try_lock() else {
            warn!(
                worker_id = %request.worker_id,
                "rejected leave submission while another one is in flight"
            );
            return SubmissionOutcome::failed(SubmissionError::AlreadyInProgress);
        };

        let span = info_span!(
            "leave_submission",
            attempt_id = %Uuid::now_v7(),
            leave_type = %request.leave_type
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: ValidatedLeaveRequest) -> SubmissionOutcome {
        let payload = CreateLeavePayload::new(&request, Utc::now());
        info!(worker_id = %payload.worker_id, "submitting leave application");

        let created = match self.backend.create_leave(&payload).await {
            Ok(created) => created,
            Err(err) => {
                error!(error = %err, "leave application submission failed");
                return SubmissionOutcome::failed(SubmissionError::Creation);
            }
        };

        let Some(attachment) = request.medical_attachment() else {
            info!("leave application submitted");
            return SubmissionOutcome::Success;
        };

        let Some(leave_id) = created.into_leave_id() else {
            warn!("backend returned no leave id; skipping attachment upload");
            return SubmissionOutcome::Success;
        };

        info!(%leave_id, size = attachment.size(), "uploading medical certificate");
        match self.backend.upload_attachment(&leave_id, attachment).await {
            Ok(()) => {
                info!(%leave_id, "leave application submitted with attachment");
                SubmissionOutcome::Success
            }
            Err(err) => {
                error!(%leave_id, error = %err, "attachment upload failed");
                SubmissionOutcome::failed(SubmissionError::Attachment)
            }
        }
    }
}
