// Form controller holds the editable state of one leave application form.
//
// Responsibilities
// - Keep the raw field values and the chosen attachment apart until submit time.
// - Reset a shown outcome back to Idle on any edit.
// - On submit, validate first; only a valid request reaches the coordinator.
// - Clear the form after a successful submission; keep it as typed after a failure.

use std::sync::Arc;

use crate::modules::leave_applications::core::attachment::Attachment;
use crate::modules::leave_applications::core::leave_request::LeaveRequestInput;
use crate::modules::leave_applications::core::outcome::SubmissionOutcome;
use crate::modules::leave_applications::core::ports::LeaveBackend;
use crate::modules::leave_applications::use_cases::submit_leave_application::handler::SubmissionCoordinator;
use crate::modules::leave_applications::use_cases::validate_leave_request::field_errors::FieldErrors;
use crate::modules::leave_applications::use_cases::validate_leave_request::validate::{
    ValidationPolicy, validate_with,
};

pub struct FormController<TBackend>
where
    TBackend: LeaveBackend + 'static,
{
    coordinator: Arc<SubmissionCoordinator<TBackend>>,
    policy: ValidationPolicy,
    fields: LeaveRequestInput,
    attachment: Option<Attachment>,
    outcome: SubmissionOutcome,
    field_errors: Option<FieldErrors>,
}

impl<TBackend> FormController<TBackend>
where
    TBackend: LeaveBackend + 'static,
{
    pub fn new(coordinator: Arc<SubmissionCoordinator<TBackend>>) -> Self {
        Self::with_policy(coordinator, ValidationPolicy::default())
    }

    pub fn with_policy(
        coordinator: Arc<SubmissionCoordinator<TBackend>>,
        policy: ValidationPolicy,
    ) -> Self {
        Self {
            coordinator,
            policy,
            fields: LeaveRequestInput::default(),
            attachment: None,
            outcome: SubmissionOutcome::Idle,
            field_errors: None,
        }
    }

    /// Field values as typed. The attachment is tracked separately, see [`Self::attachment`].
    pub fn fields(&self) -> &LeaveRequestInput {
        &self.fields
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn outcome(&self) -> SubmissionOutcome {
        self.outcome
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.field_errors.as_ref()
    }

    pub fn set_worker_name(&mut self, value: impl Into<String>) {
        self.fields.worker_name = value.into();
        self.acknowledge_outcome();
    }

    pub fn set_worker_id(&mut self, value: impl Into<String>) {
        self.fields.worker_id = value.into();
        self.acknowledge_outcome();
    }

    pub fn set_leave_type(&mut self, code: Option<String>) {
        self.fields.leave_type = code;
        self.acknowledge_outcome();
    }

    pub fn set_start_date(&mut self, value: Option<String>) {
        self.fields.start_date = value;
        self.acknowledge_outcome();
    }

    pub fn set_end_date(&mut self, value: Option<String>) {
        self.fields.end_date = value;
        self.acknowledge_outcome();
    }

    pub fn set_reason(&mut self, value: impl Into<String>) {
        self.fields.reason = value.into();
        self.acknowledge_outcome();
    }

    pub fn choose_attachment(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
        self.acknowledge_outcome();
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
        self.acknowledge_outcome();
    }

    /// Validates and submits the current form.
    ///
    /// Returns the field errors when validation fails; the coordinator is not called then.
    /// Otherwise returns the outcome of the attempt, which is also kept as the form outcome.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, FieldErrors> {
        self.outcome = SubmissionOutcome::Idle;

        let input = LeaveRequestInput {
            attachment: self.attachment.clone(),
            ..self.fields.clone()
        };
        let request = match validate_with(&input, &self.policy) {
            Ok(request) => request,
            Err(errors) => {
                self.field_errors = Some(errors.clone());
                return Err(errors);
            }
        };
        self.field_errors = None;

        let outcome = self.coordinator.submit(request).await;
        if outcome.is_success() {
            self.fields = LeaveRequestInput::default();
            self.attachment = None;
        }
        self.outcome = outcome;
        Ok(outcome)
    }

    fn acknowledge_outcome(&mut self) {
        if !self.outcome.is_idle() {
            self.outcome = SubmissionOutcome::Idle;
        }
    }
}
