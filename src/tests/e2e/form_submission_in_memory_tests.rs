// End to end in memory tests for the leave application form.
//
// Responsibilities
// - Drive the form controller through edits and submits.
// - Use the in memory leave backend to observe which backend calls were made.

use std::sync::Arc;

use rstest::rstest;
use tokio::join;

use crate::modules::leave_applications::adapters::outbound::in_memory_leave_backend::InMemoryLeaveBackend;
use crate::modules::leave_applications::core::leave_type::LeaveType;
use crate::modules::leave_applications::core::outcome::{SubmissionError, SubmissionOutcome};
use crate::modules::leave_applications::use_cases::fill_leave_form::controller::FormController;
use crate::modules::leave_applications::use_cases::submit_leave_application::handler::SubmissionCoordinator;
use crate::modules::leave_applications::use_cases::validate_leave_request::field_errors::{
    FieldError, LeaveField,
};
use crate::tests::fixtures::attachments::{MB, pdf_attachment};

type Form = FormController<InMemoryLeaveBackend>;

fn open_form(backend: InMemoryLeaveBackend) -> (Arc<InMemoryLeaveBackend>, Form) {
    let backend = Arc::new(backend);
    let coordinator = Arc::new(SubmissionCoordinator::new(backend.clone()));
    (backend, FormController::new(coordinator))
}

fn fill(form: &mut Form, leave_type: LeaveType) {
    form.set_worker_name("Jane Tan");
    form.set_worker_id("W12345");
    form.set_leave_type(Some(leave_type.code().to_string()));
    form.set_start_date(Some("2026-11-02".to_string()));
    form.set_end_date(Some("2026-11-04".to_string()));
    form.set_reason("Unable to attend work");
}

#[rstest]
#[tokio::test]
async fn annual_leave_is_created_without_an_upload() {
    let (backend, mut form) = open_form(InMemoryLeaveBackend::new());
    fill(&mut form, LeaveType::Annual);

    let outcome = form.submit().await.expect("expected a valid form");

    assert_eq!(outcome, SubmissionOutcome::Success);
    assert_eq!(backend.create_calls(), 1);
    assert_eq!(backend.upload_calls(), 0);
    let records = backend.records().await;
    assert_eq!(records[0].1.worker_name, "Jane Tan");
    assert_eq!(records[0].1.start_date.to_string(), "2026-11-02");
}

#[rstest]
#[tokio::test]
async fn medical_leave_uploads_the_certificate_to_the_new_record() {
    let backend = InMemoryLeaveBackend::new();
    backend.set_next_leave_id(42);
    let (backend, mut form) = open_form(backend);
    fill(&mut form, LeaveType::Medical);
    form.choose_attachment(pdf_attachment(4 * MB));

    let outcome = form.submit().await.expect("expected a valid form");

    assert_eq!(outcome, SubmissionOutcome::Success);
    let uploads = backend.uploads().await;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0.as_str(), "42");
    assert_eq!(uploads[0].1.size(), 4_000_000);
}

#[rstest]
#[tokio::test]
async fn an_oversized_certificate_never_reaches_the_backend() {
    let (backend, mut form) = open_form(InMemoryLeaveBackend::new());
    fill(&mut form, LeaveType::Medical);
    form.choose_attachment(pdf_attachment(6 * MB));

    let errors = form.submit().await.expect_err("expected field errors");

    assert_eq!(
        errors.for_field(LeaveField::Attachment).collect::<Vec<_>>(),
        vec![&FieldError::AttachmentTooLarge {
            size: 6_000_000,
            limit: 5_000_000,
        }]
    );
    assert_eq!(backend.create_calls(), 0);
}

#[rstest]
#[tokio::test]
async fn a_failed_upload_is_reported_and_keeps_the_form_filled() {
    let mut backend = InMemoryLeaveBackend::new();
    backend.set_next_leave_id(7);
    backend.reject_uploads_with(500);
    let (backend, mut form) = open_form(backend);
    fill(&mut form, LeaveType::Medical);
    form.choose_attachment(pdf_attachment(2 * MB));

    let outcome = form.submit().await.expect("expected a valid form");

    assert_eq!(outcome, SubmissionOutcome::failed(SubmissionError::Attachment));
    assert_eq!(
        outcome.error().map(|e| e.to_string()).as_deref(),
        Some("attachment upload failed")
    );
    assert_eq!(form.fields().worker_name, "Jane Tan");
    assert_eq!(form.fields().reason, "Unable to attend work");
    assert!(form.attachment().is_some());
    assert_eq!(backend.records().await[0].0.as_str(), "7");
}

#[rstest]
#[case(LeaveType::Annual)]
#[case(LeaveType::Medical)]
#[tokio::test]
async fn a_rejected_application_never_uploads(#[case] leave_type: LeaveType) {
    let mut backend = InMemoryLeaveBackend::new();
    backend.reject_creation_with(400);
    let (backend, mut form) = open_form(backend);
    fill(&mut form, leave_type);
    form.choose_attachment(pdf_attachment(MB));

    let outcome = form.submit().await.expect("expected a valid form");

    assert_eq!(
        outcome.error().map(|e| e.to_string()).as_deref(),
        Some("leave application submission failed")
    );
    assert_eq!(backend.upload_calls(), 0);
    assert_eq!(form.fields().worker_id, "W12345");
}

#[rstest]
#[tokio::test]
async fn a_second_form_sharing_the_coordinator_is_turned_away_while_busy() {
    let backend = Arc::new(InMemoryLeaveBackend::new());
    backend.set_delay_ms(50);
    let coordinator = Arc::new(SubmissionCoordinator::new(backend.clone()));
    let mut first = FormController::new(coordinator.clone());
    let mut second = FormController::new(coordinator);
    fill(&mut first, LeaveType::Annual);
    fill(&mut second, LeaveType::Annual);

    let (first_outcome, second_outcome) = join!(first.submit(), async {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        second.submit().await
    });

    assert_eq!(first_outcome, Ok(SubmissionOutcome::Success));
    assert_eq!(
        second_outcome,
        Ok(SubmissionOutcome::failed(SubmissionError::AlreadyInProgress))
    );
    assert_eq!(backend.create_calls(), 1);
    assert_eq!(second.fields().worker_name, "Jane Tan");
}

#[rstest]
#[tokio::test]
async fn resubmitting_after_a_failure_starts_a_fresh_attempt() {
    let mut backend = InMemoryLeaveBackend::new();
    backend.toggle_offline();
    let backend = Arc::new(backend);
    let coordinator = Arc::new(SubmissionCoordinator::new(backend.clone()));
    let mut form = FormController::new(coordinator);
    fill(&mut form, LeaveType::Hospitalization);

    let first = form.submit().await.expect("expected a valid form");
    let second = form.submit().await.expect("expected a valid form");

    assert_eq!(first, SubmissionOutcome::failed(SubmissionError::Creation));
    assert_eq!(second, SubmissionOutcome::failed(SubmissionError::Creation));
    assert_eq!(backend.create_calls(), 2);
}
