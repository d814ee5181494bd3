// In memory implementation of the LeaveBackend port.
//
// Purpose
// - Support coordinator and controller tests, and dry runs of the CLI, without a server.
//
// Responsibilities
// - Assign sequential leave ids and keep created records and uploaded attachments.
// - Simulate failures: offline transport, rejected creation or upload, an upload lost in
//   transit, missing leave id.
// - Optionally delay record creation so overlapping submissions can be observed.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

use crate::modules::leave_applications::core::attachment::Attachment;
use crate::modules::leave_applications::core::leave_request::LeaveRecordId;
use crate::modules::leave_applications::core::ports::{
    BackendError, CreateLeavePayload, CreatedLeave, LeaveBackend,
};

pub struct InMemoryLeaveBackend {
    records: RwLock<Vec<(LeaveRecordId, CreateLeavePayload)>>,
    uploads: RwLock<Vec<(LeaveRecordId, Attachment)>>,
    next_leave_id: AtomicU64,
    delay_ms: AtomicU64,
    create_calls: AtomicUsize,
    upload_calls: AtomicUsize,
    offline: bool,
    creation_status: Option<u16>,
    upload_status: Option<u16>,
    drop_uploads: bool,
    omit_leave_id: bool,
}

impl Default for InMemoryLeaveBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLeaveBackend {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            uploads: RwLock::new(Vec::new()),
            next_leave_id: AtomicU64::new(1),
            delay_ms: AtomicU64::new(0),
            create_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            offline: false,
            creation_status: None,
            upload_status: None,
            drop_uploads: false,
            omit_leave_id: false,
        }
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    pub fn reject_creation_with(&mut self, status: u16) {
        self.creation_status = Some(status);
    }

    pub fn reject_uploads_with(&mut self, status: u16) {
        self.upload_status = Some(status);
    }

    /// Records are still created; only the upload call fails at the transport level.
    pub fn drop_uploads_in_transit(&mut self) {
        self.drop_uploads = true;
    }

    pub fn omit_leave_id(&mut self) {
        self.omit_leave_id = true;
    }

    pub fn set_next_leave_id(&self, id: u64) {
        self.next_leave_id.store(id, Ordering::SeqCst);
    }

    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub async fn records(&self) -> Vec<(LeaveRecordId, CreateLeavePayload)> {
        self.records.read().await.clone()
    }

    pub async fn uploads(&self) -> Vec<(LeaveRecordId, Attachment)> {
        self.uploads.read().await.clone()
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.offline {
            return Err(BackendError::Transport("Leave backend offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl LeaveBackend for InMemoryLeaveBackend {
    async fn create_leave(
        &self,
        payload: &CreateLeavePayload,
    ) -> Result<CreatedLeave, BackendError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.check_online()?;
        if let Some(status) = self.creation_status {
            return Err(BackendError::Rejected { status });
        }

        let next = self.next_leave_id.fetch_add(1, Ordering::SeqCst);
        let leave_id = LeaveRecordId::new(next.to_string());
        self.records
            .write()
            .await
            .push((leave_id.clone(), payload.clone()));

        if self.omit_leave_id {
            return Ok(CreatedLeave::default());
        }
        Ok(CreatedLeave::with_id(leave_id))
    }

    async fn upload_attachment(
        &self,
        leave_id: &LeaveRecordId,
        attachment: &Attachment,
    ) -> Result<(), BackendError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if self.drop_uploads {
            return Err(BackendError::Transport("connection reset during upload".into()));
        }
        if let Some(status) = self.upload_status {
            return Err(BackendError::Rejected { status });
        }
        if !self.records.read().await.iter().any(|(id, _)| id == leave_id) {
            return Err(BackendError::Rejected { status: 404 });
        }

        self.uploads
            .write()
            .await
            .push((leave_id.clone(), attachment.clone()));
        Ok(())
    }
}
