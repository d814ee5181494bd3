// HTTP implementation of the LeaveBackend port.
//
// Purpose
// - Talk to the leave service: POST /leave/apply, then POST /leave/{leaveId}/upload-mc.
//
// Responsibilities
// - Send the record as JSON and the certificate as multipart under the mcDocument field.
// - Map non 2xx statuses to BackendError::Rejected and I/O failures to BackendError::Transport.
// - Treat an unreadable success body as "no leave id"; the coordinator decides what that means.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::modules::leave_applications::core::attachment::Attachment;
use crate::modules::leave_applications::core::leave_request::LeaveRecordId;
use crate::modules::leave_applications::core::ports::{
    BackendError, CreateLeavePayload, CreatedLeave, LeaveBackend,
};

pub const MC_DOCUMENT_FIELD: &str = "mcDocument";

#[derive(Debug, Clone)]
pub struct HttpLeaveBackend {
    client: Client,
    base_url: Url,
}

impl HttpLeaveBackend {
    /// `timeout` bounds each request; `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::Configuration(err.to_string()))?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url).map_err(|err| {
            BackendError::Configuration(format!("invalid base url {base_url}: {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Configuration(format!(
                "base url {base_url} cannot carry a path"
            )));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                BackendError::Configuration(format!(
                    "base url {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Rejected {
            status: status.as_u16(),
        })
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

#[async_trait]
impl LeaveBackend for HttpLeaveBackend {
    async fn create_leave(
        &self,
        payload: &CreateLeavePayload,
    ) -> Result<CreatedLeave, BackendError> {
        let url = self.endpoint(&["leave", "apply"])?;
        debug!(%url, "posting leave application");

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(transport)?;
        let body = ensure_success(response)?.bytes().await.map_err(transport)?;

        if body.is_empty() {
            return Ok(CreatedLeave::default());
        }
        match serde_json::from_slice::<CreatedLeave>(&body) {
            Ok(created) => Ok(created),
            Err(err) => {
                warn!(error = %err, "leave service answered with an unreadable body");
                Ok(CreatedLeave::default())
            }
        }
    }

    async fn upload_attachment(
        &self,
        leave_id: &LeaveRecordId,
        attachment: &Attachment,
    ) -> Result<(), BackendError> {
        let url = self.endpoint(&["leave", leave_id.as_str(), "upload-mc"])?;
        debug!(%url, size = attachment.size(), "uploading attachment");

        let mut part = Part::stream_with_length(attachment.bytes.clone(), attachment.size())
            .file_name(attachment.file_name.clone());
        if let Some(kind) = attachment.kind() {
            part = part.mime_str(kind.mime()).map_err(transport)?;
        }
        let form = Form::new().part(MC_DOCUMENT_FIELD, part);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response)?;
        Ok(())
    }
}
