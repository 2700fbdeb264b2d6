use serde::Serialize;

use crate::domain::{Job, JobStatus};

/// Response for a saved job form
#[derive(Serialize)]
pub struct JobResponse {
    pub message: String,
    pub job: Job,
}

/// Response for a list reload
#[derive(Serialize)]
pub struct ReloadResponse {
    pub message: String,
    pub loaded: usize,
}

/// Response for a dispatched team email
#[derive(Serialize)]
pub struct EmailResponse {
    pub message: String,
    pub recipients: usize,
}

/// Status option for the status select
#[derive(Serialize)]
pub struct StatusOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<JobStatus> for StatusOption {
    fn from(status: JobStatus) -> Self {
        StatusOption {
            value: status.value(),
            label: status.label(),
        }
    }
}
