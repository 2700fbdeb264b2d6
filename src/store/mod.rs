pub mod http;
#[cfg(test)]
pub mod memory;
mod wire;

use async_trait::async_trait;

use crate::domain::{Job, JobId, NewJob};

// Re-export commonly used types
pub use http::HttpJobStore;

/// Errors raised while talking to the remote job store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never completed
    #[error("Job store unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The targeted record does not exist at the store
    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// The store answered with an unexpected status
    #[error("Job store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered with a record we cannot read
    #[error("Job store sent an unreadable record: {0}")]
    Decode(String),

    /// The configured store address cannot carry a `/jobs` path
    #[error("Invalid job store URL: {0}")]
    InvalidUrl(String),
}

/// CRUD operations against the authoritative job collection.
///
/// Every call is a single request/response exchange. There is no caching
/// and no retrying; callers reload the full list after mutating it.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetch every persisted job in store order
    async fn list_all(&self) -> Result<Vec<Job>, StoreError>;

    /// Persist a new job and return it with its assigned id
    async fn create(&self, job: &NewJob) -> Result<Job, StoreError>;

    /// Replace the job identified by `id`
    async fn update(&self, id: &JobId, job: &NewJob) -> Result<Job, StoreError>;

    /// Delete the job identified by `id`
    async fn remove(&self, id: &JobId) -> Result<(), StoreError>;
}
