pub mod client;

use async_trait::async_trait;

use crate::domain::TeamMember;

// Re-export commonly used types
pub use client::EmailClient;

/// Errors that can occur while handing an email to the dispatch endpoint
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Email endpoint unreachable: {0}")]
    Network(#[from] reqwest::Error),
}

/// Sends the "jobs updated" email to a subset of the team.
///
/// Dispatch is fire-and-forget: only a failure to deliver the request is
/// an error, whatever the endpoint answers is ignored.
#[async_trait]
pub trait EmailDispatch: Send + Sync {
    async fn send(&self, recipients: &[TeamMember], gif_link: &str) -> Result<(), EmailError>;
}
