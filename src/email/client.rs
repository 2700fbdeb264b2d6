use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::{EmailDispatch, EmailError};
use crate::domain::TeamMember;

/// Posts `[recipients, gifLink]` to the email dispatch endpoint
pub struct EmailClient {
    url: String,
    client: reqwest::Client,
}

impl EmailClient {
    /// `url` is the full endpoint, e.g. `http://localhost:3001/api/email`
    pub fn new(url: &str, timeout: Duration) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl EmailDispatch for EmailClient {
    async fn send(&self, recipients: &[TeamMember], gif_link: &str) -> Result<(), EmailError> {
        let body = serde_json::json!([recipients, gif_link]);

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();

        if status.is_success() {
            debug!("Email: dispatched to {} recipients, status={}", recipients.len(), status);
        } else {
            warn!("Email: endpoint {} answered {}, ignoring", self.url, status);
        }

        Ok(())
    }
}
