use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::wire::{JobBody, JobRecord};
use super::{JobStore, StoreError};
use crate::domain::{Job, JobId, NewJob};

/// Job store backed by the remote `/jobs` collection resource
pub struct HttpJobStore {
    jobs_url: Url,
    client: reqwest::Client,
}

impl HttpJobStore {
    /// Create a new store client
    ///
    /// # Parameters
    /// - `base_url`: store root, e.g. `http://localhost:3001` (the `/jobs` path is appended)
    /// - `timeout`: per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut jobs_url =
            Url::parse(base_url).map_err(|e| StoreError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        jobs_url
            .path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty()
            .push("jobs");

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { jobs_url, client })
    }

    fn collection_url(&self) -> Url {
        self.jobs_url.clone()
    }

    /// The id becomes a single escaped path segment, so `a/b` is sent as `a%2Fb`
    fn item_url(&self, id: &JobId) -> Result<Url, StoreError> {
        let mut url = self.jobs_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.jobs_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    /// Turn a non-2xx answer into a `StoreError`, mapping 404 to `NotFound`
    async fn check(response: reqwest::Response, id: Option<&JobId>) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(StoreError::NotFound(id.clone()));
            }
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        warn!("Store: request failed with status={} body={}", status, body);

        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_job(response: reqwest::Response) -> Result<Job, StoreError> {
        let record: JobRecord = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Job::try_from(record)
    }
}

#[async_trait]
impl JobStore for HttpJobStore {
    async fn list_all(&self) -> Result<Vec<Job>, StoreError> {
        debug!("Store: listing jobs from {}", self.collection_url());

        let response = self.client.get(self.collection_url()).send().await?;
        let response = Self::check(response, None).await?;

        // Decode record by record so a single malformed job does not hide the rest
        let records: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let total = records.len();
        let jobs: Vec<Job> = records
            .into_iter()
            .filter_map(|value| {
                let decoded = serde_json::from_value::<JobRecord>(value)
                    .map_err(|e| StoreError::Decode(e.to_string()))
                    .and_then(Job::try_from);
                match decoded {
                    Ok(job) => Some(job),
                    Err(e) => {
                        warn!("Store: skipping record: {}", e);
                        None
                    }
                }
            })
            .collect();

        debug!("Store: listed {} of {} records", jobs.len(), total);
        Ok(jobs)
    }

    async fn create(&self, job: &NewJob) -> Result<Job, StoreError> {
        debug!("Store: creating job number={}", job.job_number);

        let response = self
            .client
            .post(self.collection_url())
            .json(&JobBody::from(job))
            .send()
            .await?;
        let created = Self::read_job(Self::check(response, None).await?).await?;

        debug!("Store: job created with id={}", created.id);
        Ok(created)
    }

    async fn update(&self, id: &JobId, job: &NewJob) -> Result<Job, StoreError> {
        debug!("Store: replacing job id={}", id);

        let response = self
            .client
            .put(self.item_url(id)?)
            .json(&JobBody::from(job))
            .send()
            .await?;
        Self::read_job(Self::check(response, Some(id)).await?).await
    }

    async fn remove(&self, id: &JobId) -> Result<(), StoreError> {
        debug!("Store: deleting job id={}", id);

        let response = self.client.delete(self.item_url(id)?).send().await?;
        Self::check(response, Some(id)).await?;
        Ok(())
    }
}
