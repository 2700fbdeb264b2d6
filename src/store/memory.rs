use async_trait::async_trait;
use std::sync::Mutex;

use super::{JobStore, StoreError};
use crate::domain::{Job, JobId, NewJob};

/// In-memory job store used as a test double for the shell
#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<Vec<Job>>,
    next_id: Mutex<u64>,
    outage: Mutex<bool>,
}

impl MemoryJobStore {
    /// While set, every call fails with a 503
    pub fn set_outage(&self, down: bool) {
        *self.outage.lock().unwrap() = down;
    }

    /// Mutate the collection behind the shell's back
    pub fn insert_directly(&self, job: Job) {
        self.jobs.lock().unwrap().push(job);
    }

    fn ensure_up(&self) -> Result<(), StoreError> {
        if *self.outage.lock().unwrap() {
            return Err(StoreError::Status {
                status: 503,
                body: "store offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn list_all(&self) -> Result<Vec<Job>, StoreError> {
        self.ensure_up()?;
        Ok(self.jobs.lock().unwrap().clone())
    }

    async fn create(&self, job: &NewJob) -> Result<Job, StoreError> {
        self.ensure_up()?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = Job::new(JobId::new(format!("m{}", *next_id)), job.clone());
        self.jobs.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &JobId, job: &NewJob) -> Result<Job, StoreError> {
        self.ensure_up()?;
        let mut jobs = self.jobs.lock().unwrap();
        let existing = jobs
            .iter_mut()
            .find(|j| &j.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        existing.fields = job.clone();
        Ok(existing.clone())
    }

    async fn remove(&self, id: &JobId) -> Result<(), StoreError> {
        self.ensure_up()?;
        let mut jobs = self.jobs.lock().unwrap();
        let before = jobs.len();
        jobs.retain(|j| &j.id != id);
        if jobs.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}
