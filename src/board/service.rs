use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::error::BoardError;
use super::state::{ShellState, ShellView};
use crate::domain::{FilterSelection, Job, JobId, Roster};
use crate::email::EmailDispatch;
use crate::form::{EmailDraft, EmailForm, JobDraft, JobForm, Submission};
use crate::store::{JobStore, StoreError};

/// Application shell: owns the board state and runs every user command.
///
/// State changes happen only through the methods here. The state lock is
/// taken for short synchronous sections and released before any request
/// to the store or the email endpoint.
pub struct JobBoard {
    store: Arc<dyn JobStore>,
    email: Arc<dyn EmailDispatch>,
    roster: Roster,
    state: Mutex<ShellState>,
}

impl JobBoard {
    pub fn new(store: Arc<dyn JobStore>, email: Arc<dyn EmailDispatch>, roster: Roster) -> Self {
        Self {
            store,
            email,
            roster,
            state: Mutex::new(ShellState::default()),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub async fn view(&self) -> ShellView {
        self.state.lock().await.view()
    }

    /// Rows that pass the current filter, in store order
    pub async fn visible_jobs(&self) -> Vec<Job> {
        self.state.lock().await.visible().into_iter().cloned().collect()
    }

    /// Record a failure as the user-visible notice and hand it back
    async fn fail<T>(&self, err: BoardError) -> Result<T, BoardError> {
        match &err {
            BoardError::Store(_) | BoardError::Email(_) => error!("Board: {}", err),
            _ => warn!("Board: {}", err),
        }
        self.state.lock().await.report(err.to_string());
        Err(err)
    }

    /// Replace the local list with the store's full list
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of jobs fetched
    /// - `Err(BoardError)` - The store could not be read; the previous list stays
    pub async fn reload(&self) -> Result<usize, BoardError> {
        let ticket = self.state.lock().await.begin_reload();

        match self.store.list_all().await {
            Ok(jobs) => {
                let count = jobs.len();
                let mut state = self.state.lock().await;
                if state.apply_reload(ticket, jobs) {
                    state.clear_notice();
                    info!("Board: loaded {} jobs", count);
                } else {
                    debug!("Board: discarded stale reload {:?}", ticket);
                }
                Ok(count)
            }
            Err(e) => self.fail(e.into()).await,
        }
    }

    /// Reload after a mutation that already succeeded; a failure only
    /// leaves a notice since the mutation itself went through
    async fn refresh(&self) {
        if let Err(e) = self.reload().await {
            warn!("Board: list may be stale after mutation: {}", e);
        }
    }

    pub async fn set_filter(&self, filter: FilterSelection) -> ShellView {
        let mut state = self.state.lock().await;
        debug!("Board: filter set to {:?}", filter);
        state.set_filter(filter);
        state.view()
    }

    pub async fn open_add_form(&self) -> Result<JobForm, BoardError> {
        let form = JobForm::add();
        let opened = self.state.lock().await.open_job_form(form.clone());
        match opened {
            Ok(()) => Ok(form),
            Err(e) => self.fail(e).await,
        }
    }

    pub async fn open_edit_form(&self, id: &JobId) -> Result<JobForm, BoardError> {
        let opened = {
            let mut state = self.state.lock().await;
            match state.find(id).map(JobForm::edit) {
                Some(form) => state.open_job_form(form.clone()).map(|_| form),
                None => Err(BoardError::JobNotFound(id.clone())),
            }
        };

        match opened {
            Ok(form) => Ok(form),
            Err(e) => self.fail(e).await,
        }
    }

    /// Submit the open job form with the given field values.
    ///
    /// On success the form is cleared and closed and the list reloaded.
    /// On failure the form stays open holding `draft` so the user can fix
    /// it or cancel.
    pub async fn submit_job_form(&self, draft: JobDraft) -> Result<Job, BoardError> {
        let submission = {
            let mut state = self.state.lock().await;
            let ticket = state.modal_ticket();
            match (ticket, state.job_form_mut()) {
                (Some(ticket), Some(form)) => {
                    form.set_draft(draft);
                    form.submission(&self.roster)
                        .map(|submission| (ticket, submission))
                        .map_err(BoardError::from)
                }
                _ => Err(BoardError::NoForm("job")),
            }
        };
        let (ticket, submission) = match submission {
            Ok(submission) => submission,
            Err(e) => return self.fail(e).await,
        };

        let saved = match &submission {
            Submission::Create(job) => {
                info!("Board: creating job number={}", job.job_number);
                self.store.create(job).await
            }
            Submission::Update(id, job) => {
                info!("Board: updating job id={}", id);
                self.store.update(id, job).await
            }
        };
        let saved = match saved {
            Ok(job) => job,
            Err(e) => return self.fail(e.into()).await,
        };

        {
            let mut state = self.state.lock().await;
            if !state.close_if_current(ticket) {
                debug!("Board: modal changed while saving, leaving it open");
            }
            state.clear_notice();
        }
        info!("Board: saved job id={}", saved.id);

        self.refresh().await;
        Ok(saved)
    }

    /// Close whichever modal is open, discarding its draft
    pub async fn cancel(&self) {
        self.state.lock().await.close_modal();
    }

    /// Delete a job. A job the store no longer has counts as deleted.
    pub async fn delete(&self, id: &JobId) -> Result<(), BoardError> {
        info!("Board: deleting job id={}", id);

        match self.store.remove(id).await {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => debug!("Board: job {} was already gone", id),
            Err(e) => return self.fail(e.into()).await,
        }

        {
            let mut state = self.state.lock().await;
            state.forget(id);
            state.clear_notice();
        }

        self.refresh().await;
        Ok(())
    }

    pub async fn open_email_form(&self) -> Result<EmailForm, BoardError> {
        let opened = self.state.lock().await.open_email_form();
        match opened {
            Ok(()) => Ok(EmailForm::default()),
            Err(e) => self.fail(e).await,
        }
    }

    /// Send the team email from the open email form, closing it on success
    pub async fn submit_email_form(&self, draft: EmailDraft) -> Result<usize, BoardError> {
        let message = {
            let mut state = self.state.lock().await;
            let ticket = state.modal_ticket();
            match (ticket, state.email_form_mut()) {
                (Some(ticket), Some(form)) => {
                    form.set_draft(draft);
                    form.message(&self.roster)
                        .map(|message| (ticket, message))
                        .map_err(BoardError::from)
                }
                _ => Err(BoardError::NoForm("email")),
            }
        };
        let (ticket, (recipients, gif_link)) = match message {
            Ok(message) => message,
            Err(e) => return self.fail(e).await,
        };

        if let Err(e) = self.email.send(&recipients, &gif_link).await {
            return self.fail(e.into()).await;
        }

        let mut state = self.state.lock().await;
        if !state.close_if_current(ticket) {
            debug!("Board: modal changed while sending, leaving it open");
        }
        state.clear_notice();
        info!("Board: email sent to {} team members", recipients.len());
        Ok(recipients.len())
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.clear_notice();
    }

    /// Ask the store for its list without touching board state
    pub async fn check_store(&self) -> Result<usize, StoreError> {
        self.store.list_all().await.map(|jobs| jobs.len())
    }
}
