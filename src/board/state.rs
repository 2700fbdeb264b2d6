use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::BoardError;
use crate::domain::filter::visible_jobs;
use crate::domain::{FilterSelection, Job, JobId};
use crate::form::{EmailForm, JobForm};

/// Which modal is showing
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modal {
    #[default]
    Closed,
    JobForm(JobForm),
    EmailForm(EmailForm),
}

/// Last failure shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Handed out when a reload starts; only the newest one may be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReloadTicket(u64);

/// Identifies one opening of a modal; every open issues a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalTicket(u64);

/// Read-only snapshot of the board for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub rows: Vec<Job>,
    pub total: usize,
    pub loaded: bool,
    pub filter: FilterSelection,
    pub modal: Modal,
    pub notice: Option<Notice>,
}

/// Everything the board owns: the authoritative job list, the filter,
/// the open modal and the latest notice.
///
/// Plain synchronous state. The coordinator in `service` is the only
/// writer and never holds it across a network call.
#[derive(Debug, Default)]
pub struct ShellState {
    jobs: Vec<Job>,
    filter: FilterSelection,
    modal: Modal,
    notice: Option<Notice>,
    opened: u64,
    issued: u64,
    applied: u64,
    loaded: bool,
}

impl ShellState {
    #[cfg(test)]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn find(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub fn set_filter(&mut self, filter: FilterSelection) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&Job> {
        visible_jobs(&self.jobs, &self.filter)
    }

    #[cfg(test)]
    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    fn open(&mut self, modal: Modal) -> Result<(), BoardError> {
        if self.modal != Modal::Closed {
            return Err(BoardError::ModalOpen);
        }
        self.opened += 1;
        self.modal = modal;
        Ok(())
    }

    pub fn open_job_form(&mut self, form: JobForm) -> Result<(), BoardError> {
        self.open(Modal::JobForm(form))
    }

    pub fn open_email_form(&mut self) -> Result<(), BoardError> {
        self.open(Modal::EmailForm(EmailForm::default()))
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Ticket of the modal showing right now, if any
    pub fn modal_ticket(&self) -> Option<ModalTicket> {
        (self.modal != Modal::Closed).then_some(ModalTicket(self.opened))
    }

    /// Clear and close the modal only if it is still the one `ticket` was
    /// taken from. A modal cancelled and reopened meanwhile stays open.
    pub fn close_if_current(&mut self, ticket: ModalTicket) -> bool {
        if self.modal_ticket() != Some(ticket) {
            return false;
        }
        if let Modal::JobForm(form) = &mut self.modal {
            form.clear();
        }
        self.modal = Modal::Closed;
        true
    }

    pub fn job_form_mut(&mut self) -> Option<&mut JobForm> {
        match &mut self.modal {
            Modal::JobForm(form) => Some(form),
            _ => None,
        }
    }

    pub fn email_form_mut(&mut self) -> Option<&mut EmailForm> {
        match &mut self.modal {
            Modal::EmailForm(form) => Some(form),
            _ => None,
        }
    }

    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.issued += 1;
        ReloadTicket(self.issued)
    }

    /// Replace the job list with a reload result.
    ///
    /// Returns false, leaving the list untouched, when a reload issued
    /// later has already been applied.
    pub fn apply_reload(&mut self, ticket: ReloadTicket, jobs: Vec<Job>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        self.jobs = jobs;
        self.loaded = true;
        true
    }

    /// Drop a deleted job from the local list
    pub fn forget(&mut self, id: &JobId) {
        self.jobs.retain(|job| &job.id != id);
    }

    pub fn report(&mut self, message: String) {
        self.notice = Some(Notice {
            message,
            at: Utc::now(),
        });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    pub fn view(&self) -> ShellView {
        ShellView {
            rows: self.visible().into_iter().cloned().collect(),
            total: self.jobs.len(),
            loaded: self.loaded,
            filter: self.filter.clone(),
            modal: self.modal.clone(),
            notice: self.notice.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobStatus, NewJob, Selection};
    use chrono::NaiveDate;

    fn job(id: &str, status: JobStatus) -> Job {
        Job::new(
            JobId::new(id),
            NewJob {
                job_number: id.to_string(),
                job_link: None,
                due_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
                max_hours: 1.0,
                assignee: Vec::new(),
                description: String::new(),
                status,
            },
        )
    }

    #[test]
    fn stale_reload_does_not_overwrite_newer_list() {
        let mut state = ShellState::default();

        let older = state.begin_reload();
        let newer = state.begin_reload();

        assert!(state.apply_reload(newer, vec![job("new", JobStatus::ToStart)]));
        assert!(!state.apply_reload(older, vec![job("old", JobStatus::ToStart)]));

        let ids: Vec<&str> = state.jobs().iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["new"]);
    }

    #[test]
    fn in_order_reloads_all_apply() {
        let mut state = ShellState::default();

        let first = state.begin_reload();
        assert!(state.apply_reload(first, vec![job("a", JobStatus::ToStart)]));
        let second = state.begin_reload();
        assert!(state.apply_reload(second, Vec::new()));

        assert!(state.jobs().is_empty());
        assert!(state.view().loaded);
    }

    #[test]
    fn only_one_modal_at_a_time() {
        let mut state = ShellState::default();

        state.open_job_form(JobForm::add()).unwrap();
        assert!(matches!(state.open_email_form(), Err(BoardError::ModalOpen)));
        assert!(matches!(state.open_job_form(JobForm::add()), Err(BoardError::ModalOpen)));

        state.close_modal();
        state.open_email_form().unwrap();
        assert!(state.email_form_mut().is_some());
        assert!(state.job_form_mut().is_none());
    }

    #[test]
    fn reopened_modal_is_not_closed_by_an_old_ticket() {
        let mut state = ShellState::default();
        assert_eq!(state.modal_ticket(), None);

        state.open_job_form(JobForm::add()).unwrap();
        let first = state.modal_ticket().unwrap();

        state.close_modal();
        state.open_job_form(JobForm::add()).unwrap();
        assert!(!state.close_if_current(first));
        assert!(state.job_form_mut().is_some());

        state.close_modal();
        state.open_email_form().unwrap();
        assert!(!state.close_if_current(first));
        assert!(state.email_form_mut().is_some());

        let current = state.modal_ticket().unwrap();
        assert!(state.close_if_current(current));
        assert_eq!(state.modal(), &Modal::Closed);
        assert!(!state.close_if_current(current));
    }

    #[test]
    fn view_applies_current_filter() {
        let mut state = ShellState::default();
        let ticket = state.begin_reload();
        state.apply_reload(
            ticket,
            vec![job("1", JobStatus::Blocked), job("2", JobStatus::Completed)],
        );

        state.set_filter(FilterSelection {
            assignees: Selection::All,
            statuses: Selection::only(["Completed"]),
        });

        let view = state.view();
        assert_eq!(view.total, 2);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, JobId::new("2"));
    }

    #[test]
    fn modal_serializes_with_kind_and_mode() {
        let mut state = ShellState::default();
        state.open_job_form(JobForm::edit(&job("9", JobStatus::Blocked))).unwrap();

        let json = serde_json::to_value(state.modal()).unwrap();
        assert_eq!(json["kind"], "job_form");
        assert_eq!(json["mode"], "edit");
        assert_eq!(json["id"], "9");
        assert_eq!(json["draft"]["status"], "Blocked");
    }
}
