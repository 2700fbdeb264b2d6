use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError, ValidationErrors};

use super::{resolve_members, FormError};
use crate::domain::{Job, JobId, JobStatus, NewJob, Roster};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field state of the job form, as the user typed it
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct JobDraft {
    #[validate(custom(function = "validate_job_number"))]
    pub job_number: String,

    /// Empty means no link
    #[serde(default)]
    #[validate(custom(function = "validate_job_link"))]
    pub job_link: String,

    #[validate(custom(function = "validate_due_date"))]
    pub due_date: String,

    #[validate(custom(function = "validate_max_hours"))]
    pub max_hours: String,

    /// Team member labels
    #[serde(default)]
    pub assignee: Vec<String>,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Counted after trimming, since the stored number is trimmed
fn validate_job_number(number: &str) -> Result<(), ValidationError> {
    match number.trim().chars().count() {
        1..=32 => Ok(()),
        _ => Err(invalid("length", "Job number must be between 1 and 32 characters")),
    }
}

fn validate_job_link(link: &str) -> Result<(), ValidationError> {
    if link.trim().is_empty() || link.trim().validate_url() {
        Ok(())
    } else {
        Err(invalid("url", "Job link must be a valid URL"))
    }
}

fn validate_due_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| invalid("due_date", "Due date must be written as YYYY-MM-DD"))
}

fn validate_max_hours(hours: &str) -> Result<(), ValidationError> {
    match hours.trim().parse::<f64>() {
        Ok(h) if h.is_finite() && h >= 0.0 => Ok(()),
        _ => Err(invalid("max_hours", "Max hours must be a non-negative number")),
    }
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    JobStatus::parse(status)
        .map(|_| ())
        .ok_or_else(|| invalid("status", "Status must be one of To Start, In Progress, Blocked, Completed"))
}

impl From<&Job> for JobDraft {
    fn from(job: &Job) -> Self {
        let fields = &job.fields;
        JobDraft {
            job_number: fields.job_number.clone(),
            job_link: fields.job_link.clone().unwrap_or_default(),
            due_date: fields.due_date.format(DATE_FORMAT).to_string(),
            max_hours: fields.max_hours.to_string(),
            assignee: job.assignee_labels().map(String::from).collect(),
            description: fields.description.clone(),
            status: fields.status.label().to_string(),
        }
    }
}

impl JobDraft {
    /// Validate and convert into a store payload
    ///
    /// # Returns
    /// - `Ok(NewJob)` - Every field is valid and every assignee is on the roster
    /// - `Err(FormError)` - The first class of problem found
    pub fn to_payload(&self, roster: &Roster) -> Result<NewJob, FormError> {
        self.validate()?;

        let due_date = NaiveDate::parse_from_str(self.due_date.trim(), DATE_FORMAT)
            .map_err(|_| FormError::Invalid(single_error("due_date", "Due date must be written as YYYY-MM-DD")))?;
        let max_hours = self
            .max_hours
            .trim()
            .parse::<f64>()
            .map_err(|_| FormError::Invalid(single_error("max_hours", "Max hours must be a non-negative number")))?;
        let status = JobStatus::parse(&self.status)
            .ok_or_else(|| FormError::Invalid(single_error("status", "Status is not recognised")))?;

        let link = self.job_link.trim();

        Ok(NewJob {
            job_number: self.job_number.trim().to_string(),
            job_link: (!link.is_empty()).then(|| link.to_string()),
            due_date,
            max_hours,
            assignee: resolve_members(&self.assignee, roster)?,
            description: self.description.clone(),
            status,
        })
    }
}

fn single_error(field: &'static str, message: &'static str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, invalid(field, message));
    errors
}

/// Which store call a submit turns into
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", content = "id", rename_all = "snake_case")]
pub enum FormMode {
    Add,
    Edit(JobId),
}

/// A validated payload and where to send it
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewJob),
    Update(JobId, NewJob),
}

/// The add/edit job form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobForm {
    #[serde(flatten)]
    mode: FormMode,
    draft: JobDraft,
}

impl JobForm {
    /// Empty form for a new job
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            draft: JobDraft::default(),
        }
    }

    /// Form pre-filled from an existing job
    pub fn edit(job: &Job) -> Self {
        Self {
            mode: FormMode::Edit(job.id.clone()),
            draft: JobDraft::from(job),
        }
    }

    #[cfg(test)]
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    #[cfg(test)]
    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: JobDraft) {
        self.draft = draft;
    }

    /// Reset every field, keeping the mode
    pub fn clear(&mut self) {
        self.draft = JobDraft::default();
    }

    pub fn submission(&self, roster: &Roster) -> Result<Submission, FormError> {
        let payload = self.draft.to_payload(roster)?;
        Ok(match &self.mode {
            FormMode::Add => Submission::Create(payload),
            FormMode::Edit(id) => Submission::Update(id.clone(), payload),
        })
    }
}
