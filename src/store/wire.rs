//! Remote store record shapes.
//!
//! The store keeps whatever the browser widgets handed it, so the same
//! field can arrive in several shapes (status as an option object, a
//! one-element option list or bare text; ids as numbers or strings).
//! Everything is normalized here and nowhere else.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::domain::{Job, JobId, JobStatus, NewJob, TeamMember};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// `{value, label}` pair as produced by the select widgets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StatusField {
    One(Choice),
    Many(Vec<Choice>),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AssigneeField {
    Options(Vec<Choice>),
    Labels(Vec<String>),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HoursField {
    Number(f64),
    Text(String),
}

/// A job as the remote store returns it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Option<RecordId>,
    #[serde(default)]
    pub job_number: String,
    #[serde(default)]
    pub job_link: Option<String>,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub max_hours: Option<HoursField>,
    #[serde(default)]
    pub assignee: Option<AssigneeField>,
    #[serde(default)]
    pub description: String,
    pub status: Option<StatusField>,
}

/// Request body for create and update
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBody<'a> {
    pub job_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_link: Option<&'a str>,
    pub due_date: String,
    pub max_hours: f64,
    pub assignee: &'a [TeamMember],
    pub description: &'a str,
    pub status: Choice,
}

impl<'a> From<&'a NewJob> for JobBody<'a> {
    fn from(job: &'a NewJob) -> Self {
        JobBody {
            job_number: &job.job_number,
            job_link: job.job_link.as_deref(),
            due_date: job.due_date.format(DATE_FORMAT).to_string(),
            max_hours: job.max_hours,
            assignee: &job.assignee,
            description: &job.description,
            status: Choice {
                value: job.status.value().to_string(),
                label: job.status.label().to_string(),
            },
        }
    }
}

impl TryFrom<JobRecord> for Job {
    type Error = StoreError;

    fn try_from(record: JobRecord) -> Result<Self, Self::Error> {
        let id = match record.id {
            Some(RecordId::Number(n)) => JobId::new(n.to_string()),
            Some(RecordId::Text(s)) if !s.is_empty() => JobId::new(s),
            _ => return Err(StoreError::Decode("record has no id".to_string())),
        };

        let fields = NewJob {
            due_date: parse_date(&record.due_date)
                .ok_or_else(|| decode_error(&id, format!("bad due date '{}'", record.due_date)))?,
            max_hours: parse_hours(record.max_hours)
                .ok_or_else(|| decode_error(&id, "max hours is not a number".to_string()))?,
            status: parse_status(record.status)
                .ok_or_else(|| decode_error(&id, "status is missing or unknown".to_string()))?,
            assignee: parse_assignees(record.assignee),
            job_number: record.job_number,
            job_link: record.job_link.filter(|link| !link.trim().is_empty()),
            description: record.description,
        }
        .dedup_assignees();

        Ok(Job::new(id, fields))
    }
}

fn decode_error(id: &JobId, reason: String) -> StoreError {
    StoreError::Decode(format!("job {}: {}", id, reason))
}

/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn parse_hours(field: Option<HoursField>) -> Option<f64> {
    match field {
        None => Some(0.0),
        Some(HoursField::Number(n)) => Some(n),
        Some(HoursField::Text(s)) if s.trim().is_empty() => Some(0.0),
        Some(HoursField::Text(s)) => s.trim().parse().ok(),
    }
}

fn parse_status(field: Option<StatusField>) -> Option<JobStatus> {
    let choice_status = |c: &Choice| JobStatus::parse(&c.value).or_else(|| JobStatus::parse(&c.label));

    match field? {
        StatusField::One(choice) => choice_status(&choice),
        StatusField::Many(choices) => choices.first().and_then(choice_status),
        StatusField::Text(text) => JobStatus::parse(&text),
    }
}

fn parse_assignees(field: Option<AssigneeField>) -> Vec<TeamMember> {
    let from_label = |label: &str| TeamMember::new(&label.to_lowercase(), label);

    match field {
        None => Vec::new(),
        Some(AssigneeField::Options(choices)) => choices
            .into_iter()
            .filter(|c| !c.label.is_empty() || !c.value.is_empty())
            .map(|c| {
                let label = if c.label.is_empty() { c.value.clone() } else { c.label };
                TeamMember { value: c.value, label }
            })
            .collect(),
        Some(AssigneeField::Labels(labels)) => labels
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(from_label)
            .collect(),
        Some(AssigneeField::Text(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(from_label)
            .collect(),
    }
}
