use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::team::TeamMember;

/// Identifier assigned by the remote job store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Job status enum representing where a job is in its lifecycle
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    ToStart,
    InProgress,
    Blocked,
    Completed,
}

impl JobStatus {
    pub const ALL: [JobStatus; 4] = [
        JobStatus::ToStart,
        JobStatus::InProgress,
        JobStatus::Blocked,
        JobStatus::Completed,
    ];

    pub fn value(self) -> &'static str {
        match self {
            JobStatus::ToStart => "to_start",
            JobStatus::InProgress => "in_progress",
            JobStatus::Blocked => "blocked",
            JobStatus::Completed => "completed",
        }
    }

    /// Display label, also the key the status filter matches on
    pub fn label(self) -> &'static str {
        match self {
            JobStatus::ToStart => "To Start",
            JobStatus::InProgress => "In Progress",
            JobStatus::Blocked => "Blocked",
            JobStatus::Completed => "Completed",
        }
    }

    /// Resolve a status from either its value or its label, ignoring case
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|status| {
            status.value().eq_ignore_ascii_case(raw) || status.label().eq_ignore_ascii_case(raw)
        })
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Job fields without a store identifier.
///
/// This is what the job form produces and what create/update send to the
/// store. Update is a full replace, so both operations take the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub job_number: String,
    pub job_link: Option<String>,
    pub due_date: NaiveDate,
    pub max_hours: f64,
    pub assignee: Vec<TeamMember>,
    pub description: String,
    pub status: JobStatus,
}

impl NewJob {
    /// Collapse repeated assignees, keeping the first occurrence
    pub fn dedup_assignees(mut self) -> Self {
        let mut seen: Vec<String> = Vec::with_capacity(self.assignee.len());
        self.assignee.retain(|member| {
            if seen.contains(&member.value) {
                false
            } else {
                seen.push(member.value.clone());
                true
            }
        });
        self
    }
}

/// A persisted job, as listed by the remote store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    #[serde(flatten)]
    pub fields: NewJob,
}

impl Job {
    pub fn new(id: JobId, fields: NewJob) -> Self {
        Self { id, fields }
    }

    pub fn status(&self) -> JobStatus {
        self.fields.status
    }

    pub fn assignee_labels(&self) -> impl Iterator<Item = &str> {
        self.fields.assignee.iter().map(|m| m.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_value_or_label() {
        assert_eq!(JobStatus::parse("blocked"), Some(JobStatus::Blocked));
        assert_eq!(JobStatus::parse("In Progress"), Some(JobStatus::InProgress));
        assert_eq!(JobStatus::parse(" to start "), Some(JobStatus::ToStart));
        assert_eq!(JobStatus::parse("done"), None);
    }

    #[test]
    fn dedup_assignees_keeps_first_occurrence() {
        let job = NewJob {
            job_number: "J-1".to_string(),
            job_link: None,
            due_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            max_hours: 4.0,
            assignee: vec![
                TeamMember::new("luke", "Luke"),
                TeamMember::new("dora", "Dora"),
                TeamMember::new("luke", "Luke"),
            ],
            description: String::new(),
            status: JobStatus::ToStart,
        }
        .dedup_assignees();

        let labels: Vec<&str> = job.assignee.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Luke", "Dora"]);
    }
}
