use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::job::Job;

/// Label that stands for "no restriction" in raw label lists
pub const ALL_LABEL: &str = "All";

/// One filter facet: either everything, or a specific set of labels
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "labels", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    /// Build a selection from raw labels as the multi-select widgets send them.
    ///
    /// `All` anywhere in the list selects everything; otherwise the labels
    /// become a specific set, which may be empty.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        if labels.contains(ALL_LABEL) {
            Selection::All
        } else {
            Selection::Only(labels)
        }
    }

    pub fn only<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(labels.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, label: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(labels) => labels.contains(label),
        }
    }

    /// True if any of the given labels is selected
    pub fn intersects<'a>(&self, mut labels: impl Iterator<Item = &'a str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => labels.any(|label| selected.contains(label)),
        }
    }
}

/// The user's current choice of which assignees and statuses to display
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    #[serde(default)]
    pub assignees: Selection,
    #[serde(default)]
    pub statuses: Selection,
}

impl FilterSelection {
    pub fn matches(&self, job: &Job) -> bool {
        self.assignees.intersects(job.assignee_labels())
            && self.statuses.contains(job.status().label())
    }
}

/// Derive the visible rows from the full job list.
///
/// Keeps list order and never duplicates, so the result is always a
/// subsequence of `jobs`.
pub fn visible_jobs<'a>(jobs: &'a [Job], selection: &FilterSelection) -> Vec<&'a Job> {
    jobs.iter().filter(|job| selection.matches(job)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{JobId, JobStatus, NewJob, TeamMember};
    use chrono::NaiveDate;

    fn job(id: &str, status: JobStatus, assignees: &[&str]) -> Job {
        Job::new(
            JobId::new(id),
            NewJob {
                job_number: format!("J-{}", id),
                job_link: None,
                due_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                max_hours: 8.0,
                assignee: assignees
                    .iter()
                    .map(|label| TeamMember::new(&label.to_lowercase(), label))
                    .collect(),
                description: String::new(),
                status,
            },
        )
    }

    fn sample() -> Vec<Job> {
        vec![
            job("1", JobStatus::ToStart, &["Luke"]),
            job("2", JobStatus::Blocked, &["Dora", "Vera"]),
            job("3", JobStatus::Completed, &[]),
            job("4", JobStatus::Blocked, &["Luke", "Cédric"]),
            job("5", JobStatus::InProgress, &["Vera"]),
        ]
    }

    fn ids(jobs: &[&Job]) -> Vec<String> {
        jobs.iter().map(|j| j.id.to_string()).collect()
    }

    #[test]
    fn all_and_all_returns_every_job_in_order() {
        let jobs = sample();
        let visible = visible_jobs(&jobs, &FilterSelection::default());

        assert_eq!(ids(&visible), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn status_selection_keeps_only_matching_labels() {
        let jobs = sample();
        let selection = FilterSelection {
            assignees: Selection::All,
            statuses: Selection::only(["Blocked"]),
        };

        let visible = visible_jobs(&jobs, &selection);
        assert_eq!(ids(&visible), vec!["2", "4"]);
        assert!(visible.iter().all(|j| j.status() == JobStatus::Blocked));
    }

    #[test]
    fn assignee_selection_matches_any_overlap() {
        let jobs = sample();
        let selection = FilterSelection {
            assignees: Selection::only(["Luke", "Vera"]),
            statuses: Selection::All,
        };

        assert_eq!(ids(&visible_jobs(&jobs, &selection)), vec!["1", "2", "4", "5"]);
    }

    #[test]
    fn assignee_match_is_case_sensitive() {
        let jobs = sample();
        let selection = FilterSelection {
            assignees: Selection::only(["luke"]),
            statuses: Selection::All,
        };

        assert!(visible_jobs(&jobs, &selection).is_empty());
    }

    #[test]
    fn facets_combine_with_and() {
        let jobs = sample();
        let selection = FilterSelection {
            assignees: Selection::only(["Luke"]),
            statuses: Selection::only(["Blocked", "In Progress"]),
        };

        assert_eq!(ids(&visible_jobs(&jobs, &selection)), vec!["4"]);
    }

    #[test]
    fn empty_specific_set_matches_nothing() {
        let jobs = sample();
        let selection = FilterSelection {
            assignees: Selection::All,
            statuses: Selection::Only(BTreeSet::new()),
        };

        assert!(visible_jobs(&jobs, &selection).is_empty());
    }

    #[test]
    fn result_is_a_subsequence_for_every_status_choice() {
        let jobs = sample();
        for status in JobStatus::ALL {
            let selection = FilterSelection {
                assignees: Selection::All,
                statuses: Selection::only([status.label()]),
            };
            let visible = visible_jobs(&jobs, &selection);

            let mut cursor = jobs.iter();
            for picked in &visible {
                assert!(cursor.any(|j| j.id == picked.id), "{:?} broke list order", status);
            }
            assert_eq!(visible_jobs(&jobs, &selection), visible);
        }
    }

    #[test]
    fn all_sentinel_in_raw_labels_selects_everything() {
        assert_eq!(Selection::from_labels(["Luke", "All"]), Selection::All);
        assert_eq!(Selection::from_labels(["Luke"]), Selection::only(["Luke"]));
    }

    #[test]
    fn selection_serializes_as_tagged_json() {
        let json = serde_json::to_value(Selection::only(["Dora"])).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "only", "labels": ["Dora"]}));

        let all: Selection = serde_json::from_value(serde_json::json!({"kind": "all"})).unwrap();
        assert_eq!(all, Selection::All);
    }
}
