pub mod email_form;
pub mod job_form;

use validator::ValidationErrors;

use crate::domain::{Roster, TeamMember};

// Re-export commonly used types
pub use email_form::{EmailDraft, EmailForm};
pub use job_form::{JobDraft, JobForm, Submission};

/// Reasons a form refuses to produce a payload
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Field-level rule violations
    #[error("Validation failed: {0}")]
    Invalid(#[from] ValidationErrors),

    /// An assignee or recipient label that is not on the roster
    #[error("Unknown team member: {0}")]
    UnknownMember(String),
}

/// Map member labels picked in a multi-select back to roster entries
pub(crate) fn resolve_members(labels: &[String], roster: &Roster) -> Result<Vec<TeamMember>, FormError> {
    let mut members: Vec<TeamMember> = Vec::with_capacity(labels.len());

    for label in labels {
        let member = roster
            .by_label(label)
            .ok_or_else(|| FormError::UnknownMember(label.clone()))?;
        if !members.contains(member) {
            members.push(member.clone());
        }
    }

    Ok(members)
}
