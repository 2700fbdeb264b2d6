use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{resolve_members, FormError};
use crate::domain::filter::ALL_LABEL;
use crate::domain::{Roster, TeamMember};

/// Recipients and GIF for the team email
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
pub struct EmailDraft {
    /// Team member labels, or `All` for the whole roster
    #[validate(length(min = 1, message = "Pick at least one recipient"))]
    pub recipients: Vec<String>,

    #[validate(url(message = "GIF link must be a valid URL"))]
    pub gif_link: String,
}

/// The email modal
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailForm {
    draft: EmailDraft,
}

impl EmailForm {
    pub fn set_draft(&mut self, draft: EmailDraft) {
        self.draft = draft;
    }

    /// Validate the draft and resolve the recipients against the roster
    pub fn message(&self, roster: &Roster) -> Result<(Vec<TeamMember>, String), FormError> {
        self.draft.validate()?;

        let recipients = if self.draft.recipients.iter().any(|r| r == ALL_LABEL) {
            roster.members().to_vec()
        } else {
            resolve_members(&self.draft.recipients, roster)?
        };

        Ok((recipients, self.draft.gif_link.trim().to_string()))
    }
}
