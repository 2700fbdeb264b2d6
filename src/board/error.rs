use crate::domain::JobId;
use crate::email::EmailError;
use crate::form::FormError;
use crate::store::StoreError;

/// Errors surfaced by board commands
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Form(#[from] FormError),

    /// Only one modal may be open at a time
    #[error("Another form is already open")]
    ModalOpen,

    /// A submit arrived for a form that is not open
    #[error("No {0} form is open")]
    NoForm(&'static str),

    /// Edit requested for a job that is not in the current list
    #[error("Job not found: {0}")]
    JobNotFound(JobId),
}
