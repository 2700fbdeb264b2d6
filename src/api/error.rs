use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::warn;

use super::validation::ErrorResponse;
use crate::board::BoardError;
use crate::form::FormError;
use crate::store::StoreError;

impl ResponseError for BoardError {
    fn status_code(&self) -> StatusCode {
        match self {
            BoardError::Store(StoreError::NotFound(_)) | BoardError::JobNotFound(_) => StatusCode::NOT_FOUND,
            BoardError::Store(_) | BoardError::Email(_) => StatusCode::BAD_GATEWAY,
            BoardError::Form(_) => StatusCode::BAD_REQUEST,
            BoardError::ModalOpen | BoardError::NoForm(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            BoardError::Store(StoreError::NotFound(id)) | BoardError::JobNotFound(id) => {
                ErrorResponse::message("Not found", format!("Job with id {} not found", id))
            }
            BoardError::Store(e) => ErrorResponse::message("Job store request failed", e.to_string()),
            BoardError::Email(e) => ErrorResponse::message("Email dispatch failed", e.to_string()),
            BoardError::Form(FormError::Invalid(errors)) => ErrorResponse::validation(errors),
            BoardError::Form(FormError::UnknownMember(label)) => ErrorResponse {
                error: "Validation failed".to_string(),
                fields: serde_json::json!({
                    "team_member": {"errors": [format!("{} is not on the team", label)]}
                }),
            },
            BoardError::ModalOpen | BoardError::NoForm(_) => {
                warn!("Rejected form command: {}", self);
                ErrorResponse::message("Conflict", self.to_string())
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
