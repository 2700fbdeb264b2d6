use actix_web::{error::JsonPayloadError, web, HttpResponse};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    /// Error body with a single `message` field
    pub fn message(error: &str, message: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({"message": message.into()}),
        }
    }

    /// Error body listing every failed field, e.g. `{"job_number": {"errors": [...]}}`
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut fields = serde_json::Map::new();

        for (field, errors) in errors.field_errors() {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Validation error in field: {}", field))
                })
                .collect();
            fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
        }

        ErrorResponse {
            error: "Validation failed".to_string(),
            fields: serde_json::Value::Object(fields),
        }
    }
}

fn bad_request(error_response: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(error_response)).into()
}

/// Creates a configured JsonConfig with standardized error handling for the entire project
///
/// Only malformed bodies are rejected here. Field rules run inside the board so
/// a rejected draft is kept on the open form and shown as the notice.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default().limit(limit).error_handler(|err, _req| {
        let message = match &err {
            JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
                "Request body is too large"
            }
            JsonPayloadError::ContentType => "Expected a JSON payload",
            JsonPayloadError::Deserialize(de_err) if de_err.is_eof() => {
                "Request body is empty. Expected JSON payload"
            }
            JsonPayloadError::Deserialize(de_err) if de_err.is_data() => {
                "A required field is missing or has the wrong type"
            }
            _ => "Invalid JSON format",
        };

        bad_request(ErrorResponse::message("Request validation failed", message))
    })
}
