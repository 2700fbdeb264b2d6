use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;

use crate::board::JobBoard;

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// General health check including job store connectivity.
#[get("/health")]
async fn health_check(board: web::Data<JobBoard>) -> impl Responder {
    match board.check_store().await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            store: "connected".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("Health check failed: {:?}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy".to_string(),
                store: "disconnected".to_string(),
                error: Some(format!("Job store error: {}", e)),
            })
        }
    }
}

/// Readiness check endpoint
///
/// Returns 503 while the job store is unreachable; recovers when it returns.
#[get("/ready")]
async fn readiness_check(board: web::Data<JobBoard>) -> impl Responder {
    match board.check_store().await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: "ready".to_string(),
            store: "connected".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("Readiness check failed: job store unavailable: {:?}", e);
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "not_ready".to_string(),
                store: "disconnected".to_string(),
                error: Some(format!("Job store unavailable: {}", e)),
            })
        }
    }
}

/// Liveness check endpoint. Does not check dependencies.
#[get("/live")]
async fn liveness_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "alive".to_string(),
        store: "not_checked".to_string(),
        error: None,
    })
}

pub fn health_config(config: &mut web::ServiceConfig) {
    config
        .service(health_check)
        .service(readiness_check)
        .service(liveness_check);
}
