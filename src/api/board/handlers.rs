use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, ServiceConfig, scope},
    HttpResponse, Responder,
};

use super::dto::{EmailResponse, JobResponse, ReloadResponse, StatusOption};
use crate::board::{BoardError, JobBoard};
use crate::domain::{FilterSelection, JobId, JobStatus};
use crate::form::{EmailDraft, JobDraft};

#[get("/board")]
async fn get_board(board: Data<JobBoard>) -> impl Responder {
    HttpResponse::Ok().json(board.view().await)
}

#[put("/filter")]
async fn set_filter(board: Data<JobBoard>, filter: Json<FilterSelection>) -> impl Responder {
    HttpResponse::Ok().json(board.set_filter(filter.into_inner()).await)
}

#[get("/team-members")]
async fn team_members(board: Data<JobBoard>) -> impl Responder {
    HttpResponse::Ok().json(board.roster().members())
}

#[get("/statuses")]
async fn statuses() -> impl Responder {
    let options: Vec<StatusOption> = JobStatus::ALL.into_iter().map(StatusOption::from).collect();
    HttpResponse::Ok().json(options)
}

#[delete("/notice")]
async fn dismiss_notice(board: Data<JobBoard>) -> impl Responder {
    board.dismiss_notice().await;
    HttpResponse::NoContent().finish()
}

/// Visible rows under the current filter
#[get("")]
async fn list_jobs(board: Data<JobBoard>) -> impl Responder {
    HttpResponse::Ok().json(board.visible_jobs().await)
}

#[post("/reload")]
async fn reload_jobs(board: Data<JobBoard>) -> Result<HttpResponse, BoardError> {
    let loaded = board.reload().await?;
    Ok(HttpResponse::Ok().json(ReloadResponse {
        message: "Job list reloaded".to_string(),
        loaded,
    }))
}

#[delete("/{id}")]
async fn delete_job(board: Data<JobBoard>, path: Path<String>) -> Result<HttpResponse, BoardError> {
    board.delete(&JobId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/add")]
async fn open_add_form(board: Data<JobBoard>) -> Result<HttpResponse, BoardError> {
    Ok(HttpResponse::Ok().json(board.open_add_form().await?))
}

#[post("/edit/{id}")]
async fn open_edit_form(board: Data<JobBoard>, path: Path<String>) -> Result<HttpResponse, BoardError> {
    let form = board.open_edit_form(&JobId::new(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(form))
}

#[post("/submit")]
async fn submit_job_form(
    board: Data<JobBoard>,
    draft: Json<JobDraft>,
) -> Result<HttpResponse, BoardError> {
    let job = board.submit_job_form(draft.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JobResponse {
        message: "Job saved successfully".to_string(),
        job,
    }))
}

/// Cancel whichever modal is open
#[delete("")]
async fn cancel_form(board: Data<JobBoard>) -> impl Responder {
    board.cancel().await;
    HttpResponse::NoContent().finish()
}

#[post("/form")]
async fn open_email_form(board: Data<JobBoard>) -> Result<HttpResponse, BoardError> {
    Ok(HttpResponse::Ok().json(board.open_email_form().await?))
}

#[post("/submit")]
async fn submit_email_form(
    board: Data<JobBoard>,
    draft: Json<EmailDraft>,
) -> Result<HttpResponse, BoardError> {
    let recipients = board.submit_email_form(draft.into_inner()).await?;
    Ok(HttpResponse::Ok().json(EmailResponse {
        message: "Email sent".to_string(),
        recipients,
    }))
}

pub fn board_config(config: &mut ServiceConfig) {
    config
        .service(get_board)
        .service(set_filter)
        .service(team_members)
        .service(statuses)
        .service(dismiss_notice)
        .service(
            scope("jobs")
                .service(list_jobs)
                .service(reload_jobs)
                .service(delete_job),
        )
        .service(
            scope("form")
                .service(open_add_form)
                .service(open_edit_form)
                .service(submit_job_form)
                .service(cancel_form),
        )
        .service(
            scope("email")
                .service(open_email_form)
                .service(submit_email_form),
        );
}
