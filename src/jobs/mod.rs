use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs/post", post(handlers::post_job))
        .route("/jobs/all", get(handlers::list_jobs))
        .route("/jobs/search", get(handlers::search_jobs))
        .route("/jobs/my", get(handlers::my_jobs))
        .route("/jobs/edit/:job_id", put(handlers::edit_job))
        .route("/jobs/delete/:job_id", delete(handlers::delete_job))
}
