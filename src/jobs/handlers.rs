use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser, repo_types::Role},
    authz::{authorize, Access},
    error::ApiError,
    geo::GeoPoint,
    jobs::{
        dto::{CreatedJobResponse, JobRequest, SearchQuery},
        repo_types::{Job, JobFields},
    },
    state::AppState,
};

/// 403 used for every denied mutation on a posting. Existence and
/// ownership failures share one message so job ids cannot be probed.
fn denied() -> ApiError {
    ApiError::Forbidden("Unauthorized or job not found".into())
}

fn validated_fields(payload: &JobRequest) -> Result<(String, String, String), ApiError> {
    let title = payload.title.trim();
    let location = payload.location.trim();
    let description = payload.description.trim();
    if title.is_empty() || location.is_empty() || description.is_empty() {
        return Err(ApiError::Validation("All fields are required".into()));
    }
    Ok((title.into(), location.into(), description.into()))
}

/// Coordinates for a location, best effort: a geocoder failure stores the
/// posting without coordinates instead of failing the request.
async fn resolve_coords(state: &AppState, location: &str) -> Option<GeoPoint> {
    match state.geocoder.locate(location).await {
        Ok(point) => point,
        Err(e) => {
            warn!(error = %e, location, "geocoding failed, continuing without coordinates");
            None
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn post_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<JobRequest>,
) -> Result<(StatusCode, Json<CreatedJobResponse>), ApiError> {
    // Creation has no existing resource; the caller owns the prospective
    // record, so only the role gate applies.
    if authorize(&user, Some(user.id), Some(Role::Employer)) != Access::Allowed {
        return Err(ApiError::Forbidden(
            "Access denied. Only employers can post jobs.".into(),
        ));
    }

    let (title, location, description) = validated_fields(&payload)?;
    let point = resolve_coords(&state, &location).await;

    let job = Job::create(
        &state.db,
        user.id,
        &JobFields {
            title,
            location,
            latitude: point.map(|p| p.latitude),
            longitude: point.map(|p| p.longitude),
            description,
        },
    )
    .await?;

    info!(job_id = job.id, employer_id = user.id, "job posted");
    Ok((
        StatusCode::CREATED,
        Json(CreatedJobResponse {
            message: "Job posted successfully".into(),
            job_id: job.id,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, ApiError> {
    let jobs = Job::list_all(&state.db).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let location = query
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ApiError::Validation("Location is required".into()))?;

    let jobs = Job::search_by_location(&state.db, location).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn my_jobs(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Job>>, ApiError> {
    if authorize(&user, Some(user.id), Some(Role::Employer)) != Access::Allowed {
        return Err(ApiError::Forbidden(
            "Access denied. Only employers can view their posted jobs.".into(),
        ));
    }
    let jobs = Job::list_by_employer(&state.db, user.id).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state, payload))]
pub async fn edit_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<i64>,
    Json(payload): Json<JobRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let (title, location, description) = validated_fields(&payload)?;

    let owner = Job::owner(&state.db, job_id).await?;
    if authorize(&user, owner, Some(Role::Employer)) != Access::Allowed {
        warn!(job_id, user_id = user.id, "job edit denied");
        return Err(denied());
    }

    let point = resolve_coords(&state, &location).await;
    let updated = Job::update_owned(
        &state.db,
        job_id,
        user.id,
        &JobFields {
            title,
            location,
            latitude: point.map(|p| p.latitude),
            longitude: point.map(|p| p.longitude),
            description,
        },
    )
    .await?;

    // The conditional write re-checks ownership; a row deleted between the
    // read and the write lands here.
    if !updated {
        return Err(denied());
    }

    info!(job_id, employer_id = user.id, "job updated");
    Ok(Json(MessageResponse {
        message: "Job updated successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let owner = Job::owner(&state.db, job_id).await?;
    if authorize(&user, owner, Some(Role::Employer)) != Access::Allowed {
        warn!(job_id, user_id = user.id, "job delete denied");
        return Err(denied());
    }

    let deleted = Job::delete_owned(&state.db, job_id, user.id).await?;
    if !deleted {
        return Err(denied());
    }

    info!(job_id, employer_id = user.id, "job deleted");
    Ok(Json(MessageResponse {
        message: "Job deleted successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, location: &str, description: &str) -> JobRequest {
        JobRequest {
            title: title.into(),
            location: location.into(),
            description: description.into(),
        }
    }

    #[test]
    fn all_fields_required() {
        assert!(validated_fields(&request("", "Berlin", "desc")).is_err());
        assert!(validated_fields(&request("Chef", "  ", "desc")).is_err());
        assert!(validated_fields(&request("Chef", "Berlin", "")).is_err());
        let (title, location, description) =
            validated_fields(&request(" Chef ", "Berlin", "desc")).expect("valid");
        assert_eq!(title, "Chef");
        assert_eq!(location, "Berlin");
        assert_eq!(description, "desc");
    }

    #[test]
    fn denied_response_is_uniform_403() {
        let err = denied();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Unauthorized or job not found");
    }

    #[tokio::test]
    async fn resolve_coords_tolerates_missing_geocoder_results() {
        let state = AppState::fake();
        assert!(resolve_coords(&state, "Berlin").await.is_none());
    }
}
