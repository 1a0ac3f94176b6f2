use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, LoginResponse, MessageResponse, ProfileResponse, SignupRequest,
            SignupResponse, UpdateProfileRequest,
        },
        extractors::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::is_unique_violation,
        repo_types::{Role, User, UserChanges},
    },
    error::ApiError,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

lazy_static! {
    // Verified against when login hits an unknown email, so that path costs
    // the same as a real password check.
    static ref DUMMY_HASH: String =
        hash_password("placeholder-password").expect("static hash");
}

/// Trimmed value of an optional field, with blank treated as absent.
fn provided(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let name = payload.name.trim();
    let email = payload.email.trim();
    if name.is_empty() || email.is_empty() || payload.password.is_empty() || payload.role.is_empty()
    {
        return Err(ApiError::Validation("All fields are required".into()));
    }

    let role: Role = payload
        .role
        .parse()
        .map_err(|_| ApiError::Validation("Invalid role".into()))?;

    if !is_valid_email(email) {
        warn!("signup with malformed email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    let hash = hash_password(&payload.password).map_err(ApiError::Internal)?;

    let user = User::create(&state.db, name, email, &hash, role)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!("signup rejected by unique constraint");
                ApiError::DuplicateEmail
            } else {
                ApiError::Store(e)
            }
        })?;

    info!(user_id = user.id, role = %user.role, "user created");
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully".into(),
            user_id: user.id,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Email and password required".into()));
    }

    let user = User::find_by_email(&state.db, email).await?;

    let Some(user) = user else {
        // Burn a comparable amount of work so unknown email and wrong
        // password are not distinguishable by latency.
        let _ = verify_password(&payload.password, &DUMMY_HASH);
        warn!("login with unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    let ok = verify_password(&payload.password, &user.password_hash)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(user_id = user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, user.role).map_err(ApiError::Internal)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let record = User::find_by_id(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(ProfileResponse {
        id: record.id,
        name: record.name,
        email: record.email,
        role: record.role,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut changes = UserChanges {
        name: provided(payload.name),
        ..UserChanges::default()
    };

    if let Some(email) = provided(payload.email) {
        if !is_valid_email(&email) {
            return Err(ApiError::Validation("Invalid email".into()));
        }
        changes.email = Some(email);
    }

    if let Some(password) = payload.password.filter(|p| !p.is_empty()) {
        if password.len() < 8 {
            return Err(ApiError::Validation("Password too short".into()));
        }
        changes.password_hash = Some(hash_password(&password).map_err(ApiError::Internal)?);
    }

    if changes.is_empty() {
        return Err(ApiError::Validation("No changes provided".into()));
    }

    User::update(&state.db, user.id, &changes)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                warn!(user_id = user.id, "profile update rejected by unique constraint");
                ApiError::DuplicateEmail
            } else {
                ApiError::Store(e)
            }
        })?;

    info!(user_id = user.id, "profile updated");
    Ok(Json(MessageResponse {
        message: "Profile updated successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn provided_filters_blank_fields() {
        assert_eq!(provided(None), None);
        assert_eq!(provided(Some("".into())), None);
        assert_eq!(provided(Some("   ".into())), None);
        assert_eq!(provided(Some("  Ada ".into())), Some("Ada".into()));
    }

    #[test]
    fn empty_changeset_is_detected() {
        let changes = UserChanges::default();
        assert!(changes.is_empty());
        let changes = UserChanges {
            name: Some("Ada".into()),
            ..UserChanges::default()
        };
        assert!(!changes.is_empty());
    }
}
