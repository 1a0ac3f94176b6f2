use serde::{Deserialize, Serialize};

use crate::auth::repo_types::Role;

/// Request body for account creation. `role` arrives as a plain string so
/// an unknown value yields a 400 instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// Public part of the profile returned to the owner. Never carries the
/// password hash.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Partial profile update; absent or blank fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_response_uses_camel_case_user_id() {
        let resp = SignupResponse {
            message: "User created successfully".into(),
            user_id: 12,
        };
        let json = serde_json::to_string(&resp).expect("serialize");
        assert!(json.contains("\"userId\":12"));
    }

    #[test]
    fn signup_request_tolerates_missing_fields() {
        let req: SignupRequest = serde_json::from_str("{}").expect("parse");
        assert!(req.name.is_empty());
        assert!(req.role.is_empty());
    }

    #[test]
    fn profile_response_has_no_password_field() {
        let resp = ProfileResponse {
            id: 1,
            name: "A".into(),
            email: "a@x.com".into(),
            role: Role::Employer,
        };
        let json = serde_json::to_string(&resp).expect("serialize");
        assert!(!json.contains("password"));
    }
}
