use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Job posting as stored. `employer_id` is the owning identity and never
/// changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub employer_id: i64,
    pub title: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
    pub created_at: OffsetDateTime,
}

/// Writable columns of a job posting, shared by insert and update.
#[derive(Debug, Clone)]
pub struct JobFields {
    pub title: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub description: String,
}
