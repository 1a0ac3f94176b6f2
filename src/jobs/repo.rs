use sqlx::PgPool;

use crate::jobs::repo_types::{Job, JobFields};

impl Job {
    pub async fn create(
        db: &PgPool,
        employer_id: i64,
        fields: &JobFields,
    ) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (employer_id, title, location, latitude, longitude, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, employer_id, title, location, latitude, longitude, description, created_at
            "#,
        )
        .bind(employer_id)
        .bind(&fields.title)
        .bind(&fields.location)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(&fields.description)
        .fetch_one(db)
        .await
    }

    pub async fn list_all(db: &PgPool) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, employer_id, title, location, latitude, longitude, description, created_at
            FROM jobs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn search_by_location(db: &PgPool, location: &str) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, employer_id, title, location, latitude, longitude, description, created_at
            FROM jobs
            WHERE location ILIKE $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(format!("%{location}%"))
        .fetch_all(db)
        .await
    }

    pub async fn list_by_employer(db: &PgPool, employer_id: i64) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(
            r#"
            SELECT id, employer_id, title, location, latitude, longitude, description, created_at
            FROM jobs
            WHERE employer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(employer_id)
        .fetch_all(db)
        .await
    }

    /// Owner of a posting, `None` when the posting does not exist.
    pub async fn owner(db: &PgPool, job_id: i64) -> Result<Option<i64>, sqlx::Error> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT employer_id FROM jobs WHERE id = $1")
                .bind(job_id)
                .fetch_optional(db)
                .await?;
        Ok(row.map(|(employer_id,)| employer_id))
    }

    /// Conditional update keyed on owner; returns false when the row is
    /// gone or owned by someone else. The ownership check and the write
    /// are one atomic statement.
    pub async fn update_owned(
        db: &PgPool,
        job_id: i64,
        employer_id: i64,
        fields: &JobFields,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET title = $3, location = $4, latitude = $5, longitude = $6, description = $7
            WHERE id = $1 AND employer_id = $2
            "#,
        )
        .bind(job_id)
        .bind(employer_id)
        .bind(&fields.title)
        .bind(&fields.location)
        .bind(fields.latitude)
        .bind(fields.longitude)
        .bind(&fields.description)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Conditional delete keyed on owner, same contract as `update_owned`.
    pub async fn delete_owned(
        db: &PgPool,
        job_id: i64,
        employer_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND employer_id = $2")
            .bind(job_id)
            .bind(employer_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
