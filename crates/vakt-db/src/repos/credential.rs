use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CredentialRow {
    pub credential_id: i64,
    pub username: String,
    pub password: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A credential record as assembled by the caller before it has an id.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub username: String,
    pub password: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct CredentialRepo;

impl CredentialRepo {
    pub async fn create(pool: &PgPool, cred: &NewCredential) -> Result<i64> {
        let (credential_id,): (i64,) = sqlx::query_as(
            "INSERT INTO credential (username, password, email, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING credential_id",
        )
        .bind(&cred.username)
        .bind(&cred.password)
        .bind(&cred.email)
        .bind(cred.is_active)
        .bind(cred.created_at)
        .bind(cred.updated_at)
        .fetch_one(pool)
        .await
        .context("Failed to create credential")?;
        Ok(credential_id)
    }

    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<CredentialRow>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT credential_id, username, password, email, is_active, created_at, updated_at \
             FROM credential WHERE username = $1 ORDER BY credential_id LIMIT 1",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
        .context("Failed to find credential by username")?;
        Ok(row)
    }

    pub async fn get_by_id(pool: &PgPool, credential_id: i64) -> Result<Option<CredentialRow>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT credential_id, username, password, email, is_active, created_at, updated_at \
             FROM credential WHERE credential_id = $1",
        )
        .bind(credential_id)
        .fetch_optional(pool)
        .await
        .context("Failed to get credential by id")?;
        Ok(row)
    }

    pub async fn username_taken(pool: &PgPool, username: &str) -> Result<bool> {
        let (taken,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM credential WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await
                .context("Failed to check username")?;
        Ok(taken)
    }
}
