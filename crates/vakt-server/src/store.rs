use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use vakt_db::{CredentialRepo, CredentialRow, NewCredential};

/// Contract the auth core holds against credential persistence.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist a new record and return its assigned id.
    async fn insert(&self, cred: NewCredential) -> Result<i64>;

    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRow>>;

    async fn get_by_id(&self, credential_id: i64) -> Result<Option<CredentialRow>>;

    /// Duplicate-detection hook. Only consulted when the service is
    /// configured to reject duplicate usernames.
    async fn username_taken(&self, username: &str) -> Result<bool>;
}

/// PostgreSQL-backed store
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn insert(&self, cred: NewCredential) -> Result<i64> {
        CredentialRepo::create(&self.pool, &cred).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRow>> {
        CredentialRepo::find_by_username(&self.pool, username).await
    }

    async fn get_by_id(&self, credential_id: i64) -> Result<Option<CredentialRow>> {
        CredentialRepo::get_by_id(&self.pool, credential_id).await
    }

    async fn username_taken(&self, username: &str) -> Result<bool> {
        CredentialRepo::username_taken(&self.pool, username).await
    }
}

/// In-process store. No uniqueness discipline; lookups return the
/// oldest matching record, like the SQL implementation.
pub struct MemoryCredentialStore {
    records: Mutex<Vec<CredentialRow>>,
    next_id: AtomicI64,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn insert(&self, cred: NewCredential) -> Result<i64> {
        let credential_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let mut records = self.records.lock().unwrap();
        records.push(CredentialRow {
            credential_id,
            username: cred.username,
            password: cred.password,
            email: cred.email,
            is_active: cred.is_active,
            created_at: cred.created_at,
            updated_at: cred.updated_at,
        });
        Ok(credential_id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<CredentialRow>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.username == username).cloned())
    }

    async fn get_by_id(&self, credential_id: i64) -> Result<Option<CredentialRow>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.credential_id == credential_id)
            .cloned())
    }

    async fn username_taken(&self, username: &str) -> Result<bool> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().any(|r| r.username == username))
    }
}
