use crate::password::CredentialVerifier;
use crate::store::CredentialStore;
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use vakt_db::{CredentialRow, NewCredential};

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created(i64),
    DuplicateUsername,
}

/// Registration and login against the credential store.
///
/// Stateless between requests; safe to clone into handlers.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    verifier: Arc<dyn CredentialVerifier>,
    reject_duplicates: bool,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        verifier: Arc<dyn CredentialVerifier>,
        reject_duplicates: bool,
    ) -> Self {
        Self {
            store,
            verifier,
            reject_duplicates,
        }
    }

    /// Create a new credential record.
    ///
    /// Unless duplicate rejection is configured, this succeeds whenever the
    /// store accepts the insert -- a second record under the same username
    /// is not detected here.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<RegisterOutcome> {
        if self.reject_duplicates && self.store.username_taken(username).await? {
            return Ok(RegisterOutcome::DuplicateUsername);
        }

        let now = Utc::now();
        let cred = NewCredential {
            username: username.to_string(),
            password: self.verifier.protect(password)?,
            email: email.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let credential_id = self.store.insert(cred).await?;
        Ok(RegisterOutcome::Created(credential_id))
    }

    /// Look up a credential whose username and password both match.
    ///
    /// Returns `Ok(None)` when no record matches; callers must treat that as
    /// an authentication failure and must not issue a token.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<CredentialRow>> {
        let Some(cred) = self.store.find_by_username(username).await? else {
            return Ok(None);
        };
        if !self.verifier.verify(password, &cred.password) {
            return Ok(None);
        }
        Ok(Some(cred))
    }

    /// Fetch a credential by id (used by the boundary after token validation).
    pub async fn get(&self, credential_id: i64) -> Result<Option<CredentialRow>> {
        self.store.get_by_id(credential_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::{Argon2Verifier, PlaintextVerifier};
    use crate::store::MemoryCredentialStore;

    fn service(reject_duplicates: bool) -> AuthService {
        AuthService::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(PlaintextVerifier),
            reject_duplicates,
        )
    }

    #[tokio::test]
    async fn test_register_then_login_roundtrip() {
        let svc = service(false);
        let outcome = svc.register("alice", "p1", "a@x.com").await.unwrap();
        let RegisterOutcome::Created(id) = outcome else {
            panic!("Expected Created");
        };

        let cred = svc.login("alice", "p1").await.unwrap().expect("match");
        assert_eq!(cred.credential_id, id);
        assert_eq!(cred.username, "alice");
        assert_eq!(cred.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_wrong_password_returns_none() {
        let svc = service(false);
        svc.register("alice", "p1", "a@x.com").await.unwrap();
        assert!(svc.login("alice", "wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_unknown_user_returns_none() {
        let svc = service(false);
        assert!(svc.login("nobody", "p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_sets_active_and_timestamps() {
        let svc = service(false);
        let before = Utc::now();
        svc.register("alice", "p1", "a@x.com").await.unwrap();
        let cred = svc.login("alice", "p1").await.unwrap().unwrap();
        assert!(cred.is_active);
        assert!(cred.created_at >= before);
        assert_eq!(cred.created_at, cred.updated_at);
    }

    #[tokio::test]
    async fn test_duplicate_registration_passes_through_by_default() {
        let svc = service(false);
        let first = svc.register("alice", "p1", "a@x.com").await.unwrap();
        let second = svc.register("alice", "p2", "b@x.com").await.unwrap();
        let (RegisterOutcome::Created(id1), RegisterOutcome::Created(id2)) = (first, second)
        else {
            panic!("Both registrations should report success");
        };
        assert_ne!(id1, id2, "Two distinct records should exist");
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected_when_enforced() {
        let svc = service(true);
        let first = svc.register("alice", "p1", "a@x.com").await.unwrap();
        assert!(matches!(first, RegisterOutcome::Created(_)));
        let second = svc.register("alice", "p2", "b@x.com").await.unwrap();
        assert_eq!(second, RegisterOutcome::DuplicateUsername);
    }

    #[tokio::test]
    async fn test_registration_ids_are_stable_and_unique() {
        let svc = service(false);
        let mut ids = Vec::new();
        for name in ["a", "b", "c"] {
            let outcome = svc
                .register(name, "p1", &format!("{}@x.com", name))
                .await
                .unwrap();
            let RegisterOutcome::Created(id) = outcome else {
                panic!("Expected Created");
            };
            ids.push(id);
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);

        // Same id comes back on every login
        let id_a = svc.login("a", "p1").await.unwrap().unwrap().credential_id;
        let again = svc.login("a", "p1").await.unwrap().unwrap().credential_id;
        assert_eq!(id_a, again);
    }

    #[tokio::test]
    async fn test_argon2_scheme_stores_hash_and_verifies() {
        let svc = AuthService::new(
            Arc::new(MemoryCredentialStore::new()),
            Arc::new(Argon2Verifier),
            false,
        );
        svc.register("alice", "p1", "a@x.com").await.unwrap();

        let cred = svc.login("alice", "p1").await.unwrap().expect("match");
        assert_ne!(cred.password, "p1", "Stored form must not be the raw password");
        assert!(svc.login("alice", "wrong").await.unwrap().is_none());
    }
}
