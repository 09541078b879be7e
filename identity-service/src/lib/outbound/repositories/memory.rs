use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::ports::IdentityStore;
use crate::identity::errors::StoreError;

#[derive(Default)]
struct Inner {
    by_email: HashMap<String, Identity>,
    last_id: i64,
}

/// Process-local identity store.
///
/// The uniqueness check and the insert run under one write lock.
#[derive(Default)]
pub struct InMemoryIdentityStore {
    inner: RwLock<Inner>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities.
    pub async fn len(&self) -> usize {
        self.inner.read().await.by_email.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.by_email.contains_key(&identity.email) {
            return Err(StoreError::DuplicateKey(identity.email));
        }

        inner.last_id += 1;
        let now = Utc::now();
        let created = Identity {
            id: IdentityId(inner.last_id),
            email: identity.email,
            password_hash: identity.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner
            .by_email
            .insert(created.email.clone(), created.clone());

        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        Ok(self.inner.read().await.by_email.get(email).cloned())
    }
}
