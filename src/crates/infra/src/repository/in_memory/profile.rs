use async_trait::async_trait;
use dashmap::DashMap;
use domain::profile::{Profile, ProfileError, ProfileRepository};
use std::sync::Arc;

/// Profiles keyed by email.
#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    store: Arc<DashMap<String, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }

    pub fn insert(&self, profile: Profile) {
        self.store.insert(profile.email.clone(), profile);
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_live_by_email(&self, email: &str) -> Result<Option<Profile>, ProfileError> {
        Ok(self
            .store
            .get(email)
            .filter(|p| p.is_live())
            .map(|p| p.value().clone()))
    }
}
