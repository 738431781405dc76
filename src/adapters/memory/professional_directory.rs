//! In-memory directory of user accounts and professional profiles.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::ProfessionalProfile;
use crate::domain::foundation::{DomainError, ProfessionalId, UserId};
use crate::ports::ProfessionalDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfessionalDirectory {
    users: Arc<RwLock<HashSet<UserId>>>,
    professionals: Arc<RwLock<HashMap<ProfessionalId, ProfessionalProfile>>>,
}

impl InMemoryProfessionalDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, user_id: UserId) {
        self.users.write().await.insert(user_id);
    }

    /// Registers a profile and its owning user account.
    pub async fn add_professional(&self, profile: ProfessionalProfile) {
        self.users.write().await.insert(profile.user_id.clone());
        self.professionals.write().await.insert(profile.id, profile);
    }

    pub async fn set_availability(&self, professional_id: &ProfessionalId, is_available: bool) {
        if let Some(profile) = self.professionals.write().await.get_mut(professional_id) {
            profile.is_available = is_available;
        }
    }
}

#[async_trait]
impl ProfessionalDirectory for InMemoryProfessionalDirectory {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains(user_id))
    }

    async fn find_professional(
        &self,
        professional_id: &ProfessionalId,
    ) -> Result<Option<ProfessionalProfile>, DomainError> {
        Ok(self.professionals.read().await.get(professional_id).cloned())
    }
}
