//! ProfessionalDirectory port - read access to accounts and professional profiles.

use crate::domain::booking::ProfessionalProfile;
use crate::domain::foundation::{DomainError, ProfessionalId, UserId};
use async_trait::async_trait;

/// Port for resolving the parties of a booking request.
#[async_trait]
pub trait ProfessionalDirectory: Send + Sync {
    /// True if a user account exists.
    async fn user_exists(&self, user_id: &UserId) -> Result<bool, DomainError>;

    /// Professional profile, including availability and type.
    async fn find_professional(
        &self,
        professional_id: &ProfessionalId,
    ) -> Result<Option<ProfessionalProfile>, DomainError>;
}
