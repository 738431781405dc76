//! PostgreSQL implementation of ProfessionalDirectory.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::booking::{ProfessionalProfile, ProfessionalType};
use crate::domain::foundation::{DomainError, ProfessionalId, UserId, ValidationError};
use crate::ports::ProfessionalDirectory;

#[derive(Clone)]
pub struct PostgresProfessionalDirectory {
    pool: PgPool,
}

impl PostgresProfessionalDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn professional_type_from_str(s: &str) -> Result<ProfessionalType, DomainError> {
    match s {
        "general_service" => Ok(ProfessionalType::GeneralService),
        "project_based" => Ok(ProfessionalType::ProjectBased),
        other => Err(ValidationError::invalid_format(
            "professional_type",
            format!("unknown professional type '{}'", other),
        )
        .into()),
    }
}

#[async_trait]
impl ProfessionalDirectory for PostgresProfessionalDirectory {
    async fn user_exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("check user existence", e))?;

        Ok(exists)
    }

    async fn find_professional(
        &self,
        professional_id: &ProfessionalId,
    ) -> Result<Option<ProfessionalProfile>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, professional_type, is_available
            FROM professionals WHERE id = $1
            "#,
        )
        .bind(professional_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch professional", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: uuid::Uuid = row.try_get("id").map_err(|e| db_error("read professional", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| db_error("read professional", e))?;
        let professional_type: String = row
            .try_get("professional_type")
            .map_err(|e| db_error("read professional", e))?;
        let is_available: bool = row
            .try_get("is_available")
            .map_err(|e| db_error("read professional", e))?;

        Ok(Some(ProfessionalProfile {
            id: ProfessionalId::from_uuid(id),
            user_id: UserId::new(user_id)?,
            professional_type: professional_type_from_str(&professional_type)?,
            is_available,
        }))
    }
}
