//! PostgreSQL implementation of ConversationRepository.
//!
//! Each conversation is one JSONB document. `booking_id` is unique and
//! `participant_ids` is indexed for inbox queries.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{db_error, from_document, to_document, version_param};
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{
    BookingId, ConversationId, DomainError, ErrorCode, UserId,
};
use crate::ports::ConversationRepository;

#[derive(Clone)]
pub struct PostgresConversationRepository {
    pool: PgPool,
}

impl PostgresConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        sql: &'static str,
        key: uuid::Uuid,
    ) -> Result<Option<Conversation>, DomainError> {
        let row = sqlx::query(sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch conversation", e))?;

        match row {
            Some(row) => {
                let document = row
                    .try_get("document")
                    .map_err(|e| db_error("read conversation row", e))?;
                Ok(Some(from_document(document)?))
            }
            None => Ok(None),
        }
    }
}

fn participant_ids(conversation: &Conversation) -> Vec<String> {
    conversation
        .participants()
        .iter()
        .map(|p| p.as_str().to_string())
        .collect()
}

#[async_trait]
impl ConversationRepository for PostgresConversationRepository {
    async fn insert(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO conversations (
                id, booking_id, participant_ids, updated_at, version, document
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(conversation.id().as_uuid())
        .bind(conversation.booking_id().as_uuid())
        .bind(participant_ids(conversation))
        .bind(conversation.updated_at().as_datetime())
        .bind(version_param(conversation.version()))
        .bind(to_document(conversation)?)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(DomainError::new(
                ErrorCode::DuplicateConversation,
                format!(
                    "Conversation already exists for booking {}",
                    conversation.booking_id()
                ),
            )),
            Err(e) => Err(db_error("insert conversation", e)),
        }
    }

    async fn update(&self, conversation: &mut Conversation) -> Result<(), DomainError> {
        let expected = conversation.version();
        let mut next = conversation.clone();
        next.advance_version();

        let result = sqlx::query(
            r#"
            UPDATE conversations SET
                updated_at = $3,
                version = $4,
                document = $5
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(conversation.id().as_uuid())
        .bind(version_param(expected))
        .bind(next.updated_at().as_datetime())
        .bind(version_param(next.version()))
        .bind(to_document(&next)?)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update conversation", e))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(conversation.id()).await? {
                Some(_) => Err(DomainError::concurrent_modification(
                    "Conversation",
                    conversation.id(),
                )),
                None => Err(DomainError::new(
                    ErrorCode::ConversationNotFound,
                    format!("Conversation not found: {}", conversation.id()),
                )),
            };
        }

        *conversation = next;
        Ok(())
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        self.find_one("SELECT document FROM conversations WHERE id = $1", *id.as_uuid())
            .await
    }

    async fn find_by_booking_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Conversation>, DomainError> {
        self.find_one(
            "SELECT document FROM conversations WHERE booking_id = $1",
            *booking_id.as_uuid(),
        )
        .await
    }

    async fn find_by_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT document FROM conversations
            WHERE $1 = ANY(participant_ids)
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list conversations", e))?;

        rows.into_iter()
            .map(|row| {
                let document = row
                    .try_get("document")
                    .map_err(|e| db_error("read conversation row", e))?;
                from_document(document)
            })
            .collect()
    }
}
