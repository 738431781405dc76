//! In-memory conversation repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{BookingId, ConversationId, DomainError, ErrorCode, UserId};
use crate::ports::ConversationRepository;

#[derive(Debug, Default)]
struct Store {
    conversations: HashMap<ConversationId, Conversation>,
    by_booking: HashMap<BookingId, ConversationId>,
}

/// In-memory storage for conversations with a unique booking index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub async fn len(&self) -> usize {
        self.store.read().await.conversations.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.conversations.is_empty()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn insert(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if store.by_booking.contains_key(conversation.booking_id()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateConversation,
                format!(
                    "A conversation already exists for booking {}",
                    conversation.booking_id()
                ),
            ));
        }
        store
            .by_booking
            .insert(*conversation.booking_id(), *conversation.id());
        store
            .conversations
            .insert(*conversation.id(), conversation.clone());
        Ok(())
    }

    async fn update(&self, conversation: &mut Conversation) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        let stored = store.conversations.get(conversation.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ConversationNotFound,
                format!("Conversation not found: {}", conversation.id()),
            )
        })?;
        if stored.version() != conversation.version() {
            return Err(DomainError::concurrent_modification(
                "Conversation",
                conversation.id(),
            ));
        }

        conversation.advance_version();
        store
            .conversations
            .insert(*conversation.id(), conversation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        Ok(self.store.read().await.conversations.get(id).cloned())
    }

    async fn find_by_booking_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<Conversation>, DomainError> {
        let store = self.store.read().await;
        Ok(store
            .by_booking
            .get(booking_id)
            .and_then(|id| store.conversations.get(id))
            .cloned())
    }

    async fn find_by_participant(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Conversation>, DomainError> {
        let mut found: Vec<Conversation> = self
            .store
            .read()
            .await
            .conversations
            .values()
            .filter(|c| c.is_participant(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        Ok(found)
    }
}
