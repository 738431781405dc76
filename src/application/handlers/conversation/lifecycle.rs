//! Conversation side of the booking/conversation boundary.
//!
//! Booking handlers open and freeze conversations through the
//! `ConversationLifecycle` port; this adapter routes those calls into the
//! conversation handlers.

use async_trait::async_trait;

use crate::domain::conversation::ConversationError;
use crate::domain::foundation::{BookingId, ConversationId, DomainError};
use crate::ports::ConversationLifecycle;

use super::{
    FreezeConversationCommand, FreezeConversationHandler, GetOrCreateConversationCommand,
    GetOrCreateConversationHandler,
};

pub struct ConversationLifecycleService {
    get_or_create: GetOrCreateConversationHandler,
    freeze: FreezeConversationHandler,
}

impl ConversationLifecycleService {
    pub fn new(
        get_or_create: GetOrCreateConversationHandler,
        freeze: FreezeConversationHandler,
    ) -> Self {
        Self {
            get_or_create,
            freeze,
        }
    }
}

#[async_trait]
impl ConversationLifecycle for ConversationLifecycleService {
    async fn open_for_booking(
        &self,
        booking_id: &BookingId,
    ) -> Result<ConversationId, DomainError> {
        let result = self
            .get_or_create
            .handle(GetOrCreateConversationCommand {
                booking_id: *booking_id,
            })
            .await
            .map_err(into_domain)?;
        Ok(*result.conversation.id())
    }

    async fn freeze_for_booking(&self, booking_id: &BookingId) -> Result<(), DomainError> {
        self.freeze
            .handle(FreezeConversationCommand {
                booking_id: *booking_id,
            })
            .await
            .map_err(into_domain)?;
        Ok(())
    }
}

fn into_domain(err: ConversationError) -> DomainError {
    DomainError::new(err.code(), err.message())
}
