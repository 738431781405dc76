//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;
pub mod conversation;
mod side_effects;

#[cfg(test)]
pub(crate) mod test_support;

pub use booking::{
    AppendProgressPhotoCommand, AppendProgressPhotoHandler, AppendProgressPhotoResult,
    BookingParty, CancelBookingCommand, CancelBookingHandler, CancelBookingResult,
    CreateBookingCommand, CreateBookingHandler, CreateBookingResult, GetBookingHandler,
    GetBookingQuery, ListBookingsHandler, ListBookingsQuery, UpdateBookingStatusCommand,
    UpdateBookingStatusHandler, UpdateBookingStatusResult,
};
pub use conversation::{
    CanMessageHandler, CanMessageQuery, ConversationLifecycleService, ConversationSummary,
    FreezeConversationCommand, FreezeConversationHandler, FreezeOutcome, GetMessagesHandler,
    GetMessagesQuery, GetOrCreateConversationCommand, GetOrCreateConversationHandler,
    GetOrCreateConversationResult, GetUnreadSummaryHandler, GetUnreadSummaryQuery,
    ListConversationsHandler, ListConversationsQuery, MarkMessageReadCommand,
    MarkMessageReadHandler, MarkMessageReadResult, SendMessageCommand, SendMessageHandler,
    SendMessageResult, UnreadSummary, WriteRetryPolicy,
};
