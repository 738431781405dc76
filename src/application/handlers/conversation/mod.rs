//! Conversation command and query handlers.
//!
//! Writes go through an optimistic reload-and-retry loop; delivery side
//! effects (notifications, realtime fan-out, events) never fail a command.

mod can_message;
mod freeze_conversation;
mod get_messages;
mod get_or_create_conversation;
mod lifecycle;
mod list_conversations;
mod mark_message_read;
mod send_message;
mod unread_summary;
mod write_retry;

pub use can_message::{CanMessageHandler, CanMessageQuery};
pub use freeze_conversation::{
    FreezeConversationCommand, FreezeConversationHandler, FreezeOutcome,
};
pub use get_messages::{GetMessagesHandler, GetMessagesQuery, DEFAULT_PAGE_SIZE};
pub use get_or_create_conversation::{
    GetOrCreateConversationCommand, GetOrCreateConversationHandler,
    GetOrCreateConversationResult,
};
pub use lifecycle::ConversationLifecycleService;
pub use list_conversations::{
    ConversationSummary, ListConversationsHandler, ListConversationsQuery,
};
pub use mark_message_read::{
    MarkMessageReadCommand, MarkMessageReadHandler, MarkMessageReadResult,
};
pub use send_message::{SendMessageCommand, SendMessageHandler, SendMessageResult};
pub use unread_summary::{GetUnreadSummaryHandler, GetUnreadSummaryQuery, UnreadSummary};
pub use write_retry::{WriteRetryPolicy, DEFAULT_WRITE_ATTEMPTS};
