//! In-memory adapters for tests and local development.

mod booking_repository;
mod conversation_repository;
mod professional_directory;

pub use booking_repository::InMemoryBookingRepository;
pub use conversation_repository::InMemoryConversationRepository;
pub use professional_directory::InMemoryProfessionalDirectory;
