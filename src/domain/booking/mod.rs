//! Booking domain module.
//!
//! Owns the booking aggregate and its status state machine:
//!
//! ```text
//! PENDING ──► CONFIRMED ──► IN_PROGRESS ──► COMPLETED
//!    │            │              │
//!    ├─► REJECTED └─► CANCELLED  └─► DISPUTED ──► RESOLVED
//!    └─► CANCELLED
//! ```
//!
//! # Events
//!
//! - `BookingCreated` - Published when a booking is requested
//! - `BookingStatusChanged` - Published after each committed transition

mod aggregate;
mod errors;
mod events;
mod status;
mod values;

pub use aggregate::{Booking, BookingRequest};
pub use errors::BookingError;
pub use events::{BookingCreated, BookingStatusChanged};
pub use status::{BookingStatus, NotificationAudience, StatusFilter};
pub use values::{
    PaymentStatus, PhotoUpload, ProfessionalProfile, ProfessionalType, ProgressPhoto,
    ProjectDetails,
};
