//! Booking aggregate.
//!
//! A booking is a scheduled engagement between a requesting client and a
//! professional. It is created PENDING and only ever changes through the
//! [`BookingStatus`] state machine; terminal statuses replace deletion.

use serde::{Deserialize, Serialize};

use super::{
    BookingStatus, PaymentStatus, PhotoUpload, ProfessionalProfile, ProfessionalType,
    ProgressPhoto, ProjectDetails,
};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, PhotoId, ProfessionalId, StateMachine, Timestamp, UserId,
};
use crate::domain::scheduling::TimeSlot;

/// Input for requesting a new booking.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub requester_id: UserId,
    pub professional_id: ProfessionalId,
    pub professional_type: ProfessionalType,
    pub category: String,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
    pub address: String,
    pub description: String,
    /// Minor currency units.
    pub estimated_price: i64,
    pub project_details: Option<ProjectDetails>,
    pub reference_images: Vec<String>,
}

/// Booking aggregate.
///
/// # Invariants
///
/// - requester and professional never change after creation
/// - `started_at`, `completed_at`, `cancelled_at` are each set once, on the
///   matching transition, and never cleared
/// - progress photos exist only on project-based bookings
/// - `version` matches the persisted row this copy was loaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    requester_id: UserId,
    professional_id: ProfessionalId,
    professional_user_id: UserId,
    professional_type: ProfessionalType,
    category: String,
    description: String,
    address: String,
    estimated_price: i64,
    project_details: Option<ProjectDetails>,
    reference_images: Vec<String>,
    slot: TimeSlot,
    status: BookingStatus,
    payment_status: PaymentStatus,
    status_notes: Option<String>,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    cancelled_at: Option<Timestamp>,
    cancellation_reason: Option<String>,
    progress_photos: Vec<ProgressPhoto>,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl Booking {
    /// Creates a PENDING booking for `professional`.
    ///
    /// # Errors
    ///
    /// - `ProfessionalUnavailable` if the professional is not taking bookings
    /// - `ProfessionalTypeMismatch` if the requested type differs from the profile
    /// - `ValidationFailed` for missing project details, zero duration,
    ///   negative price or blank category
    pub fn request(
        request: BookingRequest,
        professional: &ProfessionalProfile,
    ) -> Result<Self, DomainError> {
        if !professional.is_available {
            return Err(DomainError::new(
                ErrorCode::ProfessionalUnavailable,
                "Professional is not available for bookings",
            ));
        }
        if professional.professional_type != request.professional_type {
            return Err(DomainError::new(
                ErrorCode::ProfessionalTypeMismatch,
                format!(
                    "Professional type mismatch: requested {} but professional is {}",
                    request.professional_type, professional.professional_type
                ),
            ));
        }
        if request.professional_type.is_project_based() && request.project_details.is_none() {
            return Err(DomainError::validation(
                "project_details",
                "Project details are required for project-based bookings",
            ));
        }
        if request.category.trim().is_empty() {
            return Err(DomainError::validation("category", "Category cannot be empty"));
        }
        if request.estimated_price < 0 {
            return Err(DomainError::validation(
                "estimated_price",
                "Estimated price cannot be negative",
            ));
        }
        let slot = TimeSlot::new(request.scheduled_at, request.duration_minutes)?;

        let now = Timestamp::now();
        Ok(Self {
            id: BookingId::new(),
            requester_id: request.requester_id,
            professional_id: professional.id,
            professional_user_id: professional.user_id.clone(),
            professional_type: request.professional_type,
            category: request.category,
            description: request.description,
            address: request.address,
            estimated_price: request.estimated_price,
            project_details: request.project_details,
            reference_images: request.reference_images,
            slot,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            status_notes: None,
            started_at: None,
            completed_at: None,
            cancelled_at: None,
            cancellation_reason: None,
            progress_photos: Vec::new(),
            created_at: now,
            updated_at: now,
            version: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn requester_id(&self) -> &UserId {
        &self.requester_id
    }

    pub fn professional_id(&self) -> &ProfessionalId {
        &self.professional_id
    }

    pub fn professional_user_id(&self) -> &UserId {
        &self.professional_user_id
    }

    pub fn professional_type(&self) -> ProfessionalType {
        self.professional_type
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn estimated_price(&self) -> i64 {
        self.estimated_price
    }

    pub fn project_details(&self) -> Option<&ProjectDetails> {
        self.project_details.as_ref()
    }

    pub fn reference_images(&self) -> &[String] {
        &self.reference_images
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn scheduled_at(&self) -> Timestamp {
        self.slot.start()
    }

    pub fn ends_at(&self) -> Timestamp {
        self.slot.end()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.slot.duration_minutes()
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn status_notes(&self) -> Option<&str> {
        self.status_notes.as_deref()
    }

    pub fn started_at(&self) -> Option<Timestamp> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    pub fn cancelled_at(&self) -> Option<Timestamp> {
        self.cancelled_at
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn progress_photos(&self) -> &[ProgressPhoto] {
        &self.progress_photos
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Persisted version this copy was loaded at.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// True while the booking occupies the professional's calendar.
    pub fn blocks_schedule(&self) -> bool {
        self.status.is_active()
    }

    /// True if `user_id` is the client or the professional's account.
    pub fn involves(&self, user_id: &UserId) -> bool {
        &self.requester_id == user_id || &self.professional_user_id == user_id
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the booking to `target`, returning the previous status.
    ///
    /// Stamps `started_at`, `completed_at` or `cancelled_at` on the matching
    /// transition. On cancellation `notes` becomes the cancellation reason.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` naming both statuses when the edge is illegal
    pub fn transition_to(
        &mut self,
        target: BookingStatus,
        notes: Option<String>,
    ) -> Result<BookingStatus, DomainError> {
        self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition booking from {} to {}",
                    self.status, target
                ),
            )
            .with_detail("from", self.status.as_str())
            .with_detail("to", target.as_str())
        })?;

        let now = Timestamp::now();
        match target {
            BookingStatus::InProgress => {
                self.started_at.get_or_insert(now);
            }
            BookingStatus::Completed => {
                self.completed_at.get_or_insert(now);
            }
            BookingStatus::Cancelled => {
                self.cancelled_at.get_or_insert(now);
                if notes.is_some() {
                    self.cancellation_reason = notes.clone();
                }
            }
            _ => {}
        }

        let previous = std::mem::replace(&mut self.status, target);
        if notes.is_some() {
            self.status_notes = notes;
        }
        self.updated_at = now;
        Ok(previous)
    }

    /// Cancels a PENDING or CONFIRMED booking.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` for any other status
    pub fn cancel(&mut self, reason: impl Into<String>) -> Result<BookingStatus, DomainError> {
        if !self.status.is_cancellable() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Only PENDING or CONFIRMED bookings can be cancelled, booking is {}",
                    self.status
                ),
            ));
        }
        self.transition_to(BookingStatus::Cancelled, Some(reason.into()))
    }

    /// Appends a progress photo uploaded by the professional.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` unless the booking is project-based and IN_PROGRESS,
    ///   or when the URL is blank
    pub fn append_progress_photo(
        &mut self,
        upload: PhotoUpload,
    ) -> Result<&ProgressPhoto, DomainError> {
        if !self.professional_type.is_project_based() {
            return Err(DomainError::validation(
                "progress_photos",
                "Progress photos are only available for project-based bookings",
            ));
        }
        if self.status != BookingStatus::InProgress {
            return Err(DomainError::validation(
                "progress_photos",
                format!(
                    "Progress photos can only be added while IN_PROGRESS, booking is {}",
                    self.status
                ),
            ));
        }
        if upload.url.trim().is_empty() {
            return Err(DomainError::validation("url", "Photo URL cannot be empty"));
        }

        let now = Timestamp::now();
        self.progress_photos.push(ProgressPhoto {
            id: PhotoId::new(),
            url: upload.url,
            caption: upload.caption,
            uploaded_at: now,
            uploaded_by: self.professional_id,
        });
        self.updated_at = now;
        Ok(&self.progress_photos[self.progress_photos.len() - 1])
    }

    /// Records that the persisted row moved to the next version.
    ///
    /// Called by repositories after a successful optimistic write.
    pub fn advance_version(&mut self) {
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap())
    }

    fn profile(kind: ProfessionalType) -> ProfessionalProfile {
        ProfessionalProfile {
            id: ProfessionalId::new(),
            user_id: UserId::new("pro-user").unwrap(),
            professional_type: kind,
            is_available: true,
        }
    }

    fn request(kind: ProfessionalType, professional: &ProfessionalProfile) -> BookingRequest {
        BookingRequest {
            requester_id: UserId::new("client-1").unwrap(),
            professional_id: professional.id,
            professional_type: kind,
            category: "plumbing".to_string(),
            scheduled_at: at(10),
            duration_minutes: 120,
            address: "1 Main St".to_string(),
            description: "Leaky tap".to_string(),
            estimated_price: 12_000,
            project_details: kind.is_project_based().then(|| ProjectDetails {
                title: "Mural".to_string(),
                scope: "Living room wall".to_string(),
                dimensions: None,
                deadline: None,
            }),
            reference_images: vec![],
        }
    }

    fn booking(kind: ProfessionalType) -> Booking {
        let pro = profile(kind);
        Booking::request(request(kind, &pro), &pro).unwrap()
    }

    fn in_progress(kind: ProfessionalType) -> Booking {
        let mut b = booking(kind);
        b.transition_to(BookingStatus::Confirmed, None).unwrap();
        b.transition_to(BookingStatus::InProgress, None).unwrap();
        b
    }

    #[test]
    fn new_booking_is_pending_with_pending_payment() {
        let b = booking(ProfessionalType::GeneralService);
        assert_eq!(b.status(), BookingStatus::Pending);
        assert_eq!(b.payment_status(), PaymentStatus::Pending);
        assert_eq!(b.ends_at(), at(12));
        assert_eq!(b.version(), 0);
        assert!(b.started_at().is_none() && b.completed_at().is_none());
    }

    #[test]
    fn unavailable_professional_is_rejected() {
        let mut pro = profile(ProfessionalType::GeneralService);
        pro.is_available = false;
        let err = Booking::request(request(ProfessionalType::GeneralService, &pro), &pro)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfessionalUnavailable);
    }

    #[test]
    fn type_mismatch_names_both_types() {
        let pro = profile(ProfessionalType::GeneralService);
        let err = Booking::request(request(ProfessionalType::ProjectBased, &pro), &pro)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProfessionalTypeMismatch);
        assert!(err.message.contains("project_based"));
        assert!(err.message.contains("general_service"));
    }

    #[test]
    fn project_booking_requires_details() {
        let pro = profile(ProfessionalType::ProjectBased);
        let mut req = request(ProfessionalType::ProjectBased, &pro);
        req.project_details = None;
        let err = Booking::request(req, &pro).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn zero_duration_is_rejected() {
        let pro = profile(ProfessionalType::GeneralService);
        let mut req = request(ProfessionalType::GeneralService, &pro);
        req.duration_minutes = 0;
        assert!(Booking::request(req, &pro).is_err());
    }

    #[test]
    fn pending_cannot_jump_to_completed() {
        let mut b = booking(ProfessionalType::GeneralService);
        let err = b.transition_to(BookingStatus::Completed, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(err.message.contains("PENDING") && err.message.contains("COMPLETED"));
        assert_eq!(b.status(), BookingStatus::Pending);
    }

    #[test]
    fn happy_path_stamps_start_and_completion() {
        let mut b = in_progress(ProfessionalType::GeneralService);
        assert!(b.started_at().is_some());
        let previous = b.transition_to(BookingStatus::Completed, None).unwrap();
        assert_eq!(previous, BookingStatus::InProgress);
        assert!(b.started_at().is_some());
        assert!(b.completed_at().is_some());
        assert!(b.cancelled_at().is_none());
    }

    #[test]
    fn cancel_records_reason_and_timestamp() {
        let mut b = booking(ProfessionalType::GeneralService);
        b.cancel("Found someone closer").unwrap();
        assert_eq!(b.status(), BookingStatus::Cancelled);
        assert!(b.cancelled_at().is_some());
        assert_eq!(b.cancellation_reason(), Some("Found someone closer"));
    }

    #[test]
    fn cancel_is_refused_once_work_started() {
        let mut b = in_progress(ProfessionalType::GeneralService);
        let err = b.cancel("too late").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(b.cancelled_at().is_none());
    }

    #[test]
    fn progress_photo_requires_project_in_progress() {
        let mut general = in_progress(ProfessionalType::GeneralService);
        assert!(general
            .append_progress_photo(PhotoUpload::new("https://img/1.jpg", None))
            .is_err());

        let mut pending_project = booking(ProfessionalType::ProjectBased);
        assert!(pending_project
            .append_progress_photo(PhotoUpload::new("https://img/1.jpg", None))
            .is_err());
    }

    #[test]
    fn progress_photos_keep_order_and_uploader() {
        let mut b = in_progress(ProfessionalType::ProjectBased);
        b.append_progress_photo(PhotoUpload::new("https://img/1.jpg", Some("sketch".into())))
            .unwrap();
        b.append_progress_photo(PhotoUpload::new("https://img/2.jpg", None))
            .unwrap();

        let photos = b.progress_photos();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].url, "https://img/1.jpg");
        assert_eq!(photos[0].caption.as_deref(), Some("sketch"));
        assert_eq!(photos[1].url, "https://img/2.jpg");
        assert!(photos.iter().all(|p| &p.uploaded_by == b.professional_id()));
    }

    #[test]
    fn only_active_bookings_block_the_schedule() {
        let mut b = booking(ProfessionalType::GeneralService);
        assert!(b.blocks_schedule());
        b.transition_to(BookingStatus::Rejected, None).unwrap();
        assert!(!b.blocks_schedule());
    }

    /// Legal moves that bring a fresh PENDING booking to `status`.
    fn path_to(status: BookingStatus) -> &'static [BookingStatus] {
        use BookingStatus::*;
        match status {
            Pending => &[],
            Confirmed => &[Confirmed],
            InProgress => &[Confirmed, InProgress],
            Completed => &[Confirmed, InProgress, Completed],
            Disputed => &[Confirmed, InProgress, Disputed],
            Resolved => &[Confirmed, InProgress, Disputed, Resolved],
            Cancelled => &[Cancelled],
            Rejected => &[Rejected],
        }
    }

    #[test]
    fn all_64_status_pairs_through_the_aggregate() {
        use crate::domain::foundation::ErrorKind;
        use BookingStatus::*;

        let legal = [
            (Pending, Confirmed),
            (Pending, Rejected),
            (Pending, Cancelled),
            (Confirmed, InProgress),
            (Confirmed, Cancelled),
            (InProgress, Completed),
            (InProgress, Disputed),
            (Disputed, Resolved),
        ];

        for from in BookingStatus::ALL {
            for to in BookingStatus::ALL {
                let mut b = booking(ProfessionalType::GeneralService);
                for step in path_to(from) {
                    b.transition_to(*step, None).unwrap();
                }
                assert_eq!(b.status(), from);

                let result = b.transition_to(to, None);
                if legal.contains(&(from, to)) {
                    assert_eq!(result.unwrap(), from, "{} -> {}", from, to);
                    assert_eq!(b.status(), to);
                } else {
                    let err = result.unwrap_err();
                    assert_eq!(err.kind(), ErrorKind::BadRequest, "{} -> {}", from, to);
                    assert!(err.message.contains(from.as_str()), "{}", err.message);
                    assert!(err.message.contains(to.as_str()), "{}", err.message);
                    assert_eq!(b.status(), from);
                }
            }
        }
    }
}
