//! AppendProgressPhotoHandler - attaches a progress photo to project work.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, PhotoUpload, ProgressPhoto};
use crate::domain::foundation::{BookingId, CommandMetadata};
use crate::ports::BookingRepository;

#[derive(Debug, Clone)]
pub struct AppendProgressPhotoCommand {
    pub booking_id: BookingId,
    pub url: String,
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppendProgressPhotoResult {
    pub booking: Booking,
    pub photo: ProgressPhoto,
}

pub struct AppendProgressPhotoHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl AppendProgressPhotoHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(
        &self,
        cmd: AppendProgressPhotoCommand,
        metadata: CommandMetadata,
    ) -> Result<AppendProgressPhotoResult, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.booking_id)
            .await?
            .ok_or(BookingError::NotFound(cmd.booking_id))?;

        let photo = booking
            .append_progress_photo(PhotoUpload::new(cmd.url, cmd.caption))?
            .clone();
        self.bookings.update(&mut booking).await?;

        tracing::info!(
            booking_id = %booking.id(),
            photo_id = %photo.id,
            correlation_id = %metadata.correlation_id(),
            "Progress photo added"
        );
        Ok(AppendProgressPhotoResult { booking, photo })
    }
}
