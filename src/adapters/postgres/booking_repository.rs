//! PostgreSQL implementation of BookingRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::{db_error, from_document, to_document, version_param};
use crate::domain::booking::{Booking, BookingStatus, StatusFilter};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, ProfessionalId, UserId};
use crate::domain::scheduling::TimeSlot;
use crate::ports::BookingRepository;

#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn status_names(filter: StatusFilter) -> Vec<&'static str> {
    BookingStatus::ALL
        .iter()
        .filter(|s| filter.matches(**s))
        .map(BookingStatus::as_str)
        .collect()
}

fn rows_to_bookings(rows: Vec<sqlx::postgres::PgRow>) -> Result<Vec<Booking>, DomainError> {
    rows.into_iter()
        .map(|row| {
            let document = row
                .try_get("document")
                .map_err(|e| db_error("read booking row", e))?;
            from_document(document)
        })
        .collect()
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, requester_id, professional_id, status,
                scheduled_at, ends_at, version, document
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(booking.requester_id().as_str())
        .bind(booking.professional_id().as_uuid())
        .bind(booking.status().as_str())
        .bind(booking.scheduled_at().as_datetime())
        .bind(booking.ends_at().as_datetime())
        .bind(version_param(booking.version()))
        .bind(to_document(booking)?)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert booking", e))?;

        Ok(())
    }

    async fn update(&self, booking: &mut Booking) -> Result<(), DomainError> {
        let expected = booking.version();
        let mut next = booking.clone();
        next.advance_version();

        let result = sqlx::query(
            r#"
            UPDATE bookings SET
                status = $3,
                version = $4,
                document = $5
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(booking.id().as_uuid())
        .bind(version_param(expected))
        .bind(next.status().as_str())
        .bind(version_param(next.version()))
        .bind(to_document(&next)?)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update booking", e))?;

        if result.rows_affected() == 0 {
            return match self.find_by_id(booking.id()).await? {
                Some(_) => Err(DomainError::concurrent_modification("Booking", booking.id())),
                None => Err(DomainError::new(
                    ErrorCode::BookingNotFound,
                    format!("Booking not found: {}", booking.id()),
                )),
            };
        }

        *booking = next;
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let row = sqlx::query("SELECT document FROM bookings WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("fetch booking", e))?;

        match row {
            Some(row) => {
                let document = row
                    .try_get("document")
                    .map_err(|e| db_error("read booking row", e))?;
                Ok(Some(from_document(document)?))
            }
            None => Ok(None),
        }
    }

    async fn find_active_for_professional(
        &self,
        professional_id: &ProfessionalId,
        window: &TimeSlot,
    ) -> Result<Vec<Booking>, DomainError> {
        // Half-open overlap: existing.start < window.end AND window.start < existing.end
        let rows = sqlx::query(
            r#"
            SELECT document FROM bookings
            WHERE professional_id = $1
              AND status = ANY($2)
              AND scheduled_at < $4
              AND $3 < ends_at
            "#,
        )
        .bind(professional_id.as_uuid())
        .bind(status_names(StatusFilter::Active))
        .bind(window.start().as_datetime())
        .bind(window.end().as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("query professional schedule", e))?;

        rows_to_bookings(rows)
    }

    async fn list_by_requester(
        &self,
        requester_id: &UserId,
        filter: StatusFilter,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT document FROM bookings
            WHERE requester_id = $1 AND status = ANY($2)
            ORDER BY scheduled_at DESC
            "#,
        )
        .bind(requester_id.as_str())
        .bind(status_names(filter))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list bookings by requester", e))?;

        rows_to_bookings(rows)
    }

    async fn list_by_professional(
        &self,
        professional_id: &ProfessionalId,
        filter: StatusFilter,
    ) -> Result<Vec<Booking>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT document FROM bookings
            WHERE professional_id = $1 AND status = ANY($2)
            ORDER BY scheduled_at DESC
            "#,
        )
        .bind(professional_id.as_uuid())
        .bind(status_names(filter))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list bookings by professional", e))?;

        rows_to_bookings(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filters_expand_to_stored_names() {
        assert_eq!(
            status_names(StatusFilter::Active),
            vec!["PENDING", "CONFIRMED", "IN_PROGRESS"]
        );
        assert_eq!(status_names(StatusFilter::Past).len(), 5);
        assert_eq!(status_names(StatusFilter::All).len(), 8);
    }
}
