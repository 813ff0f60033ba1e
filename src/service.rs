use chrono_tz::Tz;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::{BookOutcome, Database};
use crate::models::{Booking, BookingRequest, ClassOut};
use crate::timezone::{convert, resolve_timezone};
use crate::validation::{validate_client_name, validate_email};

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("Class not found")]
    ClassNotFound(i64),
    #[error("No available slots")]
    NoSlotsAvailable(i64),
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Client name must not be empty")]
    InvalidName,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct BookingService {
    db: Database,
    canonical: Tz,
}

impl BookingService {
    pub fn new(db: Database, canonical: Tz) -> Self {
        Self { db, canonical }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Lists every class with its date-time expressed in `timezone`.
    pub async fn list_classes(&self, timezone: &str) -> Result<Vec<ClassOut>, BookingError> {
        let target = resolve_timezone(timezone)?;
        let classes = self.db.fetch_classes().await?;
        Ok(classes
            .into_iter()
            .map(|class| {
                let date_time = convert(class.date_time, self.canonical, target);
                ClassOut::from_class(class, date_time)
            })
            .collect())
    }

    pub async fn book_class(&self, request: &BookingRequest) -> Result<Booking, BookingError> {
        let client_name = validate_client_name(&request.client_name)?;
        let client_email = validate_email(&request.client_email)?;

        match self
            .db
            .book(request.class_id, client_name, client_email)
            .await?
        {
            BookOutcome::Booked(booking) => {
                info!(
                    booking_id = booking.id,
                    class_id = booking.class_id,
                    "Class booked"
                );
                Ok(booking)
            }
            BookOutcome::ClassNotFound => {
                warn!(class_id = request.class_id, "Booking rejected: class not found");
                Err(BookingError::ClassNotFound(request.class_id))
            }
            BookOutcome::NoSlotsAvailable => {
                warn!(class_id = request.class_id, "Booking rejected: no slots left");
                Err(BookingError::NoSlotsAvailable(request.class_id))
            }
        }
    }

    pub async fn bookings_for(&self, email: &str) -> Result<Vec<Booking>, BookingError> {
        let email = validate_email(email)?;
        Ok(self.db.fetch_bookings_by_email(email).await?)
    }
}
