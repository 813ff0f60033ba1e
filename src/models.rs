use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Row of the `classes` table. `date_time` carries no zone; it is in the
/// canonical timezone by convention.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FitnessClass {
    pub id: i64,
    pub name: String,
    pub date_time: NaiveDateTime,
    pub instructor: String,
    pub available_slots: i64,
}

#[derive(Debug, Clone)]
pub struct NewClass {
    pub name: String,
    pub date_time: NaiveDateTime,
    pub instructor: String,
    pub available_slots: i64,
}

/// A class as presented to a caller, with its date-time converted to the
/// requested timezone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassOut {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, format = "date-time", example = "2024-01-01T06:00:00+05:30")]
    pub date_time: DateTime<FixedOffset>,
    pub instructor: String,
    pub available_slots: i64,
}

impl ClassOut {
    pub fn from_class(class: FitnessClass, date_time: DateTime<FixedOffset>) -> Self {
        Self {
            id: class.id,
            name: class.name,
            date_time,
            instructor: class.instructor,
            available_slots: class.available_slots,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow, ToSchema)]
pub struct Booking {
    pub id: i64,
    pub class_id: i64,
    pub client_name: String,
    #[schema(example = "alice@example.com")]
    pub client_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingRequest {
    pub class_id: i64,
    pub client_name: String,
    #[schema(example = "alice@example.com")]
    pub client_email: String,
}
