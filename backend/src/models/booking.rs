use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use super::pricing::PriceSet;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "booking_slot", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingSlot {
    Day,
    Night,
    Full,
}

impl FromStr for BookingSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(BookingSlot::Day),
            "night" => Ok(BookingSlot::Night),
            "full" => Ok(BookingSlot::Full),
            other => Err(format!(
                "event_type must be one of 'day', 'night', 'full', got '{}'",
                other
            )),
        }
    }
}

impl fmt::Display for BookingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BookingSlot::Day => "day",
            BookingSlot::Night => "night",
            BookingSlot::Full => "full",
        })
    }
}

/// A persisted booking. `prices` and `total_price` are the snapshot taken at
/// creation and are never rewritten.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub user_id: Uuid,
    pub booking_date: time::Date,
    pub event_type: BookingSlot,
    pub event_name: String,
    #[sqlx(flatten)]
    pub prices: PriceSet,
    pub total_price: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub booked_at: OffsetDateTime,
}

impl Booking {
    pub fn new(
        organizer_id: Uuid,
        user_id: Uuid,
        booking_date: time::Date,
        event_type: BookingSlot,
        event_name: String,
        prices: PriceSet,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            organizer_id,
            user_id,
            booking_date,
            event_type,
            event_name,
            total_price: prices.for_slot(event_type),
            prices,
            booked_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Incoming booking. `event_type` stays a string so an unknown slot surfaces
/// as a validation error rather than a body rejection. Any client-side price
/// is ignored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub organizer_id: Uuid,
    pub date: time::Date,
    pub event_type: String,
    #[validate(length(min = 1, max = 200, message = "event_name is required"))]
    pub event_name: String,
}
