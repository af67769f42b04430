use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, Weekday};
use uuid::Uuid;
use validator::Validate;

use super::booking::BookingSlot;

/// Day, night and full-day prices for a single date or weekday.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PriceSet {
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub day_price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub night_price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub full_day_price: f64,
}

impl PriceSet {
    pub fn for_slot(&self, slot: BookingSlot) -> f64 {
        match slot {
            BookingSlot::Day => self.day_price,
            BookingSlot::Night => self.night_price,
            BookingSlot::Full => self.full_day_price,
        }
    }
}

/// A full week of default prices. Every weekday is required; serde rejects
/// partial payloads before they reach the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeeklyPrices {
    #[serde(rename = "Monday")]
    #[validate(nested)]
    pub monday: PriceSet,
    #[serde(rename = "Tuesday")]
    #[validate(nested)]
    pub tuesday: PriceSet,
    #[serde(rename = "Wednesday")]
    #[validate(nested)]
    pub wednesday: PriceSet,
    #[serde(rename = "Thursday")]
    #[validate(nested)]
    pub thursday: PriceSet,
    #[serde(rename = "Friday")]
    #[validate(nested)]
    pub friday: PriceSet,
    #[serde(rename = "Saturday")]
    #[validate(nested)]
    pub saturday: PriceSet,
    #[serde(rename = "Sunday")]
    #[validate(nested)]
    pub sunday: PriceSet,
}

impl WeeklyPrices {
    /// Same prices on all seven days.
    pub fn uniform(prices: PriceSet) -> Self {
        Self {
            monday: prices,
            tuesday: prices,
            wednesday: prices,
            thursday: prices,
            friday: prices,
            saturday: prices,
            sunday: prices,
        }
    }

    pub fn for_weekday(&self, weekday: Weekday) -> &PriceSet {
        match weekday {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }
}

/// Canonical English name of a weekday, independent of any locale.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Monday",
        Weekday::Tuesday => "Tuesday",
        Weekday::Wednesday => "Wednesday",
        Weekday::Thursday => "Thursday",
        Weekday::Friday => "Friday",
        Weekday::Saturday => "Saturday",
        Weekday::Sunday => "Sunday",
    }
}

/// An organizer's default price schedule (at most one per organizer).
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyPriceTemplate {
    pub organizer_id: Uuid,
    pub prices: WeeklyPrices,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A per-date entry in an organizer's price calendar. `prices` may be absent
/// when the entry only carries a label; resolution then falls through to the
/// weekly template.
#[derive(Debug, Clone, Serialize)]
pub struct DateOverride {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub date: time::Date,
    pub prices: Option<PriceSet>,
    pub label: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    Override,
    Template,
}

/// The outcome of a successful price resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPrice {
    pub organizer_id: Uuid,
    pub date: time::Date,
    pub weekday: &'static str,
    pub source: PriceSource,
    pub prices: PriceSet,
}

/// `prices` is validated by the caller when present.
#[derive(Debug, Deserialize, Validate)]
pub struct UpsertOverrideRequest {
    pub date: time::Date,
    pub prices: Option<PriceSet>,
    #[validate(length(min = 1, max = 120))]
    pub label: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub organizer_id: Uuid,
    pub date: time::Date,
}

#[derive(Debug, Deserialize)]
pub struct OverrideDateQuery {
    pub date: time::Date,
}
