//! Storage seams. Handlers and services only see these traits; `main` wires
//! the Postgres implementations and tests wire the in-memory ones.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    booking::Booking,
    common::DateRangeParams,
    organizer::{OnboardingState, Organizer},
    pricing::{DateOverride, WeeklyPriceTemplate},
};

#[async_trait]
pub trait OrganizerRepository: Send + Sync {
    async fn create(&self, organizer: &Organizer) -> Result<Organizer>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organizer>>;
    /// Whole-record write; last writer wins.
    async fn update(&self, organizer: &Organizer) -> Result<Organizer>;
    async fn list_by_state(
        &self,
        state: OnboardingState,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Organizer>>;
    /// Approved, unblocked organizers, oldest first.
    async fn list_bookable(&self, limit: i64, offset: i64) -> Result<Vec<Organizer>>;
}

#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn find_override(
        &self,
        organizer_id: Uuid,
        date: time::Date,
    ) -> Result<Option<DateOverride>>;
    /// Inserts or replaces the single override for `(organizer_id, date)`.
    async fn upsert_override(&self, entry: &DateOverride) -> Result<DateOverride>;
    async fn delete_override(&self, organizer_id: Uuid, date: time::Date) -> Result<()>;
    async fn find_template(&self, organizer_id: Uuid) -> Result<Option<WeeklyPriceTemplate>>;
    async fn replace_template(&self, template: &WeeklyPriceTemplate) -> Result<WeeklyPriceTemplate>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>>;
    async fn list_by_organizer(
        &self,
        organizer_id: Uuid,
        range: &DateRangeParams,
    ) -> Result<Vec<Booking>>;
}
