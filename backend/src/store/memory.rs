//! In-process store. Backs the test suite and local experiments; nothing here
//! survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        booking::Booking,
        common::DateRangeParams,
        organizer::{OnboardingState, Organizer},
        pricing::{DateOverride, WeeklyPriceTemplate},
    },
    ports::{BookingRepository, OrganizerRepository, PriceRepository},
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    organizers: RwLock<HashMap<Uuid, Organizer>>,
    overrides: RwLock<HashMap<(Uuid, time::Date), DateOverride>>,
    templates: RwLock<HashMap<Uuid, WeeklyPriceTemplate>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

fn sorted_organizers<'a>(items: impl Iterator<Item = &'a Organizer>) -> Vec<Organizer> {
    let mut out: Vec<Organizer> = items.cloned().collect();
    out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    out
}

#[async_trait]
impl OrganizerRepository for MemoryStore {
    async fn create(&self, organizer: &Organizer) -> Result<Organizer> {
        let mut map = self.organizers.write().await;
        if map.values().any(|o| o.email.eq_ignore_ascii_case(&organizer.email)) {
            return Err(AppError::Conflict(format!(
                "An organizer with email {} already exists",
                organizer.email
            )));
        }
        map.insert(organizer.id, organizer.clone());
        Ok(organizer.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organizer>> {
        Ok(self.organizers.read().await.get(&id).cloned())
    }

    async fn update(&self, organizer: &Organizer) -> Result<Organizer> {
        let mut map = self.organizers.write().await;
        let slot = map
            .get_mut(&organizer.id)
            .ok_or_else(|| AppError::NotFound(format!("Organizer {} not found", organizer.id)))?;
        *slot = organizer.clone();
        Ok(organizer.clone())
    }

    async fn list_by_state(
        &self,
        state: OnboardingState,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Organizer>> {
        let map = self.organizers.read().await;
        let items = sorted_organizers(map.values().filter(|o| o.state == state));
        Ok(page(items, limit, offset))
    }

    async fn list_bookable(&self, limit: i64, offset: i64) -> Result<Vec<Organizer>> {
        let map = self.organizers.read().await;
        let items = sorted_organizers(map.values().filter(|o| o.is_bookable()));
        Ok(page(items, limit, offset))
    }
}

#[async_trait]
impl PriceRepository for MemoryStore {
    async fn find_override(
        &self,
        organizer_id: Uuid,
        date: time::Date,
    ) -> Result<Option<DateOverride>> {
        Ok(self.overrides.read().await.get(&(organizer_id, date)).cloned())
    }

    async fn upsert_override(&self, entry: &DateOverride) -> Result<DateOverride> {
        let mut map = self.overrides.write().await;
        let key = (entry.organizer_id, entry.date);
        let stored = match map.get(&key) {
            // An existing row keeps its id, as with ON CONFLICT DO UPDATE.
            Some(existing) => DateOverride {
                id: existing.id,
                ..entry.clone()
            },
            None => entry.clone(),
        };
        map.insert(key, stored.clone());
        Ok(stored)
    }

    async fn delete_override(&self, organizer_id: Uuid, date: time::Date) -> Result<()> {
        self.overrides
            .write()
            .await
            .remove(&(organizer_id, date))
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Override not found".into()))
    }

    async fn find_template(&self, organizer_id: Uuid) -> Result<Option<WeeklyPriceTemplate>> {
        Ok(self.templates.read().await.get(&organizer_id).cloned())
    }

    async fn replace_template(
        &self,
        template: &WeeklyPriceTemplate,
    ) -> Result<WeeklyPriceTemplate> {
        self.templates
            .write()
            .await
            .insert(template.organizer_id, template.clone());
        Ok(template.clone())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create(&self, booking: &Booking) -> Result<Booking> {
        self.bookings.write().await.insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(self.bookings.read().await.get(&id).cloned())
    }

    async fn list_by_organizer(
        &self,
        organizer_id: Uuid,
        range: &DateRangeParams,
    ) -> Result<Vec<Booking>> {
        let map = self.bookings.read().await;
        let mut items: Vec<Booking> = map
            .values()
            .filter(|b| b.organizer_id == organizer_id && range.contains(b.booking_date))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.booking_date
                .cmp(&b.booking_date)
                .then(a.booked_at.cmp(&b.booked_at))
        });
        Ok(page(items, range.limit(), range.offset()))
    }
}
