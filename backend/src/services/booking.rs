use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    guard,
    models::{
        booking::{Booking, BookingSlot, CreateBookingRequest},
        common::DateRangeParams,
    },
    ports::{BookingRepository, OrganizerRepository},
    services::pricing::PriceResolver,
};

pub struct BookingService {
    organizers: Arc<dyn OrganizerRepository>,
    bookings: Arc<dyn BookingRepository>,
    resolver: Arc<PriceResolver>,
}

impl BookingService {
    pub fn new(
        organizers: Arc<dyn OrganizerRepository>,
        bookings: Arc<dyn BookingRepository>,
        resolver: Arc<PriceResolver>,
    ) -> Self {
        Self {
            organizers,
            bookings,
            resolver,
        }
    }

    /// Books a venue for `user_id`. The price is re-resolved here and frozen
    /// into the booking.
    ///
    /// There is no slot-conflict check: two bookings for the same organizer,
    /// date and slot both succeed.
    pub async fn create_booking(
        &self,
        user_id: Uuid,
        req: CreateBookingRequest,
    ) -> Result<Booking> {
        req.validate()?;
        let slot: BookingSlot = req.event_type.parse().map_err(AppError::BadRequest)?;

        guard::bookable_organizer(self.organizers.as_ref(), req.organizer_id).await?;

        let resolved = self
            .resolver
            .resolve(req.organizer_id, req.date)
            .await?
            .ok_or(AppError::PriceUnavailable(req.date))?;

        let booking = self
            .bookings
            .create(&Booking::new(
                req.organizer_id,
                user_id,
                req.date,
                slot,
                req.event_name.trim().to_string(),
                resolved.prices,
            ))
            .await?;

        tracing::info!(
            booking_id = %booking.id,
            organizer_id = %booking.organizer_id,
            date = %booking.booking_date,
            slot = %booking.event_type,
            source = ?resolved.source,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn get(&self, id: Uuid) -> Result<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    pub async fn list_for_organizer(
        &self,
        organizer_id: Uuid,
        range: &DateRangeParams,
    ) -> Result<Vec<Booking>> {
        if let (Some(start), Some(end)) = (range.start_date, range.end_date) {
            if end < start {
                return Err(AppError::BadRequest("end_date must be >= start_date".into()));
            }
        }
        self.bookings.list_by_organizer(organizer_id, range).await
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::{
        models::{
            organizer::{OnboardingState, Organizer},
            pricing::UpsertOverrideRequest,
        },
        ports::PriceRepository,
        services::{
            fixtures::{prices, profile, week},
            pricing::PriceCalendar,
        },
        store::memory::MemoryStore,
    };

    struct Harness {
        organizers: Arc<dyn OrganizerRepository>,
        calendar: PriceCalendar,
        bookings: BookingService,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::new());
        let organizers: Arc<dyn OrganizerRepository> = store.clone();
        let price_repo: Arc<dyn PriceRepository> = store.clone();
        let resolver = Arc::new(PriceResolver::new(price_repo.clone()));
        Harness {
            organizers: organizers.clone(),
            calendar: PriceCalendar::new(price_repo),
            bookings: BookingService::new(organizers, store, resolver),
        }
    }

    async fn organizer(h: &Harness, state: OnboardingState) -> Organizer {
        let mut o = Organizer::new(
            "Hall".into(),
            format!("{}@test.local", Uuid::new_v4()),
            state,
        );
        o.profile = Some(profile());
        h.organizers.create(&o).await.unwrap()
    }

    fn request(organizer_id: Uuid, event_type: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            organizer_id,
            date: date!(2024 - 06 - 03),
            event_type: event_type.into(),
            event_name: "Reception".into(),
        }
    }

    #[tokio::test]
    async fn booking_snapshot_survives_price_edits() {
        let h = harness();
        let o = organizer(&h, OnboardingState::Approved).await;
        h.calendar
            .replace_template(o.id, week(prices(100.0, 150.0, 220.0)))
            .await
            .unwrap();
        h.calendar
            .set_override(
                o.id,
                UpsertOverrideRequest {
                    date: date!(2024 - 06 - 03),
                    prices: Some(prices(120.0, 170.0, 250.0)),
                    label: None,
                },
            )
            .await
            .unwrap();

        let booking = h
            .bookings
            .create_booking(Uuid::new_v4(), request(o.id, "day"))
            .await
            .unwrap();
        assert_eq!(booking.prices, prices(120.0, 170.0, 250.0));
        assert_eq!(booking.total_price, 120.0);

        h.calendar
            .set_override(
                o.id,
                UpsertOverrideRequest {
                    date: date!(2024 - 06 - 03),
                    prices: Some(prices(90.0, 140.0, 200.0)),
                    label: None,
                },
            )
            .await
            .unwrap();
        h.calendar
            .replace_template(o.id, week(prices(1.0, 1.0, 1.0)))
            .await
            .unwrap();

        let stored = h.bookings.get(booking.id).await.unwrap();
        assert_eq!(stored.prices, prices(120.0, 170.0, 250.0));
        assert_eq!(stored.total_price, 120.0);
    }

    #[tokio::test]
    async fn missing_price_is_unavailable() {
        let h = harness();
        let o = organizer(&h, OnboardingState::Approved).await;
        let err = h
            .bookings
            .create_booking(Uuid::new_v4(), request(o.id, "full"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PriceUnavailable(d) if d == date!(2024 - 06 - 03)));
    }

    #[tokio::test]
    async fn unknown_slot_is_a_validation_failure() {
        let h = harness();
        let o = organizer(&h, OnboardingState::Approved).await;
        let err = h
            .bookings
            .create_booking(Uuid::new_v4(), request(o.id, "evening"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let mut blank = request(o.id, "day");
        blank.event_name = String::new();
        let err = h.bookings.create_booking(Uuid::new_v4(), blank).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn unapproved_venue_cannot_be_booked() {
        let h = harness();
        let o = organizer(&h, OnboardingState::ProfileSubmitted).await;
        h.calendar
            .replace_template(o.id, week(prices(100.0, 150.0, 220.0)))
            .await
            .unwrap();
        let err = h
            .bookings
            .create_booking(Uuid::new_v4(), request(o.id, "day"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn same_slot_can_be_booked_twice() {
        let h = harness();
        let o = organizer(&h, OnboardingState::Approved).await;
        h.calendar
            .replace_template(o.id, week(prices(100.0, 150.0, 220.0)))
            .await
            .unwrap();

        let (a, b) = tokio::join!(
            h.bookings.create_booking(Uuid::new_v4(), request(o.id, "night")),
            h.bookings.create_booking(Uuid::new_v4(), request(o.id, "night")),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.id, b.id);

        let listed = h
            .bookings
            .list_for_organizer(o.id, &DateRangeParams::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
    }
}
