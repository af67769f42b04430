pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod ports;
pub mod services;
pub mod store;

use std::sync::Arc;

use ports::{BookingRepository, OrganizerRepository, PriceRepository};
use services::{
    booking::BookingService,
    onboarding::OnboardingService,
    pricing::{PriceCalendar, PriceResolver},
};

/// Shared application state available to all handlers via axum's State extractor.
/// Built once at startup; handlers never construct repositories themselves.
#[derive(Clone)]
pub struct AppState {
    pub organizers: Arc<dyn OrganizerRepository>,
    pub onboarding: Arc<OnboardingService>,
    pub resolver: Arc<PriceResolver>,
    pub calendar: Arc<PriceCalendar>,
    pub bookings: Arc<BookingService>,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(
        organizers: Arc<dyn OrganizerRepository>,
        prices: Arc<dyn PriceRepository>,
        bookings: Arc<dyn BookingRepository>,
        jwt_secret: String,
    ) -> Self {
        let resolver = Arc::new(PriceResolver::new(prices.clone()));
        Self {
            onboarding: Arc::new(OnboardingService::new(organizers.clone())),
            calendar: Arc::new(PriceCalendar::new(prices)),
            bookings: Arc::new(BookingService::new(organizers.clone(), bookings, resolver.clone())),
            resolver,
            organizers,
            jwt_secret,
        }
    }

    /// Wires every port to one in-process store.
    pub fn in_memory(jwt_secret: String) -> Self {
        let store = Arc::new(store::memory::MemoryStore::new());
        Self::new(store.clone(), store.clone(), store, jwt_secret)
    }
}

impl axum::extract::FromRef<AppState> for Arc<OnboardingService> {
    fn from_ref(state: &AppState) -> Self {
        state.onboarding.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<PriceCalendar> {
    fn from_ref(state: &AppState) -> Self {
        state.calendar.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<BookingService> {
    fn from_ref(state: &AppState) -> Self {
        state.bookings.clone()
    }
}
