pub mod admin;
pub mod bookings;
pub mod organizers;
pub mod prices;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        // Organizer onboarding (identity service + organizer)
        .route("/organizers", post(organizers::register))
        .route("/organizer/{id}/verify-email", patch(organizers::verify_email))
        .route("/organizer/profile", post(organizers::submit_profile))
        .route("/organizer/me", get(organizers::me))
        .route("/organizer/bookings", get(bookings::list_for_organizer))
        // Admin moderation
        .route("/organizer/{id}/approve", patch(admin::approve))
        .route("/organizer/{id}/disapprove", patch(admin::disapprove))
        .route("/organizer/{id}/block", patch(admin::block))
        .route("/organizer/{id}/unblock", patch(admin::unblock))
        .route("/admin/organizers/pending", get(admin::pending))
        // Discovery
        .route("/venues", get(organizers::list_venues))
        // Pricing
        .route(
            "/events/prices",
            get(prices::resolve)
                .post(prices::upsert_override)
                .delete(prices::delete_override),
        )
        .route("/default-prices", get(prices::get_template).post(prices::replace_template))
        // Bookings
        .route("/bookings", post(bookings::create))
        .route("/bookings/{id}", get(bookings::get_one))
        .with_state(state)
}
