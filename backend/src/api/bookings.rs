use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::{AppError, Result},
    models::{
        booking::{Booking, CreateBookingRequest},
        common::DateRangeParams,
    },
    services::booking::BookingService,
};

pub async fn create(
    State(bookings): State<Arc<BookingService>>,
    auth: AuthUser,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<Booking>> {
    auth.require(Role::can_book)?;
    let booking = bookings.create_booking(auth.id, body).await?;
    Ok(Json(booking))
}

pub async fn get_one(
    State(bookings): State<Arc<BookingService>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>> {
    let booking = bookings.get(id).await?;

    let allowed = match auth.role {
        Role::Admin => true,
        Role::User => booking.user_id == auth.id,
        Role::Organizer => booking.organizer_id == auth.id,
        Role::Service => false,
    };
    if !allowed {
        return Err(AppError::Forbidden);
    }

    Ok(Json(booking))
}

pub async fn list_for_organizer(
    State(bookings): State<Arc<BookingService>>,
    auth: AuthUser,
    Query(range): Query<DateRangeParams>,
) -> Result<Json<Vec<Booking>>> {
    auth.require(Role::is_organizer)?;
    let rows = bookings.list_for_organizer(auth.id, &range).await?;
    Ok(Json(rows))
}
