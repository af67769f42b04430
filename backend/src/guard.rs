//! Organizer gate checks shared by handlers, services and the auth extractor.
//!
//! Venues that fail the visibility predicate are reported as `NotFound`
//! (we don't reveal that an unapproved venue exists). Blocked accounts get
//! an explicit `Blocked`.

use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::organizer::Organizer,
    ports::OrganizerRepository,
};

/// Loads an organizer that may act on its own account.
pub async fn active_organizer(organizers: &dyn OrganizerRepository, id: Uuid) -> Result<Organizer> {
    let organizer = organizers
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Organizer not found".into()))?;

    if organizer.is_blocked {
        tracing::warn!(organizer_id = %id, "blocked organizer rejected");
        return Err(AppError::Blocked);
    }
    Ok(organizer)
}

/// Loads an organizer whose venue may be priced and booked by the public.
/// The predicate is evaluated against the freshly read record every time.
pub async fn bookable_organizer(
    organizers: &dyn OrganizerRepository,
    id: Uuid,
) -> Result<Organizer> {
    let organizer = active_organizer(organizers, id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound("Venue not found".into()),
            other => other,
        })?;

    if !organizer.is_bookable() {
        tracing::warn!(organizer_id = %id, state = ?organizer.state, "venue is not bookable");
        return Err(AppError::NotFound("Venue not found".into()));
    }
    Ok(organizer)
}
