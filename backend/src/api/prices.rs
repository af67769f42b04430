use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    auth::{AuthUser, Role},
    error::{AppError, Result},
    guard,
    models::pricing::{
        DateOverride, OverrideDateQuery, PriceQuery, ResolvedPrice, UpsertOverrideRequest,
        WeeklyPriceTemplate, WeeklyPrices,
    },
    services::pricing::PriceCalendar,
    AppState,
};

/// Public quote. Only venues passing the visibility gate resolve.
pub async fn resolve(
    State(state): State<AppState>,
    Query(q): Query<PriceQuery>,
) -> Result<Json<ResolvedPrice>> {
    guard::bookable_organizer(state.organizers.as_ref(), q.organizer_id).await?;

    let resolved = state
        .resolver
        .resolve(q.organizer_id, q.date)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No price configured for {}", q.date)))?;

    Ok(Json(resolved))
}

pub async fn upsert_override(
    State(calendar): State<Arc<PriceCalendar>>,
    auth: AuthUser,
    Json(req): Json<UpsertOverrideRequest>,
) -> Result<Json<DateOverride>> {
    auth.require(Role::is_organizer)?;
    let saved = calendar.set_override(auth.id, req).await?;
    Ok(Json(saved))
}

pub async fn delete_override(
    State(calendar): State<Arc<PriceCalendar>>,
    auth: AuthUser,
    Query(q): Query<OverrideDateQuery>,
) -> Result<Json<serde_json::Value>> {
    auth.require(Role::is_organizer)?;
    calendar.delete_override(auth.id, q.date).await?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

pub async fn replace_template(
    State(calendar): State<Arc<PriceCalendar>>,
    auth: AuthUser,
    Json(prices): Json<WeeklyPrices>,
) -> Result<Json<WeeklyPriceTemplate>> {
    auth.require(Role::is_organizer)?;
    let saved = calendar.replace_template(auth.id, prices).await?;
    Ok(Json(saved))
}

pub async fn get_template(
    State(calendar): State<Arc<PriceCalendar>>,
    auth: AuthUser,
) -> Result<Json<WeeklyPriceTemplate>> {
    auth.require(Role::is_organizer)?;
    let template = calendar.template(auth.id).await?;
    Ok(Json(template))
}
