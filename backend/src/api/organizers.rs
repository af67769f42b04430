use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::Result,
    models::{
        common::PaginationParams,
        organizer::{OrganizerStatus, RegisterOrganizerRequest, VenueProfile, VenueSummary},
    },
    services::onboarding::OnboardingService,
};

pub async fn register(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Json(req): Json<RegisterOrganizerRequest>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_identity_service)?;
    let organizer = onboarding.register(req).await?;
    Ok(Json(organizer.into()))
}

pub async fn verify_email(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_identity_service)?;
    let organizer = onboarding.verify_email(id).await?;
    Ok(Json(organizer.into()))
}

pub async fn submit_profile(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Json(profile): Json<VenueProfile>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_organizer)?;
    let organizer = onboarding.submit_profile(auth.id, profile).await?;
    Ok(Json(organizer.into()))
}

pub async fn me(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_organizer)?;
    let organizer = onboarding.get(auth.id).await?;
    Ok(Json(organizer.into()))
}

pub async fn list_venues(
    State(onboarding): State<Arc<OnboardingService>>,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Vec<VenueSummary>>> {
    let venues = onboarding
        .visible(&page)
        .await?
        .iter()
        .filter_map(VenueSummary::from_organizer)
        .collect();
    Ok(Json(venues))
}
