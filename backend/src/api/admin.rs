use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::Result,
    models::{common::PaginationParams, organizer::OrganizerStatus},
    services::onboarding::OnboardingService,
};

pub async fn approve(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_admin)?;
    let organizer = onboarding.approve(id).await?;
    Ok(Json(organizer.into()))
}

pub async fn disapprove(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_admin)?;
    let organizer = onboarding.disapprove(id).await?;
    Ok(Json(organizer.into()))
}

pub async fn block(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_admin)?;
    let organizer = onboarding.set_blocked(id, true).await?;
    Ok(Json(organizer.into()))
}

pub async fn unblock(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<OrganizerStatus>> {
    auth.require(Role::is_admin)?;
    let organizer = onboarding.set_blocked(id, false).await?;
    Ok(Json(organizer.into()))
}

pub async fn pending(
    State(onboarding): State<Arc<OnboardingService>>,
    auth: AuthUser,
    Query(page): Query<PaginationParams>,
) -> Result<Json<Vec<OrganizerStatus>>> {
    auth.require(Role::is_admin)?;
    let organizers = onboarding.pending(&page).await?;
    Ok(Json(organizers.into_iter().map(Into::into).collect()))
}
