//! Organizer onboarding: registration, verification, profile submission and
//! the admin decisions that gate public visibility.

use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    guard,
    models::{
        common::PaginationParams,
        organizer::{OnboardingState, Organizer, RegisterOrganizerRequest, VenueProfile},
    },
    ports::OrganizerRepository,
};

pub struct OnboardingService {
    organizers: Arc<dyn OrganizerRepository>,
}

impl OnboardingService {
    pub fn new(organizers: Arc<dyn OrganizerRepository>) -> Self {
        Self { organizers }
    }

    pub async fn register(&self, req: RegisterOrganizerRequest) -> Result<Organizer> {
        req.validate()?;

        let state = if req.google {
            OnboardingState::EmailVerified
        } else {
            OnboardingState::Unverified
        };
        let organizer = self
            .organizers
            .create(&Organizer::new(req.name, req.email.to_lowercase(), state))
            .await?;

        tracing::info!(organizer_id = %organizer.id, state = ?organizer.state, "organizer registered");
        Ok(organizer)
    }

    pub async fn get(&self, id: Uuid) -> Result<Organizer> {
        self.organizers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Organizer {} not found", id)))
    }

    pub async fn verify_email(&self, id: Uuid) -> Result<Organizer> {
        self.transition(id, |state| Ok(state.verify_email())).await
    }

    pub async fn submit_profile(&self, id: Uuid, profile: VenueProfile) -> Result<Organizer> {
        profile.validate()?;

        let mut organizer = guard::active_organizer(self.organizers.as_ref(), id).await?;
        organizer.state = organizer.state.submit_profile()?;
        organizer.profile = Some(profile);
        organizer.updated_at = OffsetDateTime::now_utc();

        let saved = self.organizers.update(&organizer).await?;
        tracing::info!(organizer_id = %id, state = ?saved.state, "profile submitted");
        Ok(saved)
    }

    pub async fn approve(&self, id: Uuid) -> Result<Organizer> {
        self.transition(id, OnboardingState::approve).await
    }

    pub async fn disapprove(&self, id: Uuid) -> Result<Organizer> {
        self.transition(id, OnboardingState::disapprove).await
    }

    pub async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<Organizer> {
        let mut organizer = self.get(id).await?;
        if organizer.is_blocked == blocked {
            return Ok(organizer);
        }

        organizer.is_blocked = blocked;
        organizer.updated_at = OffsetDateTime::now_utc();
        let saved = self.organizers.update(&organizer).await?;
        tracing::info!(organizer_id = %id, blocked, "organizer block status changed");
        Ok(saved)
    }

    /// The admin review queue.
    pub async fn pending(&self, page: &PaginationParams) -> Result<Vec<Organizer>> {
        self.organizers
            .list_by_state(OnboardingState::ProfileSubmitted, page.limit(), page.offset())
            .await
    }

    /// Organizers whose venues pass the visibility gate.
    pub async fn visible(&self, page: &PaginationParams) -> Result<Vec<Organizer>> {
        let organizers = self
            .organizers
            .list_bookable(page.limit(), page.offset())
            .await?;
        Ok(organizers.into_iter().filter(Organizer::is_bookable).collect())
    }

    /// Applies a state transition. An unchanged state skips the write, so
    /// repeated admin actions leave the record untouched.
    async fn transition<F>(&self, id: Uuid, step: F) -> Result<Organizer>
    where
        F: FnOnce(OnboardingState) -> Result<OnboardingState>,
    {
        let mut organizer = self.get(id).await?;
        let from = organizer.state;
        let to = step(from).map_err(|e| {
            tracing::warn!(organizer_id = %id, ?from, "onboarding transition denied");
            e
        })?;
        if to == from {
            return Ok(organizer);
        }

        organizer.state = to;
        organizer.updated_at = OffsetDateTime::now_utc();
        let saved = self.organizers.update(&organizer).await?;
        tracing::info!(organizer_id = %id, ?from, ?to, "onboarding state changed");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{services::fixtures::profile, store::memory::MemoryStore};

    fn service() -> OnboardingService {
        OnboardingService::new(Arc::new(MemoryStore::new()))
    }

    async fn registered(svc: &OnboardingService, google: bool) -> Organizer {
        svc.register(RegisterOrganizerRequest {
            name: "Grand Palace".into(),
            email: format!("{}@test.local", Uuid::new_v4()),
            google,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn full_lifecycle_reaches_visibility() {
        let svc = service();
        let o = registered(&svc, false).await;
        assert_eq!(o.state, OnboardingState::Unverified);

        let o = svc.verify_email(o.id).await.unwrap();
        let o = svc.submit_profile(o.id, profile()).await.unwrap();
        assert!(o.state.is_pending_review());
        assert!(!o.is_bookable());

        let pending = svc.pending(&PaginationParams::default()).await.unwrap();
        assert!(pending.iter().any(|p| p.id == o.id));

        let o = svc.approve(o.id).await.unwrap();
        assert!(o.is_bookable());
        let visible = svc.visible(&PaginationParams::default()).await.unwrap();
        assert!(visible.iter().any(|v| v.id == o.id));
        let pending = svc.pending(&PaginationParams::default()).await.unwrap();
        assert!(pending.iter().all(|p| p.id != o.id));
    }

    #[tokio::test]
    async fn google_signup_starts_verified() {
        let svc = service();
        let o = registered(&svc, true).await;
        assert_eq!(o.state, OnboardingState::EmailVerified);
    }

    #[tokio::test]
    async fn profile_before_verification_is_denied() {
        let svc = service();
        let o = registered(&svc, false).await;
        let err = svc.submit_profile(o.id, profile()).await.unwrap_err();
        assert!(matches!(err, AppError::TransitionDenied(_)));
        assert_eq!(svc.get(o.id).await.unwrap().state, OnboardingState::Unverified);
    }

    #[tokio::test]
    async fn second_approval_changes_nothing() {
        let svc = service();
        let o = registered(&svc, true).await;
        svc.submit_profile(o.id, profile()).await.unwrap();

        let once = svc.approve(o.id).await.unwrap();
        let twice = svc.approve(o.id).await.unwrap();
        assert_eq!(once.state, twice.state);
        assert_eq!(once.updated_at, twice.updated_at);
    }

    #[tokio::test]
    async fn approved_resubmit_updates_profile_and_keeps_visibility() {
        let svc = service();
        let o = registered(&svc, true).await;
        svc.submit_profile(o.id, profile()).await.unwrap();
        svc.approve(o.id).await.unwrap();

        let mut edited = profile();
        edited.event_hall_name = "Grand Palace Annex".into();
        let o = svc.submit_profile(o.id, edited).await.unwrap();
        assert_eq!(o.state, OnboardingState::Approved);
        assert!(o.is_bookable());
        assert_eq!(
            o.profile.as_ref().map(|p| p.event_hall_name.as_str()),
            Some("Grand Palace Annex")
        );

        let pending = svc.pending(&PaginationParams::default()).await.unwrap();
        assert!(pending.iter().all(|p| p.id != o.id));
    }

    #[tokio::test]
    async fn blocking_hides_an_approved_venue() {
        let svc = service();
        let o = registered(&svc, true).await;
        svc.submit_profile(o.id, profile()).await.unwrap();
        svc.approve(o.id).await.unwrap();

        let o = svc.set_blocked(o.id, true).await.unwrap();
        assert!(!o.is_bookable());
        let visible = svc.visible(&PaginationParams::default()).await.unwrap();
        assert!(visible.iter().all(|v| v.id != o.id));

        let err = svc.submit_profile(o.id, profile()).await.unwrap_err();
        assert!(matches!(err, AppError::Blocked));
    }

    #[tokio::test]
    async fn invalid_profile_is_rejected() {
        let svc = service();
        let o = registered(&svc, true).await;
        let mut bad = profile();
        bad.owner_id_card_url = "not a url".into();
        assert!(matches!(
            svc.submit_profile(o.id, bad).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service();
        let req = || RegisterOrganizerRequest {
            name: "Hall".into(),
            email: "Same@Test.Local".into(),
            google: false,
        };
        svc.register(req()).await.unwrap();
        assert!(matches!(svc.register(req()).await, Err(AppError::Conflict(_))));
    }
}
