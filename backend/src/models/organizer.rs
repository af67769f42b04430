//! Organizer accounts and the onboarding lifecycle.
//!
//! The lifecycle is stored as a single [`OnboardingState`]. The three
//! booleans other collaborators reason about (`email_verified`,
//! `profile_submitted`, `profile_approved`) are derived from it through
//! [`OnboardingState::flags`], so contradictory combinations cannot be
//! persisted.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "onboarding_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OnboardingState {
    Unverified,
    EmailVerified,
    /// Profile submitted and awaiting an admin decision (the pending-review queue).
    ProfileSubmitted,
    Approved,
    Disapproved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnboardingFlags {
    pub email_verified: bool,
    pub profile_submitted: bool,
    pub profile_approved: bool,
}

impl OnboardingFlags {
    /// The visibility gate: discoverable and bookable only when all three hold.
    pub fn is_visible(&self) -> bool {
        self.email_verified && self.profile_submitted && self.profile_approved
    }
}

impl OnboardingState {
    pub fn flags(self) -> OnboardingFlags {
        use OnboardingState::*;
        OnboardingFlags {
            email_verified: !matches!(self, Unverified),
            profile_submitted: matches!(self, ProfileSubmitted | Approved | Disapproved),
            profile_approved: matches!(self, Approved),
        }
    }

    pub fn is_pending_review(self) -> bool {
        matches!(self, OnboardingState::ProfileSubmitted)
    }

    /// OTP or Google verification completed. Repeating it is a no-op.
    pub fn verify_email(self) -> OnboardingState {
        match self {
            OnboardingState::Unverified => OnboardingState::EmailVerified,
            other => other,
        }
    }

    /// Organizer submits (or resubmits) venue details. Approval is only
    /// cleared by an admin disapproval, so an approved organizer stays
    /// approved while editing the profile.
    pub fn submit_profile(self) -> Result<OnboardingState> {
        match self {
            OnboardingState::Unverified => Err(AppError::TransitionDenied(
                "email must be verified before submitting a profile".into(),
            )),
            OnboardingState::Approved => Ok(OnboardingState::Approved),
            OnboardingState::EmailVerified
            | OnboardingState::ProfileSubmitted
            | OnboardingState::Disapproved => Ok(OnboardingState::ProfileSubmitted),
        }
    }

    pub fn approve(self) -> Result<OnboardingState> {
        match self {
            OnboardingState::ProfileSubmitted
            | OnboardingState::Approved
            | OnboardingState::Disapproved => Ok(OnboardingState::Approved),
            OnboardingState::Unverified | OnboardingState::EmailVerified => Err(
                AppError::TransitionDenied("organizer has not submitted a profile".into()),
            ),
        }
    }

    /// Keeps the profile on file so the organizer can resubmit.
    pub fn disapprove(self) -> Result<OnboardingState> {
        match self {
            OnboardingState::ProfileSubmitted
            | OnboardingState::Approved
            | OnboardingState::Disapproved => Ok(OnboardingState::Disapproved),
            OnboardingState::Unverified | OnboardingState::EmailVerified => Err(
                AppError::TransitionDenied("organizer has not submitted a profile".into()),
            ),
        }
    }
}

/// Venue details supplied at profile submission. Document URLs come from the
/// external presigned-upload flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct VenueProfile {
    #[validate(length(min = 1, max = 200))]
    pub event_hall_name: String,
    #[validate(length(min = 7, max = 20))]
    pub phone_number: String,
    #[validate(length(min = 1, max = 100))]
    pub district: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 200))]
    pub building_floor: String,
    #[validate(length(min = 3, max = 12))]
    pub pincode: String,
    #[validate(url)]
    pub owner_id_card_url: String,
    #[validate(url)]
    pub event_hall_license_url: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Organizer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub state: OnboardingState,
    pub is_blocked: bool,
    pub profile: Option<VenueProfile>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Organizer {
    pub fn new(name: String, email: String, state: OnboardingState) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            state,
            is_blocked: false,
            profile: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Recomputed on every call; never stored.
    pub fn is_bookable(&self) -> bool {
        !self.is_blocked && self.state.flags().is_visible()
    }
}

/// What organizers and admins see, including the derived read model.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizerStatus {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub state: OnboardingState,
    #[serde(flatten)]
    pub flags: OnboardingFlags,
    pub pending_review: bool,
    pub is_blocked: bool,
    pub visible: bool,
    pub profile: Option<VenueProfile>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Organizer> for OrganizerStatus {
    fn from(o: Organizer) -> Self {
        Self {
            flags: o.state.flags(),
            pending_review: o.state.is_pending_review(),
            visible: o.is_bookable(),
            id: o.id,
            name: o.name,
            email: o.email,
            state: o.state,
            is_blocked: o.is_blocked,
            profile: o.profile,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

/// Public listing entry for a bookable venue.
#[derive(Debug, Clone, Serialize)]
pub struct VenueSummary {
    pub organizer_id: Uuid,
    pub event_hall_name: String,
    pub city: String,
    pub district: String,
    pub phone_number: String,
}

impl VenueSummary {
    pub fn from_organizer(o: &Organizer) -> Option<Self> {
        let profile = o.profile.as_ref()?;
        Some(Self {
            organizer_id: o.id,
            event_hall_name: profile.event_hall_name.clone(),
            city: profile.city.clone(),
            district: profile.district.clone(),
            phone_number: profile.phone_number.clone(),
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterOrganizerRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Google sign-ups arrive already verified.
    #[serde(default)]
    pub google: bool,
}
