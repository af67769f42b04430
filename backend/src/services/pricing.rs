use std::sync::Arc;

use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    models::pricing::{
        weekday_name, DateOverride, PriceSource, ResolvedPrice, UpsertOverrideRequest,
        WeeklyPriceTemplate, WeeklyPrices,
    },
    ports::PriceRepository,
};

/// Resolves the effective price of a venue on a date: a date override with
/// prices wins, otherwise the weekly template entry for the date's weekday.
pub struct PriceResolver {
    prices: Arc<dyn PriceRepository>,
}

impl PriceResolver {
    pub fn new(prices: Arc<dyn PriceRepository>) -> Self {
        Self { prices }
    }

    /// `Ok(None)` means neither source covers the date. That is a valid
    /// answer, not an error.
    pub async fn resolve(
        &self,
        organizer_id: Uuid,
        date: time::Date,
    ) -> Result<Option<ResolvedPrice>> {
        let weekday = weekday_name(date.weekday());

        if let Some(prices) = self
            .prices
            .find_override(organizer_id, date)
            .await?
            .and_then(|o| o.prices)
        {
            return Ok(Some(ResolvedPrice {
                organizer_id,
                date,
                weekday,
                source: PriceSource::Override,
                prices,
            }));
        }

        let resolved = self
            .prices
            .find_template(organizer_id)
            .await?
            .map(|template| ResolvedPrice {
                organizer_id,
                date,
                weekday,
                source: PriceSource::Template,
                prices: *template.prices.for_weekday(date.weekday()),
            });

        Ok(resolved)
    }
}

/// Organizer-side writes to the price calendar.
pub struct PriceCalendar {
    prices: Arc<dyn PriceRepository>,
}

impl PriceCalendar {
    pub fn new(prices: Arc<dyn PriceRepository>) -> Self {
        Self { prices }
    }

    pub async fn set_override(
        &self,
        organizer_id: Uuid,
        req: UpsertOverrideRequest,
    ) -> Result<DateOverride> {
        req.validate()?;
        if let Some(prices) = &req.prices {
            prices.validate()?;
        }
        if req.prices.is_none() && req.label.is_none() {
            return Err(AppError::BadRequest(
                "an override needs prices, a label, or both".into(),
            ));
        }

        let saved = self
            .prices
            .upsert_override(&DateOverride {
                id: Uuid::new_v4(),
                organizer_id,
                date: req.date,
                prices: req.prices,
                label: req.label,
                updated_at: OffsetDateTime::now_utc(),
            })
            .await?;

        tracing::info!(%organizer_id, date = %saved.date, has_prices = saved.prices.is_some(), "date override saved");
        Ok(saved)
    }

    pub async fn delete_override(&self, organizer_id: Uuid, date: time::Date) -> Result<()> {
        self.prices.delete_override(organizer_id, date).await?;
        tracing::info!(%organizer_id, %date, "date override removed");
        Ok(())
    }

    /// Replaces the whole week. Concurrent replacements race; the last write wins.
    pub async fn replace_template(
        &self,
        organizer_id: Uuid,
        prices: WeeklyPrices,
    ) -> Result<WeeklyPriceTemplate> {
        prices.validate()?;

        let saved = self
            .prices
            .replace_template(&WeeklyPriceTemplate {
                organizer_id,
                prices,
                updated_at: OffsetDateTime::now_utc(),
            })
            .await?;

        tracing::info!(%organizer_id, "weekly price template replaced");
        Ok(saved)
    }

    pub async fn template(&self, organizer_id: Uuid) -> Result<WeeklyPriceTemplate> {
        self.prices
            .find_template(organizer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("No weekly prices configured".into()))
    }
}
