use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        booking::Booking,
        common::DateRangeParams,
        organizer::{OnboardingState, Organizer, VenueProfile},
        pricing::{DateOverride, PriceSet, WeeklyPriceTemplate, WeeklyPrices},
    },
    ports::{BookingRepository, OrganizerRepository, PriceRepository},
};

const ORGANIZER_COLUMNS: &str = r#"
    id, name, email, state, is_blocked,
    event_hall_name, phone_number, district, city, building_floor, pincode,
    owner_id_card_url, event_hall_license_url, latitude, longitude,
    created_at, updated_at
"#;

/// Flat organizer row; the profile columns are all NULL until submission.
#[derive(sqlx::FromRow)]
struct OrganizerRow {
    id: Uuid,
    name: String,
    email: String,
    state: OnboardingState,
    is_blocked: bool,
    event_hall_name: Option<String>,
    phone_number: Option<String>,
    district: Option<String>,
    city: Option<String>,
    building_floor: Option<String>,
    pincode: Option<String>,
    owner_id_card_url: Option<String>,
    event_hall_license_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<OrganizerRow> for Organizer {
    fn from(r: OrganizerRow) -> Self {
        let profile = match r.event_hall_name {
            Some(event_hall_name) => Some(VenueProfile {
                event_hall_name,
                phone_number: r.phone_number.unwrap_or_default(),
                district: r.district.unwrap_or_default(),
                city: r.city.unwrap_or_default(),
                building_floor: r.building_floor.unwrap_or_default(),
                pincode: r.pincode.unwrap_or_default(),
                owner_id_card_url: r.owner_id_card_url.unwrap_or_default(),
                event_hall_license_url: r.event_hall_license_url.unwrap_or_default(),
                latitude: r.latitude,
                longitude: r.longitude,
            }),
            None => None,
        };

        Organizer {
            id: r.id,
            name: r.name,
            email: r.email,
            state: r.state,
            is_blocked: r.is_blocked,
            profile,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

pub struct PostgresOrganizerRepo {
    pool: PgPool,
}

impl PostgresOrganizerRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizerRepository for PostgresOrganizerRepo {
    async fn create(&self, organizer: &Organizer) -> Result<Organizer> {
        let row = sqlx::query_as::<_, OrganizerRow>(&format!(
            r#"
            INSERT INTO organizers (id, name, email, state, is_blocked, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ORGANIZER_COLUMNS}
            "#
        ))
        .bind(organizer.id)
        .bind(&organizer.name)
        .bind(&organizer.email)
        .bind(organizer.state)
        .bind(organizer.is_blocked)
        .bind(organizer.created_at)
        .bind(organizer.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Organizer>> {
        let row = sqlx::query_as::<_, OrganizerRow>(&format!(
            "SELECT {ORGANIZER_COLUMNS} FROM organizers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, organizer: &Organizer) -> Result<Organizer> {
        let profile = organizer.profile.as_ref();
        let row = sqlx::query_as::<_, OrganizerRow>(&format!(
            r#"
            UPDATE organizers
            SET name                   = $2,
                email                  = $3,
                state                  = $4,
                is_blocked             = $5,
                event_hall_name        = $6,
                phone_number           = $7,
                district               = $8,
                city                   = $9,
                building_floor         = $10,
                pincode                = $11,
                owner_id_card_url      = $12,
                event_hall_license_url = $13,
                latitude               = $14,
                longitude              = $15,
                updated_at             = $16
            WHERE id = $1
            RETURNING {ORGANIZER_COLUMNS}
            "#
        ))
        .bind(organizer.id)
        .bind(&organizer.name)
        .bind(&organizer.email)
        .bind(organizer.state)
        .bind(organizer.is_blocked)
        .bind(profile.map(|p| p.event_hall_name.clone()))
        .bind(profile.map(|p| p.phone_number.clone()))
        .bind(profile.map(|p| p.district.clone()))
        .bind(profile.map(|p| p.city.clone()))
        .bind(profile.map(|p| p.building_floor.clone()))
        .bind(profile.map(|p| p.pincode.clone()))
        .bind(profile.map(|p| p.owner_id_card_url.clone()))
        .bind(profile.map(|p| p.event_hall_license_url.clone()))
        .bind(profile.and_then(|p| p.latitude))
        .bind(profile.and_then(|p| p.longitude))
        .bind(organizer.updated_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Organizer {} not found", organizer.id)))?;

        Ok(row.into())
    }

    async fn list_by_state(
        &self,
        state: OnboardingState,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Organizer>> {
        let rows = sqlx::query_as::<_, OrganizerRow>(&format!(
            r#"
            SELECT {ORGANIZER_COLUMNS} FROM organizers
            WHERE state = $1
            ORDER BY created_at, id
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(state)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_bookable(&self, limit: i64, offset: i64) -> Result<Vec<Organizer>> {
        let rows = sqlx::query_as::<_, OrganizerRow>(&format!(
            r#"
            SELECT {ORGANIZER_COLUMNS} FROM organizers
            WHERE state = 'approved' AND is_blocked = false
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

#[derive(sqlx::FromRow)]
struct OverrideRow {
    id: Uuid,
    organizer_id: Uuid,
    override_date: time::Date,
    day_price: Option<f64>,
    night_price: Option<f64>,
    full_day_price: Option<f64>,
    label: Option<String>,
    updated_at: OffsetDateTime,
}

impl From<OverrideRow> for DateOverride {
    fn from(r: OverrideRow) -> Self {
        let prices = match (r.day_price, r.night_price, r.full_day_price) {
            (Some(day_price), Some(night_price), Some(full_day_price)) => Some(PriceSet {
                day_price,
                night_price,
                full_day_price,
            }),
            _ => None,
        };
        DateOverride {
            id: r.id,
            organizer_id: r.organizer_id,
            date: r.override_date,
            prices,
            label: r.label,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TemplateRow {
    organizer_id: Uuid,
    prices: Json<WeeklyPrices>,
    updated_at: OffsetDateTime,
}

impl From<TemplateRow> for WeeklyPriceTemplate {
    fn from(r: TemplateRow) -> Self {
        WeeklyPriceTemplate {
            organizer_id: r.organizer_id,
            prices: r.prices.0,
            updated_at: r.updated_at,
        }
    }
}

pub struct PostgresPriceRepo {
    pool: PgPool,
}

impl PostgresPriceRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceRepository for PostgresPriceRepo {
    async fn find_override(
        &self,
        organizer_id: Uuid,
        date: time::Date,
    ) -> Result<Option<DateOverride>> {
        let row = sqlx::query_as::<_, OverrideRow>(
            r#"
            SELECT id, organizer_id, override_date, day_price, night_price, full_day_price,
                   label, updated_at
            FROM date_overrides
            WHERE organizer_id = $1 AND override_date = $2
            "#,
        )
        .bind(organizer_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn upsert_override(&self, entry: &DateOverride) -> Result<DateOverride> {
        let row = sqlx::query_as::<_, OverrideRow>(
            r#"
            INSERT INTO date_overrides
                (id, organizer_id, override_date, day_price, night_price, full_day_price, label, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (organizer_id, override_date) DO UPDATE SET
                day_price      = EXCLUDED.day_price,
                night_price    = EXCLUDED.night_price,
                full_day_price = EXCLUDED.full_day_price,
                label          = EXCLUDED.label,
                updated_at     = EXCLUDED.updated_at
            RETURNING id, organizer_id, override_date, day_price, night_price, full_day_price,
                      label, updated_at
            "#,
        )
        .bind(entry.id)
        .bind(entry.organizer_id)
        .bind(entry.date)
        .bind(entry.prices.map(|p| p.day_price))
        .bind(entry.prices.map(|p| p.night_price))
        .bind(entry.prices.map(|p| p.full_day_price))
        .bind(&entry.label)
        .bind(entry.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn delete_override(&self, organizer_id: Uuid, date: time::Date) -> Result<()> {
        let rows_affected = sqlx::query(
            "DELETE FROM date_overrides WHERE organizer_id = $1 AND override_date = $2",
        )
        .bind(organizer_id)
        .bind(date)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound("Override not found".into()));
        }
        Ok(())
    }

    async fn find_template(&self, organizer_id: Uuid) -> Result<Option<WeeklyPriceTemplate>> {
        let row = sqlx::query_as::<_, TemplateRow>(
            "SELECT organizer_id, prices, updated_at FROM weekly_price_templates WHERE organizer_id = $1",
        )
        .bind(organizer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn replace_template(
        &self,
        template: &WeeklyPriceTemplate,
    ) -> Result<WeeklyPriceTemplate> {
        let row = sqlx::query_as::<_, TemplateRow>(
            r#"
            INSERT INTO weekly_price_templates (organizer_id, prices, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (organizer_id) DO UPDATE SET
                prices     = EXCLUDED.prices,
                updated_at = EXCLUDED.updated_at
            RETURNING organizer_id, prices, updated_at
            "#,
        )
        .bind(template.organizer_id)
        .bind(Json(&template.prices))
        .bind(template.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

const BOOKING_COLUMNS: &str = r#"
    id, organizer_id, user_id, booking_date, event_type, event_name,
    day_price, night_price, full_day_price, total_price, booked_at
"#;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings ({BOOKING_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {BOOKING_COLUMNS}
            "#
        ))
        .bind(booking.id)
        .bind(booking.organizer_id)
        .bind(booking.user_id)
        .bind(booking.booking_date)
        .bind(booking.event_type)
        .bind(&booking.event_name)
        .bind(booking.prices.day_price)
        .bind(booking.prices.night_price)
        .bind(booking.prices.full_day_price)
        .bind(booking.total_price)
        .bind(booking.booked_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_organizer(
        &self,
        organizer_id: Uuid,
        range: &DateRangeParams,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(&format!(
            r#"
            SELECT {BOOKING_COLUMNS} FROM bookings
            WHERE organizer_id = $1
              AND ($2::DATE IS NULL OR booking_date >= $2)
              AND ($3::DATE IS NULL OR booking_date <= $3)
            ORDER BY booking_date, booked_at
            LIMIT $4 OFFSET $5
            "#
        ))
        .bind(organizer_id)
        .bind(range.start_date)
        .bind(range.end_date)
        .bind(range.limit())
        .bind(range.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
