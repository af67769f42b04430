use crate::models::{
    organizer::VenueProfile,
    pricing::{PriceSet, WeeklyPrices},
};

pub fn profile() -> VenueProfile {
    VenueProfile {
        event_hall_name: "Grand Palace Hall".into(),
        phone_number: "9876543210".into(),
        district: "Ernakulam".into(),
        city: "Kochi".into(),
        building_floor: "2nd floor".into(),
        pincode: "682001".into(),
        owner_id_card_url: "https://files.test.local/id-card.png".into(),
        event_hall_license_url: "https://files.test.local/license.pdf".into(),
        latitude: Some(9.93),
        longitude: Some(76.26),
    }
}

pub fn prices(day: f64, night: f64, full: f64) -> PriceSet {
    PriceSet {
        day_price: day,
        night_price: night,
        full_day_price: full,
    }
}

pub fn week(base: PriceSet) -> WeeklyPrices {
    WeeklyPrices::uniform(base)
}
