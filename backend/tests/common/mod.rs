#![allow(dead_code)]
use std::net::SocketAddr;

use serde_json::{json, Value};
use uuid::Uuid;

use venue_booking_backend::{
    api,
    auth::{create_token, Role},
    AppState,
};

const JWT_SECRET: &str = "test-secret-that-is-at-least-32-chars-long!!";

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub admin_token: String,
    pub service_token: String,
}

/// Spin up a real Axum server on a random port backed by a fresh in-memory
/// store. Each test gets its own app, so no cleanup is needed.
pub async fn setup_test_app() -> TestApp {
    let state = AppState::in_memory(JWT_SECRET.to_string());
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
        admin_token: token(Uuid::new_v4(), Role::Admin),
        service_token: token(Uuid::new_v4(), Role::Service),
    }
}

pub fn token(subject: Uuid, role: Role) -> String {
    create_token(subject, role, JWT_SECRET, 1).expect("Failed to mint token")
}

/// Create a JWT token that is already expired (exp in the past).
pub fn create_expired_token(subject: Uuid, role: Role) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use venue_booking_backend::auth::Claims;

    let now = time::OffsetDateTime::now_utc();
    let claims = Claims {
        sub: subject,
        role,
        exp: (now - time::Duration::hours(1)).unix_timestamp(),
        iat: (now - time::Duration::hours(2)).unix_timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("Failed to create expired token")
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}+{}@test.local", prefix, &Uuid::new_v4().to_string()[..8])
}

pub fn price_set(day: f64, night: f64, full: f64) -> Value {
    json!({ "dayPrice": day, "nightPrice": night, "fullDayPrice": full })
}

pub fn uniform_week(day: f64, night: f64, full: f64) -> Value {
    let set = price_set(day, night, full);
    json!({
        "Monday": set, "Tuesday": set, "Wednesday": set, "Thursday": set,
        "Friday": set, "Saturday": set, "Sunday": set,
    })
}

pub fn venue_profile() -> Value {
    json!({
        "event_hall_name": "Grand Palace Hall",
        "phone_number": "9876543210",
        "district": "Ernakulam",
        "city": "Kochi",
        "building_floor": "2nd floor",
        "pincode": "682001",
        "owner_id_card_url": "https://files.test.local/id-card.png",
        "event_hall_license_url": "https://files.test.local/license.pdf",
        "latitude": 9.93,
        "longitude": 76.26,
    })
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register an organizer through the identity-service hook. Returns (id, token).
    pub async fn register_organizer(&self, google: bool) -> (Uuid, String) {
        let resp = self
            .client
            .post(self.url("/organizers"))
            .bearer_auth(&self.service_token)
            .json(&json!({
                "name": "Grand Palace",
                "email": unique_email("organizer"),
                "google": google,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "Registration should return 200");

        let body: Value = resp.json().await.unwrap();
        let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
        (id, token(id, Role::Organizer))
    }

    pub async fn verify_email(&self, id: Uuid) -> reqwest::Response {
        self.client
            .patch(self.url(&format!("/organizer/{}/verify-email", id)))
            .bearer_auth(&self.service_token)
            .send()
            .await
            .unwrap()
    }

    pub async fn submit_profile(&self, organizer_token: &str) -> reqwest::Response {
        self.client
            .post(self.url("/organizer/profile"))
            .bearer_auth(organizer_token)
            .json(&venue_profile())
            .send()
            .await
            .unwrap()
    }

    pub async fn admin_action(&self, id: Uuid, action: &str) -> reqwest::Response {
        self.client
            .patch(self.url(&format!("/organizer/{}/{}", id, action)))
            .bearer_auth(&self.admin_token)
            .send()
            .await
            .unwrap()
    }

    /// Register, verify, submit and approve. Returns (id, token).
    pub async fn approved_organizer(&self) -> (Uuid, String) {
        let (id, organizer_token) = self.register_organizer(true).await;
        assert_eq!(self.submit_profile(&organizer_token).await.status(), 200);
        assert_eq!(self.admin_action(id, "approve").await.status(), 200);
        (id, organizer_token)
    }

    pub async fn set_template(&self, organizer_token: &str, week: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/default-prices"))
            .bearer_auth(organizer_token)
            .json(week)
            .send()
            .await
            .unwrap()
    }

    pub async fn set_override(&self, organizer_token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/events/prices"))
            .bearer_auth(organizer_token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn quote(&self, organizer_id: Uuid, date: &str) -> reqwest::Response {
        self.client
            .get(self.url(&format!(
                "/events/prices?organizer_id={}&date={}",
                organizer_id, date
            )))
            .send()
            .await
            .unwrap()
    }

    pub async fn book(&self, user_token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/bookings"))
            .bearer_auth(user_token)
            .json(body)
            .send()
            .await
            .unwrap()
    }

    pub async fn venue_ids(&self) -> Vec<String> {
        let resp = self.client.get(self.url("/venues")).send().await.unwrap();
        assert_eq!(resp.status(), 200);
        let body: Vec<Value> = resp.json().await.unwrap();
        body.iter()
            .filter_map(|v| v["organizer_id"].as_str().map(str::to_string))
            .collect()
    }
}
