use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Your account is blocked. Please contact support")]
    Blocked,

    /// An onboarding guard refused the requested transition.
    #[error("Transition denied: {0}")]
    TransitionDenied(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("No price is configured for {0}")]
    PriceUnavailable(time::Date),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::Blocked => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::TransitionDenied(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::PriceUnavailable(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::Validation(e) => {
                let mut messages = Vec::new();
                collect_messages("", e, &mut messages);
                (StatusCode::BAD_REQUEST, messages.join("; "))
            }
            AppError::Database(e) => {
                // Map constraint violations to 409 Conflict
                if let sqlx::Error::Database(ref db_err) = e {
                    if let Some(code) = db_err.code() {
                        match code.as_ref() {
                            "23505" => {
                                // unique_violation
                                tracing::warn!("Unique constraint violation: {}", db_err.message());
                                return (
                                    StatusCode::CONFLICT,
                                    Json(json!({ "error": "A record with that value already exists" })),
                                )
                                    .into_response();
                            }
                            "23503" => {
                                // foreign_key_violation
                                tracing::warn!("Foreign key violation: {}", db_err.message());
                                return (
                                    StatusCode::CONFLICT,
                                    Json(json!({ "error": "Referenced record does not exist" })),
                                )
                                    .into_response();
                            }
                            _ => {}
                        }
                    }
                }
                tracing::error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".into())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Flattens nested validator output into `path: message` strings.
fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let msgs: Vec<&str> = errs
                    .iter()
                    .map(|err| err.message.as_deref().unwrap_or(err.code.as_ref()))
                    .collect();
                out.push(format!("{}: {}", path, msgs.join(", ")));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_messages(&format!("{}[{}]", path, idx), inner, out);
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
