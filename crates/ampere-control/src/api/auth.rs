//! Authentication endpoints.
//!
//! POST /login — exchange operator credentials for a JWT

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use ampere_common::auth::{self, Claims};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

// ── Login ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let operator = state.operator();

    // Same response for unknown username and wrong password.
    let valid = body.username == operator.username
        && auth::verify_password(&body.password, &operator.password_hash)
            .map_err(|e| ApiError::internal(e.to_string()))?;
    if !valid {
        tracing::warn!(username = %body.username, "login failed");
        return Err(ApiError::unauthorized("invalid username or password"));
    }

    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: body.username.clone(),
        iss: "ampere-control".into(),
        exp: now + state.token_ttl_secs(),
        iat: now,
    };
    let token = state
        .jwt()
        .create_token(&claims)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    tracing::info!(username = %body.username, "operator logged in");

    Ok(Json(LoginResponse { token }))
}

// ── Error type ──────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.into(),
        }
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
