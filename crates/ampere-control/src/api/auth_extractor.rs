//! JWT bearer token extraction for operator-facing routes.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Extractor that validates the `Authorization: Bearer <jwt>` header and
/// provides the authenticated operator's username.
///
/// Only operator-facing routes use it. Device-facing routes are exempt:
/// field units cannot perform an interactive login, so their identity is
/// trusted implicitly.
pub struct AuthOperator {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthOperator {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection::Missing)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthRejection::Missing)?;

        let claims = state
            .jwt()
            .verify_token(token)
            .map_err(|_| AuthRejection::Invalid)?;

        Ok(AuthOperator {
            username: claims.sub,
        })
    }
}

/// Missing credentials are distinguished from bad ones: no header or no
/// bearer token is a 401, a token that fails verification (malformed,
/// expired, or signed with another key) is a 403.
pub enum AuthRejection {
    Missing,
    Invalid,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            AuthRejection::Missing => (StatusCode::UNAUTHORIZED, "missing authorization header"),
            AuthRejection::Invalid => (StatusCode::FORBIDDEN, "invalid or expired token"),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}
