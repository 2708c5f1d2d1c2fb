//! Ampere control server
//!
//! Single binary mediating between poll-only power-control units and the
//! authenticated operator application:
//! - telemetry ingest and readback
//! - single-slot command queue with deliver-once semantics
//! - per-device configuration storage
//!
//! All state is in-memory and process-scoped. Devices sit behind NAT and
//! never accept inbound connections; everything they receive, they receive
//! by polling.

use std::net::SocketAddr;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ampere_common::auth::JwtContext;
use ampere_control::api;
use ampere_control::state::{AppState, OperatorAccount};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── JWT context ─────────────────────────────────────────────
    let jwt = match std::env::var("JWT_SECRET") {
        Ok(secret) => JwtContext::from_secret(&secret),
        Err(_) => {
            tracing::warn!(
                "JWT_SECRET not set — generating ephemeral secret (tokens won't survive restart)"
            );
            let (ctx, _secret) = JwtContext::generate();
            ctx
        }
    };

    let token_ttl_secs: i64 = std::env::var("TOKEN_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3600);

    // ── Operator account ────────────────────────────────────────
    let username = std::env::var("OPERATOR_USERNAME").unwrap_or_else(|_| "admin".into());
    let password_hash = match std::env::var("OPERATOR_PASSWORD_HASH") {
        Ok(hash) => hash,
        Err(_) => {
            let password = std::env::var("OPERATOR_PASSWORD").map_err(|_| {
                anyhow::anyhow!("set OPERATOR_PASSWORD_HASH or OPERATOR_PASSWORD")
            })?;
            tracing::warn!("OPERATOR_PASSWORD_HASH not set — hashing OPERATOR_PASSWORD at startup");
            ampere_common::auth::hash_password(&password)?
        }
    };
    let operator = OperatorAccount {
        username,
        password_hash,
    };

    // ── Shared state & router ───────────────────────────────────
    let state = AppState::new(jwt, operator, token_ttl_secs);

    // The operator app is served cross-origin, hence the permissive CORS.
    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // ── Listen ──────────────────────────────────────────────────
    let addr: SocketAddr = std::env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".into())
        .parse()?;

    tracing::info!("ampere-control listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
