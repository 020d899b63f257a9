#![forbid(unsafe_code)]

//! Axum surface over the pot ledger: a handful of JSON endpoints for the
//! league's display layer plus passphrase-gated admin commands.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use fairway_pot_ledger::PotLedger;
use std::sync::Arc;
use tokio::sync::Mutex;

mod config;
mod http;

pub use config::{
    ApiConfig, ENV_ADMIN_PASSPHRASE, ENV_BIND_ADDR, ENV_DB_PATH, ENV_LOG, ENV_MAX_BODY_BYTES,
};

pub const CRATE_NAME: &str = "fairway-pot-server";

/// Shared handler state. The single mutex is deliberate: the league's
/// write traffic is one scorekeeper at a time, and serializing every
/// operation keeps the jackpot bulk reset trivially safe.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Mutex<PotLedger>>,
    pub api: Arc<ApiConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(ledger: PotLedger, api: ApiConfig) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            api: Arc::new(api),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body = state.api.max_body_bytes;
    Router::new()
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/readyz", get(http::handlers::readyz_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .route("/v1/pot", get(http::handlers::pot_handler))
        .route("/v1/pot/balances", get(http::handlers::balances_handler))
        .route("/v1/pot/history", get(http::handlers::history_handler))
        .route("/v1/pot/rounds", post(http::handlers::accrue_handler))
        .route(
            "/v1/pot/toggle-paid",
            post(http::handlers::toggle_paid_handler),
        )
        .route("/v1/pot/payments", post(http::handlers::payment_handler))
        .route("/v1/pot/jackpot", post(http::handlers::jackpot_handler))
        .route(
            "/v1/pot/balances/upload",
            post(http::handlers::upload_balances_handler),
        )
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(state)
}
