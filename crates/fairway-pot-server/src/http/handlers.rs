// SPDX-License-Identifier: Apache-2.0

use crate::{AppState, CRATE_NAME};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use fairway_pot_ledger::{JackpotWin, LedgerError, LedgerErrorCode};
use fairway_pot_model::{EventDate, HoleNumber, Money, PlayerName};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

const ADMIN_PASSPHRASE_HEADER: &str = "x-admin-passphrase";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlayerRequest {
    player_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PaymentRequest {
    player_name: String,
    amount: String,
    /// Display-only label ("cash", "venmo", ...), echoed in the receipt.
    #[serde(default)]
    method: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct JackpotRequest {
    player_name: String,
    course: String,
    hole_number: u8,
    event_date: String,
    #[serde(default)]
    description: String,
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = Json(json!({"error": {"code": code, "message": message}}));
    (status, body).into_response()
}

fn ledger_error_response(err: &LedgerError) -> Response {
    let status = match err.code {
        LedgerErrorCode::NotFound => StatusCode::NOT_FOUND,
        LedgerErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
        LedgerErrorCode::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.code.as_str(), &err.message)
}

fn invalid_input(message: &str) -> Response {
    error_response(StatusCode::BAD_REQUEST, "invalid_input", message)
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(expected) = state.api.admin_passphrase.as_deref() else {
        return Err(error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "admin_disabled",
            "no admin passphrase configured",
        ));
    };
    let presented = headers
        .get(ADMIN_PASSPHRASE_HEADER)
        .and_then(|v| v.to_str().ok());
    match presented {
        Some(got) if got == expected => Ok(()),
        _ => {
            warn!("admin request rejected: bad or missing passphrase");
            Err(error_response(
                StatusCode::FORBIDDEN,
                "forbidden",
                "admin passphrase missing or incorrect",
            ))
        }
    }
}

fn parse_player(raw: &str) -> Result<PlayerName, Response> {
    PlayerName::parse(raw.trim()).map_err(|e| invalid_input(&e.to_string()))
}

pub(crate) async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub(crate) async fn readyz_handler(State(state): State<AppState>) -> Response {
    let ledger = state.ledger.lock().await;
    match ledger.account_count() {
        Ok(_) => (StatusCode::OK, "ready").into_response(),
        Err(err) => {
            warn!(error = %err, "readiness probe failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "not_ready", &err.message)
        }
    }
}

pub(crate) async fn version_handler() -> impl IntoResponse {
    Json(json!({
        "name": CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Pot summary for the display layer's polling widget.
pub(crate) async fn pot_handler(State(state): State<AppState>) -> Response {
    let ledger = state.ledger.lock().await;
    let total = match ledger.total_pot() {
        Ok(total) => total,
        Err(err) => return ledger_error_response(&err),
    };
    let count = match ledger.account_count() {
        Ok(count) => count,
        Err(err) => return ledger_error_response(&err),
    };
    Json(json!({"total_pot": total, "account_count": count})).into_response()
}

pub(crate) async fn balances_handler(State(state): State<AppState>) -> Response {
    let ledger = state.ledger.lock().await;
    match ledger.list_balances() {
        Ok(balances) => Json(json!({"balances": balances})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}

pub(crate) async fn history_handler(State(state): State<AppState>) -> Response {
    let ledger = state.ledger.lock().await;
    match ledger.list_events() {
        Ok(events) => Json(json!({"events": events})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}

/// Inbound trigger from score entry: one call per player per submitted
/// scorecard. Not admin-gated; the score-entry flow is its own gate.
pub(crate) async fn accrue_handler(
    State(state): State<AppState>,
    Json(req): Json<PlayerRequest>,
) -> Response {
    let player = match parse_player(&req.player_name) {
        Ok(player) => player,
        Err(resp) => return resp,
    };
    let mut ledger = state.ledger.lock().await;
    match ledger.accrue_round(&player) {
        Ok(account) => Json(json!({"account": account})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}

pub(crate) async fn toggle_paid_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PlayerRequest>,
) -> Response {
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let player = match parse_player(&req.player_name) {
        Ok(player) => player,
        Err(resp) => return resp,
    };
    let mut ledger = state.ledger.lock().await;
    match ledger.toggle_paid_status(&player) {
        Ok(account) => Json(json!({"account": account})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}

pub(crate) async fn payment_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<PaymentRequest>,
) -> Response {
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let player = match parse_player(&req.player_name) {
        Ok(player) => player,
        Err(resp) => return resp,
    };
    let amount = match Money::parse(req.amount.trim()) {
        Ok(amount) => amount,
        Err(e) => return invalid_input(&e.to_string()),
    };
    let mut ledger = state.ledger.lock().await;
    match ledger.apply_payment(&player, amount) {
        Ok(receipt) => Json(json!({"receipt": receipt, "method": req.method})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}

pub(crate) async fn jackpot_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<JackpotRequest>,
) -> Response {
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let player = match parse_player(&req.player_name) {
        Ok(player) => player,
        Err(resp) => return resp,
    };
    let hole = match HoleNumber::new(req.hole_number) {
        Ok(hole) => hole,
        Err(e) => return invalid_input(&e.to_string()),
    };
    let event_date = match EventDate::parse(req.event_date.trim()) {
        Ok(date) => date,
        Err(e) => return invalid_input(&e.to_string()),
    };
    let win = JackpotWin {
        player,
        course: req.course,
        hole,
        event_date,
        description: req.description,
    };
    let mut ledger = state.ledger.lock().await;
    match ledger.record_jackpot_win(win) {
        Ok(event) => Json(json!({"event": event})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}

/// Plain-text body of `Player,Amount` lines; a destructive overwrite of
/// each listed account, best-effort per line.
pub(crate) async fn upload_balances_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let mut ledger = state.ledger.lock().await;
    match ledger.upload_balances(&body) {
        Ok(summary) => Json(json!({"summary": summary})).into_response(),
        Err(err) => ledger_error_response(&err),
    }
}
