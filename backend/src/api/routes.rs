use super::error::ApiError;
use super::messages::{
    Ack, CreateLobbyRequest, JoinLobbyRequest, LeaveLobbyRequest, LobbyQuery, LobbyResponse,
    StartGameRequest,
};
use crate::lobby::{LobbyError, LobbyManager};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{Method, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub lobbies: Arc<LobbyManager>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/create_lobby", post(create_lobby))
        .route("/join_lobby", post(join_lobby))
        .route("/start_game", post(start_game))
        .route("/leave_lobby", post(leave_lobby))
        .route("/get_lobby", get(get_lobby))
        .fallback(not_found)
        .layer(cors())
        .with_state(state)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Decode a JSON body regardless of its declared content type.
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

async fn create_lobby(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LobbyResponse>, ApiError> {
    let req: CreateLobbyRequest = decode(&body)?;

    let response = match state.lobbies.create_lobby(req.name) {
        Ok(created) => LobbyResponse::created(&created),
        Err(err) => {
            warn!(error = %err, "Lobby creation failed");
            LobbyResponse::create_failed("No lobby codes available")
        }
    };
    Ok(Json(response))
}

async fn join_lobby(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LobbyResponse>, ApiError> {
    let req: JoinLobbyRequest = decode(&body)?;

    let response = match req.pin.as_deref() {
        Some(pin) => match state.lobbies.join_lobby(pin, req.name) {
            Ok(joined) => LobbyResponse::joined(&joined),
            Err(err) => LobbyResponse::join_failed(join_failure_reason(&err)),
        },
        None => LobbyResponse::join_failed("Lobby not found"),
    };
    Ok(Json(response))
}

fn join_failure_reason(err: &LobbyError) -> &'static str {
    match err {
        LobbyError::LobbyFull(_) => "Lobby full",
        LobbyError::GenerationExhausted { .. } => "No player ids available",
        LobbyError::LobbyNotFound(_) => "Lobby not found",
        // Neither is produced by a join
        LobbyError::ParticipantNotFound { .. } | LobbyError::AlreadyExists(_) => "Join failed",
    }
}

async fn start_game(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: StartGameRequest = decode(&body)?;

    let started = req
        .pin
        .as_deref()
        .is_some_and(|pin| state.lobbies.start_game(pin).is_ok());

    let response = if started {
        Json(LobbyResponse::GameStarted { success: true }).into_response()
    } else {
        Json(Ack { success: false }).into_response()
    };
    Ok(response)
}

async fn leave_lobby(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Ack>, ApiError> {
    let req: LeaveLobbyRequest = decode(&body)?;

    let success = match (req.pin.as_deref(), req.player_id) {
        (Some(pin), Some(player_id)) => state.lobbies.leave_lobby(pin, player_id).is_ok(),
        _ => false,
    };
    Ok(Json(Ack { success }))
}

async fn get_lobby(
    State(state): State<AppState>,
    Query(query): Query<LobbyQuery>,
) -> Json<LobbyResponse> {
    let view = query
        .pin
        .as_deref()
        .and_then(|pin| state.lobbies.get_lobby_state(pin).ok());

    match view {
        Some(view) => Json(LobbyResponse::state(&view)),
        None => Json(LobbyResponse::LobbyNotFound { success: false }),
    }
}
