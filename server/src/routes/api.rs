use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use palpite_shared::{GameSession, Guess, GuessError, colors, format_share_text};
use serde::{Deserialize, Serialize};

use crate::state::{AppState, CreateSessionError};

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub guess: String,
}

/// Guess as the presentation layer renders it: the core record plus the
/// band's label, fill color and readable text color.
#[derive(Debug, Clone, Serialize)]
pub struct GuessView {
    pub display_name: String,
    pub distance_meters: f64,
    pub distance_km: f64,
    pub band: palpite_shared::ProximityBand,
    pub label: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
}

impl From<&Guess> for GuessView {
    fn from(guess: &Guess) -> Self {
        let color = guess.band.color_hex();
        Self {
            display_name: guess.display_name.clone(),
            distance_meters: guess.distance_meters,
            distance_km: (guess.distance_meters / 100.0).round() / 10.0,
            band: guess.band,
            label: guess.band.label(),
            color,
            text_color: colors::contrast_text_color(color),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: u64,
    pub date: chrono::NaiveDate,
    pub game_name: String,
    pub guesses: Vec<GuessView>,
    pub is_won: bool,
    /// Revealed only once the session is won.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl SessionView {
    fn from_session(id: u64, session: &GameSession, game_name: &str) -> Self {
        Self {
            session_id: id,
            date: session.date,
            game_name: game_name.to_string(),
            guesses: session.guesses.iter().map(GuessView::from).collect(),
            is_won: session.is_won,
            target: session
                .is_won
                .then(|| session.target_display_name.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: &'static str,
    message: String,
    /// Whether the input field should keep its text so the player can
    /// correct it.
    preserve_input: bool,
}

fn error_response(status: StatusCode, error: &'static str, message: String, preserve_input: bool) -> Response {
    (status, Json(ApiError { error, message, preserve_input })).into_response()
}

fn guess_error_response(err: GuessError) -> Response {
    match err {
        GuessError::EmptyGuess => error_response(
            StatusCode::BAD_REQUEST,
            "empty_guess",
            "Por favor, digite o nome de um município.".to_string(),
            true,
        ),
        GuessError::DuplicateGuess { name } => error_response(
            StatusCode::CONFLICT,
            "duplicate_guess",
            format!("Você já tentou \"{name}\"."),
            true,
        ),
        GuessError::UnknownMunicipality { name } => error_response(
            StatusCode::BAD_REQUEST,
            "unknown_municipality",
            format!("Município \"{name}\" não encontrado. Verifique o nome e tente novamente."),
            true,
        ),
        GuessError::GameAlreadyWon => error_response(
            StatusCode::CONFLICT,
            "game_already_won",
            "Você já acertou o município de hoje.".to_string(),
            false,
        ),
    }
}

fn session_not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "unknown_session",
        "Sessão não encontrada. Inicie um novo jogo.".to_string(),
        false,
    )
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "municipalities": state.registry.len(),
        "active_sessions": state.sessions.len(),
    }))
}

/// Sorted display names for the autocomplete widget.
pub async fn get_municipalities(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "count": state.display_names.len(),
        "municipalities": &*state.display_names,
    }))
}

pub async fn create_session(State(state): State<AppState>) -> Response {
    let today = state.today();
    match state.create_session(today) {
        Ok((id, session)) => (
            StatusCode::CREATED,
            Json(SessionView::from_session(id, &session, &state.game_name)),
        )
            .into_response(),
        Err(CreateSessionError::EmptyRegistry) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "empty_registry",
            "Dados dos municípios não encontrados.".to_string(),
            false,
        ),
        Err(CreateSessionError::Saturated) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "saturated",
            "Muitos jogos em andamento. Tente novamente mais tarde.".to_string(),
            false,
        ),
    }
}

pub async fn get_session(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.sessions.get(&id) {
        Some(session) => {
            Json(SessionView::from_session(id, &session, &state.game_name)).into_response()
        }
        None => session_not_found(),
    }
}

pub async fn post_guess(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<GuessRequest>,
) -> Response {
    let Some(mut session) = state.sessions.get_mut(&id) else {
        return session_not_found();
    };

    match session.evaluate_guess(&state.registry, &request.guess) {
        Ok(outcome) => Json(serde_json::json!({
            "guess": GuessView::from(&outcome.guess),
            "is_won": outcome.is_won,
            "target": outcome.target,
        }))
        .into_response(),
        Err(err) => guess_error_response(err),
    }
}

pub async fn get_share(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.sessions.get(&id) {
        Some(session) => {
            format_share_text(&session, &state.game_name, session.date).into_response()
        }
        None => session_not_found(),
    }
}
