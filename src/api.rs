use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::app::App;
use crate::error::Error;
use crate::models::{Item, Mode, ReviewRecord};

#[derive(Clone)]
pub struct ApiState {
    pub app: Arc<Mutex<App>>,
}

pub fn app_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/card", get(get_card))
        .route("/api/rate", post(submit_rating))
        .route("/api/deck", post(rebuild_deck))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct CardResponse {
    mode: Mode,
    due_count: usize,
    /// 1-based; 0 when the working set is empty.
    position: usize,
    total: usize,
    card: Option<Item>,
}

async fn get_card(State(state): State<ApiState>) -> impl IntoResponse {
    let app = state.app.lock().await;
    let (position, total) = app.deck.position().unwrap_or((0, 0));
    Json(CardResponse {
        mode: app.mode,
        due_count: app.due_today,
        position,
        total,
        card: app.current_item().cloned(),
    })
}

#[derive(Deserialize)]
struct RateRequest {
    quality: u8,
}

async fn submit_rating(
    State(state): State<ApiState>,
    Json(payload): Json<RateRequest>,
) -> impl IntoResponse {
    let mut app = state.app.lock().await;
    match app.submit_rating(payload.quality).await {
        Ok(record) => Json::<ReviewRecord>(record).into_response(),
        Err(err @ Error::InvalidQuality(_)) => {
            (StatusCode::BAD_REQUEST, err.to_string()).into_response()
        }
        Err(err @ (Error::NoCurrentItem | Error::AutoplayActive)) => {
            (StatusCode::CONFLICT, err.to_string()).into_response()
        }
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response(),
    }
}

#[derive(Deserialize)]
struct DeckRequest {
    chapter_start: u32,
    chapter_end: u32,
    mode: Mode,
    #[serde(default)]
    shuffled: bool,
}

#[derive(Serialize)]
struct DeckResponse {
    total: usize,
}

async fn rebuild_deck(
    State(state): State<ApiState>,
    Json(payload): Json<DeckRequest>,
) -> impl IntoResponse {
    let mut app = state.app.lock().await;
    app.set_selection(
        payload.chapter_start,
        payload.chapter_end,
        payload.mode,
        payload.shuffled,
    );
    app.rebuild_deck();
    Json(DeckResponse {
        total: app.deck.len(),
    })
}
