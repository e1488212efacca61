use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use crate::address::model::LabelResult;
use crate::address::US_STATES;
use crate::config::LabelConfig;
use crate::handler::{self, LabelError};
use crate::provider::Connector;

/// Shared by every request. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct AppState<C> {
    pub config: LabelConfig,
    pub connector: C,
}

impl<C: Connector> AppState<C> {
    pub fn new(config: LabelConfig, connector: C) -> Self {
        Self {
            config,
            connector,
        }
    }
}

/// * `POST /api/create-label`
/// * `GET /api/states`
/// * `GET /health`
pub fn app<C: Connector>(state: AppState<C>) -> Router {
    Router::new()
        .route("/api/create-label", post(create_label::<C>))
        .route("/api/states", get(list_states))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// takes raw bytes rather than `Json` so the API key check runs before parsing
async fn create_label<C: Connector>(State(state): State<AppState<C>>, body: Bytes) -> Result<Json<LabelResult>, LabelError> {
    handler::create_label(&state.config, &state.connector, &body)
        .await
        .map(Json)
}

#[derive(Debug, Serialize)]
struct StateOption {
    code: &'static str,
    name: &'static str,
}

async fn list_states() -> Json<Vec<StateOption>> {
    Json(
        US_STATES.iter()
            .map(|&(code, name)| StateOption { code, name })
            .collect()
    )
}

async fn health() -> &'static str {
    "ok"
}
