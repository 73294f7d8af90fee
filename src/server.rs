use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::relay;
use crate::translate::client_types::{ErrorBody, SearchParams};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

pub const SEARCH_ROUTE: &str = "/api/google-restaurants";

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    /// Resolved once at startup; never logged.
    pub api_key: String,
    pub client: reqwest::Client,
}

impl AppState {
    /// Build state with a client whose timeout comes from the config.
    pub fn new(config: RelayConfig, api_key: String) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SEARCH_ROUTE, get(handle_search))
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let span = tracing::info_span!("search", request_id = %Uuid::new_v4());

    async move {
        info!(?params, "Received restaurant search");

        match relay::relay_search(&params, &state.config, &state.api_key, &state.client).await {
            Ok(results) => Json(results).into_response(),
            Err(e) => error_response(&e),
        }
    }
    .instrument(span)
    .await
}

/// Map a relay error onto its status code and client-facing body.
pub fn error_response(err: &RelayError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        RelayError::Validation { message } => {
            warn!(%message, "Rejected search parameters");
            ErrorBody::new("Invalid location or radius parameters.").with_error(message.as_str())
        }
        RelayError::UpstreamStatus {
            status: provider_status,
            message,
        } => {
            error!(%provider_status, ?message, "Google Places API error");
            ErrorBody::new("Error fetching data from Google Places API")
                .with_error(message.clone().unwrap_or_else(|| provider_status.clone()))
                .with_status(provider_status.as_str())
        }
        RelayError::Transport { detail, .. } => {
            error!(%detail, "Provider call failed");
            ErrorBody::new("Internal server error when calling Google API").with_error(detail.clone())
        }
        other => {
            error!(error = %other, "Search failed");
            ErrorBody::new("Internal server error when calling Google API")
                .with_error(other.to_string())
        }
    };

    (status, Json(body)).into_response()
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn handle_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new(format!(
            "Not found. Try GET {SEARCH_ROUTE}?latitude=..&longitude=..&radiusInMiles=.."
        ))),
    )
}
