//! # Webhook HTTP Layer
//!
//! File: cli/src/web/mod.rs
//!
//! ## Overview
//!
//! Builds the axum `Router` that exposes both controllers to the chat
//! platform. Handlers are thin: deserialize the event, call the controller,
//! serialize the response. Failures are mapped to HTTP status codes in one
//! place, `ApiError`.
//!
//! ## Routes
//!
//! - `POST /contact` and `POST /`: the contact dialog
//! - `POST /assistant`: the AI assistant (503 when no AI client is configured)
//! - `GET /healthz`: liveness probe, answers `ok`
//!
//! | Failure                                   | Status |
//! |-------------------------------------------|--------|
//! | Body is not an interaction event          | 400    |
//! | Missing field or unknown `invokedFunction` | 400    |
//! | AI client not configured                  | 503    |
//! | AI call failed or returned non-2xx        | 502    |
//! | Anything else                             | 500    |
//!
use crate::assistant::AssistantController;
use crate::chat::event::InteractionEvent;
use crate::chat::response::ChatResponse;
use crate::core::config::ServerSettings;
use crate::core::error::CardbotError;
use crate::dialog::DialogController;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, warn, Level};

/// Everything the handlers share. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub dialog: DialogController,
    /// `None` when no AI client could be built.
    pub assistant: Option<AssistantController>,
}

/// # Create Axum Application (`create_app`)
///
/// Mounts the webhook routes on a `Router` with request tracing and, when
/// `enable_cors` is set, a permissive CORS layer.
pub fn create_app(state: Arc<AppState>, settings: &ServerSettings) -> Router {
    let cors_layer = if settings.enable_cors {
        info!("CORS middleware enabled (permissive).");
        CorsLayer::permissive()
    } else {
        debug!("CORS middleware disabled.");
        CorsLayer::new()
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::default())
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", post(contact))
        .route("/contact", post(contact))
        .route("/assistant", post(assistant))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(trace_layer).layer(cors_layer))
}

async fn contact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InteractionEvent>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(event) = payload.map_err(rejection)?;
    info!("Contact webhook: {:?} event", event.kind);
    Ok(Json(state.dialog.respond(&event)?))
}

async fn assistant(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<InteractionEvent>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(event) = payload.map_err(rejection)?;
    info!("Assistant webhook: {:?} event", event.kind);
    let assistant = state.assistant.as_ref().ok_or_else(|| {
        CardbotError::AiUnavailable("no AI client is configured for this server".into())
    })?;
    Ok(Json(assistant.handle(&event).await?))
}

async fn healthz() -> &'static str {
    "ok"
}

fn rejection(rejection: JsonRejection) -> CardbotError {
    CardbotError::MalformedEvent(rejection.body_text())
}

/// Converts any handler error into a JSON `{ "error": ... }` response.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<CardbotError>() {
            Some(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Some(CardbotError::AiUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Some(CardbotError::Upstream { .. } | CardbotError::UpstreamStatus { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = format!("{:#}", self.0);
        if status.is_client_error() {
            warn!("Rejected event: {}", message);
        } else if status == StatusCode::SERVICE_UNAVAILABLE {
            warn!("{}", message);
        } else {
            error!("Request failed: {}", message);
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                CardbotError::MalformedEvent("x".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CardbotError::UnknownAction {
                    function: "x".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                CardbotError::AiUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CardbotError::UpstreamStatus {
                    status: 500,
                    body: String::new(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                CardbotError::Config("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_context_does_not_hide_the_cause() {
        let err = anyhow::Error::new(CardbotError::UpstreamStatus {
            status: 429,
            body: "slow down".into(),
        })
        .context("classifying message");
        assert_eq!(ApiError::from(err).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_create_app_builds() {
        let state = Arc::new(AppState {
            dialog: DialogController::default(),
            assistant: None,
        });
        let app = create_app(state, &ServerSettings::default());
        assert_ne!(format!("{:?}", app), "");
    }
}
