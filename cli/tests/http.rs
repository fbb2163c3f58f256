//! # Webhook Router Tests
//!
//! File: cli/tests/http.rs
//!
//! ## Overview
//!
//! Drives the axum `Router` in-process with `tower::ServiceExt::oneshot`:
//! routing, JSON bodies, and the mapping of failures onto status codes.
//!

mod common;
use common::*;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use cardbot::ai::AiService;
use cardbot::assistant::AssistantController;
use cardbot::core::config::ServerSettings;
use cardbot::dialog::DialogController;
use cardbot::web::{create_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(ai: Option<Arc<FakeAi>>) -> Router {
    let dialog = DialogController::default();
    let assistant = ai.map(|ai| {
        let ai: Arc<dyn AiService> = ai;
        AssistantController::new(ai, dialog.clone())
    });
    create_app(
        Arc::new(AppState { dialog, assistant }),
        &ServerSettings::default(),
    )
}

fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

fn post_json(uri: &str, value: &Value) -> Request<Body> {
    post(uri, value.to_string())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

#[tokio::test]
async fn test_healthz() {
    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let (status, body) = send(app(None), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".into()));
}

#[tokio::test]
async fn test_contact_route_and_root_alias_agree() {
    let event = slash_command_event(2, "/addContact");
    let (status, contact) = send(app(None), post_json("/contact", &event)).await;
    let (_, root) = send(app(None), post_json("/", &event)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(contact["actionResponse"]["type"], "DIALOG");
    assert_eq!(contact, root);
}

#[tokio::test]
async fn test_invalid_json_is_bad_request() {
    let (status, body) = send(app(None), post("/contact", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed event"));
}

#[tokio::test]
async fn test_unknown_function_is_bad_request() {
    let event = json!({
        "type": "CARD_CLICKED",
        "common": { "invokedFunction": "deleteEverything" }
    });
    let (status, body) = send(app(None), post_json("/contact", &event)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("deleteEverything"));
}

#[tokio::test]
async fn test_removed_from_space_is_empty_object() {
    let (status, body) =
        send(app(None), post_json("/contact", &json!({ "type": "REMOVED_FROM_SPACE" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_assistant_without_ai_is_unavailable() {
    let (status, body) = send(app(None), post_json("/assistant", &message_event("hi"))).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_assistant_replies_with_add_contact_button() {
    let ai = Arc::new(FakeAi::replying("Happy to help!"));
    let (status, body) = send(
        app(Some(ai.clone())),
        post_json("/assistant", &message_event("Can you help me?")),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Happy to help!");
    assert_eq!(
        body["accessoryWidgets"][0]["buttonList"]["buttons"][0]["onClick"]["action"]["function"],
        "openInitialDialog"
    );
    assert_eq!(ai.call_count(), 2);
}

#[tokio::test]
async fn test_assistant_upstream_failure_is_bad_gateway() {
    let ai = Arc::new(FakeAi::failing(500));
    let (status, body) = send(
        app(Some(ai.clone())),
        post_json("/assistant", &message_event("hello")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("HTTP 500"));
    assert_eq!(ai.call_count(), 1);
}

#[tokio::test]
async fn test_assistant_routes_card_clicks_to_dialog() {
    let ai = Arc::new(FakeAi::default());
    let (status, body) = send(
        app(Some(ai.clone())),
        post_json("/assistant", &submission_event("Ada", Some("SUBMIT_DIALOG"))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["actionResponse"]["dialogAction"]["actionStatus"]["statusCode"], "OK");
    assert_eq!(ai.call_count(), 0);
}
