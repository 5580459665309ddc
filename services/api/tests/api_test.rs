use axum::body::Body;
use axum::http::Request;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use pauta_api::{create_router, ApiState};
use shared::store::MemoryStore;
use shared::{FallbackCache, ResilientStore};

/// Router over a fresh in-memory backend and an empty fallback cache, so no
/// state leaks between test cases.
fn create_test_app() -> Router {
    let store = Arc::new(ResilientStore::new(
        Arc::new(MemoryStore::new()),
        FallbackCache::empty(),
    ));
    create_router(ApiState { store })
}

fn webhook_payload(date: &str, summary: &str) -> Value {
    json!({
        "organizador": "maria.silva@empresa.com.br",
        "convidados": ["joao.pereira@empresa.com.br", "ana.oliveira@empresa.com.br"],
        "data_reuniao": date,
        "horario_reuniao": "14:30",
        "link_gravacao": "https://meeting-recordings.com/abc123",
        "transcricao": "Maria: Boa tarde a todos.",
        "resumo": summary
    })
}

async fn post_webhook(app: &Router, payload: &Value) -> (u16, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook/meetings")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status().as_u16();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (u16, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status().as_u16();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "pauta-api");
}

#[tokio::test]
async fn test_webhook_round_trip() {
    let app = create_test_app();
    let (status, created) =
        post_webhook(&app, &webhook_payload("2025-05-20", "Planejamento semanal")).await;

    assert_eq!(status, 201);
    let id = created["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert_eq!(created["organizer"], "maria.silva@empresa.com.br");
    assert_eq!(created["meetingDate"], "2025-05-20");
    assert_eq!(created["meetingTime"], "14:30");

    let (status, fetched) = get_json(&app, &format!("/api/meetings/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_webhook_missing_field_names_it_and_persists_nothing() {
    let app = create_test_app();
    let mut payload = webhook_payload("2025-05-20", "x");
    payload.as_object_mut().unwrap().remove("data_reuniao");

    let (status, body) = post_webhook(&app, &payload).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "data_reuniao");

    let (_, meetings) = get_json(&app, "/api/meetings").await;
    assert_eq!(meetings.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_webhook_wraps_bare_string_convidados() {
    let app = create_test_app();
    let mut payload = webhook_payload("2025-05-20", "x");
    payload["convidados"] = json!("solo@empresa.com.br");

    let (status, created) = post_webhook(&app, &payload).await;
    assert_eq!(status, 201);
    assert_eq!(created["participants"], json!(["solo@empresa.com.br"]));
}

#[tokio::test]
async fn test_list_is_date_descending() {
    let app = create_test_app();
    for date in ["2025-05-20", "2025-05-22", "2025-05-21"] {
        post_webhook(&app, &webhook_payload(date, "x")).await;
    }

    let (status, meetings) = get_json(&app, "/api/meetings").await;
    assert_eq!(status, 200);
    let dates: Vec<&str> = meetings
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["meetingDate"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-05-22", "2025-05-21", "2025-05-20"]);

    let (_, ascending) = get_json(&app, "/api/meetings?order=asc").await;
    let dates: Vec<&str> = ascending
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["meetingDate"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-05-20", "2025-05-21", "2025-05-22"]);
}

#[tokio::test]
async fn test_search_date_range_inclusive() {
    let app = create_test_app();
    for date in ["2025-05-20", "2025-05-21", "2025-05-22"] {
        post_webhook(&app, &webhook_payload(date, "x")).await;
    }

    let (status, results) = get_json(
        &app,
        "/api/meetings/search?dateFrom=2025-05-21&dateTo=2025-05-22",
    )
    .await;
    assert_eq!(status, 200);
    let dates: Vec<&str> = results
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["meetingDate"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2025-05-22", "2025-05-21"]);
}

#[tokio::test]
async fn test_search_text_is_case_insensitive() {
    let app = create_test_app();
    post_webhook(&app, &webhook_payload("2025-05-20", "budget review")).await;
    post_webhook(&app, &webhook_payload("2025-05-21", "design sync")).await;

    let (_, hits) = get_json(&app, "/api/meetings/search?query=BUDGET").await;
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["summary"], "budget review");

    let (_, misses) = get_json(&app, "/api/meetings/search?query=xyz").await;
    assert_eq!(misses.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_organizer_substring() {
    let app = create_test_app();
    post_webhook(&app, &webhook_payload("2025-05-20", "x")).await;

    let (_, hits) = get_json(&app, "/api/meetings/search?organizer=MARIA").await;
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let (_, misses) = get_json(&app, "/api/meetings/search?organizer=roberto").await;
    assert_eq!(misses.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let app = create_test_app();
    for date in ["2025-05-20", "2025-05-21"] {
        post_webhook(&app, &webhook_payload(date, "budget")).await;
    }

    let (_, first) = get_json(&app, "/api/meetings/search?query=budget").await;
    let (_, second) = get_json(&app, "/api/meetings/search?query=budget").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_search_bad_date_is_rejected() {
    let app = create_test_app();
    let (status, body) = get_json(&app, "/api/meetings/search?dateFrom=21-05-2025").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "dateFrom");
}

#[tokio::test]
async fn test_statistics_counts_totals() {
    let app = create_test_app();
    for date in ["2025-05-20", "2025-05-21", "2025-05-22"] {
        post_webhook(&app, &webhook_payload(date, "x")).await;
    }

    let (status, stats) = get_json(&app, "/api/meetings/statistics").await;
    assert_eq!(status, 200);
    assert_eq!(stats["total"], 3);
    assert!(stats["thisWeek"].is_number());
    assert!(stats["thisMonth"].is_number());
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let app = create_test_app();
    let (status, body) = get_json(&app, "/api/meetings/does-not-exist").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "not_found");
}
