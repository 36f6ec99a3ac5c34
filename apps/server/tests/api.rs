use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use rand::{rngs::OsRng, RngCore};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use fitfolio_server::{api::app_router, build_state, config::Config};

async fn build_test_app() -> (axum::Router, TempDir) {
    let tmp = TempDir::new().unwrap();

    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);

    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        jwt_secret: BASE64.encode(secret),
        token_ttl: Duration::from_secs(3600),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn request(
    app: &axum::Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &axum::Router, email: &str, username: &str) -> String {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "email": email,
            "username": username,
            "password": "correct-horse-battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["accessToken"].as_str().unwrap().to_string()
}

fn future_date(days: i64) -> String {
    (Utc::now().date_naive() + chrono::Duration::days(days)).to_string()
}

fn weight_goal_body() -> Value {
    json!({
        "title": "Cut to 75kg",
        "description": "summer shred",
        "kind": "weight",
        "startValue": 85.0,
        "targetValue": 75.0,
        "targetDate": future_date(60),
    })
}

#[tokio::test]
async fn health_is_public_and_goals_are_not() {
    let (app, _tmp) = build_test_app().await;

    let (status, _) = request(&app, Method::GET, "/api/v1/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(&app, Method::GET, "/api/v1/goals", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = request(&app, Method::GET, "/api/v1/goals", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_me() {
    let (app, _tmp) = build_test_app().await;
    register(&app, "jo@example.com", "jo").await;

    // Duplicate email rejected.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        Some(json!({
            "email": "jo@example.com",
            "username": "jo2",
            "password": "correct-horse-battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Login with the right password.
    let (status, body) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "jo@example.com", "password": "correct-horse-battery" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    // And with a wrong one.
    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "email": "jo@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = request(&app, Method::GET, "/api/v1/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "jo");
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn goal_lifecycle() {
    let (app, _tmp) = build_test_app().await;
    let token = register(&app, "jo@example.com", "jo").await;

    let (status, goal) = request(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(&token),
        Some(weight_goal_body()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["status"], "not_started");
    assert_eq!(goal["direction"], "decrease");
    assert_eq!(goal["progressPercentage"].as_f64().unwrap(), 0.0);
    assert_eq!(goal["daysRemaining"].as_i64().unwrap(), 60);
    let id = goal["id"].as_str().unwrap().to_string();

    // Progress update: 85 -> 82.5 against a 75 target is a quarter done.
    let (status, goal) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/goals/{id}/progress"),
        Some(&token),
        Some(json!({ "currentValue": 82.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!((goal["progressPercentage"].as_f64().unwrap() - 25.0).abs() < 1e-9);
    assert_eq!(goal["status"], "in_progress");

    // Overshooting the target clamps at 100 and completes.
    let (_, goal) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/goals/{id}/progress"),
        Some(&token),
        Some(json!({ "currentValue": 60.0 })),
    )
    .await;
    assert_eq!(goal["progressPercentage"].as_f64().unwrap(), 100.0);
    assert_eq!(goal["status"], "completed");

    // Regressing afterwards does not un-complete.
    let (_, goal) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/goals/{id}/progress"),
        Some(&token),
        Some(json!({ "currentValue": 80.0 })),
    )
    .await;
    assert_eq!(goal["status"], "completed");

    // Field update path.
    let (status, goal) = request(
        &app,
        Method::PUT,
        &format!("/api/v1/goals/{id}"),
        Some(&token),
        Some(json!({ "title": "Cut to 74kg" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goal["title"], "Cut to 74kg");

    // Delete is idempotent: gone means 404, not an error.
    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/goals/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/goals/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = request(
        &app,
        Method::GET,
        &format!("/api/v1/goals/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goals_are_scoped_to_their_owner() {
    let (app, _tmp) = build_test_app().await;
    let jo = register(&app, "jo@example.com", "jo").await;
    let sam = register(&app, "sam@example.com", "sam").await;

    let (_, goal) = request(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(&jo),
        Some(weight_goal_body()),
    )
    .await;
    let id = goal["id"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        Method::GET,
        &format!("/api/v1/goals/{id}"),
        Some(&sam),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = request(
        &app,
        Method::DELETE,
        &format!("/api/v1/goals/{id}"),
        Some(&sam),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, goals) = request(&app, Method::GET, "/api/v1/goals", Some(&sam), None).await;
    assert_eq!(goals.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn goal_summary_counts_statuses_and_completion_rate() {
    let (app, _tmp) = build_test_app().await;
    let token = register(&app, "jo@example.com", "jo").await;

    // Two goals driven to completion, one left at 60%.
    for target in ["a", "b"] {
        let mut body = weight_goal_body();
        body["title"] = json!(format!("goal {target}"));
        let (_, goal) = request(&app, Method::POST, "/api/v1/goals", Some(&token), Some(body)).await;
        let id = goal["id"].as_str().unwrap().to_string();
        request(
            &app,
            Method::PUT,
            &format!("/api/v1/goals/{id}/progress"),
            Some(&token),
            Some(json!({ "currentValue": 75.0 })),
        )
        .await;
    }
    let (_, goal) = request(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(&token),
        Some(weight_goal_body()),
    )
    .await;
    let id = goal["id"].as_str().unwrap().to_string();
    request(
        &app,
        Method::PUT,
        &format!("/api/v1/goals/{id}/progress"),
        Some(&token),
        Some(json!({ "currentValue": 79.0 })),
    )
    .await;

    let (status, summary) =
        request(&app, Method::GET, "/api/v1/goals/summary", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalGoals"], 3);
    assert_eq!(summary["completedGoals"], 2);
    assert_eq!(summary["inProgressGoals"], 1);
    assert!((summary["avgInProgressPercentage"].as_f64().unwrap() - 60.0).abs() < 1e-9);
    assert!((summary["avgCompletionRate"].as_f64().unwrap() - 66.67).abs() < 0.01);
}

#[tokio::test]
async fn measurement_flow() {
    let (app, _tmp) = build_test_app().await;
    let token = register(&app, "jo@example.com", "jo").await;

    let (status, _) = request(
        &app,
        Method::POST,
        "/api/v1/measurements",
        Some(&token),
        Some(json!({
            "recordedAt": "2026-07-30T08:00:00",
            "weight": 84.0,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, latest) = request(
        &app,
        Method::POST,
        "/api/v1/measurements",
        Some(&token),
        Some(json!({
            "recordedAt": "2026-08-05T08:00:00",
            "weight": 83.2,
            "notes": "after vacation",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let latest_id = latest["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        Method::GET,
        "/api/v1/measurements/latest",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(latest_id));
    assert_eq!(body["weight"].as_f64().unwrap(), 83.2);

    let (_, list) = request(&app, Method::GET, "/api/v1/measurements", Some(&token), None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn goal_mutations_reach_the_search_index() {
    let (app, _tmp) = build_test_app().await;
    let token = register(&app, "jo@example.com", "jo").await;

    let (_, goal) = request(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(&token),
        Some(weight_goal_body()),
    )
    .await;
    let id = goal["id"].as_str().unwrap().to_string();

    // Indexing is asynchronous; poll briefly.
    let mut hits = Vec::new();
    for _ in 0..50 {
        let (_, body) = request(
            &app,
            Method::GET,
            "/api/v1/search?q=shred",
            Some(&token),
            None,
        )
        .await;
        hits = body.as_array().cloned().unwrap_or_default();
        if !hits.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["docId"], json!(id));
    assert_eq!(hits[0]["kind"], "goal");

    // Deleting the goal eventually removes the document.
    request(
        &app,
        Method::DELETE,
        &format!("/api/v1/goals/{id}"),
        Some(&token),
        None,
    )
    .await;
    let mut remaining = vec![Value::Null];
    for _ in 0..50 {
        let (_, body) = request(
            &app,
            Method::GET,
            "/api/v1/search?q=shred",
            Some(&token),
            None,
        )
        .await;
        remaining = body.as_array().cloned().unwrap_or_default();
        if remaining.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(remaining.is_empty());
}
