// tests/api.rs

//! HTTP API tests: routing, status codes and problem documents.

#![cfg(feature = "server")]

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chomp_recipes::server::{AppState, create_router};
use common::{TestKitchen, setup_kitchen};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app(kitchen: &TestKitchen) -> Router {
    create_router(AppState::new(kitchen.service.clone()))
}

fn pancakes_json() -> Value {
    json!({
        "name": "Pancakes",
        "duration": "PT30M",
        "amountOfPeople": 4,
        "description": "Simple",
        "instructions": ["Mix", "Fry"],
        "ingredients": [{"ingredientRef": "flourId", "quantity": 200, "unit": "g"}]
    })
}

fn json_request(method: &str, uri: &str, email: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(email) = email {
        builder = builder.header("X-User-Email", email);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: &str, uri: &str, email: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(email) = email {
        builder = builder.header("X-User-Email", email);
    }
    builder.body(Body::empty()).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let kitchen = setup_kitchen();
    let response = app(&kitchen)
        .oneshot(empty_request("GET", "/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_fetch() {
    let kitchen = setup_kitchen();

    let (status, created) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", Some("chef@example.com"), &pancakes_json()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Pancakes");
    assert_eq!(created["duration"], "PT30M");
    assert_eq!(created["amountOfPeople"], 4);
    assert_eq!(created["instructions"], json!(["Mix", "Fry"]));
    assert_eq!(created["ingredients"][0]["name"], "Flour");
    assert_eq!(created["ingredients"][0]["unit"], "g");
    assert_eq!(created["author"], json!({"name": "Chef", "image": "img.png"}));
    assert!(created["createdAt"].is_string());

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(
        app(&kitchen),
        empty_request("GET", &format!("/api/recipe/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_and_mine() {
    let kitchen = setup_kitchen();
    kitchen.users.add("u2", "baker@example.com", "Baker", None);

    for email in ["chef@example.com", "baker@example.com"] {
        let (status, _) = send(
            app(&kitchen),
            json_request("POST", "/api/recipe", Some(email), &pancakes_json()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = send(app(&kitchen), empty_request("GET", "/api/recipe", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, mine) = send(
        app(&kitchen),
        empty_request("GET", "/api/recipe/me", Some("baker@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["author"]["name"], "Baker");
}

#[tokio::test]
async fn test_update_and_delete() {
    let kitchen = setup_kitchen();

    let (_, created) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", Some("chef@example.com"), &pancakes_json()),
    )
    .await;
    let uri = format!("/api/recipe/{}", created["id"]);

    let mut changed = pancakes_json();
    changed["ingredients"] = json!([{"id": "eggsId", "quantity": 2, "unit": "piece"}]);
    let (status, updated) = send(
        app(&kitchen),
        json_request("PUT", &uri, Some("chef@example.com"), &changed),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["ingredients"][0]["name"], "Eggs");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let response = app(&kitchen)
        .oneshot(empty_request("DELETE", &uri, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, problem) = send(app(&kitchen), empty_request("DELETE", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(problem["status"], 404);
}

#[tokio::test]
async fn test_not_found_is_problem_document() {
    let kitchen = setup_kitchen();

    let response = app(&kitchen)
        .oneshot(empty_request("GET", "/api/recipe/404", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/problem+json"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let problem: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(problem["type"], "urn:chomp:error:not_found");
    assert_eq!(problem["detail"], "Recipe not found with id: 404");
}

#[tokio::test]
async fn test_unknown_ingredient_is_not_found() {
    let kitchen = setup_kitchen();

    let mut body = pancakes_json();
    body["ingredients"] = json!([{"ingredientRef": "unicornId", "quantity": 1, "unit": "horn"}]);
    let (status, _) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", Some("chef@example.com"), &body),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_requests() {
    let kitchen = setup_kitchen();

    // No identity header
    let (status, problem) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", None, &pancakes_json()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(problem["title"], "Bad Request");

    let (status, _) = send(app(&kitchen), empty_request("GET", "/api/recipe/me", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Delimiter in an instruction
    let mut body = pancakes_json();
    body["instructions"] = json!(["Mix___well"]);
    let (status, _) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", Some("chef@example.com"), &body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Malformed duration
    let mut body = pancakes_json();
    body["duration"] = json!("half an hour");
    let (status, _) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", Some("chef@example.com"), &body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Non-numeric id
    let (status, _) = send(app(&kitchen), empty_request("GET", "/api/recipe/abc", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_transient_failure_is_internal_error() {
    let kitchen = setup_kitchen();
    kitchen.catalog.break_lookup("flourId");

    let (status, problem) = send(
        app(&kitchen),
        json_request("POST", "/api/recipe", Some("chef@example.com"), &pancakes_json()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(problem["status"], 500);
    assert_eq!(problem["type"], "urn:chomp:error:internal");
    assert_eq!(problem["detail"], "Internal error");

    let text = problem.to_string();
    assert!(!text.contains("HTTP 503"));
    assert!(!text.contains("flourId"));
}
