//! End-to-end HTTP tests against the in-memory store.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use customer_service::config::ServerConfig;
use customer_service::{build_router, AppState, MemoryCustomerStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app_with(server: ServerConfig) -> Router {
    let state = AppState::new(Arc::new(MemoryCustomerStore::new()), &server.api_prefix);
    build_router(state, &server)
}

fn app_with_prefix(prefix: &str) -> Router {
    app_with(ServerConfig {
        api_prefix: prefix.into(),
        ..ServerConfig::default()
    })
}

fn app() -> Router {
    app_with_prefix("")
}

fn kate(email: &str, city: &str) -> Value {
    json!({
        "firstname": "Katerine",
        "lastname": "perdomo",
        "email": email,
        "phone": "+57 300 000 0000",
        "street_line1": "Calle 1 # 2-3",
        "street_line2": "",
        "city": city,
        "state": "Cundinamarca",
        "country": "Colombia",
        "zipcode": "110111"
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, value)
}

async fn create(app: &Router, email: &str, city: &str) -> Value {
    let (status, _, body) = send(app, Method::POST, "/customers", Some(kate(email, city))).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

#[tokio::test]
async fn create_returns_201_location_and_normalized_fields() {
    let app = app();
    let (status, headers, body) = send(&app, Method::POST, "/customers", Some(kate("Kate@Email.com", "bogota"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert_eq!(headers[header::LOCATION], format!("/customers/{}", id).as_str());
    assert_eq!(body["email"], "kate@email.com");
    assert_eq!(body["lastname"], "Perdomo");
    assert_eq!(body["city"], "Bogota");
    assert_eq!(body["acc_active"], true);
    assert!(body["created_at"].as_str().unwrap().ends_with(" GMT"));
}

#[tokio::test]
async fn location_includes_api_prefix() {
    let app = app_with_prefix("/api");
    let (status, headers, body) = send(&app, Method::POST, "/api/customers", Some(kate("a@x.co", "bogota"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let location = headers[header::LOCATION].to_str().unwrap().to_string();
    assert_eq!(location, format!("/api/customers/{}", body["id"]));
    let (status, _, fetched) = send(&app, Method::GET, &location, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn duplicate_email_in_any_case_is_409() {
    let app = app();
    create(&app, "Kate@Email.com", "bogota").await;
    let (status, _, body) = send(&app, Method::POST, "/customers", Some(kate("kate@email.com", "neiva"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "conflict");
    let (_, _, all) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_phone_is_400_and_persists_nothing() {
    let app = app();
    let mut body = kate("kate@email.com", "bogota");
    body.as_object_mut().unwrap().remove("phone");
    let (status, _, err) = send(&app, Method::POST, "/customers", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "validation_error");
    assert_eq!(err["error"]["details"]["fields"], json!(["phone"]));
    let (_, _, all) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn over_long_fields_are_400_not_500() {
    let app = app();
    let mut body = kate(&format!("{}@email.com", "k".repeat(125)), "bogota");
    body["lastname"] = json!("p".repeat(80));
    let (status, _, err) = send(&app, Method::POST, "/customers", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["details"]["fields"], json!(["lastname", "email"]));
    let (_, _, all) = send(&app, Method::GET, "/customers", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn body_over_limit_without_content_length_is_413() {
    let app = app_with(ServerConfig {
        body_limit_bytes: 64,
        ..ServerConfig::default()
    });
    let req = Request::builder()
        .method(Method::POST)
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(kate(&"k".repeat(400), "bogota").to_string()))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "payload_too_large");
}

#[tokio::test]
async fn unparsable_query_uses_error_envelope() {
    let (status, _, body) = send(&app(), Method::GET, "/customers?city=a&city=b", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn non_json_content_type_is_415() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/customers")
        .header(header::CONTENT_TYPE, "text/html")
        .body(Body::from("<p>hi</p>"))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn malformed_json_is_400() {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstname\":"))
        .unwrap();
    let res = app().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_and_invalid_ids() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/customers/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Customer with id '0' was not found."));
    let (status, _, _) = send(&app, Method::GET, "/customers/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_on_collection_is_405() {
    let (status, _, _) = send(&app(), Method::PUT, "/customers", Some(kate("a@x.co", "bogota"))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn list_filters_by_city_and_email() {
    let app = app();
    create(&app, "a@x.co", "Bogota").await;
    create(&app, "b@x.co", "bogota").await;
    create(&app, "c@x.co", "Neiva").await;

    let (status, _, body) = send(&app, Method::GET, "/customers?city=Bogota", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = body.as_array().unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|c| c["city"] == "Bogota"));

    let (_, _, body) = send(&app, Method::GET, "/customers?email=C@X.CO", None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["city"], "Neiva");

    // lastname outranks city
    let (_, _, body) = send(&app, Method::GET, "/customers?city=Neiva&lastname=perdomo", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, _, body) = send(&app, Method::GET, "/customers?city=Cali", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_keeps_path_id() {
    let app = app();
    let created = create(&app, "a@x.co", "bogota").await;
    let id = created["id"].as_i64().unwrap();
    let mut body = kate("a@x.co", "neiva");
    body["id"] = json!(id + 100);
    let (status, _, updated) = send(&app, Method::PUT, &format!("/customers/{}", id), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["city"], "Neiva");
    assert_eq!(updated["created_at"], created["created_at"]);
    let (status, _, _) = send(&app, Method::GET, &format!("/customers/{}", id + 100), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_unknown_is_404() {
    let (status, _, _) = send(&app(), Method::PUT, "/customers/999", Some(kate("a@x.co", "bogota"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_changes_supplied_fields_only() {
    let app = app();
    let created = create(&app, "a@x.co", "bogota").await;
    let uri = format!("/customers/{}", created["id"]);
    let (status, _, patched) = send(&app, Method::PATCH, &uri, Some(json!({"city": "medellin"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["city"], "Medellin");
    assert_eq!(patched["phone"], created["phone"]);

    let (status, _, _) = send(&app, Method::PATCH, &uri, Some(json!({"email": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();
    let created = create(&app, "a@x.co", "bogota").await;
    let uri = format!("/customers/{}", created["id"]);
    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn activation_sub_resource() {
    let app = app();
    let created = create(&app, "a@x.co", "bogota").await;
    let uri = format!("/customers/{}/active", created["id"]);
    let (status, _, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acc_active"], false);
    let (_, _, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(body["acc_active"], false);
    let (_, _, body) = send(&app, Method::PUT, &uri, None).await;
    assert_eq!(body["acc_active"], true);
    let (status, _, _) = send(&app, Method::PUT, "/customers/404/active", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_ready_and_openapi() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    let (status, _, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "ok");
    let (status, _, body) = send(&app, Method::GET, "/apidocs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/customers/{id}/active"].is_object());
    let (_, _, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(body["customers"], "/customers");
}
