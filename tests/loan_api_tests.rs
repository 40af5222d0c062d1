//! HTTP-level tests driving the full router in-process

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use emprestimos_server::build_app;
use emprestimos_server::config::Config;
use emprestimos_server::middleware::RateLimiter;
use emprestimos_server::state::AppState;

fn test_app() -> Router {
    build_app(&Config::default(), AppState::default(), RateLimiter::new(10_000))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, HeaderMap, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, headers, json)
}

async fn send_text(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, HeaderMap, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

fn loan_body() -> Value {
    json!({
        "cliente": "João da Silva",
        "valor": 15000,
        "prazoMeses": 36,
        "taxaJurosMensal": 1.2,
        "dataContrato": "2024-10-10T00:00:00Z"
    })
}

fn loan_v2_body() -> Value {
    json!({
        "cliente": "Ana Clara Monteiro",
        "valor": 20000.00,
        "prazoMeses": 36,
        "taxaJurosMensal": 1.2,
        "dataCriacao": "2024-10-10T12:00:00Z",
        "status": "Aprovado",
        "totalAPagar": 1.0
    })
}

fn assert_money(value: &Value, expected: f64) {
    let actual = value.as_f64().expect("numeric value");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

// ============================================================================
// v1
// ============================================================================

#[tokio::test]
async fn test_v1_create_and_get() {
    let app = test_app();

    let (status, headers, created) = send(&app, Method::POST, "/v1/emprestimos", Some(loan_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&id).is_ok());
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        &format!("/v1/emprestimos/{}", id)
    );
    assert_eq!(created["cliente"], "João da Silva");
    assert_eq!(created["prazoMeses"], 36);
    assert!(created.get("totalAPagar").is_none());

    let (status, _, fetched) = send(&app, Method::GET, &format!("/v1/emprestimos/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _, listed) = send(&app, Method::GET, "/v1/emprestimos", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_v1_create_keeps_client_identifier() {
    let app = test_app();
    let supplied = Uuid::new_v4();
    let mut body = loan_body();
    body["id"] = json!(supplied);

    let (status, headers, created) = send(&app, Method::POST, "/v1/emprestimos", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], supplied.to_string());
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        &format!("/v1/emprestimos/{}", supplied)
    );

    let (status, _, fetched) = send(&app, Method::GET, &format!("/v1/emprestimos/{}", supplied), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_amounts_keep_their_exact_decimal_digits() {
    let app = test_app();

    let (status, _, created) = send_text(
        &app,
        Method::POST,
        "/v1/emprestimos",
        Some(r#"{"cliente":"João da Silva","valor":12345.678901234567890123,"prazoMeses":12}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.contains(r#""valor":12345.678901234567890123"#), "{}", created);

    let (status, _, created) = send_text(
        &app,
        Method::POST,
        "/v2/emprestimos",
        Some(r#"{"cliente":"Ana Clara Monteiro","valor":20000.10,"prazoMeses":36}"#),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.contains(r#""valor":20000.10"#), "{}", created);
    assert!(created.contains(r#""totalAPagar":28615.52"#), "{}", created);
}

#[tokio::test]
async fn test_v1_create_rejects_invalid_fields() {
    let app = test_app();

    let (status, _, body) = send(
        &app,
        Method::POST,
        "/v1/emprestimos",
        Some(json!({ "cliente": "", "valor": 50, "prazoMeses": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let fields = body["error"]["fields"].as_object().unwrap();
    assert!(fields.contains_key("cliente"));
    assert!(fields.contains_key("valor"));
    assert!(fields.contains_key("prazoMeses"));

    let (_, _, listed) = send(&app, Method::GET, "/v1/emprestimos", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_v1_malformed_json_is_bad_request() {
    let app = test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/emprestimos")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"cliente\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_v1_unknown_and_malformed_ids_are_not_found() {
    let app = test_app();
    let unknown = format!("/v1/emprestimos/{}", Uuid::new_v4());

    let (status, _, body) = send(&app, Method::GET, &unknown, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _, _) = send(&app, Method::GET, "/v1/emprestimos/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::PUT, &unknown, Some(loan_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::PATCH, &unknown, Some(json!({ "valor": 1000 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &unknown, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_v1_replace_patch_delete() {
    let app = test_app();
    let (_, _, created) = send(&app, Method::POST, "/v1/emprestimos", Some(loan_body())).await;
    let id = created["id"].as_str().unwrap().to_string();
    let uri = format!("/v1/emprestimos/{}", id);

    let mut replacement = loan_body();
    replacement["id"] = json!(Uuid::new_v4());
    replacement["cliente"] = json!("Maria Souza");
    let (status, _, replaced) = send(&app, Method::PUT, &uri, Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], id.as_str());
    assert_eq!(replaced["cliente"], "Maria Souza");

    let (status, _, patched) = send(&app, Method::PATCH, &uri, Some(json!({ "prazoMeses": 12 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["prazoMeses"], 12);
    assert_money(&patched["valor"], 15000.0);

    let (status, _, body) = send(&app, Method::PATCH, &uri, Some(json!({ "prazoMeses": 121 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["prazoMeses"].is_array());

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// v2
// ============================================================================

#[tokio::test]
async fn test_v2_create_computes_total_and_status() {
    let app = test_app();

    let (status, headers, created) = send(&app, Method::POST, "/v2/emprestimos", Some(loan_v2_body())).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["id"].as_str().unwrap();
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        &format!("/v2/emprestimos/{}", id)
    );
    assert_eq!(created["status"], "Pendente");
    assert_eq!(created["dataCriacao"], "2024-10-10T12:00:00Z");
    assert_money(&created["totalAPagar"], 28615.38);
}

#[tokio::test]
async fn test_v2_patch_and_replace_recompute_total() {
    let app = test_app();
    let (_, _, created) = send(&app, Method::POST, "/v2/emprestimos", Some(loan_v2_body())).await;
    let uri = format!("/v2/emprestimos/{}", created["id"].as_str().unwrap());

    let (status, _, patched) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "valor": 18000, "prazoMeses": 30 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_money(&patched["totalAPagar"], 24261.28);
    assert_eq!(patched["status"], "Pendente");

    let mut replacement = loan_v2_body();
    replacement["valor"] = json!(10000);
    replacement["prazoMeses"] = json!(12);
    replacement["status"] = json!("Quitado");
    let (status, _, replaced) = send(&app, Method::PUT, &uri, Some(replacement)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], created["id"]);
    assert_eq!(replaced["status"], "Quitado");
    assert_money(&replaced["totalAPagar"], 11268.25);
}

#[tokio::test]
async fn test_v2_rejects_long_status() {
    let app = test_app();
    let mut body = loan_v2_body();
    body["status"] = json!("x".repeat(51));

    let (status, _, error) = send(&app, Method::POST, "/v2/emprestimos", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["error"]["fields"]["status"].is_array());
}

#[tokio::test]
async fn test_versions_do_not_share_records() {
    let app = test_app();
    let (_, _, created) = send(&app, Method::POST, "/v1/emprestimos", Some(loan_body())).await;
    let id = created["id"].as_str().unwrap();

    let (status, _, _) = send(&app, Method::GET, &format!("/v2/emprestimos/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, _, listed) = send(&app, Method::GET, "/v2/emprestimos", None).await;
    assert_eq!(listed, json!([]));
}

// ============================================================================
// Ambient endpoints and middleware
// ============================================================================

#[tokio::test]
async fn test_openapi_documents() {
    let app = test_app();

    let (status, _, doc) = send(&app, Method::GET, "/swagger/v1/swagger.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "API de Gestão de Empréstimos");
    assert!(doc["paths"]["/v1/emprestimos/{id}"]["patch"].is_object());

    let (status, _, doc) = send(&app, Method::GET, "/swagger/v2/swagger.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "API de Gestão de Empréstimos - V2");

    assert!(doc["components"]["schemas"]["LoanV2"].is_object());

    let (status, _, _) = send(&app, Method::GET, "/swagger/v9/swagger.json", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_root_serves_swagger_ui_over_both_documents() {
    let app = test_app();

    let (status, headers, page) = send_text(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(page.contains("<title>Documentação da API de Empréstimos</title>"));
    assert!(page.contains("/custom.css"));

    let (status, _, script) = send_text(&app, Method::GET, "/swagger-initializer.js", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(script.contains("/swagger/v1/swagger.json"));
    assert!(script.contains("/swagger/v2/swagger.json"));

    let (status, _, _) = send_text(&app, Method::GET, "/swagger-ui/", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_counts_and_security_headers() {
    let app = test_app();
    send(&app, Method::POST, "/v2/emprestimos", Some(loan_v2_body())).await;

    let (status, headers, health) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["loans_v1"], 0);
    assert_eq!(health["loans_v2"], 1);

    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
}

#[tokio::test]
async fn test_unmatched_paths_fall_through_to_static_files() {
    let app = test_app();

    let (status, headers, stylesheet) = send_text(&app, Method::GET, "/custom.css", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/css");
    assert!(stylesheet.contains(".swagger-ui"));

    let (status, _, _) = send(&app, Method::GET, "/custom-missing.css", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limit_rejects_burst_overflow() {
    let app = build_app(&Config::default(), AppState::default(), RateLimiter::new(1));

    let request = || {
        Request::builder()
            .uri("/health")
            .header("x-forwarded-for", "198.51.100.4")
            .body(Body::empty())
            .unwrap()
    };

    for _ in 0..2 {
        let response = app.clone().oneshot(request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "1");
}

#[tokio::test]
async fn test_rate_limit_buckets_by_peer_address_without_proxy_headers() {
    let app = build_app(&Config::default(), AppState::default(), RateLimiter::new(1));

    let request = |peer: &str| {
        let peer: SocketAddr = peer.parse().unwrap();
        let mut request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        request
    };

    for _ in 0..2 {
        let response = app.clone().oneshot(request("192.0.2.1:40000")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let response = app.clone().oneshot(request("192.0.2.1:40001")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app.clone().oneshot(request("192.0.2.2:40000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
