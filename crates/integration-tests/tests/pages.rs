//! Integration tests for the static pages, 404 handling and response headers.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use customtee_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_home_features_products() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("lang=\"pt-BR\""));
    assert!(body.contains("/produto/1"));
}

#[tokio::test]
async fn test_about_page() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/sobre").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("NOSSOS VALORES"));
    assert!(body.contains("aria-current=\"page\""));
}

#[tokio::test]
async fn test_unknown_route_is_404_page() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/nao-existe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Página não encontrada"));
    assert!(body.contains("/nao-existe"));
}

#[tokio::test]
async fn test_category_filter() {
    let server = TestServer::start().await;

    let (status, body) = server.get("/produtos?categoria=street").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Urban Street Tee"));
    assert!(!body.contains("Geometric Vision"));

    let (status, body) = server.get("/produtos").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Urban Street Tee"));
    assert!(body.contains("Geometric Vision"));
}

#[tokio::test]
async fn test_unknown_category_shows_empty_state() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/produtos?categoria=xyz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Nenhum produto encontrado nesta categoria."));
}

#[tokio::test]
async fn test_unknown_product_is_404() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/produto/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Produto não encontrado"));
    let (status, _) = server.get("/produto/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers() {
    let server = TestServer::start().await;
    let resp = server
        .client()
        .get(server.url("/"))
        .send()
        .await
        .expect("Request failed");

    let headers = resp.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    let csp = headers
        .get("content-security-policy")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(csp.contains("default-src 'none'"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await;
    let resp = server
        .client()
        .get(server.url("/health"))
        .header("x-request-id", "req-123")
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");
}

#[tokio::test]
async fn test_static_files_are_served() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/static/css/main.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".swatch-preto"));
}
