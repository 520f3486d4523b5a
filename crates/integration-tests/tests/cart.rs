//! Integration tests for adding products to the cart and editing lines.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use customtee_integration_tests::{TestServer, badge_count};
use reqwest::StatusCode;

async fn add(server: &TestServer, size: &str, color: &str, quantity: &str) -> (StatusCode, String) {
    server
        .post_form(
            "/produto/1/carrinho",
            &[
                ("size", size),
                ("color", color),
                ("quantity", quantity),
                ("action", "add"),
            ],
        )
        .await
}

#[tokio::test]
async fn test_add_to_cart_shows_notice_and_badge() {
    let server = TestServer::start().await;
    assert_eq!(server.cart_count().await, 0);

    let (status, body) = add(&server, "M", "Preto", "2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Adicionado ao carrinho!"));
    assert_eq!(badge_count(&body), 2);
    assert_eq!(server.cart_count().await, 2);

    // The notice is shown once
    let (_, body) = server.get("/produto/1").await;
    assert!(!body.contains("Adicionado ao carrinho!"));
}

#[tokio::test]
async fn test_same_variant_merges_into_one_line() {
    let server = TestServer::start().await;
    add(&server, "M", "Preto", "2").await;
    add(&server, "M", "Preto", "1").await;
    assert_eq!(server.cart_count().await, 3);

    let (_, body) = server.get("/checkout").await;
    assert_eq!(body.matches("class=\"cart-line\"").count(), 1);

    add(&server, "G", "Preto", "1").await;
    let (_, body) = server.get("/checkout").await;
    assert_eq!(body.matches("class=\"cart-line\"").count(), 2);
    assert_eq!(server.cart_count().await, 4);
}

#[tokio::test]
async fn test_missing_size_is_rejected() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_form("/produto/1/carrinho", &[("color", "Preto"), ("quantity", "1")])
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Selecione um tamanho"));
    assert_eq!(server.cart_count().await, 0);
}

#[tokio::test]
async fn test_missing_color_is_rejected() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_form("/produto/1/carrinho", &[("size", "M"), ("quantity", "1")])
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("Selecione uma cor"));
}

#[tokio::test]
async fn test_buy_now_goes_to_checkout() {
    let server = TestServer::start().await;
    let resp = server
        .client()
        .post(server.url("/produto/1/carrinho"))
        .form(&[("size", "P"), ("color", "Branco"), ("action", "buy")])
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.url().path(), "/checkout");
    assert_eq!(server.cart_count().await, 1);
}

#[tokio::test]
async fn test_set_quantity_and_remove_line() {
    let server = TestServer::start().await;
    add(&server, "M", "Preto", "1").await;

    let line = [
        ("product", "catalog:1"),
        ("size", "M"),
        ("color", "Preto"),
    ];

    let mut form = line.to_vec();
    form.push(("quantity", "5"));
    let (status, _) = server.post_form("/carrinho/quantidade", &form).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.cart_count().await, 5);

    let mut form = line.to_vec();
    form.push(("quantity", "0"));
    server.post_form("/carrinho/quantidade", &form).await;
    assert_eq!(server.cart_count().await, 0);
}

#[tokio::test]
async fn test_remove_product_drops_every_variant() {
    let server = TestServer::start().await;
    add(&server, "M", "Preto", "1").await;
    add(&server, "G", "Cinza", "2").await;
    assert_eq!(server.cart_count().await, 3);

    let (_, body) = server.get("/checkout").await;
    assert_eq!(body.matches(r#"action="/carrinho/remover""#).count(), 2);

    server
        .post_form(
            "/carrinho/remover",
            &[("product", "catalog:1"), ("size", "M"), ("color", "Preto")],
        )
        .await;
    assert_eq!(server.cart_count().await, 2);

    server
        .post_form("/carrinho/remover", &[("product", "catalog:1")])
        .await;
    assert_eq!(server.cart_count().await, 0);
}

#[tokio::test]
async fn test_visitors_have_separate_carts() {
    let server = TestServer::start().await;
    add(&server, "M", "Preto", "1").await;

    let other = server.new_visitor();
    let body = other
        .get(server.url("/carrinho/contagem"))
        .send()
        .await
        .expect("Request failed")
        .text()
        .await
        .expect("Failed to read body");
    assert_eq!(badge_count(&body), 0);
    assert_eq!(server.cart_count().await, 1);
}
