//! Integration tests for the contact form.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use customtee_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn test_contact_page() {
    let server = TestServer::start().await;
    let (status, body) = server.get("/contato").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Horário de Atendimento"));
}

#[tokio::test]
async fn test_contact_message_is_accepted() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_form(
            "/contato",
            &[
                ("name", "Bruno"),
                ("email", "bruno@exemplo.com.br"),
                ("subject", "Orçamento"),
                ("message", "Quero 20 camisetas para o time."),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("MENSAGEM ENVIADA!"));
    assert!(body.contains("Obrigado pelo contato, Bruno!"));
}

#[tokio::test]
async fn test_invalid_contact_form_keeps_input() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_form(
            "/contato",
            &[
                ("name", "Bruno"),
                ("email", "bruno@@exemplo"),
                ("subject", ""),
                ("message", "curta"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.contains("E-mail inválido"));
    assert!(body.contains("Assunto é obrigatório"));
    assert!(body.contains("Mensagem deve ter pelo menos 10 caracteres"));
    assert!(body.contains("value=\"Bruno\""));
}
