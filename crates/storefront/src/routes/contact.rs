//! Contact form route handlers.
//!
//! Messages are validated and logged; there is no mail backend.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use customtee_core::Email;

use crate::error::Result;
use crate::filters;
use crate::forms;
use crate::models::Notice;
use crate::views::{Layout, NavItem};

/// Shortest accepted message, in characters.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Contact form data. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    fn validate(&self) -> FieldErrors {
        FieldErrors {
            name: forms::required(&self.name, "Nome é obrigatório"),
            email: forms::email(&self.email),
            subject: forms::required(&self.subject, "Assunto é obrigatório"),
            message: forms::required_min_chars(
                &self.message,
                MIN_MESSAGE_CHARS,
                "Mensagem é obrigatória",
                "Mensagem deve ter pelo menos 10 caracteres",
            ),
        }
    }
}

/// Inline messages for the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub subject: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.subject.is_none()
            && self.message.is_none()
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact/show.html")]
pub struct ContactTemplate {
    pub layout: Layout,
    pub form: ContactForm,
    pub errors: FieldErrors,
}

/// Shown after a message is accepted.
#[derive(Template, WebTemplate)]
#[template(path = "contact/sent.html")]
pub struct ContactSentTemplate {
    pub layout: Layout,
    pub name: String,
}

/// Display the contact form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<ContactTemplate> {
    Ok(ContactTemplate {
        layout: Layout::load(&session, Some(NavItem::Contact)).await?,
        form: ContactForm::default(),
        errors: FieldErrors::default(),
    })
}

/// Validate and accept a contact message.
#[instrument(skip(session, form))]
pub async fn submit(session: Session, Form(form): Form<ContactForm>) -> Result<Response> {
    let layout = Layout::load(&session, Some(NavItem::Contact)).await?;

    let errors = form.validate();
    if !errors.is_empty() {
        let layout = layout.with_notice(Notice::error(
            "Campos obrigatórios",
            "Por favor, preencha todos os campos corretamente.",
        ));
        let page = ContactTemplate {
            layout,
            form,
            errors,
        };
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    let domain = Email::parse(&form.email)
        .map(|email| email.domain().to_owned())
        .unwrap_or_default();
    tracing::info!(
        subject = %form.subject.trim(),
        email_domain = %domain,
        has_phone = !form.phone.trim().is_empty(),
        "Contact message received"
    );

    let layout = layout.with_notice(Notice::success(
        "Mensagem enviada!",
        "Entraremos em contato em breve.",
    ));
    Ok(ContactSentTemplate {
        layout,
        name: form.name,
    }
    .into_response())
}
