pub mod contact;

use anyhow::Error;
use axum::{
    extract::Extension,
    http::{header::ALLOW, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::any,
    Router,
};
use serde_json::{json, Value};

use crate::{config::Config, provider::Mailer};

/// State shared by all requests.
///
/// Without a mailer, i.e. without an API key, every submission is answered with a configuration error.
pub struct Relay {
    pub config: Config,
    pub mailer: Option<Box<dyn Mailer>>,
}

pub fn router(relay: &'static Relay) -> Router {
    Router::new()
        .route("/api/contact", any(contact::contact))
        .layer(Extension(relay))
}

#[derive(Debug)]
pub enum ServerError {
    MethodNotAllowed,
    BadRequest(&'static str),
    MissingConfiguration,
    Upstream(Value),
    Internal(Error),
}

impl<E> From<E> for ServerError
where
    Error: From<E>,
{
    fn from(err: E) -> Self {
        Self::Internal(Error::from(err))
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                [(ALLOW, "POST")],
                Json(json!({ "error": "Method not allowed" })),
            )
                .into_response(),
            Self::BadRequest(msg) => {
                tracing::debug!("Rejected submission: {}", msg);

                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            Self::MissingConfiguration => {
                tracing::error!("RESEND_API_KEY is not configured");

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Configuration serveur manquante" })),
                )
                    .into_response()
            }
            Self::Upstream(details) => {
                tracing::error!("Email provider rejected message: {}", details);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Erreur lors de l'envoi de l'email",
                        "details": details,
                    })),
                )
                    .into_response()
            }
            Self::Internal(err) => {
                tracing::error!("Failed to relay message: {:#}", err);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Erreur serveur",
                        "message": format!("{:#}", err),
                    })),
                )
                    .into_response()
            }
        }
    }
}
