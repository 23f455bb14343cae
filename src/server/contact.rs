use axum::{extract::Extension, http::Method, response::Json};
use bytes::Bytes;
use serde_json::{json, Value};

use crate::{
    contact::ContactSubmission,
    email::EmailPayload,
    provider::Delivery,
    server::{Relay, ServerError},
};

pub async fn contact(
    method: Method,
    Extension(relay): Extension<&'static Relay>,
    body: Bytes,
) -> Result<Json<Value>, ServerError> {
    if method != Method::POST {
        return Err(ServerError::MethodNotAllowed);
    }

    let mailer = relay
        .mailer
        .as_deref()
        .ok_or(ServerError::MissingConfiguration)?;

    let submission = ContactSubmission::parse(&body)
        .map_err(|invalid| ServerError::BadRequest(invalid.message()))?;

    let payload = EmailPayload::compose(&relay.config, &submission)?;

    match mailer.send(&payload).await? {
        Delivery::Accepted(data) => {
            tracing::debug!("Relayed message from {}", submission.email);

            Ok(Json(json!({ "success": true, "data": data })))
        }
        Delivery::Rejected { status, details } => {
            tracing::warn!("Email provider responded with status {}", status);

            Err(ServerError::Upstream(details))
        }
    }
}
