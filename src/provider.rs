use anyhow::{Context, Result};
use axum::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Map, Value};
use url::Url;

use crate::email::EmailPayload;

/// Outcome of a send request which reached the provider.
#[derive(Debug)]
pub enum Delivery {
    Accepted(Value),
    Rejected { status: StatusCode, details: Value },
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Makes exactly one attempt to hand the payload to the provider.
    ///
    /// Errors are reserved for failures to reach the provider or to read its response.
    async fn send(&self, payload: &EmailPayload) -> Result<Delivery>;
}

pub struct Resend {
    http_client: HttpClient,
    endpoint: Url,
    api_key: String,
}

impl Resend {
    pub fn new(endpoint: Url, api_key: String) -> Result<Self> {
        let http_client = HttpClient::builder()
            .user_agent(concat!("contact-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl Mailer for Resend {
    async fn send(&self, payload: &EmailPayload) -> Result<Delivery> {
        tracing::debug!("Sending message to {:?} via {}", payload.to, self.endpoint);

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await
            .context("Failed to reach email provider")?;

        let status = response.status();

        if !status.is_success() {
            let details = response
                .json::<Value>()
                .await
                .unwrap_or_else(|_err| Value::Object(Map::new()));

            return Ok(Delivery::Rejected { status, details });
        }

        let data = response
            .json::<Value>()
            .await
            .context("Malformed response from email provider")?;

        Ok(Delivery::Accepted(data))
    }
}
