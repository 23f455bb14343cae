use std::env::{var, var_os};
use std::net::SocketAddr;

use anyhow::Error;
use axum::Server;
use tower::{
    limit::GlobalConcurrencyLimitLayer, load_shed::LoadShedLayer, make::Shared, ServiceBuilder,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contact_relay::{
    api_key_from_env,
    config::Config,
    provider::{Mailer, Resend},
    server::{router, Relay},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = var("BIND_ADDR")
        .expect("Environment variable BIND_ADDR not set")
        .parse::<SocketAddr>()
        .expect("Environment variable BIND_ADDR invalid");

    let request_limit = var("REQUEST_LIMIT")
        .expect("Environment variable REQUEST_LIMIT not set")
        .parse::<usize>()
        .expect("Environment variable REQUEST_LIMIT invalid");

    let config = match var_os("CONFIG_PATH") {
        Some(path) => Config::read(path)?,
        None => Config::default(),
    };

    tracing::debug!("Relaying submissions to {}", config.recipient);

    let mailer = match api_key_from_env() {
        Some(api_key) => {
            Some(Box::new(Resend::new(config.endpoint.clone(), api_key)?) as Box<dyn Mailer>)
        }
        None => {
            tracing::warn!("RESEND_API_KEY not set, all submissions will fail");

            None
        }
    };

    let relay = &*Box::leak(Box::new(Relay { config, mailer }));

    let make_service = Shared::new(
        ServiceBuilder::new()
            .layer(LoadShedLayer::new())
            .layer(GlobalConcurrencyLimitLayer::new(request_limit))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::default().include_headers(true)),
            )
            .service(router(relay)),
    );

    tracing::info!("Listening on {}", bind_addr);
    Server::bind(&bind_addr).serve(make_service).await?;

    Ok(())
}
