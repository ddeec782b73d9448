//! Relay Skill Back binary entrypoint wiring the skill endpoint, the NIM game and the relay dispatcher.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_skill_back::{
    config::{AppConfig, PublisherConfig},
    publish::{RelayPublisher, log::LogPublisher},
    routes,
    services::dispatch_service,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let publisher = build_publisher()?;

    let (app_state, relay_rx) = AppState::new(config, publisher.kind());
    tokio::spawn(dispatch_service::run(
        publisher,
        relay_rx,
        app_state.relay_sse().clone(),
    ));

    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Pick the relay transport: the broker endpoint when configured, logging otherwise.
fn build_publisher() -> anyhow::Result<Arc<dyn RelayPublisher>> {
    match PublisherConfig::from_env() {
        #[cfg(feature = "http-publish")]
        Some(config) => {
            info!(endpoint = %config.base_url, "publishing relay messages over HTTP");
            let publisher = relay_skill_back::publish::http::HttpPublisher::new(config)
                .context("building HTTP publisher")?;
            Ok(Arc::new(publisher))
        }
        #[cfg(not(feature = "http-publish"))]
        Some(config) => {
            tracing::warn!(
                endpoint = %config.base_url,
                "built without `http-publish`; relay messages will only be logged"
            );
            Ok(Arc::new(LogPublisher))
        }
        None => {
            info!("no broker endpoint configured; relay messages will only be logged");
            Ok(Arc::new(LogPublisher))
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
