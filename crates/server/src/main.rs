//! Tempo server binary.
//!
//! Wires the adapters onto the core services, starts the periodic reminder
//! sweep, and serves the HTTP API until interrupted.

use std::sync::Arc;

use anyhow::Context;
use tempo_core::{
    EventService, ExtractionService, PatternService, SweepService, TimerRegistry,
};
use tempo_infra::api::{router, ApiState};
use tempo_infra::scheduling::{ReminderSweepScheduler, SweepServiceJob};
use tempo_infra::{
    HttpClient, InMemoryEventRepository, InMemoryNotificationRepository, InMemoryProfileRepository,
    LogDeliveryChannel, OllamaClient,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("TEMPO_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = tempo_infra::config::load().context("loading configuration")?;

    // Stores: in-memory adapters standing in for the external stores.
    let events = Arc::new(InMemoryEventRepository::new());
    let notifications = Arc::new(InMemoryNotificationRepository::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());

    let http_client = HttpClient::new().context("building HTTP client")?;
    let backend = Arc::new(
        OllamaClient::new(http_client)
            .with_base_url(config.ollama.base_url.clone())
            .with_model(config.ollama.model.clone()),
    );

    let delivery = Arc::new(LogDeliveryChannel::new());
    let timers = Arc::new(TimerRegistry::new(delivery.clone()));

    let sweep = Arc::new(SweepService::new(notifications.clone(), delivery));
    let state = Arc::new(ApiState {
        extraction: Arc::new(ExtractionService::new(backend)),
        events: Arc::new(
            EventService::new(events.clone(), notifications.clone()).with_timer_registry(timers),
        ),
        patterns: Arc::new(PatternService::new(events, profiles)),
        notifications,
        sweep: sweep.clone(),
        cron_secret: config.sweep.secret.clone(),
    });

    let mut scheduler = ReminderSweepScheduler::new(
        config.sweep.cron_expression.clone(),
        Arc::new(SweepServiceJob::new(sweep)),
    );
    scheduler.start().await.context("starting sweep scheduler")?;

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "Tempo server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving API")?;

    scheduler.stop().await.context("stopping sweep scheduler")?;
    info!("Tempo server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
