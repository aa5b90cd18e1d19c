use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tokio::sync::watch;
use tracing::{info, warn};

use jobmarket::config::AppConfig;
use jobmarket::error::AppError;
use jobmarket::marketplace::jobs::DeadlineSweeper;
use jobmarket::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryEmployerDirectory, InMemoryJobRepository,
    InMemoryReviewRepository, InMemorySavedJobRepository, LoggingNotificationPublisher,
};
use crate::routes::{with_marketplace_routes, Applications, Board, Reviews};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let jobs = Arc::new(InMemoryJobRepository::default());
    let employers = Arc::new(InMemoryEmployerDirectory::seeded());
    let reviews = Arc::new(InMemoryReviewRepository::default());

    let board = Arc::new(Board::new(jobs.clone(), employers.clone(), reviews.clone()));
    let applications = Arc::new(Applications::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(InMemorySavedJobRepository::default()),
        jobs.clone(),
        employers.clone(),
        Arc::new(LoggingNotificationPublisher::default()),
    ));
    let review_service = Arc::new(Reviews::new(reviews, employers, jobs.clone()));

    // The sweep shares its shutdown channel with the HTTP server: once the
    // listener drains, the channel flips and the in-flight tick finishes.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = DeadlineSweeper::new(jobs, config.scheduler.sweep_interval);
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown_rx));

    let app = with_marketplace_routes(board, applications, review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job marketplace engine ready");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if shutdown_tx.send(true).is_err() {
        warn!("deadline sweeper already stopped");
    }
    if let Err(error) = sweeper_handle.await {
        warn!(%error, "deadline sweeper did not exit cleanly");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for shutdown signal");
    }
}
