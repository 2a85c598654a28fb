use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use milaap_api::config::ServerConfig;
use milaap_api::router::build_app_router;
use milaap_api::state::AppState;
use milaap_events::{
    channel_from_env, NotificationDispatcher, NotificationQueue, NotificationWorker,
    PgNotificationStore,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "milaap_api=debug,milaap_events=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        match_threshold = config.match_threshold,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = milaap_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    milaap_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    milaap_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // --- Notification pipeline ---
    let (notifications, receiver) = NotificationQueue::new();
    let dispatcher = NotificationDispatcher::new(
        Arc::new(PgNotificationStore::new(pool.clone())),
        channel_from_env(),
        config.help_center_number.clone(),
    );
    let worker_handle = NotificationWorker::new(receiver, dispatcher).spawn();

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifications: notifications.clone(),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, draining notifications");

    notifications.shutdown();
    match tokio::time::timeout(
        Duration::from_secs(config.shutdown_timeout_secs),
        worker_handle,
    )
    .await
    {
        Ok(Ok(summary)) => tracing::info!(
            processed = summary.processed(),
            "Notification worker drained"
        ),
        Ok(Err(e)) => tracing::error!(error = %e, "Notification worker task failed"),
        Err(_) => tracing::warn!("Timed out waiting for notification worker"),
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
