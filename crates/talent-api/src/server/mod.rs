//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use talent_common::{AppConfig, AppError};
use talent_core::SnowflakeGenerator;
use talent_db::{
    create_pool, PgApplicationRepository, PgCandidateRepository, PgCompanyGroupRepository,
    PgJobPostingRepository, PgMessageRepository, PgNotificationRepository, PgRoomRepository,
};
use talent_service::{NotificationDispatcher, OutboxWorker, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::capabilities::{LocalFileStorage, LogMailTransport};
use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// How long a computed task board stays cached
const BOARD_CACHE_TTL: Duration = Duration::from_secs(30);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let is_production = state.config().app.env.is_production();
    let cors_config = state.config().cors.clone();

    let router = create_router().merge(health_routes());
    let router = apply_middleware(router, &cors_config, is_production);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = talent_db::PoolConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create capabilities
    let mail_transport = Arc::new(LogMailTransport);
    let file_storage = Arc::new(LocalFileStorage::new(
        config.storage.upload_dir.clone(),
        config.storage.base_url.clone(),
        snowflake_generator.clone(),
    ));

    // Create repositories
    let room_repo = Arc::new(PgRoomRepository::new(pool.clone()));
    let message_repo = Arc::new(PgMessageRepository::new(pool.clone()));
    let notification_repo = Arc::new(PgNotificationRepository::new(pool.clone()));
    let application_repo = Arc::new(PgApplicationRepository::new(pool.clone()));
    let job_posting_repo = Arc::new(PgJobPostingRepository::new(pool.clone()));
    let candidate_repo = Arc::new(PgCandidateRepository::new(pool.clone()));
    let company_group_repo = Arc::new(PgCompanyGroupRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .room_repo(room_repo)
        .message_repo(message_repo)
        .notification_repo(notification_repo)
        .application_repo(application_repo)
        .job_posting_repo(job_posting_repo)
        .candidate_repo(candidate_repo)
        .company_group_repo(company_group_repo)
        .mail_transport(mail_transport)
        .file_storage(file_storage)
        .snowflake_generator(snowflake_generator)
        .mailer_config(config.mailer.clone())
        .board_cache_ttl(BOARD_CACHE_TTL)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    // Spawn the notification outbox worker and attach its handle
    let (handle, rx) = NotificationDispatcher::channel(config.mailer.queue_capacity);
    let worker = OutboxWorker::new(NotificationDispatcher::new(service_context.clone()), rx);
    tokio::spawn(worker.run());
    let service_context = service_context.with_dispatcher(handle);
    info!("Notification outbox worker started");

    Ok(AppState::new(service_context, pool, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
