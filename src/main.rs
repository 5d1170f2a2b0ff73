//! Catalogue service binary
//!
//! Serves the product/category catalogue over HTTP.
//! Reads configuration from a TOML file (~/.config/catalogue/config.toml,
//! or the path in `CATALOGUE_CONFIG`).

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use catalogue::application::UserService;
use catalogue::config::{default_config_path, AppConfig, LogFormat};
use catalogue::domain::{CreateUserDto, RepositoryProvider};
use catalogue::infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryRepositoryProvider, JwtConfig,
    JwtTokenValidator, SeaOrmRepositoryProvider,
};
use catalogue::interfaces::http::common::PageLimits;
use catalogue::interfaces::http::middleware::AuthState;
use catalogue::interfaces::http::modules::metrics::MetricsState;
use catalogue::interfaces::http::{create_api_router, AppState};
use catalogue::shared::ShutdownSignal;

fn init_tracing(cfg: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match cfg.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("CATALOGUE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let (mut app_cfg, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    app_cfg.apply_env_overrides();
    init_tracing(&app_cfg);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    info!("Starting catalogue service...");

    // ── Prometheus metrics recorder (before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()?;

    // ── Store ──────────────────────────────────────────────────
    let (repos, db) = open_store(&app_cfg).await?;

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        ..JwtConfig::default()
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    let users = Arc::new(
        UserService::new(repos.clone(), jwt_config.clone())
            .with_password_cost(app_cfg.security.bcrypt_cost),
    );
    create_default_admin(&users, &app_cfg).await;

    // ── Router ─────────────────────────────────────────────────
    let limits = PageLimits {
        max_page_size: app_cfg.pagination.max_page_size,
    };
    let state = AppState::new(repos, users, limits);
    let auth = AuthState::new(Arc::new(JwtTokenValidator::new(jwt_config)));
    let router = create_api_router(
        state,
        auth,
        Some(MetricsState {
            handle: prometheus_handle,
        }),
    );

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let api_shutdown = shutdown.clone();
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await;
    if let Err(e) = &served {
        error!("REST API server error: {}", e);
    }

    if let Some(db) = db {
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    }

    info!("Catalogue service shutdown complete");
    served.map_err(Into::into)
}

/// Connect to the configured store. The SQLite connection is returned so it
/// can be closed on shutdown.
async fn open_store(
    app_cfg: &AppConfig,
) -> Result<(Arc<dyn RepositoryProvider>, Option<DatabaseConnection>), sea_orm::DbErr> {
    if app_cfg.database.is_memory() {
        info!("Using in-memory store; data is lost on exit");
        return Ok((Arc::new(InMemoryRepositoryProvider::new()), None));
    }

    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
        max_connections: app_cfg.database.max_connections,
    };
    info!("Database: {}", db_config.url);

    let db = init_database(&db_config).await.inspect_err(|e| {
        error!("Failed to connect to database: {}", e);
    })?;

    info!("Running database migrations...");
    run_migrations(&db).await.inspect_err(|e| {
        error!("Failed to run migrations: {}", e);
    })?;
    info!("Migrations completed");

    Ok((Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db)))
}

/// Create the configured admin account if no users exist.
async fn create_default_admin(users: &UserService, app_cfg: &AppConfig) {
    let admin = &app_cfg.admin;
    let dto = CreateUserDto {
        name: admin.name.clone(),
        email: admin.email.clone(),
        birth_date: admin.birth_date,
        role: None,
        password: admin.password.clone(),
    };

    match users.ensure_admin(dto).await {
        Ok(true) => info!("Default admin created: {}", admin.email),
        Ok(false) => {}
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}
