use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, Environment};
use crate::database::{DatabaseManager, Repositories};
use crate::handlers::{catalog, children, directory, public};
use crate::state::AppState;

/// Every route plus the global middleware stack
pub fn router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root_get))
        .route("/health", get(public::health_get))
        .merge(child_routes())
        .merge(catalog_routes())
        .merge(directory_routes())
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn child_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/children",
            get(children::children_get).post(children::child_post),
        )
        .route(
            "/api/v1/children/:id",
            get(children::child_get)
                .put(children::child_put)
                .delete(children::child_delete),
        )
        .route("/api/v1/children/:id/needs/:need_id", put(children::need_put))
        .route(
            "/api/v1/children/:id/allergies/:allergy_id",
            put(children::allergy_put),
        )
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/needs",
            get(catalog::needs_get).post(catalog::need_post),
        )
        .route("/api/v1/needs/:id", get(catalog::need_get))
        .route(
            "/api/v1/allergies",
            get(catalog::allergies_get).post(catalog::allergy_post),
        )
        .route("/api/v1/allergies/:id", get(catalog::allergy_get))
}

fn directory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/groups",
            get(directory::groups_get).post(directory::group_post),
        )
        .route(
            "/api/v1/groups/:id",
            get(directory::group_get)
                .put(directory::group_put)
                .delete(directory::group_delete),
        )
        .route(
            "/api/v1/caretakers",
            get(directory::caretakers_get).post(directory::caretaker_post),
        )
        .route(
            "/api/v1/caretakers/:id",
            get(directory::caretaker_get)
                .put(directory::caretaker_put)
                .delete(directory::caretaker_delete),
        )
        .route(
            "/api/v1/volunteers",
            get(directory::volunteers_get).post(directory::volunteer_post),
        )
        .route(
            "/api/v1/volunteers/:id",
            get(directory::volunteer_get)
                .put(directory::volunteer_put)
                .delete(directory::volunteer_delete),
        )
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if !config.security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Connect, migrate when configured, and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &AppConfig) -> anyhow::Result<()> {
    let db = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        db.migrate().await.context("failed to apply migrations")?;
    }

    let repos = Repositories::postgres(db.pool().clone());
    let state = AppState::new(repos, Arc::new(db.clone()), config);
    let app = router(state, config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!(
        "Kids API listening on http://{} ({:?})",
        bind_addr, config.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received, draining connections");
}
