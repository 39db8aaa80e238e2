pub mod application;
pub mod config;
pub mod db;
pub mod doc;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;
use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use domain::forecast::SalesForecaster;
use domain::ports::SalesModel;
use infrastructure::catalog_repo::DieselPriceCatalog;
use infrastructure::order_repo::DieselOrderRepository;

pub use db::{create_pool, DbPool};
pub use handlers::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type MigrationError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), MigrationError> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    if !applied.is_empty() {
        log::info!("applied {} migration(s)", applied.len());
    }
    Ok(())
}

/// Wire the Postgres-backed ports and the loaded model into the request state.
pub fn build_state(
    pool: DbPool,
    model: Arc<dyn SalesModel>,
    request_timeout: Duration,
) -> AppState {
    AppState {
        orders: OrderService::new(
            Arc::new(DieselOrderRepository::new(pool.clone())),
            Arc::new(DieselPriceCatalog::new(pool.clone())),
        ),
        forecaster: SalesForecaster::new(model),
        readiness: Arc::new(pool),
        request_timeout,
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .configure(handlers::configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", doc::ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
