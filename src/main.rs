use std::io;
use std::sync::Arc;

use dotenvy::dotenv;
use pizza_service::config::Settings;
use pizza_service::infrastructure::sales_model::AdditiveSalesModel;
use pizza_service::{build_server, build_state, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let settings = Settings::from_env().map_err(io::Error::other)?;

    // Loaded once and shared read-only by every worker.
    let model = AdditiveSalesModel::from_path(&settings.model_path).map_err(io::Error::other)?;

    let pool = create_pool(
        &settings.database_url,
        settings.db_pool_size,
        settings.db_connect_timeout,
        settings.request_timeout,
    )
    .map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let state = build_state(pool, Arc::new(model), settings.request_timeout);

    log::info!(
        "Starting server at http://{}:{}",
        settings.host,
        settings.port
    );

    build_server(state, &settings.host, settings.port)?.await
}
