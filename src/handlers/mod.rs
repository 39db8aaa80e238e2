pub mod forecast;
pub mod health;
pub mod orders;
pub mod root;


use std::sync::Arc;
use std::time::Duration;

use actix_web::{error, web, HttpRequest};

use crate::application::order_service::OrderService;
use crate::domain::errors::DomainError;
use crate::domain::forecast::SalesForecaster;
use crate::domain::ports::Readiness;
use crate::errors::AppError;

/// Shared, read-only request context. Built once before the server starts.
#[derive(Clone)]
pub struct AppState {
    pub orders: OrderService,
    pub forecaster: SalesForecaster,
    pub readiness: Arc<dyn Readiness>,
    pub request_timeout: Duration,
}

/// Run blocking work (diesel, model evaluation) off the async workers,
/// bounded by the request timeout.
pub(crate) async fn run_blocking<F, T>(limit: Duration, f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(limit, web::block(f)).await {
        Ok(Ok(result)) => result.map_err(AppError::from),
        Ok(Err(e)) => Err(AppError::Internal(e.to_string())),
        Err(_) => Err(AppError::Timeout),
    }
}

/// Run a store mutation off the async workers and wait for its outcome. Not
/// raced against the request timeout; the connection's `statement_timeout`
/// bounds it and rolls the transaction back on expiry.
pub(crate) async fn run_to_completion<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

fn bad_request(err: impl std::fmt::Display, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

/// Register every route together with extractor error handlers that answer
/// malformed input in the same `{"detail"}` shape as the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|e: error::JsonPayloadError, req| {
        bad_request(e, req)
    }))
    .app_data(web::FormConfig::default().error_handler(|e: error::UrlencodedError, req| {
        bad_request(e, req)
    }))
    .app_data(web::QueryConfig::default().error_handler(|e: error::QueryPayloadError, req| {
        bad_request(e, req)
    }))
    .route("/", web::get().to(root::read_root))
    .route("/health", web::get().to(health::health))
    .route("/predict/", web::post().to(forecast::predict_sales))
    .route(
        "/sales-forecast-week/",
        web::post().to(forecast::sales_forecast_week),
    )
    .route("/place-order/", web::post().to(orders::place_order))
    .route(
        "/update-order-status/",
        web::post().to(orders::update_order_status),
    )
    .route("/get-orders/", web::get().to(orders::get_orders));
}
