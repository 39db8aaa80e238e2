use actix_web::{web, HttpResponse};
use serde_json::json;

use super::AppState;

/// GET /health
///
/// Reports 200 while a database connection can be checked out of the pool
/// and 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are reachable"),
        (status = 503, description = "Database unavailable"),
    ),
    tag = "meta"
)]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let readiness = state.readiness.clone();
    let ready = web::block(move || readiness.is_ready())
        .await
        .unwrap_or(false);

    if ready {
        HttpResponse::Ok().json(json!({ "status": "ok" }))
    } else {
        HttpResponse::ServiceUnavailable().json(json!({ "status": "unavailable" }))
    }
}
