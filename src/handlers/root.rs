use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

pub const WELCOME_MESSAGE: &str = "Welcome to the Pizza Store Forecasting API!";

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = MessageResponse),
    ),
    tag = "meta"
)]
pub async fn read_root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}
