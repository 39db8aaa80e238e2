use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{run_blocking, AppState};
use crate::domain::forecast::{parse_date, round_sales, DAYS_PER_WEEK};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ForecastRequest {
    /// First day of the forecast, `YYYY-MM-DD`.
    pub start_date: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WeekForecastRequest {
    /// Any day of the week to forecast, `YYYY-MM-DD`.
    pub order_date: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastResponse {
    pub total_predicted_sales: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekForecastResponse {
    pub predicted_sales: f64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /predict/
///
/// Total predicted sales for the seven days starting at `start_date`,
/// rounded to cents.
#[utoipa::path(
    post,
    path = "/predict/",
    request_body = ForecastRequest,
    responses(
        (status = 200, description = "Seven-day forecast", body = ForecastResponse),
        (status = 400, description = "Invalid date format"),
        (status = 500, description = "Model evaluation failed"),
    ),
    tag = "forecast"
)]
pub async fn predict_sales(
    state: web::Data<AppState>,
    body: web::Json<ForecastRequest>,
) -> Result<HttpResponse, AppError> {
    let start = parse_date(&body.start_date)?;
    let forecaster = state.forecaster.clone();

    let total = run_blocking(state.request_timeout, move || {
        forecaster.forecast_range(start, DAYS_PER_WEEK)
    })
    .await?;

    Ok(HttpResponse::Ok().json(ForecastResponse {
        total_predicted_sales: round_sales(total),
    }))
}

/// POST /sales-forecast-week/
///
/// Total predicted sales for the Monday-to-Sunday week containing
/// `order_date`, rounded to cents.
#[utoipa::path(
    post,
    path = "/sales-forecast-week/",
    request_body = WeekForecastRequest,
    responses(
        (status = 200, description = "Calendar-week forecast", body = WeekForecastResponse),
        (status = 400, description = "Invalid date format"),
        (status = 500, description = "Model evaluation failed"),
    ),
    tag = "forecast"
)]
pub async fn sales_forecast_week(
    state: web::Data<AppState>,
    body: web::Json<WeekForecastRequest>,
) -> Result<HttpResponse, AppError> {
    let anchor = parse_date(&body.order_date)?;
    let forecaster = state.forecaster.clone();

    let total = run_blocking(state.request_timeout, move || forecaster.forecast_week(anchor)).await?;

    Ok(HttpResponse::Ok().json(WeekForecastResponse {
        predicted_sales: round_sales(total),
    }))
}
