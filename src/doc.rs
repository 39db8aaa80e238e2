//! OpenAPI document, served at `/api-docs/openapi.json` and browsable through
//! Swagger UI at `/swagger-ui/`.

use utoipa::OpenApi;

use crate::domain::status::OrderStatus;
use crate::handlers::forecast::{
    ForecastRequest, ForecastResponse, WeekForecastRequest, WeekForecastResponse,
};
use crate::handlers::orders::{
    OrderListResponse, OrderRowResponse, PlaceOrderForm, PlaceOrderResponse, UpdateStatusForm,
    UpdateStatusResponse,
};
use crate::handlers::root::MessageResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pizza Store Forecasting API",
        description = "Sales forecasts and order management for a pizza shop."
    ),
    paths(
        crate::handlers::root::read_root,
        crate::handlers::health::health,
        crate::handlers::forecast::predict_sales,
        crate::handlers::forecast::sales_forecast_week,
        crate::handlers::orders::place_order,
        crate::handlers::orders::update_order_status,
        crate::handlers::orders::get_orders,
    ),
    components(schemas(
        MessageResponse,
        ForecastRequest,
        ForecastResponse,
        WeekForecastRequest,
        WeekForecastResponse,
        PlaceOrderForm,
        PlaceOrderResponse,
        UpdateStatusForm,
        UpdateStatusResponse,
        OrderRowResponse,
        OrderListResponse,
        OrderStatus,
    )),
    tags(
        (name = "forecast", description = "Sales forecasts"),
        (name = "orders", description = "Order placement and tracking"),
        (name = "meta", description = "Banner and health")
    )
)]
pub struct ApiDoc;
