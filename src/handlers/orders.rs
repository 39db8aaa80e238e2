use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{run_blocking, run_to_completion, AppState};
use crate::application::order_service::PlaceOrderCommand;
use crate::domain::forecast::parse_date;
use crate::domain::order::{OrderFilter, OrderSummary};
use crate::domain::status::OrderStatus;
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PlaceOrderForm {
    pub cust_name: String,
    pub phone_number: i64,
    /// Comma-separated pizza names, e.g. "Margherita,Hawaiian"
    pub pizza_type: String,
    /// Comma-separated sizes matching `pizza_type` one to one, e.g. "M,L"
    pub pizza_size: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResponse {
    pub order_id: i32,
    /// Exact decimal total as a string to avoid floating-point issues, e.g. "33.25"
    pub total_price: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStatusForm {
    pub order_id: i32,
    /// One of "in prep", "ready", "delivered", "cancelled"
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateStatusResponse {
    pub message: String,
    pub order_id: i32,
}

#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// Only orders in this status
    pub status: Option<String>,
    /// Earliest order date, inclusive (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// Latest order date, inclusive (YYYY-MM-DD)
    pub date_to: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderRowResponse {
    pub order_number: i32,
    pub customer_name: String,
    pub phone_number: i64,
    pub pizzas: String,
    pub total_price: String,
    pub status: OrderStatus,
    pub order_date: String,
    pub order_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListResponse {
    pub orders: Vec<OrderRowResponse>,
}

impl From<OrderSummary> for OrderRowResponse {
    fn from(o: OrderSummary) -> Self {
        Self {
            order_number: o.order_id,
            customer_name: o.cust_name,
            phone_number: o.phone_number,
            pizzas: o.pizza_type,
            total_price: o.total_price.to_string(),
            status: o.status,
            order_date: o.order_date.to_string(),
            order_time: o.order_time.format("%H:%M:%S").to_string(),
        }
    }
}

impl OrderListQuery {
    /// Blank parameters count as absent.
    fn into_filter(self) -> Result<OrderFilter, AppError> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Ok(OrderFilter {
            status: present(self.status)
                .map(|s| s.parse::<OrderStatus>())
                .transpose()?,
            date_from: present(self.date_from)
                .map(|d| parse_date(&d))
                .transpose()?,
            date_to: present(self.date_to).map(|d| parse_date(&d)).transpose()?,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /place-order/
///
/// Prices the submitted pizzas against the catalog and stores the order with
/// status "in prep". Nothing is stored if any pizza is unknown.
#[utoipa::path(
    post,
    path = "/place-order/",
    request_body(content = PlaceOrderForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Pizza types and sizes count mismatch"),
        (status = 404, description = "Unknown pizza or size"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Timed out"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    state: web::Data<AppState>,
    form: web::Form<PlaceOrderForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let service = state.orders.clone();

    let placed = run_to_completion(move || {
        service.place_order(PlaceOrderCommand {
            cust_name: form.cust_name,
            phone_number: form.phone_number,
            pizza_type: form.pizza_type,
            pizza_size: form.pizza_size,
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlaceOrderResponse {
        order_id: placed.order_id,
        total_price: placed.total_price.to_string(),
        message: "Order placed successfully".to_string(),
    }))
}

/// POST /update-order-status/
///
/// Moves an order along `in prep -> ready -> delivered`, or cancels it
/// before delivery.
#[utoipa::path(
    post,
    path = "/update-order-status/",
    request_body(content = UpdateStatusForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Transition not allowed from the current status"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Timed out"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    form: web::Form<UpdateStatusForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let service = state.orders.clone();

    let order_id = run_to_completion(move || {
        service.update_status(form.order_id, &form.status)
    })
    .await?;

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        message: "Order status updated successfully".to_string(),
        order_id,
    }))
}

/// GET /get-orders/
///
/// Lists orders matching every supplied filter, oldest first.
#[utoipa::path(
    get,
    path = "/get-orders/",
    params(OrderListQuery),
    responses(
        (status = 200, description = "Matching orders", body = OrderListResponse),
        (status = 400, description = "Invalid status or date filter"),
        (status = 500, description = "Internal server error"),
        (status = 504, description = "Timed out"),
    ),
    tag = "orders"
)]
pub async fn get_orders(
    state: web::Data<AppState>,
    query: web::Query<OrderListQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let service = state.orders.clone();

    let orders = run_blocking(state.request_timeout, move || service.list_orders(&filter)).await?;

    Ok(HttpResponse::Ok().json(OrderListResponse {
        orders: orders.into_iter().map(OrderRowResponse::from).collect(),
    }))
}
