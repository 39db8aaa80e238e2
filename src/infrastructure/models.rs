use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use crate::domain::errors::DomainError;
use crate::domain::order::OrderSummary;
use crate::domain::status::OrderStatus;
use crate::schema::{orders, pizza};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub order_id: i32,
    pub cust_name: String,
    pub phone_number: i64,
    pub pizza_type: String,
    pub pizza_size: String,
    pub total_price: BigDecimal,
    pub order_date: NaiveDate,
    pub order_timestamp: NaiveTime,
    pub status: String,
}

/// `order_date` and `order_timestamp` are left to the column defaults so the
/// database clock stamps the row.
#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub cust_name: String,
    pub phone_number: i64,
    pub pizza_type: String,
    pub pizza_size: String,
    pub total_price: BigDecimal,
    pub status: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pizza)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PizzaRow {
    pub pizza_name: String,
    pub pizza_size: String,
    pub unit_price: BigDecimal,
}

impl TryFrom<OrderRow> for OrderSummary {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|_| {
            DomainError::Internal(format!(
                "order {} has unrecognised status '{}'",
                row.order_id, row.status
            ))
        })?;
        Ok(OrderSummary {
            order_id: row.order_id,
            cust_name: row.cust_name,
            phone_number: row.phone_number,
            pizza_type: row.pizza_type,
            total_price: row.total_price,
            status,
            order_date: row.order_date,
            order_time: row.order_timestamp,
        })
    }
}
