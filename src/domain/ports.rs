use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use super::errors::DomainError;
use super::forecast::DailyForecast;
use super::order::{LineSelection, NewOrder, OrderFilter, OrderSummary};
use super::status::OrderStatus;

/// Read-only unit prices keyed by pizza name and size.
pub trait PriceCatalog: Send + Sync + 'static {
    fn unit_price(&self, name: &str, size: &str) -> Result<Option<BigDecimal>, DomainError>;

    /// One price per item, aligned with `items`. Stores that can answer in a
    /// single round trip override this.
    fn unit_prices(&self, items: &[LineSelection]) -> Result<Vec<Option<BigDecimal>>, DomainError> {
        items
            .iter()
            .map(|item| self.unit_price(&item.name, &item.size))
            .collect()
    }
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Insert an order with status `in prep` and return its generated id.
    fn place(&self, order: NewOrder) -> Result<i32, DomainError>;
    /// Move an existing order to `status` if the transition is allowed.
    fn update_status(&self, order_id: i32, status: OrderStatus) -> Result<i32, DomainError>;
    fn list(&self, filter: &OrderFilter) -> Result<Vec<OrderSummary>, DomainError>;
}

/// A pre-trained sales model. Returns one point estimate per requested date.
pub trait SalesModel: Send + Sync + 'static {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<DailyForecast>, DomainError>;
}

/// Whether the backing store can currently serve requests.
pub trait Readiness: Send + Sync + 'static {
    fn is_ready(&self) -> bool;
}
