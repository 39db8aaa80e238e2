use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};

use super::errors::DomainError;
use super::status::OrderStatus;

/// One `(pizza name, size)` pair of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub name: String,
    pub size: String,
}

impl LineSelection {
    pub fn new(name: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: size.into(),
        }
    }
}

/// The pizzas of one order, in submission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineSelection {
    items: Vec<LineSelection>,
}

impl OrderLineSelection {
    /// Zip two comma-joined lists (`"Margherita,Hawaiian"` / `"M,L"`) into
    /// pairs. Elements are trimmed; both lists must have the same length.
    pub fn from_lists(pizza_types: &str, pizza_sizes: &str) -> Result<Self, DomainError> {
        let names: Vec<&str> = pizza_types.split(',').map(str::trim).collect();
        let sizes: Vec<&str> = pizza_sizes.split(',').map(str::trim).collect();

        if names.len() != sizes.len() {
            return Err(DomainError::Validation(
                "Pizza types and sizes count mismatch".to_string(),
            ));
        }

        let items = names
            .into_iter()
            .zip(sizes)
            .map(|(name, size)| LineSelection::new(name, size))
            .collect();
        Self::new(items)
    }

    pub fn new(items: Vec<LineSelection>) -> Result<Self, DomainError> {
        if items.is_empty() {
            return Err(DomainError::Validation(
                "At least one pizza is required".to_string(),
            ));
        }
        if items
            .iter()
            .any(|item| item.name.is_empty() || item.size.is_empty())
        {
            return Err(DomainError::Validation(
                "Pizza type and size must not be empty".to_string(),
            ));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[LineSelection] {
        &self.items
    }
}

/// Everything needed to persist a new order. The store supplies id, date,
/// time and the initial status.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub cust_name: String,
    pub phone_number: i64,
    pub pizza_type: String,
    pub pizza_size: String,
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order_id: i32,
    pub cust_name: String,
    pub phone_number: i64,
    pub pizza_type: String,
    pub total_price: BigDecimal,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub order_time: NaiveTime,
}

/// Optional listing filters, combined with AND. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn matches(&self, order: &OrderSummary) -> bool {
        self.status.map_or(true, |s| order.status == s)
            && self.date_from.map_or(true, |from| order.order_date >= from)
            && self.date_to.map_or(true, |to| order.order_date <= to)
    }
}
