//! In-process adapters for the domain ports, used by tests and by callers
//! that embed the service without a database.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::{Local, NaiveDateTime};

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderFilter, OrderSummary};
use crate::domain::ports::{OrderRepository, PriceCatalog};
use crate::domain::status::OrderStatus;

#[derive(Debug, Default)]
pub struct InMemoryPriceCatalog {
    prices: HashMap<(String, String), BigDecimal>,
}

impl InMemoryPriceCatalog {
    pub fn from_entries<I, N, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, S, BigDecimal)>,
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            prices: entries
                .into_iter()
                .map(|(name, size, price)| ((name.into(), size.into()), price))
                .collect(),
        }
    }
}

impl PriceCatalog for InMemoryPriceCatalog {
    fn unit_price(&self, name: &str, size: &str) -> Result<Option<BigDecimal>, DomainError> {
        Ok(self
            .prices
            .get(&(name.to_string(), size.to_string()))
            .cloned())
    }
}

#[derive(Default)]
struct OrderTable {
    next_id: i32,
    rows: Vec<OrderSummary>,
}

/// Orders kept in insertion order. Dates come from the local clock unless a
/// fixed instant is set with [`InMemoryOrderRepository::set_now`].
#[derive(Default)]
pub struct InMemoryOrderRepository {
    table: Mutex<OrderTable>,
    now: Mutex<Option<NaiveDateTime>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_now(&self, at: NaiveDateTime) {
        if let Ok(mut now) = self.now.lock() {
            *now = Some(at);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.table.lock().map(|t| t.rows.is_empty()).unwrap_or(true)
    }

    fn table(&self) -> Result<MutexGuard<'_, OrderTable>, DomainError> {
        self.table
            .lock()
            .map_err(|_| DomainError::Internal("order table lock poisoned".to_string()))
    }

    fn now(&self) -> NaiveDateTime {
        self.now
            .lock()
            .ok()
            .and_then(|now| *now)
            .unwrap_or_else(|| Local::now().naive_local())
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn place(&self, order: NewOrder) -> Result<i32, DomainError> {
        let at = self.now();
        let mut table = self.table()?;
        table.next_id += 1;
        let order_id = table.next_id;
        table.rows.push(OrderSummary {
            order_id,
            cust_name: order.cust_name,
            phone_number: order.phone_number,
            pizza_type: order.pizza_type,
            total_price: order.total_price,
            status: OrderStatus::InPrep,
            order_date: at.date(),
            order_time: at.time(),
        });
        Ok(order_id)
    }

    fn update_status(&self, order_id: i32, status: OrderStatus) -> Result<i32, DomainError> {
        let mut table = self.table()?;
        let row = table
            .rows
            .iter_mut()
            .find(|row| row.order_id == order_id)
            .ok_or_else(DomainError::order_not_found)?;
        row.status = row.status.transition_to(status)?;
        Ok(order_id)
    }

    fn list(&self, filter: &OrderFilter) -> Result<Vec<OrderSummary>, DomainError> {
        let table = self.table()?;
        Ok(table
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }
}
