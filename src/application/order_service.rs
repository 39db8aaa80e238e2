use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderFilter, OrderLineSelection, OrderSummary, PlacedOrder};
use crate::domain::ports::{OrderRepository, PriceCatalog};
use crate::domain::pricing::OrderPricer;
use crate::domain::status::OrderStatus;

/// An order as submitted at the counter: two comma-joined lists of pizza
/// names and sizes.
#[derive(Debug, Clone)]
pub struct PlaceOrderCommand {
    pub cust_name: String,
    pub phone_number: i64,
    pub pizza_type: String,
    pub pizza_size: String,
}

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    pricer: OrderPricer,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, catalog: Arc<dyn PriceCatalog>) -> Self {
        Self {
            repo,
            pricer: OrderPricer::new(catalog),
        }
    }

    /// Price the selection and persist the order. Nothing is written unless
    /// every pizza is known.
    pub fn place_order(&self, command: PlaceOrderCommand) -> Result<PlacedOrder, DomainError> {
        let selection = OrderLineSelection::from_lists(&command.pizza_type, &command.pizza_size)?;
        let total_price = self.pricer.price(&selection)?;

        let order_id = self.repo.place(NewOrder {
            cust_name: command.cust_name,
            phone_number: command.phone_number,
            pizza_type: command.pizza_type,
            pizza_size: command.pizza_size,
            total_price: total_price.clone(),
        })?;

        log::info!(
            "placed order {} ({} pizza(s), total {})",
            order_id,
            selection.items().len(),
            total_price
        );
        Ok(PlacedOrder {
            order_id,
            total_price,
        })
    }

    pub fn update_status(&self, order_id: i32, status: &str) -> Result<i32, DomainError> {
        let status: OrderStatus = status.parse()?;
        let updated = self.repo.update_status(order_id, status)?;
        log::info!("order {} moved to '{}'", updated, status);
        Ok(updated)
    }

    pub fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<OrderSummary>, DomainError> {
        self.repo.list(filter)
    }
}
