use std::sync::Arc;

use bigdecimal::BigDecimal;

use super::errors::DomainError;
use super::order::OrderLineSelection;
use super::ports::PriceCatalog;

/// Totals an order against the price catalog.
#[derive(Clone)]
pub struct OrderPricer {
    catalog: Arc<dyn PriceCatalog>,
}

impl OrderPricer {
    pub fn new(catalog: Arc<dyn PriceCatalog>) -> Self {
        Self { catalog }
    }

    /// Exact decimal sum of the unit prices, fetched in one catalog call.
    /// The first pair missing from the catalog is reported.
    pub fn price(&self, selection: &OrderLineSelection) -> Result<BigDecimal, DomainError> {
        let items = selection.items();
        let prices = self.catalog.unit_prices(items)?;
        if prices.len() != items.len() {
            return Err(DomainError::Internal(format!(
                "catalog returned {} prices for {} pizzas",
                prices.len(),
                items.len()
            )));
        }

        items
            .iter()
            .zip(prices)
            .try_fold(BigDecimal::from(0), |total, (item, unit_price)| {
                let unit_price = unit_price.ok_or_else(|| {
                    DomainError::NotFound(format!(
                        "Pizza '{}' with size '{}' not found",
                        item.name, item.size
                    ))
                })?;
                Ok(total + unit_price)
            })
    }
}
