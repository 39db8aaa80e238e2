use std::collections::HashMap;

use bigdecimal::BigDecimal;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::LineSelection;
use crate::domain::ports::PriceCatalog;
use crate::schema::pizza;

use super::models::PizzaRow;

/// Unit prices read from the `pizza` table.
pub struct DieselPriceCatalog {
    pool: DbPool,
}

impl DieselPriceCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl PriceCatalog for DieselPriceCatalog {
    fn unit_price(&self, name: &str, size: &str) -> Result<Option<BigDecimal>, DomainError> {
        let mut conn = self.pool.get()?;

        let price = pizza::table
            .filter(pizza::pizza_name.eq(name))
            .filter(pizza::pizza_size.eq(size))
            .select(pizza::unit_price)
            .first::<BigDecimal>(&mut conn)
            .optional()?;
        Ok(price)
    }

    fn unit_prices(&self, items: &[LineSelection]) -> Result<Vec<Option<BigDecimal>>, DomainError> {
        let mut conn = self.pool.get()?;

        let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
        let sizes: Vec<&str> = items.iter().map(|item| item.size.as_str()).collect();
        // May match extra (name, size) combinations; the map below picks exact pairs.
        let rows = pizza::table
            .filter(pizza::pizza_name.eq_any(names))
            .filter(pizza::pizza_size.eq_any(sizes))
            .select(PizzaRow::as_select())
            .load::<PizzaRow>(&mut conn)?;

        let prices: HashMap<(String, String), BigDecimal> = rows
            .into_iter()
            .map(|row| ((row.pizza_name, row.pizza_size), row.unit_price))
            .collect();
        Ok(items
            .iter()
            .map(|item| {
                prices
                    .get(&(item.name.clone(), item.size.clone()))
                    .cloned()
            })
            .collect())
    }
}
