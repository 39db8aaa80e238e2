pub mod catalog_repo;
pub mod memory;
pub mod models;
pub mod order_repo;
pub mod sales_model;

#[cfg(test)]
pub(crate) mod test_db;

use crate::db::DbPool;
use crate::domain::ports::Readiness;

impl Readiness for DbPool {
    fn is_ready(&self) -> bool {
        match self.get() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("database not ready: {}", e);
                false
            }
        }
    }
}
