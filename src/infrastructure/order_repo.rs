use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, OrderFilter, OrderSummary};
use crate::domain::ports::OrderRepository;
use crate::domain::status::OrderStatus;
use crate::schema::orders;

use super::models::{NewOrderRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match &e {
            diesel::result::Error::DatabaseError(_, info)
                if info.message().contains("statement timeout") =>
            {
                DomainError::Timeout(e.to_string())
            }
            _ => DomainError::Internal(e.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, order: NewOrder) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order_id = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    cust_name: order.cust_name,
                    phone_number: order.phone_number,
                    pizza_type: order.pizza_type,
                    pizza_size: order.pizza_size,
                    total_price: order.total_price,
                    status: OrderStatus::InPrep.as_str().to_string(),
                })
                .returning(orders::order_id)
                .get_result::<i32>(conn)?;
            Ok(order_id)
        })
    }

    fn update_status(&self, order_id: i32, status: OrderStatus) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Lock the row so concurrent transitions are applied one at a time.
            let stored: String = orders::table
                .filter(orders::order_id.eq(order_id))
                .select(orders::status)
                .for_update()
                .first(conn)
                .optional()?
                .ok_or_else(DomainError::order_not_found)?;

            let current: OrderStatus = stored.parse().map_err(|_| {
                DomainError::Internal(format!(
                    "order {} has unrecognised status '{}'",
                    order_id, stored
                ))
            })?;
            let next = current.transition_to(status)?;

            let updated = diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
                .set(orders::status.eq(next.as_str()))
                .returning(orders::order_id)
                .get_result::<i32>(conn)?;
            Ok(updated)
        })
    }

    fn list(&self, filter: &OrderFilter) -> Result<Vec<OrderSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = orders::table
            .select(OrderRow::as_select())
            .order(orders::order_id.asc())
            .into_boxed();
        if let Some(status) = filter.status {
            query = query.filter(orders::status.eq(status.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(orders::order_date.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(orders::order_date.le(to));
        }

        query
            .load::<OrderRow>(&mut conn)?
            .into_iter()
            .map(OrderSummary::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;
    use diesel::prelude::*;

    use super::{DieselOrderRepository, NewOrderRow};
    use crate::domain::errors::DomainError;
    use crate::domain::order::{NewOrder, OrderFilter};
    use crate::domain::ports::OrderRepository;
    use crate::domain::status::OrderStatus;
    use crate::infrastructure::test_db::{setup_db, setup_db_with_statement_timeout};
    use crate::schema::orders;

    fn new_order(name: &str, price: &str) -> NewOrder {
        NewOrder {
            cust_name: name.to_string(),
            phone_number: 447_700_900_123,
            pizza_type: "Margherita,Hawaiian".to_string(),
            pizza_size: "M,L".to_string(),
            total_price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    fn backdate(pool: &crate::db::DbPool, order_id: i32, date: NaiveDate) {
        let mut conn = pool.get().expect("Failed to get connection");
        diesel::update(orders::table.filter(orders::order_id.eq(order_id)))
            .set(orders::order_date.eq(date))
            .execute(&mut conn)
            .expect("backdate failed");
    }

    #[tokio::test]
    async fn place_and_list_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let order_id = repo
            .place(new_order("Ada", "33.25"))
            .expect("place failed");

        let orders = repo.list(&OrderFilter::default()).expect("list failed");

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, order_id);
        assert_eq!(orders[0].cust_name, "Ada");
        assert_eq!(orders[0].phone_number, 447_700_900_123);
        assert_eq!(orders[0].status, OrderStatus::InPrep);
        assert_eq!(
            orders[0].total_price,
            BigDecimal::from_str("33.25").expect("valid decimal")
        );
    }

    #[tokio::test]
    async fn place_generates_distinct_ids_in_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let ids: Vec<i32> = (0..3)
            .map(|i| {
                repo.place(new_order(&format!("customer {i}"), "10.00"))
                    .expect("place failed")
            })
            .collect();

        let listed: Vec<i32> = repo
            .list(&OrderFilter::default())
            .expect("list failed")
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn update_status_transitions_existing_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);
        let order_id = repo.place(new_order("Ada", "9.99")).expect("place failed");

        let updated = repo
            .update_status(order_id, OrderStatus::Ready)
            .expect("update failed");
        assert_eq!(updated, order_id);

        let orders = repo.list(&OrderFilter::default()).expect("list failed");
        assert_eq!(orders[0].status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn update_status_rejects_disallowed_transition_and_keeps_row() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);
        let order_id = repo.place(new_order("Ada", "9.99")).expect("place failed");
        repo.update_status(order_id, OrderStatus::Cancelled)
            .expect("cancel failed");

        let err = repo
            .update_status(order_id, OrderStatus::Ready)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));

        let orders = repo.list(&OrderFilter::default()).expect("list failed");
        assert_eq!(orders[0].status, OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn update_status_of_unknown_order_is_not_found() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool);

        let err = repo
            .update_status(4242, OrderStatus::Ready)
            .unwrap_err();

        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(repo
            .list(&OrderFilter::default())
            .expect("list failed")
            .is_empty());
    }

    #[tokio::test]
    async fn list_combines_filters_with_and() {
        let (_container, pool) = setup_db().await;
        let repo = DieselOrderRepository::new(pool.clone());

        let in_range = repo.place(new_order("in range", "1.00")).expect("place");
        let wrong_status = repo.place(new_order("ready", "1.00")).expect("place");
        let too_late = repo.place(new_order("february", "1.00")).expect("place");
        let too_early = repo.place(new_order("december", "1.00")).expect("place");

        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).expect("valid date");
        backdate(&pool, in_range, jan(31));
        backdate(&pool, wrong_status, jan(15));
        backdate(&pool, too_late, NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid"));
        backdate(&pool, too_early, NaiveDate::from_ymd_opt(2023, 12, 31).expect("valid"));
        repo.update_status(wrong_status, OrderStatus::Ready)
            .expect("update failed");

        let filter = OrderFilter {
            status: Some(OrderStatus::InPrep),
            date_from: Some(jan(1)),
            date_to: Some(jan(31)),
        };
        let ids: Vec<i32> = repo
            .list(&filter)
            .expect("list failed")
            .into_iter()
            .map(|o| o.order_id)
            .collect();
        assert_eq!(ids, vec![in_range]);

        let january_any_status = OrderFilter {
            date_from: Some(jan(1)),
            date_to: Some(jan(31)),
            ..OrderFilter::default()
        };
        assert_eq!(repo.list(&january_any_status).expect("list").len(), 2);
    }

    #[tokio::test]
    async fn statement_timeout_rolls_back_and_reports_timeout() {
        let (_container, pool) =
            setup_db_with_statement_timeout(std::time::Duration::from_millis(100)).await;
        let repo = DieselOrderRepository::new(pool.clone());

        let mut conn = pool.get().expect("Failed to get connection");
        let result = conn.transaction::<(), DomainError, _>(|conn| {
            diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    cust_name: "slow".to_string(),
                    phone_number: 1,
                    pizza_type: "Margherita".to_string(),
                    pizza_size: "M".to_string(),
                    total_price: BigDecimal::from_str("1.00").expect("valid decimal"),
                    status: OrderStatus::InPrep.as_str().to_string(),
                })
                .execute(conn)?;
            diesel::sql_query("SELECT pg_sleep(1)").execute(conn)?;
            Ok(())
        });
        drop(conn);

        assert!(matches!(result, Err(DomainError::Timeout(_))));
        assert!(repo
            .list(&OrderFilter::default())
            .expect("list failed")
            .is_empty());
    }
}
