use std::time::Duration;

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::RunQueryDsl;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

/// Sets Postgres' `statement_timeout` on every connection the pool opens.
/// A cancelled statement aborts its transaction, which then rolls back.
#[derive(Debug, Clone, Copy)]
pub struct StatementTimeout(pub Duration);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for StatementTimeout {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!("SET statement_timeout = {}", self.0.as_millis()))
            .execute(conn)
            .map(|_| ())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Each request checks a connection out of the pool and hands it back when the
/// guard drops, on success and error paths alike.
pub fn create_pool(
    database_url: &str,
    max_size: u32,
    connection_timeout: Duration,
    statement_timeout: Duration,
) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .connection_customizer(Box::new(StatementTimeout(statement_timeout)))
        .build(manager)
}
