//! Database layer - connection pool, schema and repositories
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Device lookups use JOINs, no N+1 queries
//! - Rely on DB constraints and map violations, no check-then-insert

pub mod pool;
pub mod repos;
pub mod schema;

#[cfg(test)]
pub(crate) mod testing;

pub use pool::{connect, create_pool, PoolSettings};
pub use repos::*;
