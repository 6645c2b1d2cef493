//! Persistence layer: PostgreSQL storage for the booking schema.
//!
//! [`PostgresRepository`] wraps a `sqlx::PgPool` and exposes one method per
//! table operation. List queries with optional filters are assembled in
//! [`queries`]; row and write types live in [`models`].

pub mod models;
pub mod postgres;
pub mod queries;

pub use postgres::PostgresRepository;
pub use queries::{BookingFilter, MemberFilter, TransactionFilter};
