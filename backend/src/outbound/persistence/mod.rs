//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` with `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Uniqueness is enforced by constraints and reported through
//!   the ports' duplicate variants.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Catalog codes**: brands and colours are stored as integers, countries
//!   as ISO codes; rows are re-validated through the catalog on read.
//!
//! # Example
//!
//! ```ignore
//! use unblock::outbound::persistence::{DbPool, DieselCarRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/unblock")).await?;
//! let cars = DieselCarRepository::new(pool);
//! ```

mod diesel_blocking_relation_repository;
mod diesel_car_repository;
mod diesel_error_mapping;
mod diesel_user_car_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_blocking_relation_repository::DieselBlockingRelationRepository;
pub use diesel_car_repository::DieselCarRepository;
pub use diesel_user_car_repository::DieselUserCarRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
