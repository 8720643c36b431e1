//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of domain repository ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **One transaction per checkout**: [`DieselSettlementStore`] writes a
//!   whole checkout on one pooled connection or nothing at all.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   port error types.
//!
//! # Example
//!
//! ```ignore
//! use box_office::outbound::persistence::{DbPool, PoolConfig, DieselUserRepository};
//!
//! let config = PoolConfig::new("postgres://localhost/box_office");
//! let pool = DbPool::new(config).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_offer_repository;
mod diesel_reservation_repository;
mod diesel_settlement_store;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_offer_repository::DieselOfferRepository;
pub use diesel_reservation_repository::DieselReservationRepository;
pub use diesel_settlement_store::{DEFAULT_STATEMENT_TIMEOUT, DieselSettlementStore};
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
