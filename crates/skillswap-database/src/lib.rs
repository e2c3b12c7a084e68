//! # skillswap-database
//!
//! Store contracts used by the services, their PostgreSQL implementations,
//! and an in-memory implementation for tests and single-process runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{ProfileStore, Stores, SwapRequestStore, UserStore};
