//! # kuconnect-database
//!
//! Persistence for KU Connect: one store trait per entity, PostgreSQL
//! repositories implementing them, and a process-local store with the same
//! semantics for development and tests.

pub mod connection;
pub mod find_one;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

mod errors;

pub use connection::DatabasePool;
pub use find_one::FindOne;
pub use memory::MemoryStore;
pub use store::Stores;
