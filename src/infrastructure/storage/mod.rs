//! Storage infrastructure - backend selection and PostgreSQL plumbing

mod factory;
mod postgres;

pub use factory::{StorageBackends, StorageConfig, StorageFactory, StorageType};
pub(crate) use postgres::row_to_document;
pub use postgres::{connect_pool, ensure_document_table, PostgresConfig};
