//! Customer REST service: validated, normalized customer records over PostgreSQL or memory.

pub mod case;
pub mod config;
pub mod customer;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load_from_env, load_with, ServiceConfig, StorageBackend};
pub use customer::{Customer, CustomerFilter, CustomerPayload};
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, ensure_database_exists};
pub use routes::build_router;
pub use service::CustomerService;
pub use state::AppState;
pub use store::{CustomerStore, MemoryCustomerStore, PgCustomerStore};
