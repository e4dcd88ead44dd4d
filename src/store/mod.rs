//! Customer record store: durable CRUD and equality lookups, no business rules.
//!
//! Implementations enforce email uniqueness themselves (unique index or equivalent) and report
//! a violation as [`AppError::Conflict`]. They never normalize values.

mod memory;
mod postgres;

pub use memory::MemoryCustomerStore;
pub use postgres::PgCustomerStore;

use crate::customer::{Customer, FilterField};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Persist a new record. Any `id` on the input is discarded; a fresh one is assigned along
    /// with `created_at` and `updated_at`.
    async fn create(&self, customer: Customer) -> Result<Customer, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    /// Exact (case-sensitive) email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError>;

    /// Records whose `field` equals `value` exactly, insertion order. Empty when none match.
    async fn find_by(&self, field: FilterField, value: &str) -> Result<Vec<Customer>, AppError>;

    async fn all(&self) -> Result<Vec<Customer>, AppError>;

    /// Persist every mutable field of an existing record and refresh `updated_at`.
    /// Fails with a validation error when `id` is unset and not-found when no such row exists.
    async fn update(&self, customer: Customer) -> Result<Customer, AppError>;

    /// Remove the record if present; absent ids are a no-op.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Cheap liveness check of the backing storage.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn require_id(customer: &Customer) -> Result<i64, AppError> {
    customer
        .id
        .ok_or_else(|| AppError::validation("Update called with empty ID field"))
}
