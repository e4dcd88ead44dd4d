//! In-process store with the same contract as the PostgreSQL one, unique email included.

use super::{require_id, CustomerStore};
use crate::customer::{timestamp, Customer, FilterField};
use crate::error::AppError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Customer>,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|c| c.email == email && c.id != except)
    }
}

#[derive(Default)]
pub struct MemoryCustomerStore {
    inner: Mutex<Inner>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::Persistence("customer store lock poisoned".into()))
    }
}

fn unique_violation() -> AppError {
    AppError::Conflict("unique constraint violated: customers_email_key".into())
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn create(&self, mut customer: Customer) -> Result<Customer, AppError> {
        let mut inner = self.lock()?;
        if inner.email_taken(&customer.email, None) {
            return Err(unique_violation());
        }
        inner.last_id += 1;
        let id = inner.last_id;
        let now = timestamp::now();
        customer.id = Some(id);
        customer.created_at = Some(now);
        customer.updated_at = Some(now);
        inner.rows.insert(id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError> {
        Ok(self.lock()?.rows.values().find(|c| c.email == email).cloned())
    }

    async fn find_by(&self, field: FilterField, value: &str) -> Result<Vec<Customer>, AppError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .filter(|c| field.value_of(c) == value)
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<Customer>, AppError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn update(&self, mut customer: Customer) -> Result<Customer, AppError> {
        let id = require_id(&customer)?;
        let mut inner = self.lock()?;
        let created_at = match inner.rows.get(&id) {
            Some(existing) => existing.created_at,
            None => return Err(AppError::customer_not_found(id)),
        };
        if inner.email_taken(&customer.email, Some(id)) {
            return Err(unique_violation());
        }
        customer.created_at = created_at;
        customer.updated_at = Some(timestamp::not_before(timestamp::now(), created_at));
        inner.rows.insert(id, customer.clone());
        Ok(customer)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.lock()?.rows.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
