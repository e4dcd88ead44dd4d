//! Customer resource rules on top of a [`CustomerStore`]: normalization, email uniqueness,
//! replace/patch semantics and activation.

use crate::customer::{Customer, CustomerFilter, CustomerPayload};
use crate::error::AppError;
use crate::service::RequestValidator;
use crate::store::CustomerStore;
use std::sync::Arc;

/// Rewrites a storage-level unique violation (lost race on the pre-check) as a duplicate email.
fn email_conflict(email: &str) -> impl FnOnce(AppError) -> AppError + '_ {
    move |e| match e {
        AppError::Conflict(_) => AppError::duplicate_email(email),
        other => other,
    }
}

#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        CustomerService { store }
    }

    pub fn store(&self) -> &Arc<dyn CustomerStore> {
        &self.store
    }

    /// Fails with a conflict when another record already holds `email`. The store's unique
    /// constraint still has the final word for concurrent writers.
    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> Result<(), AppError> {
        match self.store.find_by_email(email).await? {
            Some(existing) if existing.id != owner => Err(AppError::duplicate_email(email)),
            _ => Ok(()),
        }
    }

    async fn require(&self, id: i64) -> Result<Customer, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::customer_not_found(id))
    }

    pub async fn create(&self, payload: CustomerPayload) -> Result<Customer, AppError> {
        tracing::debug!(?payload, "create payload");
        let mut customer = RequestValidator::validate(payload)?.normalized();
        customer.acc_active = true;
        self.ensure_email_free(&customer.email, None).await?;
        let email = customer.email.clone();
        let created = self.store.create(customer).await.map_err(email_conflict(&email))?;
        tracing::info!(id = ?created.id, "customer created");
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Customer, AppError> {
        self.require(id).await
    }

    pub async fn list(&self, filter: CustomerFilter) -> Result<Vec<Customer>, AppError> {
        let customers = match &filter {
            CustomerFilter::All => self.store.all().await?,
            CustomerFilter::Field(field, value) => self.store.find_by(*field, value).await?,
            CustomerFilter::Email(email) => self.store.find_by_email(email).await?.into_iter().collect(),
        };
        tracing::info!(?filter, count = customers.len(), "customers listed");
        Ok(customers)
    }

    /// Full replace. The id always comes from the caller, never from the payload.
    pub async fn update(&self, id: i64, payload: CustomerPayload) -> Result<Customer, AppError> {
        let current = self.require(id).await?;
        let supplied_active = payload.acc_active;
        let mut customer = RequestValidator::validate(payload)?.normalized();
        customer.id = Some(id);
        customer.acc_active = supplied_active.unwrap_or(current.acc_active);
        customer.created_at = current.created_at;
        self.ensure_email_free(&customer.email, Some(id)).await?;
        let email = customer.email.clone();
        let updated = self.store.update(customer).await.map_err(email_conflict(&email))?;
        tracing::info!(id, "customer updated");
        Ok(updated)
    }

    /// Partial update: only the supplied fields change.
    pub async fn patch(&self, id: i64, payload: CustomerPayload) -> Result<Customer, AppError> {
        RequestValidator::validate_partial(&payload)?;
        let mut customer = self.require(id).await?;
        let email_changed = payload.email.is_some();
        payload.apply_to(&mut customer);
        customer.normalize();
        if email_changed {
            self.ensure_email_free(&customer.email, Some(id)).await?;
        }
        let email = customer.email.clone();
        let updated = self.store.update(customer).await.map_err(email_conflict(&email))?;
        tracing::info!(id, "customer patched");
        Ok(updated)
    }

    /// Idempotent: deleting an unknown id succeeds.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.store.find_by_id(id).await?.is_some() {
            self.store.delete(id).await?;
            tracing::info!(id, "customer deleted");
        } else {
            tracing::info!(id, "delete of absent customer ignored");
        }
        Ok(())
    }

    pub async fn activate(&self, id: i64) -> Result<Customer, AppError> {
        self.set_active(id, true).await
    }

    pub async fn deactivate(&self, id: i64) -> Result<Customer, AppError> {
        self.set_active(id, false).await
    }

    async fn set_active(&self, id: i64, active: bool) -> Result<Customer, AppError> {
        let mut customer = self.require(id).await?;
        customer.acc_active = active;
        let updated = self.store.update(customer).await?;
        tracing::info!(id, active, "customer activation changed");
        Ok(updated)
    }
}
