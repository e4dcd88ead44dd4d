//! Shared application state for all routes.

use crate::service::CustomerService;
use crate::store::CustomerStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerService,
    /// Prefix the customer routes are mounted under; used to build `Location` headers.
    pub api_prefix: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn CustomerStore>, api_prefix: &str) -> Self {
        AppState {
            customers: CustomerService::new(store),
            api_prefix: Arc::from(api_prefix),
        }
    }

    pub fn customer_location(&self, id: i64) -> String {
        format!("{}/customers/{}", self.api_prefix, id)
    }
}
