//! CustomerService: resource rules over the record store.

mod customer;
mod validation;
pub use customer::CustomerService;
pub use validation::RequestValidator;
