//! Customer domain: record, inbound payloads, list filter, timestamp format.

pub mod limits;
mod model;
mod payload;
pub mod timestamp;

#[cfg(test)]
pub(crate) mod fixtures;

pub use model::Customer;
pub use payload::{CustomerFilter, CustomerPayload, FilterField, ListParams};
