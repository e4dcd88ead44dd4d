//! Safe SQL text for the customers table.

mod builder;
pub use builder::{qualified_table, quoted, CustomerQueries, CUSTOMERS_TABLE};
