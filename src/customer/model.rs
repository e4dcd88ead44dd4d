//! The Customer record as stored and as exposed over the service boundary.

use crate::case::{to_lower_case, to_title_case};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A customer account. `id` and the timestamps are `None` until the record is first persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[schema(read_only)]
    pub id: Option<i64>,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub phone: String,
    pub street_line1: String,
    pub street_line2: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zipcode: String,
    pub acc_active: bool,
    #[serde(with = "super::timestamp::option", default)]
    #[schema(value_type = Option<String>, example = "Mon, 03 Oct 2022 14:05:09 GMT", read_only)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(with = "super::timestamp::option", default)]
    #[schema(value_type = Option<String>, example = "Mon, 03 Oct 2022 14:05:09 GMT", read_only)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    /// Apply the storage normalization: email lower case, lastname and city title case.
    pub fn normalize(&mut self) {
        self.email = to_lower_case(&self.email);
        self.lastname = to_title_case(&self.lastname);
        self.city = to_title_case(&self.city);
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}
