//! Shared test data.

use super::{Customer, CustomerPayload};

pub fn sample() -> Customer {
    Customer {
        id: None,
        firstname: "Katerine".into(),
        lastname: "perdomo".into(),
        email: "Kate@Email.com".into(),
        phone: "555-0100".into(),
        street_line1: "Calle 10 # 5-51".into(),
        street_line2: "Apto 301".into(),
        city: "bogota".into(),
        state: "CU".into(),
        country: "Colombia".into(),
        zipcode: "11023".into(),
        acc_active: true,
        created_at: None,
        updated_at: None,
    }
}

/// A complete payload; `email` and `city` vary per test.
pub fn payload(email: &str, city: &str) -> CustomerPayload {
    CustomerPayload {
        firstname: Some("Katerine".into()),
        lastname: Some("perdomo".into()),
        email: Some(email.into()),
        phone: Some("555-0100".into()),
        street_line1: Some("Calle 10 # 5-51".into()),
        street_line2: Some("".into()),
        city: Some(city.into()),
        state: Some("CU".into()),
        country: Some("Colombia".into()),
        zipcode: Some("11023".into()),
        acc_active: None,
    }
}
