//! Inbound representations: the customer body for create/replace/patch and the list query.

use crate::case::{to_lower_case, to_title_case};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::Customer;

/// Customer fields as sent by a client. Every field is optional at the type level so that a
/// body with several missing fields is reported in one validation error; `id` and the
/// timestamps are server-owned and ignored when present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(default)]
pub struct CustomerPayload {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_line1: Option<String>,
    pub street_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zipcode: Option<String>,
    pub acc_active: Option<bool>,
}

impl CustomerPayload {
    /// Overwrite the fields present in the payload; absent fields keep their current value.
    pub fn apply_to(self, customer: &mut Customer) {
        let CustomerPayload {
            firstname,
            lastname,
            email,
            phone,
            street_line1,
            street_line2,
            city,
            state,
            country,
            zipcode,
            acc_active,
        } = self;
        macro_rules! set {
            ($($field:ident),*) => {
                $(if let Some(v) = $field { customer.$field = v; })*
            };
        }
        set!(firstname, lastname, email, phone, street_line1, street_line2, city, state, country, zipcode, acc_active);
    }
}

/// Query-string filters for `GET /customers`.
#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// List Customers by first name
    pub firstname: Option<String>,
    /// List Customers by last name
    pub lastname: Option<String>,
    /// List Customers by city
    pub city: Option<String>,
    /// List Customers by email
    pub email: Option<String>,
}

/// Columns the record store can filter on by equality. Email has its own point lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Firstname,
    Lastname,
    City,
}

impl FilterField {
    pub fn column(self) -> &'static str {
        match self {
            FilterField::Firstname => "firstname",
            FilterField::Lastname => "lastname",
            FilterField::City => "city",
        }
    }

    pub fn value_of(self, customer: &Customer) -> &str {
        match self {
            FilterField::Firstname => &customer.firstname,
            FilterField::Lastname => &customer.lastname,
            FilterField::City => &customer.city,
        }
    }
}

/// The single filter applied to a list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustomerFilter {
    All,
    Field(FilterField, String),
    Email(String),
}

impl From<ListParams> for CustomerFilter {
    /// Priority when several filters are given: lastname, firstname, city, email. Empty values
    /// count as absent. Values are normalized the same way stored fields are.
    fn from(params: ListParams) -> Self {
        fn present(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        if let Some(v) = present(params.lastname) {
            CustomerFilter::Field(FilterField::Lastname, to_title_case(&v))
        } else if let Some(v) = present(params.firstname) {
            CustomerFilter::Field(FilterField::Firstname, v)
        } else if let Some(v) = present(params.city) {
            CustomerFilter::Field(FilterField::City, to_title_case(&v))
        } else if let Some(v) = present(params.email) {
            CustomerFilter::Email(to_lower_case(&v))
        } else {
            CustomerFilter::All
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::fixtures::sample;

    #[test]
    fn payload_ignores_server_owned_fields() {
        let p: CustomerPayload = serde_json::from_value(serde_json::json!({
            "id": 99,
            "firstname": "Ana",
            "created_at": "Mon, 03 Oct 2022 14:05:09 GMT"
        }))
        .unwrap();
        assert_eq!(p.firstname.as_deref(), Some("Ana"));
        assert_eq!(p.lastname, None);
    }

    #[test]
    fn apply_to_overwrites_present_fields_only() {
        let mut c = sample();
        CustomerPayload {
            phone: Some("555-9999".into()),
            acc_active: Some(false),
            ..Default::default()
        }
        .apply_to(&mut c);
        assert_eq!(c.phone, "555-9999");
        assert!(!c.acc_active);
        assert_eq!(c.firstname, "Katerine");
    }

    #[test]
    fn filter_priority_is_lastname_firstname_city_email() {
        let all = ListParams {
            firstname: Some("Ana".into()),
            lastname: Some("perdomo".into()),
            city: Some("neiva".into()),
            email: Some("A@B.CO".into()),
        };
        assert_eq!(
            CustomerFilter::from(all.clone()),
            CustomerFilter::Field(FilterField::Lastname, "Perdomo".into())
        );
        let no_last = ListParams { lastname: None, ..all.clone() };
        assert_eq!(
            CustomerFilter::from(no_last.clone()),
            CustomerFilter::Field(FilterField::Firstname, "Ana".into())
        );
        let only_city_email = ListParams { firstname: Some("".into()), ..no_last };
        assert_eq!(
            CustomerFilter::from(only_city_email.clone()),
            CustomerFilter::Field(FilterField::City, "Neiva".into())
        );
        let only_email = ListParams { city: None, ..only_city_email };
        assert_eq!(CustomerFilter::from(only_email), CustomerFilter::Email("a@b.co".into()));
        assert_eq!(CustomerFilter::from(ListParams::default()), CustomerFilter::All);
    }
}
