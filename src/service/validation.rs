//! Request validation for customer payloads.

use crate::customer::{limits, Customer, CustomerPayload};
use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

/// Every rule also enforces the field's maximum length.
#[derive(Clone, Copy)]
enum Rule {
    /// Must be supplied; may be empty.
    Present,
    /// Must be supplied and not blank.
    NonBlank,
    /// Must be supplied and shaped like `local@domain`.
    Email,
}

fn is_email(s: &str) -> bool {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

/// Collects every missing or invalid field so the caller gets one aggregated error.
#[derive(Default)]
struct Report {
    missing: Vec<&'static str>,
    invalid: Vec<(&'static str, String)>,
}

impl Report {
    fn check(&mut self, name: &'static str, value: Option<&str>, rule: Rule, max: usize, required: bool) {
        let Some(v) = value else {
            if required {
                self.missing.push(name);
            }
            return;
        };
        let problem = match rule {
            Rule::NonBlank if v.trim().is_empty() => Some("must not be empty".to_string()),
            Rule::Email if !is_email(v) => Some("must be a valid email".to_string()),
            _ if v.chars().count() > max => Some(format!("must be at most {} characters", max)),
            _ => None,
        };
        if let Some(problem) = problem {
            self.invalid.push((name, problem));
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.missing.is_empty() && self.invalid.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing {}", self.missing.join(", ")));
        }
        for (name, why) in &self.invalid {
            parts.push(format!("{} {}", name, why));
        }
        let fields = self
            .missing
            .iter()
            .chain(self.invalid.iter().map(|(n, _)| n))
            .map(|s| s.to_string())
            .collect();
        Err(AppError::Validation {
            message: format!("Invalid Customer: {}", parts.join("; ")),
            fields,
        })
    }
}

fn report(payload: &CustomerPayload, required: bool) -> Report {
    let p = payload;
    let mut r = Report::default();
    r.check("firstname", p.firstname.as_deref(), Rule::NonBlank, limits::FIRSTNAME, required);
    r.check("lastname", p.lastname.as_deref(), Rule::NonBlank, limits::LASTNAME, required);
    r.check("email", p.email.as_deref(), Rule::Email, limits::EMAIL, required);
    r.check("phone", p.phone.as_deref(), Rule::NonBlank, limits::PHONE, required);
    r.check("street_line1", p.street_line1.as_deref(), Rule::Present, limits::STREET_LINE, required);
    r.check("street_line2", p.street_line2.as_deref(), Rule::Present, limits::STREET_LINE, required);
    r.check("city", p.city.as_deref(), Rule::Present, limits::CITY, required);
    r.check("state", p.state.as_deref(), Rule::Present, limits::STATE, required);
    r.check("country", p.country.as_deref(), Rule::Present, limits::COUNTRY, required);
    r.check("zipcode", p.zipcode.as_deref(), Rule::Present, limits::ZIPCODE, required);
    r
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a full representation and build an unsaved, un-normalized customer.
    /// All required fields must be present; `acc_active` defaults to true.
    pub fn validate(payload: CustomerPayload) -> Result<Customer, AppError> {
        report(&payload, true).finish()?;
        let mut customer = Customer {
            id: None,
            firstname: String::new(),
            lastname: String::new(),
            email: String::new(),
            phone: String::new(),
            street_line1: String::new(),
            street_line2: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            zipcode: String::new(),
            acc_active: true,
            created_at: None,
            updated_at: None,
        };
        payload.apply_to(&mut customer);
        Ok(customer)
    }

    /// Validate only the fields present in the payload (for PATCH).
    pub fn validate_partial(payload: &CustomerPayload) -> Result<(), AppError> {
        report(payload, false).finish()
    }
}
