//! Customer handlers: list, create, read, replace, patch, delete and activation.

use crate::customer::{Customer, CustomerFilter, CustomerPayload, ListParams};
use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiJson, ApiQuery};
use crate::response;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id: {}", id_str)))
}

/// List customers, optionally filtered by one field.
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(ListParams),
    responses(
        (status = 200, description = "Matching customers", body = [Customer]),
        (status = 400, description = "Unparsable query string", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = CustomerFilter::from(params);
    let customers = state.customers.list(filter).await?;
    Ok(response::ok(customers))
}

/// Create a customer.
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CustomerPayload,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 415, description = "Body is not JSON", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state.customers.create(payload).await?;
    let location = customer
        .id
        .map(|id| state.customer_location(id))
        .unwrap_or_default();
    Ok(response::created(&location, customer))
}

/// Fetch one customer.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "The customer", body = Customer),
        (status = 404, description = "No such customer", body = ErrorBody)
    )
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(response::ok(state.customers.get(id).await?))
}

/// Replace a customer. An `id` in the body is ignored.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Customer replaced", body = Customer),
        (status = 400, description = "Missing or invalid fields", body = ErrorBody),
        (status = 404, description = "No such customer", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody),
        (status = 415, description = "Body is not JSON", body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(response::ok(state.customers.update(id, payload).await?))
}

/// Change only the supplied fields.
#[utoipa::path(
    patch,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    request_body = CustomerPayload,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Invalid fields", body = ErrorBody),
        (status = 404, description = "No such customer", body = ErrorBody),
        (status = 409, description = "Email already in use", body = ErrorBody)
    )
)]
pub async fn patch(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<CustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(response::ok(state.customers.patch(id, payload).await?))
}

/// Delete a customer. Succeeds whether or not it exists.
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses((status = 204, description = "Customer deleted"))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    state.customers.delete(id).await?;
    Ok(response::no_content())
}

#[utoipa::path(
    put,
    path = "/customers/{id}/active",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer activated", body = Customer),
        (status = 404, description = "No such customer", body = ErrorBody)
    )
)]
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(response::ok(state.customers.activate(id).await?))
}

#[utoipa::path(
    delete,
    path = "/customers/{id}/active",
    tag = "customers",
    params(("id" = i64, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Customer deactivated", body = Customer),
        (status = 404, description = "No such customer", body = ErrorBody)
    )
)]
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(response::ok(state.customers.deactivate(id).await?))
}
