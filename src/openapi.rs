//! OpenAPI document for the customer API.

use crate::customer::{Customer, CustomerPayload};
use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::customer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customer REST API Service",
        version = "1.0.0",
        description = "Create, read, update, delete, list and activate customer accounts."
    ),
    paths(
        customer::list,
        customer::create,
        customer::read,
        customer::update,
        customer::patch,
        customer::delete,
        customer::activate,
        customer::deactivate
    ),
    components(schemas(Customer, CustomerPayload, ErrorBody, ErrorDetail)),
    tags((name = "customers", description = "Customer accounts"))
)]
pub struct ApiDoc;
