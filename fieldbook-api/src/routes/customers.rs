/// Customer endpoints
///
/// # Endpoints
///
/// - `POST /customers` - Create a customer
/// - `GET /customers?page&limit` - Paginated listing, newest first
/// - `GET /customers/:id` - Get a single customer
/// - `PATCH /customers/:id` - Partial update
/// - `DELETE /customers/:id` - Hard delete
///
/// All endpoints require a valid bearer token. Unique-constraint
/// violations on email or phone surface as `409 Conflict` identifying the
/// colliding field.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use fieldbook_shared::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Customer creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    /// Customer name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Email address (must be unique)
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Phone number (must be unique)
    #[validate(length(min = 1, max = 32, message = "Phone must be 1-32 characters"))]
    pub phone: String,

    /// Optional company name
    pub company: Option<String>,
}

/// Customer update request (all fields optional)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    /// New customer name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New phone number
    #[validate(length(min = 1, max = 32, message = "Phone must be 1-32 characters"))]
    pub phone: Option<String>,

    /// New company name (explicit null clears it)
    #[serde(default, deserialize_with = "double_option")]
    pub company: Option<Option<String>>,
}

/// Distinguishes an absent field from an explicit null
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

/// Pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,

    /// Items per page (default: 10)
    pub limit: Option<i64>,
}

/// Paginated customer listing
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedCustomers {
    /// Current page number
    pub page: i64,

    /// Items per page
    pub limit: i64,

    /// Total number of customers
    pub total_records: i64,

    /// Total number of pages (ceil of total/limit)
    pub total_pages: i64,

    /// Customers on this page
    pub data: Vec<Customer>,
}

/// Computes the number of pages needed for `total` records at `limit` per page
fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// Creates a new customer
///
/// # Errors
///
/// - `409 Conflict`: Email or phone already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    req.validate()?;

    let customer = Customer::create(
        &state.db,
        CreateCustomer {
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(customer)))
}

/// Lists customers with offset pagination, newest first
///
/// # Query Parameters
///
/// - `page` - Page number, 1-based (default: 1)
/// - `limit` - Items per page (default: 10)
///
/// # Errors
///
/// - `400 Bad Request`: page or limit below 1, or page out of range
pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> ApiResult<Json<PaginatedCustomers>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    if page < 1 || limit < 1 {
        return Err(ApiError::BadRequest(
            "Page and limit must be positive numbers".to_string(),
        ));
    }

    // page * limit can exceed i64 for adversarial inputs
    let offset = (page - 1)
        .checked_mul(limit)
        .ok_or_else(|| ApiError::BadRequest("Page is out of range".to_string()))?;

    let customers = Customer::list(&state.db, limit, offset).await?;
    let total_records = Customer::count(&state.db).await?;

    Ok(Json(PaginatedCustomers {
        page,
        limit,
        total_records,
        total_pages: total_pages(total_records, limit),
        data: customers,
    }))
}

/// Gets a single customer by ID
///
/// # Errors
///
/// - `404 Not Found`: No customer with that ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Customer>> {
    let customer = Customer::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Customer not found".to_string()))?;

    Ok(Json(customer))
}

/// Partially updates a customer
///
/// Only fields present in the request body are written.
///
/// # Errors
///
/// - `404 Not Found`: No customer with that ID
/// - `409 Conflict`: New email or phone collides with another customer
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateCustomerRequest>,
) -> ApiResult<Json<Customer>> {
    req.validate()?;

    let customer = Customer::update(
        &state.db,
        id,
        UpdateCustomer {
            name: req.name,
            email: req.email,
            phone: req.phone,
            company: req.company,
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Customer not found".to_string()))?;

    Ok(Json(customer))
}

/// Deletes a customer
///
/// # Errors
///
/// - `404 Not Found`: No customer with that ID
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let deleted = Customer::delete(&state.db, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Customer not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
