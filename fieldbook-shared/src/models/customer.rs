/// Customer model and database operations
///
/// This module provides the Customer model with paginated listing and partial
/// updates. Email and phone are unique; violations surface as constraint
/// errors named `customers_email_key` / `customers_phone_key`, which the API
/// layer translates into field-specific conflicts.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE customers (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(255) NOT NULL,
///     email VARCHAR(255) NOT NULL UNIQUE,
///     phone VARCHAR(32) NOT NULL UNIQUE,
///     company VARCHAR(255),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Customer record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    /// Unique customer ID (UUID v4)
    pub id: Uuid,

    /// Customer name
    pub name: String,

    /// Email address, unique across all customers
    pub email: String,

    /// Phone number, unique across all customers
    pub phone: String,

    /// Optional company name
    pub company: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomer {
    /// Customer name
    pub name: String,

    /// Email address (must be unique)
    pub email: String,

    /// Phone number (must be unique)
    pub phone: String,

    /// Optional company name
    pub company: Option<String>,
}

/// Input for updating an existing customer
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCustomer {
    /// New customer name
    pub name: Option<String>,

    /// New email address
    pub email: Option<String>,

    /// New phone number
    pub phone: Option<String>,

    /// New company name (use Some(None) to clear)
    pub company: Option<Option<String>>,
}

impl UpdateCustomer {
    /// Whether the update carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
    }
}

impl Customer {
    /// Creates a new customer in the database
    ///
    /// # Errors
    ///
    /// Returns an error if email or phone already exists (unique constraint
    /// violation) or the database connection fails
    pub async fn create(pool: &PgPool, data: CreateCustomer) -> Result<Self, sqlx::Error> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, phone, company)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, company, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.company)
        .fetch_one(pool)
        .await?;

        Ok(customer)
    }

    /// Finds a customer by ID
    ///
    /// # Returns
    ///
    /// The customer if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, company, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(customer)
    }

    /// Lists customers with pagination, newest first
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of customers to return
    /// * `offset` - Number of customers to skip
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Self>, sqlx::Error> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, phone, company, created_at, updated_at
            FROM customers
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(customers)
    }

    /// Counts total number of customers
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Updates an existing customer
    ///
    /// Only non-None fields in `data` are written. The `updated_at`
    /// timestamp is always refreshed.
    ///
    /// # Returns
    ///
    /// The updated customer if found, None if the customer doesn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if the new email or phone collides with another
    /// customer, or the database connection fails
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCustomer,
    ) -> Result<Option<Self>, sqlx::Error> {
        // Build dynamic update query based on which fields are present
        let mut query = String::from("UPDATE customers SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            query.push_str(&format!(", name = ${}", bind_count));
        }
        if data.email.is_some() {
            bind_count += 1;
            query.push_str(&format!(", email = ${}", bind_count));
        }
        if data.phone.is_some() {
            bind_count += 1;
            query.push_str(&format!(", phone = ${}", bind_count));
        }
        if data.company.is_some() {
            bind_count += 1;
            query.push_str(&format!(", company = ${}", bind_count));
        }

        query.push_str(
            " WHERE id = $1 RETURNING id, name, email, phone, company, created_at, updated_at",
        );

        let mut q = sqlx::query_as::<_, Customer>(&query).bind(id);

        if let Some(name) = data.name {
            q = q.bind(name);
        }
        if let Some(email) = data.email {
            q = q.bind(email);
        }
        if let Some(phone) = data.phone {
            q = q.bind(phone);
        }
        if let Some(company_opt) = data.company {
            q = q.bind(company_opt);
        }

        let customer = q.fetch_optional(pool).await?;

        Ok(customer)
    }

    /// Deletes a customer by ID
    ///
    /// # Returns
    ///
    /// True if the customer was deleted, false if it didn't exist
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key constraints prevent deletion or the
    /// database connection fails
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_customer_default_is_empty() {
        let update = UpdateCustomer::default();
        assert!(update.is_empty());
    }

    #[test]
    fn test_update_customer_with_field_is_not_empty() {
        let update = UpdateCustomer {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_customer_clearing_company_is_not_empty() {
        let update = UpdateCustomer {
            company: Some(None),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
