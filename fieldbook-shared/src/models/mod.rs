/// Database models for Fieldbook
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts, roles, and authentication data
/// - `customer`: Customer records with unique email/phone
/// - `task`: Work items assigned to employees for customers
///
/// # Example
///
/// ```no_run
/// use fieldbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use fieldbook_shared::models::user::{CreateUser, Role, User};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     name: "John Doe".to_string(),
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     role: Role::Employee,
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod customer;
pub mod task;
pub mod user;
