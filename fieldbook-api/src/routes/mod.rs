/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (register, login)
/// - `users`: User listing and role management
/// - `customers`: Customer CRUD with pagination
/// - `tasks`: Task creation, listing, and status updates

pub mod auth;
pub mod customers;
pub mod health;
pub mod tasks;
pub mod users;
