/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
///
/// # Endpoints
///
/// - `POST /auth/register` - Register new user
/// - `POST /auth/login` - Login and get an access token
///
/// Both return the same response shape: an access token plus the public
/// view of the user. Tokens embed the user id and role and expire after
/// the configured lifetime (default 24h).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use fieldbook_shared::{
    auth::{jwt, password},
    models::user::{CreateUser, PublicUser, Role, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Full name
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (min 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Role for the new account
    pub role: Role,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Response for both register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed JWT access token
    pub access_token: String,

    /// Public view of the authenticated user
    pub user: PublicUser,
}

/// Register a new user
///
/// Hashes the password with Argon2id and stores the account. Duplicate
/// email yields `409 Conflict`.
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "name": "John Doe",
///   "email": "john@example.com",
///   "password": "password123",
///   "role": "EMPLOYEE"
/// }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
        },
    )
    .await?;

    let claims = jwt::Claims::with_expiration(user.id, user.role, state.token_expiration());
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            access_token,
            user: user.into(),
        }),
    ))
}

/// Login endpoint
///
/// Authenticates a user by email and password and returns an access token.
/// The failure message never reveals whether the email or the password was
/// wrong.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "john@example.com",
///   "password": "password123"
/// }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Validation failed
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let claims = jwt::Claims::with_expiration(user.id, user.role, state.token_expiration());
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        access_token,
        user: user.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "password123".to_string(),
            role: Role::Employee,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_rejects_short_password() {
        let req = RegisterRequest {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            password: "short".to_string(),
            role: Role::Employee,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_rejects_bad_email() {
        let req = RegisterRequest {
            name: "John Doe".to_string(),
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
            role: Role::Admin,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_role_parses_from_wire() {
        let json = r#"{"name":"A","email":"a@b.com","password":"password123","role":"ADMIN"}"#;
        let req: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.role, Role::Admin);
    }
}
