/// User endpoints
///
/// # Endpoints
///
/// - `GET /users` - List all users (no pagination)
/// - `GET /users/:id` - Get a single user
/// - `PATCH /users/:id` - Overwrite a user's role (admin only)
///
/// All endpoints require a valid bearer token. Responses expose only the
/// public view of a user (no password hash).

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Extension, Json,
};
use fieldbook_shared::{
    auth::middleware::AuthContext,
    models::user::{PublicUser, Role, User},
};
use serde::Deserialize;
use uuid::Uuid;

/// Role update request
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role for the user
    pub role: Role,
}

/// Lists all users
///
/// The account table is expected to stay small, so there is no pagination.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = User::list(&state.db).await?;

    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

/// Gets a single user by ID
///
/// # Errors
///
/// - `404 Not Found`: No user with that ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Overwrites a user's role
///
/// Admin only. There is no self-protection: an admin may demote themselves.
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not an admin
/// - `404 Not Found`: No user with that ID
pub async fn update_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRoleRequest>,
) -> ApiResult<Json<PublicUser>> {
    if !auth.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let user = User::update_role(&state.db, id, req.role)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %id, role = ?req.role, "User role updated");

    Ok(Json(user.into()))
}
