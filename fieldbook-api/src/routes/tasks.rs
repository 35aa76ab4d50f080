/// Task endpoints
///
/// # Endpoints
///
/// - `POST /tasks` - Create a task (assignee must be an employee)
/// - `GET /tasks` - List tasks (admin: all, employee: own only)
/// - `PATCH /tasks/:id/status` - Update task status
///
/// All endpoints require a valid bearer token. Task responses are always
/// joined with assignee and customer summaries.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use fieldbook_shared::{
    auth::middleware::AuthContext,
    models::{
        customer::Customer,
        task::{CreateTask, Task, TaskDetail, TaskStatus},
        user::{Role, User},
    },
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (default: PENDING)
    pub status: Option<TaskStatus>,

    /// Assignee user ID (must reference an employee)
    pub assigned_to: Uuid,

    /// Customer ID (must reference an existing customer)
    pub customer_id: Uuid,
}

/// Task status update request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskStatusRequest {
    /// New status (no transition graph: any status may follow any other)
    pub status: TaskStatus,
}

/// Creates a new task
///
/// Validates, in order:
/// 1. The assignee user exists (404 otherwise)
/// 2. The assignee's role is EMPLOYEE (409 otherwise)
/// 3. The customer exists (404 otherwise)
///
/// On success inserts the task and returns it joined with assignee and
/// customer summaries.
///
/// # Errors
///
/// - `404 Not Found`: Assignee or customer does not exist
/// - `409 Conflict`: Assignee is not an employee
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskDetail>)> {
    req.validate()?;

    let assignee = User::find_by_id(&state.db, req.assigned_to)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assigned user not found".to_string()))?;

    if assignee.role != Role::Employee {
        return Err(ApiError::Conflict(
            "Task can only be assigned to employees".to_string(),
        ));
    }

    Customer::find_by_id(&state.db, req.customer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Customer not found".to_string()))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            status: req.status.unwrap_or_default(),
            assigned_to: req.assigned_to,
            customer_id: req.customer_id,
        },
    )
    .await?;

    let detail = Task::find_detail(&state.db, task.id)
        .await?
        .ok_or_else(|| ApiError::InternalError("Created task vanished".to_string()))?;

    Ok((StatusCode::CREATED, Json(detail)))
}

/// Lists tasks, newest first
///
/// Admins receive every task; employees receive only tasks assigned to
/// themselves.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<TaskDetail>>> {
    let tasks = Task::list_details(&state.db, assignment_filter(&auth)).await?;

    Ok(Json(tasks))
}

/// Assignee filter for task listings: admins see all, employees their own
fn assignment_filter(auth: &AuthContext) -> Option<Uuid> {
    if auth.is_admin() {
        None
    } else {
        Some(auth.user_id)
    }
}

/// Whether the caller may mutate a task assigned to `assigned_to`
fn may_update(auth: &AuthContext, assigned_to: Uuid) -> bool {
    auth.is_admin() || assigned_to == auth.user_id
}

/// Updates the status of a task
///
/// Employees may only mutate tasks assigned to themselves; admins are
/// exempt. Status is a flat field: any status may be set from any other.
///
/// # Errors
///
/// - `403 Forbidden`: Employee mutating someone else's task
/// - `404 Not Found`: No task with that ID
pub async fn update_status(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskStatusRequest>,
) -> ApiResult<Json<TaskDetail>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    if !may_update(&auth, task.assigned_to) {
        return Err(ApiError::Forbidden(
            "You can only update your own tasks".to_string(),
        ));
    }

    Task::update_status(&state.db, id, req.status).await?;

    let detail = Task::find_detail(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_request_parses_from_wire() {
        let json = format!(
            r#"{{"title":"Follow up","assigned_to":"{}","customer_id":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let req: CreateTaskRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(req.title, "Follow up");
        assert!(req.description.is_none());
        assert!(req.status.is_none());
        assert_eq!(req.status.unwrap_or_default(), TaskStatus::Pending);
    }

    #[test]
    fn test_create_task_request_rejects_empty_title() {
        let req = CreateTaskRequest {
            title: String::new(),
            description: None,
            status: None,
            assigned_to: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_status_request_parses_from_wire() {
        let req: UpdateTaskStatusRequest =
            serde_json::from_str(r#"{"status":"IN_PROGRESS"}"#).unwrap();
        assert_eq!(req.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_update_status_request_rejects_unknown_status() {
        let result = serde_json::from_str::<UpdateTaskStatusRequest>(r#"{"status":"BLOCKED"}"#);
        assert!(result.is_err());
    }

    fn auth(role: Role) -> AuthContext {
        AuthContext {
            user_id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn test_admins_list_all_tasks() {
        assert!(assignment_filter(&auth(Role::Admin)).is_none());
    }

    #[test]
    fn test_employees_list_only_their_own_tasks() {
        let employee = auth(Role::Employee);
        assert_eq!(assignment_filter(&employee), Some(employee.user_id));
    }

    #[test]
    fn test_employee_may_update_only_own_tasks() {
        let employee = auth(Role::Employee);

        assert!(may_update(&employee, employee.user_id));
        assert!(!may_update(&employee, Uuid::new_v4()));
    }

    #[test]
    fn test_admin_may_update_any_task() {
        let admin = auth(Role::Admin);

        assert!(may_update(&admin, admin.user_id));
        assert!(may_update(&admin, Uuid::new_v4()));
    }
}
