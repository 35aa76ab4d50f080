/// Task model and database operations
///
/// Tasks are units of work assigned to one employee for one customer. The
/// application enforces, before every insert, that the assignee is a user
/// with role EMPLOYEE and that the customer exists; the schema enforces the
/// foreign keys. Tasks are never deleted, only status-mutated.
///
/// Status is a flat enumerated field: any status may be set from any other.
/// There is deliberately no transition graph.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(255) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'PENDING',
///     assigned_to UUID NOT NULL REFERENCES users (id),
///     customer_id UUID NOT NULL REFERENCES customers (id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task status, a flat enumerated field with no guarded workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not yet started
    Pending,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Task row as stored in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// User the task is assigned to (must be an employee)
    pub assigned_to: Uuid,

    /// Customer the task is for
    pub customer_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (defaults to PENDING)
    pub status: TaskStatus,

    /// Assignee user ID (caller must verify the role is EMPLOYEE)
    pub assigned_to: Uuid,

    /// Customer ID (caller must verify the customer exists)
    pub customer_id: Uuid,
}

/// Assignee summary joined onto task responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAssignee {
    /// Assignee user ID
    pub id: Uuid,

    /// Assignee name
    pub name: String,

    /// Assignee email
    pub email: String,
}

/// Customer summary joined onto task responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCustomer {
    /// Customer ID
    pub id: Uuid,

    /// Customer name
    pub name: String,

    /// Customer email
    pub email: String,

    /// Customer phone
    pub phone: String,
}

/// Task joined with assignee and customer summaries
///
/// This is the shape every task endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDetail {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Current status
    pub status: TaskStatus,

    /// Assignee user ID
    pub assigned_to: Uuid,

    /// Customer ID
    pub customer_id: Uuid,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,

    /// Assignee summary
    pub assignee: TaskAssignee,

    /// Customer summary
    pub customer: TaskCustomer,
}

/// Flat row shape of the task/user/customer join
#[derive(Debug, sqlx::FromRow)]
struct TaskDetailRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    assigned_to: Uuid,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    assignee_name: String,
    assignee_email: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
}

impl From<TaskDetailRow> for TaskDetail {
    fn from(row: TaskDetailRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            assigned_to: row.assigned_to,
            customer_id: row.customer_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            assignee: TaskAssignee {
                id: row.assigned_to,
                name: row.assignee_name,
                email: row.assignee_email,
            },
            customer: TaskCustomer {
                id: row.customer_id,
                name: row.customer_name,
                email: row.customer_email,
                phone: row.customer_phone,
            },
        }
    }
}

/// Join query selecting a task with its assignee and customer summaries
const DETAIL_SELECT: &str = r#"
    SELECT t.id, t.title, t.description, t.status, t.assigned_to, t.customer_id,
           t.created_at, t.updated_at,
           u.name AS assignee_name, u.email AS assignee_email,
           c.name AS customer_name, c.email AS customer_email, c.phone AS customer_phone
    FROM tasks t
    JOIN users u ON u.id = t.assigned_to
    JOIN customers c ON c.id = t.customer_id
"#;

impl Task {
    /// Inserts a new task
    ///
    /// Referential checks (assignee is an employee, customer exists) belong
    /// to the caller; this function only writes the row.
    ///
    /// # Errors
    ///
    /// Returns an error if a foreign key is violated or the database
    /// connection fails
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, assigned_to, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, status, assigned_to, customer_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.assigned_to)
        .bind(data.customer_id)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID (flat row, no joins)
    ///
    /// # Returns
    ///
    /// The task if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, assigned_to, customer_id,
                   created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID, joined with assignee and customer summaries
    ///
    /// # Returns
    ///
    /// The joined task if found, None otherwise
    pub async fn find_detail(pool: &PgPool, id: Uuid) -> Result<Option<TaskDetail>, sqlx::Error> {
        let query = format!("{} WHERE t.id = $1", DETAIL_SELECT);

        let row = sqlx::query_as::<_, TaskDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(TaskDetail::from))
    }

    /// Lists tasks joined with summaries, newest first
    ///
    /// # Arguments
    ///
    /// * `assigned_to` - When Some, only tasks assigned to that user are
    ///   returned (employee view); when None, all tasks are returned
    ///   (admin view)
    pub async fn list_details(
        pool: &PgPool,
        assigned_to: Option<Uuid>,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            "{} WHERE ($1::uuid IS NULL OR t.assigned_to = $1) ORDER BY t.created_at DESC",
            DETAIL_SELECT
        );

        let rows = sqlx::query_as::<_, TaskDetailRow>(&query)
            .bind(assigned_to)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(TaskDetail::from).collect())
    }

    /// Updates the status of a task
    ///
    /// Any status may be set from any other status.
    ///
    /// # Returns
    ///
    /// True if the task was found and updated, false otherwise
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: TaskStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"DONE\"");

        let status: TaskStatus = serde_json::from_str("\"IN_PROGRESS\"").unwrap();
        assert_eq!(status, TaskStatus::InProgress);
    }

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_detail_row_conversion() {
        let assignee_id = Uuid::new_v4();
        let customer_id = Uuid::new_v4();
        let now = Utc::now();

        let row = TaskDetailRow {
            id: Uuid::new_v4(),
            title: "Follow up with client".to_string(),
            description: None,
            status: TaskStatus::Pending,
            assigned_to: assignee_id,
            customer_id,
            created_at: now,
            updated_at: now,
            assignee_name: "John Employee".to_string(),
            assignee_email: "john@example.com".to_string(),
            customer_name: "Acme Corporation".to_string(),
            customer_email: "contact@acme.com".to_string(),
            customer_phone: "+1234567890".to_string(),
        };

        let detail: TaskDetail = row.into();

        assert_eq!(detail.assignee.id, assignee_id);
        assert_eq!(detail.assignee.email, "john@example.com");
        assert_eq!(detail.customer.id, customer_id);
        assert_eq!(detail.customer.phone, "+1234567890");
    }
}
