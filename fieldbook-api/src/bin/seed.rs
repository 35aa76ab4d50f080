//! Database seeding binary
//!
//! Wipes tasks, customers, and users, then inserts demo data: one admin,
//! two employees, three customers, and a handful of tasks.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://... cargo run -p fieldbook-api --bin seed
//! ```

use fieldbook_shared::{
    auth::password::hash_password,
    db::{
        migrations::run_migrations,
        pool::{create_pool, DatabaseConfig},
    },
    models::{
        customer::{CreateCustomer, Customer},
        task::{CreateTask, Task, TaskStatus},
        user::{CreateUser, Role, User},
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    tracing::info!("Starting database seeding...");

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

    let pool = create_pool(DatabaseConfig {
        url: database_url,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    // Tasks reference users and customers, so wipe them first
    sqlx::query("DELETE FROM tasks").execute(&pool).await?;
    sqlx::query("DELETE FROM customers").execute(&pool).await?;
    sqlx::query("DELETE FROM users").execute(&pool).await?;

    let admin = User::create(
        &pool,
        CreateUser {
            name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: hash_password("admin123")?,
            role: Role::Admin,
        },
    )
    .await?;

    let employee_hash = hash_password("employee123")?;

    let employee1 = User::create(
        &pool,
        CreateUser {
            name: "John Employee".to_string(),
            email: "john@example.com".to_string(),
            password_hash: employee_hash.clone(),
            role: Role::Employee,
        },
    )
    .await?;

    let employee2 = User::create(
        &pool,
        CreateUser {
            name: "Jane Employee".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: employee_hash,
            role: Role::Employee,
        },
    )
    .await?;

    tracing::info!(admin_id = %admin.id, "Users created");

    let customer1 = Customer::create(
        &pool,
        CreateCustomer {
            name: "Acme Corporation".to_string(),
            email: "contact@acme.com".to_string(),
            phone: "+1234567890".to_string(),
            company: Some("Acme Corporation".to_string()),
        },
    )
    .await?;

    let customer2 = Customer::create(
        &pool,
        CreateCustomer {
            name: "Tech Solutions Inc".to_string(),
            email: "info@techsolutions.com".to_string(),
            phone: "+0987654321".to_string(),
            company: Some("Tech Solutions Inc".to_string()),
        },
    )
    .await?;

    let customer3 = Customer::create(
        &pool,
        CreateCustomer {
            name: "Global Services Ltd".to_string(),
            email: "hello@globalservices.com".to_string(),
            phone: "+1122334455".to_string(),
            company: Some("Global Services Ltd".to_string()),
        },
    )
    .await?;

    tracing::info!("Customers created");

    let tasks = vec![
        CreateTask {
            title: "Initial consultation call".to_string(),
            description: Some(
                "Schedule and conduct initial consultation with Acme Corp".to_string(),
            ),
            status: TaskStatus::Pending,
            assigned_to: employee1.id,
            customer_id: customer1.id,
        },
        CreateTask {
            title: "Follow up on proposal".to_string(),
            description: Some(
                "Follow up with Tech Solutions regarding the proposal".to_string(),
            ),
            status: TaskStatus::InProgress,
            assigned_to: employee2.id,
            customer_id: customer2.id,
        },
        CreateTask {
            title: "Project kickoff meeting".to_string(),
            description: Some(
                "Organize kickoff meeting for Global Services project".to_string(),
            ),
            status: TaskStatus::Done,
            assigned_to: employee1.id,
            customer_id: customer3.id,
        },
        CreateTask {
            title: "Requirements gathering".to_string(),
            description: Some("Gather detailed requirements from Acme Corp".to_string()),
            status: TaskStatus::Pending,
            assigned_to: employee2.id,
            customer_id: customer1.id,
        },
        CreateTask {
            title: "Technical assessment".to_string(),
            description: Some("Perform technical assessment for Tech Solutions".to_string()),
            status: TaskStatus::InProgress,
            assigned_to: employee1.id,
            customer_id: customer2.id,
        },
    ];

    for task in tasks {
        Task::create(&pool, task).await?;
    }

    tracing::info!("Tasks created");

    tracing::info!("Database seeding completed successfully!");
    tracing::info!("Admin: admin@example.com / admin123");
    tracing::info!("Employee 1: john@example.com / employee123");
    tracing::info!("Employee 2: jane@example.com / employee123");

    Ok(())
}
