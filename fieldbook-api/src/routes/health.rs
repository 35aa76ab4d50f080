/// Health check endpoint
///
/// `GET /health` reports whether the server is up, whether the database
/// answers a round trip, and basic pool statistics:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool_size": 3,
///   "idle_connections": 2
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,

    /// Open connections in the pool
    pub pool_size: u32,

    /// Idle connections in the pool
    pub idle_connections: usize,
}

/// Health check handler
///
/// Always responds 200; a broken database is reported in the body so
/// monitoring can distinguish a dead server from a degraded one.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match sqlx::query("SELECT 1").fetch_one(&state.db).await {
        Ok(_) => ("healthy", "connected"),
        Err(_) => ("degraded", "disconnected"),
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
        pool_size: state.db.size(),
        idle_connections: state.db.num_idle(),
    })
}
