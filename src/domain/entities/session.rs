//! Session entity representing one authenticated login instance.

use chrono::{DateTime, Utc};
use serde_json::json;

/// A server-side session row.
///
/// Created at register/login, touched on every successful access-token
/// verification, and deleted on logout. Sessions are only ever looked up
/// by their opaque id.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// JSON snapshot of `{user_id, last_activity}` kept for auditing.
    pub payload: String,
    /// Epoch seconds of the last successful token verification.
    pub last_activity: i64,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Builds the audit payload snapshot stored alongside a session row.
pub fn session_payload(user_id: i64, last_activity: i64) -> String {
    json!({ "user_id": user_id, "last_activity": last_activity }).to_string()
}
