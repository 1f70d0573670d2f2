//! # Sign-in Sessions
//!
//! Server-side records backing the session cookie. A cookie is only honoured
//! while its row exists, is not revoked and has not expired.

use auth::{create_session_token, SessionConfig};
use chrono::Utc;
use entity::{app_users, user_sessions, UserSessions};
use error::AppError;
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    DbConn,
    EntityTrait,
    QueryFilter,
    Set,
};
use tracing::info;
use uuid::Uuid;

use crate::Result;

/// Request details stored with a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// A freshly started session and the token to put in its cookie.
#[derive(Debug, Clone)]
pub struct StartedSession {
    pub token:   String,
    pub session: user_sessions::Model,
}

/// Records a sign-in and issues its token.
pub async fn start_session(
    db: &DbConn,
    config: &SessionConfig,
    user: &app_users::Model,
    persistent: bool,
    client: ClientInfo,
) -> Result<StartedSession> {
    let session_id = Uuid::new_v4().to_string();
    let (token, expires_at) = create_session_token(config, &session_id, &user.id, &user.email, persistent)
        .map_err(|e| AppError::internal(format!("Failed to issue session token: {}", e)))?;

    let session = user_sessions::ActiveModel {
        id: Set(session_id),
        user_id: Set(user.id.clone()),
        persistent: Set(persistent),
        user_agent: Set(client.user_agent),
        ip_address: Set(client.ip_address),
        created_at: Set(Utc::now()),
        expires_at: Set(expires_at),
        revoked_at: Set(None),
    }
    .insert(db)
    .await?;

    info!(user_id = %user.id, session_id = %session.id, persistent, "Session started");
    Ok(StartedSession {
        token,
        session,
    })
}

/// The session if it can still authenticate requests.
pub async fn find_active_session(db: &DbConn, session_id: &str) -> Result<Option<user_sessions::Model>> {
    let session = UserSessions::find_by_id(session_id.to_string()).one(db).await?;
    Ok(session.filter(|s| s.is_active(Utc::now())))
}

/// Marks a session revoked. Revoking twice is a no-op.
pub async fn revoke_session(db: &DbConn, session_id: &str) -> Result<()> {
    let result = UserSessions::update_many()
        .col_expr(user_sessions::Column::RevokedAt, Expr::value(Utc::now()))
        .filter(user_sessions::Column::Id.eq(session_id))
        .filter(user_sessions::Column::RevokedAt.is_null())
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!(session_id = %session_id, "Session revoked");
    }
    Ok(())
}

/// Revokes every session of a user except `keep`, returning how many were revoked.
pub async fn revoke_other_sessions(db: &DbConn, user_id: &str, keep: &str) -> Result<u64> {
    let result = UserSessions::update_many()
        .col_expr(user_sessions::Column::RevokedAt, Expr::value(Utc::now()))
        .filter(user_sessions::Column::UserId.eq(user_id))
        .filter(user_sessions::Column::Id.ne(keep))
        .filter(user_sessions::Column::RevokedAt.is_null())
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!(user_id = %user_id, revoked = result.rows_affected, "Other sessions revoked");
    }
    Ok(result.rows_affected)
}
