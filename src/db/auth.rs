// src/db/auth.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

#[derive(Debug, Clone)]
pub struct AdminUserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub last_login_at: Option<i64>,
}

/// Insert or replace the password of an admin account; returns the user id.
/// Email should already be normalized by caller (trim/lowercase).
pub fn upsert_admin_user(
    conn: &Connection,
    email: &str,
    password_hash: &str,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into admin_users (email, password_hash, created_at) values (?, ?, ?)
         on conflict(email) do update set password_hash = excluded.password_hash",
        params![email, password_hash, now],
    )
    .map_err(|e| ServerError::DbError(format!("upsert admin user failed: {e}")))?;

    conn.query_row(
        "select id from admin_users where email = ?",
        params![email],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select admin id failed: {e}")))
}

pub fn find_admin_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<AdminUserRow>, ServerError> {
    conn.query_row(
        "select id, email, password_hash, last_login_at from admin_users where email = ?",
        params![email],
        |r| {
            Ok(AdminUserRow {
                id: r.get(0)?,
                email: r.get(1)?,
                password_hash: r.get(2)?,
                last_login_at: r.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select admin user failed: {e}")))
}

pub fn touch_last_login(conn: &Connection, user_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update admin_users set last_login_at = ? where id = ?",
        params![now, user_id],
    )
    .map_err(|e| ServerError::DbError(format!("update last_login_at failed: {e}")))?;
    Ok(())
}
