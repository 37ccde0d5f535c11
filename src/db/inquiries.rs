// src/db/inquiries.rs
use rusqlite::{params, Connection};

use crate::domain::contact::ContactForm;
use crate::errors::ServerError;

/// Record a contact-page message or a listing inquiry; returns the row id.
pub fn insert_inquiry(
    conn: &Connection,
    form: &ContactForm,
    listing_id: Option<&str>,
    now: i64,
) -> Result<i64, ServerError> {
    let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());

    conn.execute(
        r#"
        insert into inquiries (listing_id, name, email, phone, subject, message, created_at)
        values (?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            listing_id,
            form.name,
            form.email,
            opt(&form.phone),
            opt(&form.subject),
            form.message,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert inquiry failed: {e}")))?;

    Ok(conn.last_insert_rowid())
}

pub fn count_inquiries(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("select count(*) from inquiries", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count inquiries failed: {e}")))
}
