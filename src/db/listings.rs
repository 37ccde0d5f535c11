use crate::domain::listing::{Listing, NewListing};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension, Row};

const LISTING_COLUMNS: &str = "id, title, description, location, price, image_url, created_at";

fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<Listing> {
    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        location: row.get(3)?,
        price: row.get(4)?,
        image_url: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn collect(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> Result<Vec<Listing>, ServerError> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params, row_to_listing)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}

/// Whole table, insertion order. No pagination.
pub fn list_listings(conn: &Connection) -> Result<Vec<Listing>, ServerError> {
    collect(
        conn,
        &format!("select {LISTING_COLUMNS} from listings order by rowid"),
        [],
    )
}

pub fn get_listing(conn: &Connection, id: &str) -> Result<Option<Listing>, ServerError> {
    conn.query_row(
        &format!("select {LISTING_COLUMNS} from listings where id = ?"),
        params![id],
        row_to_listing,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select listing failed: {e}")))
}

/// Up to `limit` listings other than `id`, for the "similar properties" strip.
pub fn list_listings_excluding(
    conn: &Connection,
    id: &str,
    limit: usize,
) -> Result<Vec<Listing>, ServerError> {
    collect(
        conn,
        &format!("select {LISTING_COLUMNS} from listings where id <> ?1 order by rowid limit ?2"),
        params![id, limit as i64],
    )
}

/// Insert and return the stored row; the database fills in `id` and `created_at`.
pub fn insert_listing(conn: &Connection, new: &NewListing) -> Result<Listing, ServerError> {
    conn.query_row(
        &format!(
            "insert into listings (title, description, location, price, image_url)
             values (?1, ?2, ?3, ?4, ?5)
             returning {LISTING_COLUMNS}"
        ),
        params![
            new.title,
            new.description,
            new.location,
            new.price,
            new.image_url
        ],
        row_to_listing,
    )
    .map_err(|e| ServerError::DbError(format!("insert listing failed: {e}")))
}

/// Hard delete. Missing ids are reported as `NotFound` so callers can tell the user.
pub fn delete_listing(conn: &Connection, id: &str) -> Result<(), ServerError> {
    let deleted = conn
        .execute("delete from listings where id = ?", params![id])
        .map_err(|e| ServerError::DbError(format!("delete listing failed: {e}")))?;

    if deleted == 0 {
        return Err(ServerError::NotFound);
    }
    Ok(())
}
