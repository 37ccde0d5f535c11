use tracing::warn;

use crate::auth::{normalize_email, now_unix, password};
use crate::db::{auth as db_auth, listings as db_listings, Database};
use crate::domain::listing::{Listing, NewListing};
use crate::errors::ServerError;
use crate::store::{AuthenticatedUser, Authenticator, ListingStore};

#[derive(Clone)]
pub struct SqliteListingStore {
    db: Database,
}

impl SqliteListingStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl ListingStore for SqliteListingStore {
    fn list(&self) -> Result<Vec<Listing>, ServerError> {
        self.db.with_conn(|conn| db_listings::list_listings(conn))
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Listing>, ServerError> {
        self.db.with_conn(|conn| db_listings::get_listing(conn, id))
    }

    fn list_excluding(&self, id: &str, limit: usize) -> Result<Vec<Listing>, ServerError> {
        self.db
            .with_conn(|conn| db_listings::list_listings_excluding(conn, id, limit))
    }

    fn insert(&self, listing: &NewListing) -> Result<Listing, ServerError> {
        self.db
            .with_conn(|conn| db_listings::insert_listing(conn, listing))
    }

    fn delete(&self, id: &str) -> Result<(), ServerError> {
        self.db.with_conn(|conn| db_listings::delete_listing(conn, id))
    }
}

/// Checks credentials against the local `admin_users` table.
#[derive(Clone)]
pub struct SqliteAuthenticator {
    db: Database,
}

impl SqliteAuthenticator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create the account, or reset its password if it exists.
    pub fn ensure_admin(&self, email: &str, plain_password: &str) -> Result<i64, ServerError> {
        let email = normalize_email(email)?;
        if plain_password.is_empty() {
            return Err(ServerError::BadRequest("password must not be empty".into()));
        }
        let hash = password::hash_password(plain_password)?;
        self.db
            .with_conn(|conn| db_auth::upsert_admin_user(conn, &email, &hash, now_unix()))
    }
}

impl Authenticator for SqliteAuthenticator {
    fn authenticate(
        &self,
        email: &str,
        plain_password: &str,
    ) -> Result<Option<AuthenticatedUser>, ServerError> {
        let Ok(email) = normalize_email(email) else {
            return Ok(None);
        };

        self.db.with_conn(|conn| {
            let Some(user) = db_auth::find_admin_by_email(conn, &email)? else {
                warn!(%email, "login for unknown account");
                return Ok(None);
            };

            if !password::verify_password(plain_password, &user.password_hash) {
                warn!(%email, "login with wrong password");
                return Ok(None);
            }

            db_auth::touch_last_login(conn, user.id, now_unix())?;
            Ok(Some(AuthenticatedUser { email: user.email }))
        })
    }
}
