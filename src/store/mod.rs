//! Record store seam: where listings live and who may sign in.
//!
//! Pages only see these traits. `sqlite` keeps everything in the local
//! database; `rest` talks to a hosted PostgREST/GoTrue backend.

pub mod rest;
pub mod sqlite;

use crate::domain::listing::{Listing, NewListing};
use crate::errors::ServerError;

pub use rest::{RestAuthenticator, RestListingStore};
pub use sqlite::{SqliteAuthenticator, SqliteListingStore};

pub trait ListingStore: Send + Sync {
    /// Every row. No pagination.
    fn list(&self) -> Result<Vec<Listing>, ServerError>;

    fn get_by_id(&self, id: &str) -> Result<Option<Listing>, ServerError>;

    /// Up to `limit` listings other than `id`.
    fn list_excluding(&self, id: &str, limit: usize) -> Result<Vec<Listing>, ServerError>;

    /// Returns the stored row with its store-assigned `id` and `created_at`.
    fn insert(&self, listing: &NewListing) -> Result<Listing, ServerError>;

    /// `Err(ServerError::NotFound)` when no row had that id.
    fn delete(&self, id: &str) -> Result<(), ServerError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

pub trait Authenticator: Send + Sync {
    /// `Ok(None)` for wrong credentials; `Err` only when the check itself failed.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, ServerError>;
}
