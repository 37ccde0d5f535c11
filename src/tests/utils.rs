use crate::db::connection::{init_db, Database};
use crate::db::listings::insert_listing;
use crate::domain::listing::{Listing, NewListing};
use crate::errors::ServerError;
use crate::router::AppState;
use crate::store::{ListingStore, SqliteAuthenticator, SqliteListingStore};
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse";

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Fresh temp-file database with the production schema. Each call gets its own file.
pub fn init_test_db() -> Database {
    let n = NEXT_DB.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "realty_test_{}_{}.sqlite3",
        std::process::id(),
        n
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// App wired to the local store, with one admin account.
pub fn test_state() -> AppState {
    let db = init_test_db();
    state_with_store(db.clone(), Box::new(SqliteListingStore::new(db)))
}

/// Local sessions and admin account, listings from the given store.
pub fn state_with_store(db: Database, listings: Box<dyn ListingStore>) -> AppState {
    let auth = SqliteAuthenticator::new(db.clone());
    auth.ensure_admin(ADMIN_EMAIL, ADMIN_PASSWORD)
        .expect("Failed to seed admin");
    AppState::new(db, listings, Box::new(auth))
}

pub fn seed_listing(db: &Database, title: &str, location: &str, price: f64) -> Listing {
    let new = NewListing {
        title: title.into(),
        description: format!("{title} description"),
        location: location.into(),
        price,
        image_url: None,
    };
    db.with_conn(|conn| insert_listing(conn, &new))
        .expect("Failed to seed listing")
}

/// Signs in through the router and returns the raw session token.
pub fn sign_in(state: &AppState) -> String {
    let resp = crate::router::handle(
        post_form("/login", &format!("email={ADMIN_EMAIL}&password=correct+horse")),
        state,
    )
    .expect("Login failed");
    assert_eq!(resp.status(), 302);

    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .expect("no session cookie");
    cookie
        .split(';')
        .next()
        .and_then(|kv| kv.strip_prefix("session="))
        .expect("malformed session cookie")
        .to_string()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_session(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", format!("session={token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn post_form_with_session(uri: &str, body: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("Cookie", format!("session={token}"))
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn htmx_post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .header("HX-Request", "true")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> Option<&str> {
    resp.headers().get("location").and_then(|v| v.to_str().ok())
}

/// Record store that is always down.
pub struct UnreachableStore;

impl ListingStore for UnreachableStore {
    fn list(&self) -> Result<Vec<Listing>, ServerError> {
        Err(ServerError::StoreError("connection refused".into()))
    }

    fn get_by_id(&self, _id: &str) -> Result<Option<Listing>, ServerError> {
        Err(ServerError::StoreError("connection refused".into()))
    }

    fn list_excluding(&self, _id: &str, _limit: usize) -> Result<Vec<Listing>, ServerError> {
        Err(ServerError::StoreError("connection refused".into()))
    }

    fn insert(&self, _listing: &NewListing) -> Result<Listing, ServerError> {
        Err(ServerError::StoreError("connection refused".into()))
    }

    fn delete(&self, _id: &str) -> Result<(), ServerError> {
        Err(ServerError::StoreError("connection refused".into()))
    }
}
