use crate::config::{AppConfig, StoreBackend};
use crate::db::connection::{init_db, Database};
use crate::router::{handle, AppState};
use crate::store::{
    Authenticator, ListingStore, RestAuthenticator, RestListingStore, SqliteAuthenticator,
    SqliteListingStore,
};
use astra::Server;
use std::net::SocketAddr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod auth;
mod config;
mod db;
mod domain;
mod errors;
mod responses;
mod router;
mod store;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Local database: sessions, admin accounts, inquiries, and listings for the sqlite backend.
    let db = Database::new(cfg.database_path_or_default());
    if let Err(e) = init_db(&db) {
        error!(error = %e, path = db.path(), "database initialization failed");
        std::process::exit(1);
    }

    let (listings, auth) = match build_stores(&cfg, &db) {
        Ok(stores) => stores,
        Err(msg) => {
            error!("{msg}");
            std::process::exit(1);
        }
    };

    let state = AppState::new(db, listings, auth).with_config(&cfg);

    let addr: SocketAddr = match cfg.bind_addr_or_default().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };
    let workers = cfg.max_workers_or_default();
    info!(%addr, workers, site = %state.site_name, "starting server");

    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}

type Stores = (Box<dyn ListingStore>, Box<dyn Authenticator>);

fn build_stores(cfg: &AppConfig, db: &Database) -> Result<Stores, String> {
    match cfg.store_backend() {
        StoreBackend::Rest => {
            let (url, key) = cfg
                .rest_credentials()
                .ok_or("store_backend is rest but REALTY_REST_URL / REALTY_REST_API_KEY are not set")?;
            info!(%url, "using hosted record store");
            if cfg.admin_seed().is_some() {
                warn!("admin_email/admin_password are ignored with the rest backend");
            }
            Ok((
                Box::new(RestListingStore::new(url, key)),
                Box::new(RestAuthenticator::new(url, key)),
            ))
        }
        StoreBackend::Sqlite => {
            let auth = SqliteAuthenticator::new(db.clone());
            if let Some((email, password)) = cfg.admin_seed() {
                auth.ensure_admin(email, password)
                    .map_err(|e| format!("could not seed admin account: {e}"))?;
                info!(%email, "admin account ready");
            }
            info!(path = db.path(), "using local record store");
            Ok((Box::new(SqliteListingStore::new(db.clone())), Box::new(auth)))
        }
    }
}
