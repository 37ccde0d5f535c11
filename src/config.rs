//! Application configuration: bind address, database, record store backend, admin seed.

use serde::Deserialize;

use crate::auth::sessions::DEFAULT_SESSION_TTL_SECS;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_PATH: &str = "realty.sqlite3";
pub const DEFAULT_MAX_WORKERS: usize = 8;
pub const DEFAULT_CONTACT_RESET_SECS: u64 = 3;
pub const DEFAULT_RELATED_LIMIT: usize = 3;
pub const DEFAULT_SITE_NAME: &str = "MPR Real Estate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Rest,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Read from REALTY_BIND_ADDR.
    #[serde(default)]
    pub bind_addr: Option<String>,

    #[serde(default)]
    pub max_workers: Option<usize>,

    /// SQLite file for sessions, admin accounts, inquiries (and listings with the sqlite backend).
    #[serde(default)]
    pub database_path: Option<String>,

    /// "sqlite" (default) or "rest". Read from REALTY_STORE_BACKEND.
    #[serde(default)]
    pub store_backend: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Hosted record store
    // ─────────────────────────────────────────────────────────────────────────
    /// Project URL, e.g. https://xyz.supabase.co. Read from REALTY_REST_URL.
    #[serde(default)]
    pub rest_url: Option<String>,

    /// API key sent as `apikey` and bearer token. Read from REALTY_REST_API_KEY.
    #[serde(default)]
    pub rest_api_key: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Admin
    // ─────────────────────────────────────────────────────────────────────────
    /// Seeded into the local admin table on startup when both are set.
    #[serde(default)]
    pub admin_email: Option<String>,

    #[serde(default)]
    pub admin_password: Option<String>,

    #[serde(default)]
    pub session_ttl_secs: Option<i64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Pages
    // ─────────────────────────────────────────────────────────────────────────
    /// How long the contact acknowledgment stays before the blank form returns.
    #[serde(default)]
    pub contact_reset_secs: Option<u64>,

    /// Number of "similar properties" on a listing page.
    #[serde(default)]
    pub related_limit: Option<usize>,

    #[serde(default)]
    pub site_name: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("REALTY"));
        if let Ok(path) = std::env::var("REALTY_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn bind_addr_or_default(&self) -> String {
        self.bind_addr
            .clone()
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
    }

    pub fn max_workers_or_default(&self) -> usize {
        self.max_workers
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_WORKERS)
    }

    pub fn database_path_or_default(&self) -> String {
        self.database_path
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string())
    }

    /// Unknown values fall back to sqlite.
    pub fn store_backend(&self) -> StoreBackend {
        match self.store_backend.as_deref().map(str::trim) {
            Some(b) if b.eq_ignore_ascii_case("rest") => StoreBackend::Rest,
            _ => StoreBackend::Sqlite,
        }
    }

    /// Returns (url, key) when the hosted store is fully configured.
    pub fn rest_credentials(&self) -> Option<(&str, &str)> {
        match (self.rest_url.as_deref(), self.rest_api_key.as_deref()) {
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty() => Some((url, key)),
            _ => None,
        }
    }

    pub fn admin_seed(&self) -> Option<(&str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(pw)) if !email.is_empty() && !pw.is_empty() => Some((email, pw)),
            _ => None,
        }
    }

    pub fn session_ttl_secs_or_default(&self) -> i64 {
        self.session_ttl_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_SECS)
    }

    pub fn contact_reset_secs_or_default(&self) -> u64 {
        self.contact_reset_secs
            .unwrap_or(DEFAULT_CONTACT_RESET_SECS)
    }

    pub fn related_limit_or_default(&self) -> usize {
        self.related_limit.unwrap_or(DEFAULT_RELATED_LIMIT)
    }

    pub fn site_name_or_default(&self) -> String {
        self.site_name
            .clone()
            .unwrap_or_else(|| DEFAULT_SITE_NAME.to_string())
    }
}
