// src/store/rest.rs
//
// Hosted backend-as-a-service: PostgREST for the `listings` table and a
// GoTrue-style password grant for sign-in. Blocking client, no retries.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::listing::{Listing, NewListing};
use crate::errors::ServerError;
use crate::store::{AuthenticatedUser, Authenticator, ListingStore};

#[derive(Clone)]
struct RestClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RestClient {
    fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
    }
}

fn send(req: RequestBuilder) -> Result<Response, ServerError> {
    let resp = req
        .send()
        .map_err(|e| ServerError::StoreError(format!("request failed: {e}")))?;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
    Err(ServerError::StoreError(format!("{status} - {body}")))
}

fn rows(resp: Response) -> Result<Vec<Listing>, ServerError> {
    let body = resp
        .text()
        .map_err(|e| ServerError::StoreError(format!("read body failed: {e}")))?;
    parse_rows(&body)
}

pub(crate) fn parse_rows(body: &str) -> Result<Vec<Listing>, ServerError> {
    serde_json::from_str(body)
        .map_err(|e| ServerError::StoreError(format!("unexpected listings payload: {e}")))
}

/// PostgREST filter value for an exact id match.
fn eq(id: &str) -> String {
    format!("eq.{id}")
}

fn neq(id: &str) -> String {
    format!("neq.{id}")
}

#[derive(Clone)]
pub struct RestListingStore {
    rest: RestClient,
}

impl RestListingStore {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            rest: RestClient::new(base_url, api_key),
        }
    }

    fn listings_url(&self) -> String {
        self.rest.url("/rest/v1/listings")
    }
}

impl ListingStore for RestListingStore {
    fn list(&self) -> Result<Vec<Listing>, ServerError> {
        let req = self
            .rest
            .client
            .get(self.listings_url())
            .query(&[("select", "*")]);
        rows(send(self.rest.authorized(req))?)
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Listing>, ServerError> {
        let req = self
            .rest
            .client
            .get(self.listings_url())
            .query(&[("select", "*".to_string()), ("id", eq(id))]);
        Ok(rows(send(self.rest.authorized(req))?)?.into_iter().next())
    }

    fn list_excluding(&self, id: &str, limit: usize) -> Result<Vec<Listing>, ServerError> {
        let req = self.rest.client.get(self.listings_url()).query(&[
            ("select", "*".to_string()),
            ("id", neq(id)),
            ("limit", limit.to_string()),
        ]);
        rows(send(self.rest.authorized(req))?)
    }

    fn insert(&self, listing: &NewListing) -> Result<Listing, ServerError> {
        let req = self
            .rest
            .client
            .post(self.listings_url())
            .header("Prefer", "return=representation")
            .json(&[listing]);

        let created = rows(send(self.rest.authorized(req))?)?;
        debug!(count = created.len(), "rest insert returned rows");
        created
            .into_iter()
            .next()
            .ok_or_else(|| ServerError::StoreError("insert returned no row".into()))
    }

    fn delete(&self, id: &str) -> Result<(), ServerError> {
        let req = self
            .rest
            .client
            .delete(self.listings_url())
            .header("Prefer", "return=representation")
            .query(&[("id", eq(id))]);

        let deleted = rows(send(self.rest.authorized(req))?)?;
        if deleted.is_empty() {
            return Err(ServerError::NotFound);
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    email: Option<String>,
}

/// Password sign-in against the hosted auth endpoint.
#[derive(Clone)]
pub struct RestAuthenticator {
    rest: RestClient,
}

impl RestAuthenticator {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            rest: RestClient::new(base_url, api_key),
        }
    }
}

impl Authenticator for RestAuthenticator {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, ServerError> {
        let req = self
            .rest
            .client
            .post(self.rest.url("/auth/v1/token"))
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant { email, password });

        let resp = self
            .rest
            .authorized(req)
            .send()
            .map_err(|e| ServerError::StoreError(format!("sign-in request failed: {e}")))?;

        match resp.status() {
            s if s.is_success() => {
                let token: TokenResponse = resp
                    .json()
                    .map_err(|e| ServerError::StoreError(format!("unexpected sign-in payload: {e}")))?;
                let email = token.user.email.unwrap_or_else(|| email.trim().to_lowercase());
                Ok(Some(AuthenticatedUser { email }))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                warn!(email = %email.trim(), "hosted sign-in rejected credentials");
                Ok(None)
            }
            status => {
                let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
                Err(ServerError::StoreError(format!("{status} - {body}")))
            }
        }
    }
}
