use crate::auth::{now_unix, sessions, SessionUser};
use crate::config::{
    AppConfig, DEFAULT_CONTACT_RESET_SECS, DEFAULT_RELATED_LIMIT, DEFAULT_SITE_NAME,
};
use crate::db::{inquiries, Database};
use crate::domain::contact::{ContactForm, ContactState, FormKind};
use crate::domain::{Listing, ListingCatalog, ListingForm, ListingQuery};
use crate::errors::ServerError;
use crate::responses::{
    css_response, html_response, html_response_with_status, redirect, redirect_with_cookie,
    ResultResp, MAIN_CSS,
};
use crate::store::{Authenticator, ListingStore};
use crate::templates::components::{contact_form, contact_submitted, ContactFormVm, ViewMode};
use crate::templates::pages::{self, AdminVm, HomeVm, ListingVm, PropertiesVm};
use crate::templates::PageCtx;
use astra::Request;
use maud::Markup;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, error, info, warn};

/// Form bodies larger than this are rejected.
const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Everything a request handler may touch. Built once in `main`, shared by all workers.
pub struct AppState {
    /// Sessions, admin accounts, inquiries.
    pub db: Database,
    pub listings: Box<dyn ListingStore>,
    pub auth: Box<dyn Authenticator>,
    pub site_name: String,
    pub session_ttl_secs: i64,
    pub contact_reset_secs: u64,
    pub related_limit: usize,
}

impl AppState {
    pub fn new(db: Database, listings: Box<dyn ListingStore>, auth: Box<dyn Authenticator>) -> Self {
        Self {
            db,
            listings,
            auth,
            site_name: DEFAULT_SITE_NAME.to_string(),
            session_ttl_secs: sessions::DEFAULT_SESSION_TTL_SECS,
            contact_reset_secs: DEFAULT_CONTACT_RESET_SECS,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }

    pub fn with_config(mut self, cfg: &AppConfig) -> Self {
        self.site_name = cfg.site_name_or_default();
        self.session_ttl_secs = cfg.session_ttl_secs_or_default();
        self.contact_reset_secs = cfg.contact_reset_secs_or_default();
        self.related_limit = cfg.related_limit_or_default();
        self
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();

    let result = dispatch(req, state, &method, &path);
    if let Ok(resp) = &result {
        info!(%method, %path, status = resp.status().as_u16(), "request");
    }
    result
}

fn dispatch(req: Request, state: &AppState, method: &str, path: &str) -> ResultResp {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        ("GET", []) => home(&req, state),
        ("GET", ["properties"]) => properties(&req, state),
        ("GET", ["about"]) => {
            let user = current_user(&req, state)?;
            html_response(pages::about_page(&page_ctx(state, user.as_ref())))
        }

        ("GET", ["listing", id]) => listing_detail(&req, state, id),
        ("GET", ["listing", id, "inquiry"]) => inquiry_form(&req, state, id),
        ("POST", ["listing", id, "inquiry"]) => submit_inquiry(req, state, id),

        ("GET", ["contact"]) => contact(&req, state),
        ("GET", ["contact", "form"]) => html_response(blank_contact_form()),
        ("POST", ["contact"]) => submit_contact(req, state),

        ("GET", ["admin"]) => admin(&req, state),
        ("POST", ["admin", "listings"]) => admin_create(req, state),
        ("POST", ["admin", "listings", id, "delete"]) => admin_delete(&req, state, id),

        ("GET", ["login"]) => login_form(&req, state),
        ("POST", ["login"]) => login(req, state),
        ("POST", ["logout"]) => logout(&req, state),

        ("GET", ["static", "main.css"]) => css_response(MAIN_CSS),

        _ => Err(ServerError::NotFound),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Public pages
// ─────────────────────────────────────────────────────────────────────────────

fn home(req: &Request, state: &AppState) -> ResultResp {
    let user = current_user(req, state)?;
    let ctx = page_ctx(state, user.as_ref());

    let query = ListingQuery::from_params(&parse_query(req));
    let catalog = ListingCatalog::load(state.listings.as_ref());
    let featured = catalog.filter(&query.search, &query.location);

    html_response(pages::home_page(
        &ctx,
        &HomeVm {
            catalog: &catalog,
            query: &query,
            featured: &featured,
        },
    ))
}

fn properties(req: &Request, state: &AppState) -> ResultResp {
    let user = current_user(req, state)?;
    let ctx = page_ctx(state, user.as_ref());

    let params = parse_query(req);
    let query = ListingQuery::from_params(&params);
    let view = ViewMode::from_param(params.get("view").map(String::as_str));

    let catalog = ListingCatalog::load(state.listings.as_ref());
    let results = query.apply(&catalog);
    debug!(matched = results.len(), total = catalog.len(), "properties filtered");

    html_response(pages::properties_page(
        &ctx,
        &PropertiesVm {
            catalog: &catalog,
            query: &query,
            results: &results,
            view,
        },
    ))
}

fn listing_detail(req: &Request, state: &AppState, id: &str) -> ResultResp {
    let user = current_user(req, state)?;
    let ctx = page_ctx(state, user.as_ref());
    let Some(listing) = find_listing(state, id)? else {
        return html_response_with_status(404, pages::not_found_page(&ctx));
    };
    render_listing(state, &ctx, &listing, pages::blank_inquiry_form(id), 200)
}

/// `Ok(None)` for an unknown id; store failures propagate.
fn find_listing(state: &AppState, id: &str) -> Result<Option<Listing>, ServerError> {
    match state.listings.get_by_id(id) {
        Ok(Some(listing)) => Ok(Some(listing)),
        Ok(None) => {
            info!(%id, "listing not found");
            Ok(None)
        }
        Err(err) => {
            error!(%id, %err, "failed to load listing");
            Err(err)
        }
    }
}

/// Detail page with the given inquiry panel.
fn render_listing(
    state: &AppState,
    ctx: &PageCtx,
    listing: &Listing,
    inquiry: Markup,
    status: u16,
) -> ResultResp {
    let related = state
        .listings
        .list_excluding(&listing.id, state.related_limit)
        .unwrap_or_else(|err| {
            warn!(id = %listing.id, %err, "failed to load related listings");
            Vec::new()
        });

    html_response_with_status(
        status,
        pages::listing_page(
            ctx,
            &ListingVm {
                listing,
                related: &related,
                inquiry,
            },
        ),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Contact and inquiries
// ─────────────────────────────────────────────────────────────────────────────

fn contact(req: &Request, state: &AppState) -> ResultResp {
    let user = current_user(req, state)?;
    let ctx = page_ctx(state, user.as_ref());
    html_response(pages::contact_page(&ctx, blank_contact_form()))
}

fn blank_contact_form() -> Markup {
    contact_form(&ContactFormVm {
        kind: FormKind::General,
        action: "/contact",
        form: &ContactForm::default(),
        error: None,
    })
}

fn submit_contact(mut req: Request, state: &AppState) -> ResultResp {
    let htmx = is_htmx(&req);
    let pairs = read_form(&mut req)?;
    let outcome = record_inquiry(state, &pairs, FormKind::General, "/contact", "/contact/form", None)?;

    if htmx {
        return html_response(outcome.markup);
    }
    let user = current_user(&req, state)?;
    let ctx = page_ctx(state, user.as_ref());
    html_response_with_status(outcome.status, pages::contact_page(&ctx, outcome.markup))
}

/// Blank inquiry panel, swapped back in after the acknowledgment.
fn inquiry_form(req: &Request, state: &AppState, id: &str) -> ResultResp {
    if find_listing(state, id)?.is_none() {
        let user = current_user(req, state)?;
        return html_response_with_status(404, pages::not_found_page(&page_ctx(state, user.as_ref())));
    }
    html_response(pages::blank_inquiry_form(id))
}

fn submit_inquiry(mut req: Request, state: &AppState, id: &str) -> ResultResp {
    let htmx = is_htmx(&req);
    let user = current_user(&req, state)?;
    let ctx = page_ctx(state, user.as_ref());

    // Nothing is stored for a listing that does not exist.
    let Some(listing) = find_listing(state, id)? else {
        return html_response_with_status(404, pages::not_found_page(&ctx));
    };

    let pairs = read_form(&mut req)?;
    let url = pages::inquiry_form_url(id);
    let outcome = record_inquiry(state, &pairs, FormKind::ListingInquiry, &url, &url, Some(id))?;

    if htmx {
        return html_response(outcome.markup);
    }
    render_listing(state, &ctx, &listing, outcome.markup, outcome.status)
}

struct ContactOutcome {
    /// 400 when the form was rejected. htmx requests always get 200 so the swap happens.
    status: u16,
    markup: Markup,
}

/// Validate, store, acknowledge. A rejected form comes back filled in with the reason.
fn record_inquiry(
    state: &AppState,
    pairs: &[(String, String)],
    kind: FormKind,
    action: &str,
    reset_url: &str,
    listing_id: Option<&str>,
) -> Result<ContactOutcome, ServerError> {
    let form = ContactForm::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let submitting = match ContactState::Idle.begin(&form, kind) {
        Ok(next) => next,
        Err(err) => {
            info!(%err, ?kind, "contact form rejected");
            let message = err.to_string();
            return Ok(ContactOutcome {
                status: 400,
                markup: contact_form(&ContactFormVm {
                    kind,
                    action,
                    form: &form,
                    error: Some(&message),
                }),
            });
        }
    };

    let inquiry_id = state
        .db
        .with_conn(|conn| inquiries::insert_inquiry(conn, &form, listing_id, now_unix()))?;
    submitting
        .complete()
        .map_err(|_| ServerError::InternalError)?;
    info!(inquiry_id, listing_id = listing_id.unwrap_or("-"), "inquiry recorded");

    Ok(ContactOutcome {
        status: 200,
        markup: contact_submitted(reset_url, state.contact_reset_secs),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// Admin
// ─────────────────────────────────────────────────────────────────────────────

fn admin(req: &Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return redirect("/login");
    };
    let params = parse_query(req);
    let search = params.get("q").map(|s| s.trim()).unwrap_or_default();

    render_admin(state, &user, search, &ListingForm::default(), None, 200)
}

fn admin_create(mut req: Request, state: &AppState) -> ResultResp {
    let Some(user) = current_user(&req, state)? else {
        return redirect("/login");
    };
    let pairs = read_form(&mut req)?;
    let form = ListingForm::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let new_listing = match form.validate() {
        Ok(new_listing) => new_listing,
        Err(err) => {
            info!(%err, "listing form rejected");
            return render_admin(state, &user, "", &form, Some(err.to_string()), 400);
        }
    };

    match state.listings.insert(&new_listing) {
        Ok(created) => {
            info!(id = %created.id, title = %created.title, by = %user.email, "listing created");
            redirect("/admin")
        }
        Err(err) => {
            error!(%err, "failed to create listing");
            let message = format!("Could not save the listing: {err}");
            render_admin(state, &user, "", &form, Some(message), err.status())
        }
    }
}

fn admin_delete(req: &Request, state: &AppState, id: &str) -> ResultResp {
    let Some(user) = current_user(req, state)? else {
        return redirect("/login");
    };

    match state.listings.delete(id) {
        Ok(()) => {
            info!(%id, by = %user.email, "listing deleted");
            redirect("/admin")
        }
        Err(err) => {
            warn!(%id, %err, "failed to delete listing");
            let message = match err {
                ServerError::NotFound => "That listing no longer exists.".to_string(),
                ref other => format!("Could not delete the listing: {other}"),
            };
            render_admin(state, &user, "", &ListingForm::default(), Some(message), err.status())
        }
    }
}

fn render_admin(
    state: &AppState,
    user: &SessionUser,
    search: &str,
    form: &ListingForm,
    error: Option<String>,
    status: u16,
) -> ResultResp {
    let catalog = ListingCatalog::load(state.listings.as_ref());
    let listings = catalog.admin_search(search);
    let inquiries = state.db.with_conn(|conn| inquiries::count_inquiries(conn))?;
    let with_images = catalog.listings().iter().filter(|l| l.has_image()).count();

    let error = error.or_else(|| {
        catalog
            .last_error()
            .map(|e| format!("Listings could not be loaded: {e}"))
    });

    let ctx = page_ctx(state, Some(user));
    html_response_with_status(
        status,
        pages::admin_page(
            &ctx,
            &AdminVm {
                total: catalog.len(),
                locations: catalog.distinct_locations().len(),
                with_images,
                inquiries,
                search,
                listings: &listings,
                form,
                error: error.as_deref(),
            },
        ),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Sign in / out
// ─────────────────────────────────────────────────────────────────────────────

fn login_form(req: &Request, state: &AppState) -> ResultResp {
    if current_user(req, state)?.is_some() {
        return redirect("/admin");
    }
    html_response(pages::login_page(&page_ctx(state, None), "", None))
}

fn login(mut req: Request, state: &AppState) -> ResultResp {
    let pairs = read_form(&mut req)?;
    let field = |name: &str| {
        pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or_default()
    };
    let email = field("email").trim();
    let password = field("password");
    let ctx = page_ctx(state, None);

    match state.auth.authenticate(email, password) {
        Ok(Some(user)) => {
            let ttl = state.session_ttl_secs;
            let token = state
                .db
                .with_conn(|conn| sessions::create_session(conn, &user.email, now_unix(), ttl))?;
            info!(email = %user.email, "admin signed in");
            redirect_with_cookie("/admin", &sessions::session_cookie(&token, ttl))
        }
        Ok(None) => {
            warn!(%email, "login failed");
            html_response_with_status(401, pages::login_page(&ctx, email, Some("Login failed")))
        }
        Err(err) => {
            error!(%email, %err, "login check failed");
            html_response_with_status(
                err.status(),
                pages::login_page(&ctx, email, Some("Login failed: sign-in is unavailable right now")),
            )
        }
    }
}

fn logout(req: &Request, state: &AppState) -> ResultResp {
    if let Some(token) = cookie_value(req, sessions::SESSION_COOKIE) {
        state
            .db
            .with_conn(|conn| sessions::revoke_session(conn, token, now_unix()))?;
        info!("admin signed out");
    }
    redirect_with_cookie("/login", &sessions::cleared_session_cookie())
}

// ─────────────────────────────────────────────────────────────────────────────
// Request helpers
// ─────────────────────────────────────────────────────────────────────────────

fn page_ctx<'a>(state: &'a AppState, user: Option<&'a SessionUser>) -> PageCtx<'a> {
    PageCtx::new(&state.site_name, user)
}

fn current_user(req: &Request, state: &AppState) -> Result<Option<SessionUser>, ServerError> {
    let Some(token) = cookie_value(req, sessions::SESSION_COOKIE) else {
        return Ok(None);
    };
    if token.is_empty() {
        return Ok(None);
    }
    state
        .db
        .with_conn(|conn| sessions::load_user_from_session(conn, token, now_unix()))
}

fn cookie_value<'a>(req: &'a Request, name: &str) -> Option<&'a str> {
    req.headers()
        .get_all("cookie")
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

fn is_htmx(req: &Request) -> bool {
    req.headers()
        .get("hx-request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Decode an `application/x-www-form-urlencoded` body.
fn read_form(req: &mut Request) -> Result<Vec<(String, String)>, ServerError> {
    let mut raw = Vec::new();
    req.body_mut()
        .reader()
        .take(MAX_FORM_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("could not read form body: {e}")))?;

    if raw.len() as u64 > MAX_FORM_BYTES {
        return Err(ServerError::BadRequest("form body too large".into()));
    }

    Ok(url::form_urlencoded::parse(&raw).into_owned().collect())
}
