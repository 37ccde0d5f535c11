use crate::db::inquiries::count_inquiries;
use crate::router::handle;
use crate::tests::utils::{body_string, get, htmx_post_form, post_form, seed_listing, test_state};
use rusqlite::params;

const FULL_FORM: &str =
    "name=Ana+Diaz&email=ana%40example.com&phone=&subject=valuation&message=Please+call+me";

fn inquiry_count(state: &crate::router::AppState) -> i64 {
    state.db.with_conn(|conn| count_inquiries(conn)).unwrap()
}

#[test]
fn contact_page_has_blank_form() {
    let state = test_state();

    let resp = handle(get("/contact"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Send Us a Message"));
    assert!(body.contains(r#"hx-post="/contact""#));
    assert!(body.contains("Select a subject"));
}

#[test]
fn htmx_submission_returns_acknowledgment_partial() {
    let state = test_state();

    let resp = handle(htmx_post_form("/contact", FULL_FORM), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Message Sent!"));
    assert!(body.contains(r#"hx-get="/contact/form""#));
    assert!(body.contains("load delay:3s"));
    assert!(!body.contains("<!DOCTYPE html>"));
    assert_eq!(inquiry_count(&state), 1);
}

#[test]
fn plain_submission_renders_full_page() {
    let state = test_state();

    let resp = handle(post_form("/contact", FULL_FORM), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Message Sent!"));
}

#[test]
fn missing_fields_are_rejected_before_storing() {
    let state = test_state();

    let resp = handle(
        htmx_post_form("/contact", "name=Ana&email=&subject=&message=Hi"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("missing required fields: email, subject"));
    assert!(body.contains(r#"value="Ana""#));
    assert_eq!(inquiry_count(&state), 0);

    let plain = handle(post_form("/contact", "name=Ana"), &state).unwrap();
    assert_eq!(plain.status(), 400);
}

#[test]
fn blank_form_partial_is_served_for_reset() {
    let state = test_state();

    let resp = handle(get("/contact/form"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<form"));
    assert!(!body.contains("<!DOCTYPE html>"));
}

#[test]
fn listing_inquiry_is_stored_against_listing() {
    let state = test_state();
    let loft = seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    let uri = format!("/listing/{}/inquiry", loft.id);

    let resp = handle(
        htmx_post_form(&uri, "name=Ana&email=ana%40example.com&message=Still+available%3F"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains(&format!(r#"hx-get="{uri}""#)));

    let stored: (Option<String>, Option<String>) = state
        .db
        .with_conn(|conn| {
            conn.query_row(
                "select listing_id, subject from inquiries where email = ?",
                params!["ana@example.com"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| crate::errors::ServerError::DbError(e.to_string()))
        })
        .unwrap();
    assert_eq!(stored, (Some(loft.id.clone()), None));

    let reset = handle(get(&uri), &state).unwrap();
    assert!(body_string(reset).contains("Send Inquiry"));
}

#[test]
fn plain_listing_inquiry_rerenders_detail_page() {
    let state = test_state();
    let loft = seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);

    let resp = handle(
        post_form(&format!("/listing/{}/inquiry", loft.id), "name=Ana&message=Hi"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("Harbor Loft description"));
    assert!(body.contains("missing required fields: email"));
}

#[test]
fn inquiry_for_unknown_listing_is_not_stored() {
    let state = test_state();

    let resp = handle(
        htmx_post_form(
            "/listing/no-such-id/inquiry",
            "name=Ana&email=ana%40example.com&message=Still+available%3F",
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Property Not Found"));
    assert_eq!(inquiry_count(&state), 0);

    let plain = handle(
        post_form("/listing/no-such-id/inquiry", "name=Ana&email=ana%40example.com&message=Hi"),
        &state,
    )
    .unwrap();
    assert_eq!(plain.status(), 404);
    assert_eq!(inquiry_count(&state), 0);
}

#[test]
fn blank_inquiry_form_requires_existing_listing() {
    let state = test_state();

    let resp = handle(get("/listing/no-such-id/inquiry"), &state).unwrap();
    assert_eq!(resp.status(), 404);
    assert!(!body_string(resp).contains("Send Inquiry"));
}
