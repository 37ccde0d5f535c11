use crate::router::handle;
use crate::tests::utils::{
    body_string, get, get_with_session, init_test_db, seed_listing, sign_in, state_with_store,
    test_state, UnreachableStore,
};

#[test]
fn home_page_lists_listings_and_stats() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    seed_listing(&state.db, "Garden House", "Suburb", 250_000.0);
    seed_listing(&state.db, "Sky Flat", "Downtown", 400_000.0);

    let resp = handle(get("/"), &state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Featured Properties"));
    assert!(body.contains("Harbor Loft"));
    assert!(body.contains("Garden House"));
    assert!(body.contains("3+"));
    assert!(body.contains("$250,000"));
}

#[test]
fn home_search_narrows_featured_listings() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    seed_listing(&state.db, "Garden House", "Suburb", 250_000.0);

    let body = body_string(handle(get("/?location=downtown"), &state).unwrap());
    assert!(body.contains("Harbor Loft"));
    assert!(!body.contains("Garden House"));
}

#[test]
fn properties_filters_by_price_and_counts() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    seed_listing(&state.db, "Garden House", "Suburb", 250_000.0);
    seed_listing(&state.db, "Sky Flat", "Downtown", 400_000.0);

    let resp = handle(
        get("/properties?min_price=150000&max_price=500000&sort=price-high"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Showing <strong>2</strong> of <strong>3</strong> properties"));
    assert!(!body.contains("Harbor Loft"));

    let sky = body.find("Sky Flat").expect("Sky Flat missing");
    let garden = body.find("Garden House").expect("Garden House missing");
    assert!(sky < garden, "price-high should list the 400k flat first");
}

#[test]
fn properties_shows_empty_state() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);

    let body = body_string(handle(get("/properties?q=castle"), &state).unwrap());
    assert!(body.contains("No properties found"));
    assert!(body.contains("Showing <strong>0</strong> of <strong>1</strong> properties"));
    assert!(body.contains("Try adjusting your search criteria or filters"));
}

#[test]
fn properties_list_view_renders_rows() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);

    let body = body_string(handle(get("/properties?view=list"), &state).unwrap());
    assert!(body.contains(r#"class="row""#));
    assert!(!body.contains(r#"class="card""#));
}

#[test]
fn listing_detail_shows_listing_and_related() {
    let state = test_state();
    let loft = seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    seed_listing(&state.db, "Garden House", "Suburb", 250_000.0);

    let resp = handle(get(&format!("/listing/{}", loft.id)), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Harbor Loft description"));
    assert!(body.contains("Similar Properties"));
    assert!(body.contains("Garden House"));
    assert!(body.contains(&format!("/listing/{}/inquiry", loft.id)));
}

#[test]
fn unknown_listing_renders_not_found_page() {
    let state = test_state();

    let resp = handle(get("/listing/does-not-exist"), &state).unwrap();
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Property Not Found"));
}

#[test]
fn store_outage_keeps_pages_up() {
    let state = state_with_store(init_test_db(), Box::new(UnreachableStore));

    let resp = handle(get("/properties"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Listings could not be loaded"));
    assert!(body.contains("No properties found"));
    assert!(body.contains("No properties are listed yet."));

    let err = handle(get("/listing/abc"), &state).unwrap_err();
    assert_eq!(err.status(), 502);
}

#[test]
fn about_page_and_stylesheet_are_served() {
    let state = test_state();

    let about = handle(get("/about"), &state).unwrap();
    assert_eq!(about.status(), 200);
    assert!(body_string(about).contains("Meet Our Team"));

    let css = handle(get("/static/main.css"), &state).unwrap();
    assert_eq!(css.status(), 200);
    assert_eq!(
        css.headers().get("content-type").unwrap(),
        "text/css; charset=utf-8"
    );
}

#[test]
fn unknown_route_is_not_found() {
    let state = test_state();
    let err = handle(get("/nowhere"), &state).unwrap_err();
    assert_eq!(err.status(), 404);
}

#[test]
fn nav_shows_signed_in_user() {
    let state = test_state();
    let token = sign_in(&state);

    let body = body_string(handle(get_with_session("/", &token), &state).unwrap());
    assert!(body.contains("admin@example.com"));
    assert!(body.contains("Sign out"));

    let anon = body_string(handle(get("/"), &state).unwrap());
    assert!(anon.contains(r#"href="/login""#));
}
