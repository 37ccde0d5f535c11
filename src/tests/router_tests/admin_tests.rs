use crate::domain::NewListing;
use crate::router::handle;
use crate::store::ListingStore;
use crate::tests::utils::{
    body_string, get_with_session, init_test_db, location, post_form_with_session, seed_listing,
    sign_in, state_with_store, test_state, UnreachableStore,
};

#[test]
fn admin_page_loads_for_authenticated_user() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    let token = sign_in(&state);

    let resp = handle(get_with_session("/admin", &token), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Admin Dashboard"));
    assert!(body.contains("Harbor Loft"));
    assert!(body.contains("Add New Property"));
    assert!(body.contains("Are you sure you want to delete this listing?"));
}

#[test]
fn stats_count_listings_with_images() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    state
        .listings
        .insert(&NewListing {
            title: "Garden House".into(),
            description: "Big garden".into(),
            location: "Suburb".into(),
            price: 250_000.0,
            image_url: Some("https://img.example.com/garden.jpg".into()),
        })
        .unwrap();
    let token = sign_in(&state);

    let body = body_string(handle(get_with_session("/admin", &token), &state).unwrap());
    assert!(body.contains(r#"<div class="number">2</div><div class="label">Total Properties</div>"#));
    assert!(body.contains(r#"<div class="number">1</div><div class="label">With Images</div>"#));
    assert!(body.contains(r#"<div class="label">Inquiries</div>"#));
}

#[test]
fn admin_search_matches_title_or_location() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    seed_listing(&state.db, "Garden House", "Suburb", 250_000.0);
    let token = sign_in(&state);

    let body = body_string(handle(get_with_session("/admin?q=suburb", &token), &state).unwrap());
    assert!(body.contains("Garden House"));
    assert!(!body.contains("Harbor Loft"));
}

#[test]
fn create_listing_redirects_and_persists() {
    let state = test_state();
    let token = sign_in(&state);

    let resp = handle(
        post_form_with_session(
            "/admin/listings",
            "title=Sea+Cottage&description=Two+rooms&location=Coast&price=320000&image_url=",
            &token,
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), Some("/admin"));

    let listings = state.listings.list().unwrap();
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].title, "Sea Cottage");
    assert_eq!(listings[0].price, 320_000.0);
    assert_eq!(listings[0].image_url, None);
}

#[test]
fn invalid_listing_keeps_form_and_skips_store() {
    let state = test_state();
    let token = sign_in(&state);

    let resp = handle(
        post_form_with_session(
            "/admin/listings",
            "title=Sea+Cottage&description=Two+rooms&location=Coast&price=-5",
            &token,
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 400);

    let body = body_string(resp);
    assert!(body.contains("price must be a non-negative number"));
    assert!(body.contains(r#"value="Sea Cottage""#));
    assert!(body.contains(r#"value="-5""#));
    assert!(state.listings.list().unwrap().is_empty());
}

#[test]
fn delete_listing_removes_it() {
    let state = test_state();
    let keep = seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    let gone = seed_listing(&state.db, "Garden House", "Suburb", 250_000.0);
    let token = sign_in(&state);

    let resp = handle(
        post_form_with_session(&format!("/admin/listings/{}/delete", gone.id), "", &token),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), Some("/admin"));

    let ids: Vec<String> = state.listings.list().unwrap().into_iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![keep.id]);
}

#[test]
fn deleting_missing_listing_reports_error() {
    let state = test_state();
    seed_listing(&state.db, "Harbor Loft", "Downtown", 100_000.0);
    let token = sign_in(&state);

    let resp = handle(
        post_form_with_session("/admin/listings/missing/delete", "", &token),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 404);

    let body = body_string(resp);
    assert!(body.contains("That listing no longer exists."));
    assert!(body.contains("Harbor Loft"));
    assert_eq!(state.listings.list().unwrap().len(), 1);
}

#[test]
fn create_failure_keeps_form_and_reports_store_error() {
    let state = state_with_store(init_test_db(), Box::new(UnreachableStore));
    let token = sign_in(&state);

    let resp = handle(
        post_form_with_session(
            "/admin/listings",
            "title=Sea+Cottage&description=Two+rooms&location=Coast&price=320000&image_url=",
            &token,
        ),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 502);

    let body = body_string(resp);
    assert!(body.contains("Could not save the listing"));
    assert!(body.contains(r#"value="Sea Cottage""#));
    assert!(body.contains(r#"value="Coast""#));
    assert!(body.contains(r#"value="320000""#));
}

#[test]
fn delete_failure_reports_store_error() {
    let state = state_with_store(init_test_db(), Box::new(UnreachableStore));
    let token = sign_in(&state);

    let resp = handle(
        post_form_with_session("/admin/listings/x/delete", "", &token),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("Could not delete the listing"));
}
