use crate::auth::{now_unix, sessions};
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, get_with_session, location, post_form, post_form_with_session, sign_in,
    test_state,
};

#[test]
fn login_page_loads_successfully() {
    let state = test_state();

    let resp = handle(get("/login"), &state).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Sign in"));
    assert!(body.contains(r#"name="password""#));
}

#[test]
fn admin_requires_session() {
    let state = test_state();

    for req in [
        get("/admin"),
        post_form("/admin/listings", "title=x"),
        post_form("/admin/listings/abc/delete", ""),
    ] {
        let resp = handle(req, &state).unwrap();
        assert_eq!(resp.status(), 302);
        assert_eq!(location(&resp), Some("/login"));
    }
}

#[test]
fn bogus_session_cookie_is_anonymous() {
    let state = test_state();
    let resp = handle(get_with_session("/admin", "not-a-real-token"), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), Some("/login"));
}

#[test]
fn login_sets_session_cookie_and_redirects() {
    let state = test_state();

    let resp = handle(
        post_form("/login", "email=Admin%40Example.com&password=correct+horse"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), Some("/admin"));

    let cookie = resp
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let token = cookie
        .split(';')
        .next()
        .and_then(|kv| kv.strip_prefix("session="))
        .unwrap();
    let user = state
        .db
        .with_conn(|conn| sessions::load_user_from_session(conn, token, now_unix()))
        .unwrap();
    assert_eq!(user.map(|u| u.email).as_deref(), Some("admin@example.com"));
}

#[test]
fn wrong_password_rerenders_with_401() {
    let state = test_state();

    let resp = handle(
        post_form("/login", "email=admin%40example.com&password=nope"),
        &state,
    )
    .unwrap();
    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("set-cookie").is_none());

    let body = body_string(resp);
    assert!(body.contains("Login failed"));
    assert!(body.contains(r#"value="admin@example.com""#));
}

#[test]
fn signed_in_user_skips_login_page() {
    let state = test_state();
    let token = sign_in(&state);

    let resp = handle(get_with_session("/login", &token), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), Some("/admin"));
}

#[test]
fn logout_revokes_session() {
    let state = test_state();
    let token = sign_in(&state);

    let admin = handle(get_with_session("/admin", &token), &state).unwrap();
    assert_eq!(admin.status(), 200);

    let resp = handle(post_form_with_session("/logout", "", &token), &state).unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), Some("/login"));
    let cleared = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let after = handle(get_with_session("/admin", &token), &state).unwrap();
    assert_eq!(after.status(), 302);
}
