mod common;

use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use common::{TestApp, body_json, expired_token_for, json_request, location, request, token_for};
use hotel_admin::{
    RepositoryState,
    auth::{DEV_USER_HEADER, SESSION_COOKIE, Session, resolve_session},
    config::Env,
    models::{Role, SetupStatus},
    repository::Repository,
};
use uuid::Uuid;

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

fn cookie(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={token}")).unwrap(),
    );
    headers
}

// --- Session resolution ---

#[tokio::test]
async fn valid_bearer_token_resolves_principal_with_ordered_assignments() {
    let app = TestApp::new();
    let user = app
        .user_with(&[("biz_2", Role::Owner), ("biz_1", Role::Staff)])
        .await;
    let repo: RepositoryState = app.repo.clone();

    let session = resolve_session(&bearer(&token_for(user, None, &app.config)), &repo, &app.config).await;

    let principal = session.principal().expect("authenticated");
    assert_eq!(principal.user_id, user);
    let units: Vec<&str> = principal
        .assignments
        .iter()
        .map(|a| a.business_unit_id.as_str())
        .collect();
    assert_eq!(units, ["biz_2", "biz_1"]);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let app = TestApp::new();
    let user = app.user_with(&[]).await;
    let repo: RepositoryState = app.repo.clone();

    let session = resolve_session(&cookie(&token_for(user, None, &app.config)), &repo, &app.config).await;
    assert!(matches!(session, Session::Authenticated(p) if p.assignments.is_empty()));
}

#[tokio::test]
async fn bad_credentials_fail_closed() {
    let app = TestApp::new();
    let user = app.user_with(&[("biz_1", Role::Owner)]).await;
    let repo: RepositoryState = app.repo.clone();

    let mut wrong_secret = app.config.clone();
    wrong_secret.jwt_secret = "another-secret-entirely".to_string();

    let cases = [
        HeaderMap::new(),
        bearer("not-a-jwt"),
        bearer(&expired_token_for(user, &app.config)),
        bearer(&token_for(user, None, &wrong_secret)),
        // Signed correctly but for a profile that does not exist.
        bearer(&token_for(Uuid::new_v4(), None, &app.config)),
        cookie(""),
    ];
    for headers in cases {
        let session = resolve_session(&headers, &repo, &app.config).await;
        assert_eq!(session, Session::Unauthenticated, "{headers:?}");
    }
}

#[tokio::test]
async fn dev_header_only_works_locally() {
    let app = TestApp::new();
    let user = app.user_with(&[]).await;
    let repo: RepositoryState = app.repo.clone();

    let mut headers = HeaderMap::new();
    headers.insert(DEV_USER_HEADER, HeaderValue::from_str(&user.to_string()).unwrap());

    let local = resolve_session(&headers, &repo, &app.config).await;
    assert!(local.principal().is_some());

    let mut production = app.config.clone();
    production.env = Env::Production;
    let prod = resolve_session(&headers, &repo, &production).await;
    assert_eq!(prod, Session::Unauthenticated);
}

// --- Sign-in flow ---

#[tokio::test]
async fn sign_in_sets_cookie_and_mirrors_profile() {
    let app = TestApp::new();
    let user = Uuid::new_v4();
    let token = token_for(user, Some("new@hotel.test"), &app.config);

    let response = app
        .send(json_request("POST", "/auth/sign-in", None, serde_json::json!({ "token": token })))
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}={token}")));
    assert!(set_cookie.contains("HttpOnly"));

    let profile = app.repo.get_user(user).await.unwrap().unwrap();
    assert_eq!(profile.email, "new@hotel.test");

    // The freshly mirrored user has no unit yet, so `/` leads to setup.
    let response = app.send(request("GET", "/", Some(user))).await;
    assert_eq!(location(&response), Some("/setup"));
}

#[tokio::test]
async fn sign_in_rejects_invalid_token() {
    let app = TestApp::new();
    let response = app
        .send(json_request("POST", "/auth/sign-in", None, serde_json::json!({ "token": "garbage" })))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_in_without_email_for_new_profile_is_rejected() {
    let app = TestApp::new();
    let token = token_for(Uuid::new_v4(), None, &app.config);
    let response = app
        .send(json_request("POST", "/auth/sign-in", None, serde_json::json!({ "token": token })))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn sign_out_clears_cookie() {
    let app = TestApp::new();
    let user = app.user_with(&[("biz_1", Role::Owner)]).await;

    let response = app.send(request("POST", "/sign-out", Some(user))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/sign-in"));
    let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn cookie_session_reaches_setup_status() {
    let app = TestApp::new();
    let user = app.user_with(&[("biz_1", Role::Manager)]).await;
    let token = token_for(user, None, &app.config);

    let mut req = request("GET", "/setup", None);
    req.headers_mut().insert(
        header::COOKIE,
        HeaderValue::from_str(&format!("{SESSION_COOKIE}={token}")).unwrap(),
    );
    let response = app.send(req).await;
    assert_eq!(response.status(), StatusCode::OK);

    let status: SetupStatus = body_json(response).await;
    assert_eq!(status.user_id, user);
    assert_eq!(status.assignment_count, 1);
    assert_eq!(status.default_business_unit.map(|b| b.to_string()), Some("biz_1".to_string()));
}
