mod common;

use axum::http::StatusCode;
use common::{TestApp, location, request};
use hotel_admin::models::Role;
use uuid::Uuid;

// --- Anonymous ---

#[tokio::test]
async fn anonymous_admin_request_is_sent_to_sign_in() {
    let app = TestApp::new();
    let response = app.send(request("GET", "/biz_1/admin/faqs", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/sign-in"));
}

#[tokio::test]
async fn anonymous_sign_in_page_is_served() {
    let app = TestApp::new();
    let response = app.send(request("GET", "/auth/sign-in", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn anonymous_unknown_paths_and_lookalikes_are_sent_to_sign_in() {
    let app = TestApp::new();
    for path in ["/", "/setup", "/authors", "/nope", "/biz_1/admin/auth/sign-in"] {
        let response = app.send(request("GET", path, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/auth/sign-in"), "{path}");
    }
}

#[tokio::test]
async fn unknown_profile_is_treated_as_anonymous() {
    let app = TestApp::new();
    let response = app
        .send(request("GET", "/biz_1/admin", Some(Uuid::new_v4())))
        .await;
    assert_eq!(location(&response), Some("/auth/sign-in"));
}

#[tokio::test]
async fn health_bypasses_the_access_layer() {
    let app = TestApp::new();
    assert_eq!(app.send(request("GET", "/health", None)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_docs_require_a_session() {
    let app = TestApp::new();

    let response = app.send(request("GET", "/api-docs/openapi.json", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/auth/sign-in"));

    let user = app.user_with(&[]).await;
    let response = app
        .send(request("GET", "/api-docs/openapi.json", Some(user)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// --- Signed in ---

#[tokio::test]
async fn signed_in_user_on_auth_pages_goes_to_first_unit() {
    let app = TestApp::new();
    let user = app.user_with(&[("biz_1", Role::Owner)]).await;

    for path in ["/auth/sign-in", "/auth", "/auth/sign-up"] {
        let response = app.send(request("GET", path, Some(user))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), Some("/biz_1/admin"), "{path}");
    }
}

#[tokio::test]
async fn signed_in_user_without_units_goes_to_setup() {
    let app = TestApp::new();
    let user = app.user_with(&[]).await;

    let response = app.send(request("GET", "/auth/sign-in", Some(user))).await;
    assert_eq!(location(&response), Some("/setup"));

    let response = app.send(request("GET", "/setup", Some(user))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn signed_in_admin_request_passes_through() {
    let app = TestApp::new();
    let user = app.user_with(&[("biz_1", Role::Staff)]).await;

    let response = app.send(request("GET", "/biz_1/admin/faqs", Some(user))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn default_unit_follows_assignment_order() {
    let app = TestApp::new();
    let user = app
        .user_with(&[("biz_2", Role::Staff), ("biz_1", Role::Owner)])
        .await;

    let response = app.send(request("GET", "/auth/sign-in", Some(user))).await;
    assert_eq!(location(&response), Some("/biz_2/admin"));

    let response = app.send(request("GET", "/", Some(user))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/biz_2/admin"));
}

#[tokio::test]
async fn root_without_units_goes_to_setup() {
    let app = TestApp::new();
    let user = app.user_with(&[]).await;

    let response = app.send(request("GET", "/", Some(user))).await;
    assert_eq!(location(&response), Some("/setup"));
}

#[tokio::test]
async fn signed_in_unknown_path_is_not_found() {
    let app = TestApp::new();
    let user = app.user_with(&[("biz_1", Role::Owner)]).await;

    let response = app.send(request("GET", "/nope", Some(user))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn following_redirects_never_loops() {
    let app = TestApp::new();
    let users = [
        None,
        Some(app.user_with(&[]).await),
        Some(app.user_with(&[("biz_1", Role::Manager)]).await),
    ];

    for user in users {
        let mut path = "/auth/sign-in".to_string();
        let mut hops = 0;
        loop {
            let response = app.send(request("GET", &path, user)).await;
            match location(&response) {
                Some(next) if response.status() == StatusCode::SEE_OTHER => {
                    path = next.to_string();
                    hops += 1;
                    assert!(hops <= 2, "redirect chain too long for {user:?}: at {path}");
                }
                _ => break,
            }
        }
    }
}

// --- Tenant scope ---

#[tokio::test]
async fn foreign_business_unit_is_not_found() {
    let app = TestApp::new();
    // biz_2 exists, it just is not ours.
    app.user_with(&[("biz_2", Role::Owner)]).await;
    let user = app.user_with(&[("biz_1", Role::Owner)]).await;

    let response = app.send(request("GET", "/biz_2/admin", Some(user))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.send(request("GET", "/biz_404/admin/rooms", Some(user))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
