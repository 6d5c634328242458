use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use chrono::Utc;
use manabi_core::model::Principal;
use manabi_core::time::fixed_clock;
use manabi_core::Catalog;
use services::{FixedCredentials, ProgressService};
use storage::InMemoryProgressStore;
use web::{AppState, SessionSigner, build_router};

const TEST_SECRET: &str = "test-secret";

struct Fixture {
    router: Router,
    signer: SessionSigner,
    // Held so the lessons dir outlives the requests.
    _lessons: TempDir,
}

fn fixture() -> Fixture {
    let lessons = TempDir::new().unwrap();
    std::fs::write(
        lessons.path().join("python-01.md"),
        "# 変数とデータ型\n\n基本のレッスンです。\n",
    )
    .unwrap();

    let state = AppState {
        catalog: Arc::new(Catalog::builtin()),
        progress: Arc::new(ProgressService::new(
            fixed_clock(),
            Arc::new(InMemoryProgressStore::new()),
        )),
        credentials: Arc::new(FixedCredentials::builtin()),
        sessions: Arc::new(SessionSigner::new(TEST_SECRET)),
        lessons_dir: PathBuf::from(lessons.path()),
    };
    Fixture {
        router: build_router(state),
        signer: SessionSigner::new(TEST_SECRET),
        _lessons: lessons,
    }
}

fn session_cookie(signer: &SessionSigner) -> String {
    let principal = Principal::new("user@example.com", "受講生");
    // Issued against the wall clock; token validation checks real expiry.
    let token = signer.issue(&principal, Utc::now());
    format!("manabi_session={token}")
}

async fn get(router: &Router, path: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_signed_in(fixture: &Fixture, path: &str) -> (StatusCode, String) {
    let response = fixture
        .router
        .clone()
        .oneshot(
            Request::get(path)
                .header(COOKIE, session_cookie(&fixture.signer))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_json(
    fixture: &Fixture,
    path: &str,
    body: Value,
    signed_in: bool,
) -> (StatusCode, Value) {
    let mut request = Request::post(path).header(CONTENT_TYPE, "application/json");
    if signed_in {
        request = request.header(COOKIE, session_cookie(&fixture.signer));
    }
    let response = fixture
        .router
        .clone()
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

//
// ─── PAGES ─────────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn public_pages_render() {
    let fx = fixture();
    for path in [
        "/",
        "/roadmap",
        "/lessons",
        "/projects",
        "/phase2",
        "/portfolio",
        "/faq",
        "/common-mistakes",
        "/code-examples",
        "/search?q=flask",
        "/login",
    ] {
        let (status, body) = get(&fx.router, path).await;
        assert_eq!(status, StatusCode::OK, "path {path}");
        assert!(body.contains("<!DOCTYPE html>"), "path {path}");
    }
}

#[tokio::test]
async fn every_catalog_lesson_has_a_detail_page() {
    let fx = fixture();
    for lesson in Catalog::builtin().lessons() {
        let (status, _) = get(&fx.router, &format!("/lessons/{}", lesson.id)).await;
        assert_eq!(status, StatusCode::OK, "lesson {}", lesson.id);
    }
    let (status, body) = get(&fx.router, "/lessons/python-99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("ページが見つかりません"));
}

#[tokio::test]
async fn lesson_body_is_rendered_from_disk() {
    let fx = fixture();
    let (_, body) = get(&fx.router, "/lessons/python-01").await;
    assert!(body.contains("<h1>変数とデータ型</h1>"));

    // No file on disk for this one.
    let (_, body) = get(&fx.router, "/lessons/python-02").await;
    assert!(body.contains("Markdownファイルが見つかりませんでした"));
}

#[tokio::test]
async fn unknown_routes_render_the_styled_404() {
    let fx = fixture();
    let (status, body) = get(&fx.router, "/nope/nothing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("<!DOCTYPE html>"));
}

#[tokio::test]
async fn empty_search_shows_no_results_but_code_examples_show_all() {
    let fx = fixture();
    let (_, body) = get(&fx.router, "/search?q=").await;
    assert!(body.contains("該当する結果はありません"));

    let (_, body) = get(&fx.router, "/code-examples").await;
    let catalog = Catalog::builtin();
    for example in catalog.examples() {
        assert!(body.contains(example.title), "example {}", example.id);
    }
}

//
// ─── SESSION GATE ──────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn gated_pages_redirect_anonymous_visitors() {
    let fx = fixture();
    for path in ["/dashboard", "/favorites"] {
        let response = fx
            .router
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
        let location = response.headers()["location"].to_str().unwrap();
        assert_eq!(location, format!("/login?next={path}"));
    }
}

#[tokio::test]
async fn login_round_trip_sets_a_session_cookie() {
    let fx = fixture();
    let response = fx
        .router
        .clone()
        .oneshot(
            Request::post("/login?next=/dashboard")
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("email=USER%40example.com&password=testpass"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/dashboard");

    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("manabi_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn bad_credentials_get_one_generic_message() {
    let fx = fixture();
    for body in [
        "email=nobody%40example.com&password=testpass",
        "email=user%40example.com&password=wrong",
    ] {
        let response = fx
            .router
            .clone()
            .oneshot(
                Request::post("/login")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("メールアドレスまたはパスワードが正しくありません"));
    }
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let fx = fixture();
    let response = fx
        .router
        .clone()
        .oneshot(Request::get("/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(
        response.headers()[SET_COOKIE]
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );
}

#[tokio::test]
async fn dashboard_records_todays_study_date() {
    let fx = fixture();
    let (status, body) = get_signed_in(&fx, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    // First visit on the fixed day starts a one-day streak.
    assert!(body.contains("連続学習 1日"));

    let (_, body) = get_signed_in(&fx, "/dashboard").await;
    assert!(body.contains("連続学習 1日"));
}

//
// ─── JSON API ──────────────────────────────────────────────────────────────────
//

#[tokio::test]
async fn api_requires_a_session() {
    let fx = fixture();
    for path in [
        "/api/progress/toggle",
        "/api/favorites/toggle",
        "/api/notes/save",
    ] {
        let (status, body) = post_json(
            &fx,
            path,
            json!({"item_id": "python-01", "kind": "lesson"}),
            false,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "path {path}");
        assert_eq!(body, json!({"ok": false, "error": "auth_required"}));
    }
}

#[tokio::test]
async fn toggling_twice_restores_the_original_state() {
    let fx = fixture();
    let payload = json!({"item_id": "python-01", "kind": "lesson"});

    let (status, body) = post_json(&fx, "/api/progress/toggle", payload.clone(), true).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ok": true, "completed": true}));

    let (_, body) = post_json(&fx, "/api/progress/toggle", payload, true).await;
    assert_eq!(body, json!({"ok": true, "completed": false}));
}

#[tokio::test]
async fn invalid_kind_is_rejected_without_a_write() {
    let fx = fixture();
    let (status, body) = post_json(
        &fx,
        "/api/progress/toggle",
        json!({"item_id": "python-01", "kind": "bookmark"}),
        true,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"ok": false, "error": "invalid_parameters"}));

    // Tasks can be completed but not favorited.
    let (status, _) = post_json(
        &fx,
        "/api/favorites/toggle",
        json!({"item_id": "task-responsive", "kind": "task"}),
        true,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was persisted for the rejected calls.
    let (_, page) = get_signed_in(&fx, "/lessons/python-01").await;
    assert!(!page.contains("✅"));
}

#[tokio::test]
async fn malformed_bodies_are_our_error_shape_not_a_framework_rejection() {
    let fx = fixture();
    for payload in [json!({}), json!({"item_id": "", "kind": "lesson"}), json!(42)] {
        let (status, body) = post_json(&fx, "/api/progress/toggle", payload, true).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"ok": false, "error": "invalid_parameters"}));
    }
}

#[tokio::test]
async fn unparsable_json_gets_the_structured_error_too() {
    let fx = fixture();
    for path in [
        "/api/progress/toggle",
        "/api/favorites/toggle",
        "/api/notes/save",
    ] {
        let response = fx
            .router
            .clone()
            .oneshot(
                Request::post(path)
                    .header(CONTENT_TYPE, "application/json")
                    .header(COOKIE, session_cookie(&fx.signer))
                    .body(Body::from("{not valid json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "path {path}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"ok": false, "error": "invalid_parameters"}));
    }
}

#[tokio::test]
async fn favorites_and_notes_flow_shows_up_on_pages() {
    let fx = fixture();
    let (_, body) = post_json(
        &fx,
        "/api/favorites/toggle",
        json!({"item_id": "python-01", "kind": "lesson"}),
        true,
    )
    .await;
    assert_eq!(body, json!({"ok": true, "is_favorite": true}));

    let (_, body) = post_json(
        &fx,
        "/api/notes/save",
        json!({"item_id": "python-01", "kind": "lesson", "note": "復習する"}),
        true,
    )
    .await;
    assert_eq!(body, json!({"ok": true}));

    let (_, page) = get_signed_in(&fx, "/favorites").await;
    assert!(page.contains("/lessons/python-01"));

    let (_, page) = get_signed_in(&fx, "/lessons/python-01").await;
    assert!(page.contains("復習する"));

    // A whitespace note clears the stored one.
    post_json(
        &fx,
        "/api/notes/save",
        json!({"item_id": "python-01", "kind": "lesson", "note": "   "}),
        true,
    )
    .await;
    let (_, page) = get_signed_in(&fx, "/lessons/python-01").await;
    assert!(!page.contains("復習する"));
}
