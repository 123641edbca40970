use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use tower::ServiceExt;

use super::*;

const BOUNDARY: &str = "pondlike-test-boundary";

async fn test_app() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Storage::open(dir.path()).await.expect("storage");
    let api = ApiContext {
        storage,
        auth: AuthConfig {
            jwt_secret: "route-test-secret".to_string(),
            token_ttl_seconds: 3600,
        },
    };
    server_api::seed_admin(&api, "admin", "password").await.expect("seed");
    let app = build_router(
        Arc::new(AppState { api }),
        dir.path().to_str().expect("utf8 path"),
    );
    (app, dir)
}

async fn login_token(app: &Router) -> String {
    let request = Request::post("/api/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "username": "admin", "password": "password" }).to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("login response");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let login: LoginResponse = serde_json::from_slice(&body).expect("login json");
    login.token
}

fn text_part(name: &str, value: &str) -> String {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
}

fn file_part(name: &str, filename: &str, mime: &str, bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

fn multipart_request(uri: &str, method: &str, token: &str, parts: Vec<Vec<u8>>) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(&part);
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn healthz_responds() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let (app, _dir) = test_app().await;
    let request = Request::post("/api/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "username": "admin", "password": "wrong" }).to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutations_require_a_bearer_token() {
    let (app, _dir) = test_app().await;
    let request = Request::post("/api/social-icons")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "platform": "tiktok", "url": "https://tiktok.com/x" }).to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn social_icon_crud_over_http() {
    let (app, _dir) = test_app().await;
    let token = login_token(&app).await;

    let create = Request::post("/api/social-icons")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(
            serde_json::json!({ "platform": "tiktok", "url": "https://tiktok.com/@pondlike" })
                .to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(create).await.expect("create");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let created: SocialIconRecord = serde_json::from_slice(&body).expect("icon json");
    assert!(created.enabled);

    let update = Request::builder()
        .method("PUT")
        .uri(format!("/api/social-icons/{}", created.id.0))
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(
            serde_json::json!({ "enabled": false }).to_string(),
        ))
        .expect("request");
    let response = app.clone().oneshot(update).await.expect("update");
    assert_eq!(response.status(), StatusCode::OK);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/social-icons/{}", created.id.0))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    let response = app.clone().oneshot(delete).await.expect("delete");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let delete_again = Request::builder()
        .method("DELETE")
        .uri(format!("/api/social-icons/{}", created.id.0))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(delete_again).await.expect("delete again");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn slide_created_from_multipart_form_lands_in_order() {
    let (app, _dir) = test_app().await;
    let token = login_token(&app).await;

    let request = multipart_request(
        "/api/slider-content",
        "POST",
        &token,
        vec![
            text_part("kind", "hero").into_bytes(),
            text_part("title", "Fresh Arrivals").into_bytes(),
            text_part("description", "New this week").into_bytes(),
            text_part("order", "0").into_bytes(),
        ],
    );
    let response = app.clone().oneshot(request).await.expect("create");
    assert_eq!(response.status(), StatusCode::OK);

    let listing = app
        .oneshot(
            Request::get("/api/slider-content")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("listing");
    let body = to_bytes(listing.into_body(), usize::MAX).await.expect("body");
    let slides: Vec<SlideRecord> = serde_json::from_slice(&body).expect("slides json");
    assert_eq!(slides.len(), 4);
    assert_eq!(slides[0].title, "Fresh Arrivals");
}

#[tokio::test]
async fn disabled_slides_are_admin_only() {
    let (app, _dir) = test_app().await;
    let token = login_token(&app).await;

    let disable = multipart_request(
        "/api/slider-content/1",
        "PUT",
        &token,
        vec![text_part("enabled", "false").into_bytes()],
    );
    let response = app.clone().oneshot(disable).await.expect("disable");
    assert_eq!(response.status(), StatusCode::OK);

    let public = app
        .clone()
        .oneshot(
            Request::get("/api/slider-content")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("public listing");
    let body = to_bytes(public.into_body(), usize::MAX).await.expect("body");
    let slides: Vec<SlideRecord> = serde_json::from_slice(&body).expect("slides json");
    assert_eq!(slides.len(), 2);

    let admin = app
        .oneshot(
            Request::get("/api/slider-content/admin")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("admin listing");
    let body = to_bytes(admin.into_body(), usize::MAX).await.expect("body");
    let slides: Vec<SlideRecord> = serde_json::from_slice(&body).expect("slides json");
    assert_eq!(slides.len(), 3);
}

#[tokio::test]
async fn upload_stores_images_and_rejects_documents() {
    let (app, dir) = test_app().await;
    let token = login_token(&app).await;

    let accepted = multipart_request(
        "/api/upload",
        "POST",
        &token,
        vec![
            text_part("upload_type", "hero").into_bytes(),
            file_part("file", "banner.png", "image/png", b"png-bytes"),
        ],
    );
    let response = app.clone().oneshot(accepted).await.expect("upload");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let upload: UploadResponse = serde_json::from_slice(&body).expect("upload json");
    assert!(upload.url.starts_with("/uploads/hero/"));
    assert!(dir
        .path()
        .join("hero")
        .join(&upload.filename)
        .exists());

    let rejected = multipart_request(
        "/api/upload",
        "POST",
        &token,
        vec![file_part("file", "notes.txt", "text/plain", b"notes")],
    );
    let response = app.oneshot(rejected).await.expect("rejected upload");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_stats_require_and_honor_auth() {
    let (app, _dir) = test_app().await;

    let anonymous = app
        .clone()
        .oneshot(
            Request::get("/api/dashboard/stats")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("anonymous");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let token = login_token(&app).await;
    let authed = app
        .oneshot(
            Request::get("/api/dashboard/stats")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("authed");
    assert_eq!(authed.status(), StatusCode::OK);
    let body = to_bytes(authed.into_body(), usize::MAX).await.expect("body");
    let stats: DashboardStats = serde_json::from_slice(&body).expect("stats json");
    assert_eq!(stats.total_slides, 3);
    assert_eq!(stats.active_social_icons, 3);
}

#[tokio::test]
async fn embed_fragment_reflects_seeded_content() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(
            Request::get("/embed/slider?speed=8000&arrows=false")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("embed");
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let html = String::from_utf8(body.to_vec()).expect("utf8");
    assert_eq!(html.matches("class=\"slide active\"").count(), 1);
    assert!(html.contains("data-speed=\"8000\""));
    assert!(!html.contains("slider-nav"));
    assert!(html.contains("Welcome to Comfort &amp; Pondlike"));
}

#[tokio::test]
async fn unknown_routes_return_json_not_found() {
    let (app, _dir) = test_app().await;
    let response = app
        .oneshot(
            Request::get("/api/does-not-exist")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let error: ApiError = serde_json::from_slice(&body).expect("error json");
    assert!(matches!(error.code, ErrorCode::NotFound));
}
