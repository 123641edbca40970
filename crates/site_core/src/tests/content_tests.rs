use axum::{http::StatusCode, routing::get, Json, Router};
use tokio::net::TcpListener;

use super::*;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/")
}

#[tokio::test]
async fn fetches_and_parses_slider_content() {
    let router = Router::new().route(
        "/api/slider-content",
        get(|| async {
            Json(serde_json::json!([
                {
                    "id": 1,
                    "kind": "hero",
                    "title": "Welcome",
                    "description": "Hi",
                    "image": "/images/hero1.jpg",
                    "order": 1,
                    "enabled": true
                },
                {
                    "id": 2,
                    "kind": "hero",
                    "title": "Second",
                    "description": "Also hi",
                    "order": 2,
                    "enabled": true
                }
            ]))
        }),
    );
    let base = serve(router).await;

    let client = SiteClient::new(&base).expect("client");
    let slides = client.fetch_slider_content().await.expect("slides");
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].title, "Welcome");
    assert_eq!(slides[1].image, None);
    assert_eq!(slides[1].position, 2);
}

#[tokio::test]
async fn fetches_social_icons() {
    let router = Router::new().route(
        "/api/social-icons",
        get(|| async {
            Json(serde_json::json!([
                { "id": 1, "platform": "facebook", "url": "https://facebook.com/x", "enabled": true }
            ]))
        }),
    );
    let base = serve(router).await;

    let client = SiteClient::new(&base).expect("client");
    let icons = client.fetch_social_icons().await.expect("icons");
    assert_eq!(icons.len(), 1);
    assert_eq!(icons[0].platform, "facebook");
}

#[tokio::test]
async fn structured_error_bodies_surface_as_typed_exceptions() {
    let router = Router::new().route(
        "/api/slider-content",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "code": "not_found", "message": "endpoint not found" })),
            )
        }),
    );
    let base = serve(router).await;

    let client = SiteClient::new(&base).expect("client");
    let error = client.fetch_slider_content().await.expect_err("error");
    let exception = error
        .downcast_ref::<ApiException>()
        .expect("typed api exception");
    assert_eq!(exception.message, "endpoint not found");
}

#[tokio::test]
async fn server_errors_surface_as_errors() {
    let router = Router::new().route(
        "/api/slider-content",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = serve(router).await;

    let client = SiteClient::new(&base).expect("client");
    assert!(client.fetch_slider_content().await.is_err());
}

#[test]
fn rejects_a_malformed_base_url() {
    assert!(SiteClient::new("not a url").is_err());
}
