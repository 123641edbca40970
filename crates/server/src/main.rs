use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    routing::{get, post, put},
    Json, Router,
};
use server_api::{ApiContext, AuthConfig, MAX_UPLOAD_BYTES};
use shared::{
    domain::{AssetBucket, IconId, SlideId, SlideKind},
    error::{ApiError, ErrorCode},
    protocol::{
        DashboardStats, EndpointInfo, LoginRequest, LoginResponse, NewSocialIcon, ServiceInfo,
        SlideDraft, SlideRecord, SocialIconPatch, SocialIconRecord, UploadResponse,
    },
};
use storage::Storage;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;

mod config;
mod embed;

use config::load_settings;
use embed::EmbedOptions;

#[derive(Clone)]
struct AppState {
    api: ApiContext,
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

/// Multipart bodies carry their own framing overhead on top of the file cap.
const MAX_REQUEST_BYTES: usize = MAX_UPLOAD_BYTES + 1024 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let storage = Storage::open(&settings.upload_dir).await?;
    let api = ApiContext {
        storage,
        auth: AuthConfig {
            jwt_secret: settings.jwt_secret.clone(),
            token_ttl_seconds: settings.token_ttl_seconds,
        },
    };
    server_api::seed_admin(&api, &settings.admin_username, &settings.admin_password).await?;

    let upload_dir = settings.upload_dir.clone();
    let app = build_router(Arc::new(AppState { api }), &upload_dir);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "content service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, upload_dir: &str) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/healthz", get(healthz))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/social-icons", get(public_social_icons).post(create_social_icon))
        .route("/api/social-icons/admin", get(admin_social_icons))
        .route(
            "/api/social-icons/:id",
            put(update_social_icon).delete(delete_social_icon),
        )
        .route(
            "/api/slider-content",
            get(public_slider_content).post(create_slider_content),
        )
        .route("/api/slider-content/admin", get(admin_slider_content))
        .route(
            "/api/slider-content/:id",
            put(update_slider_content).delete(delete_slider_content),
        )
        .route("/api/upload", post(upload_file))
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/embed/slider", get(embed_slider))
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn service_info() -> Json<ServiceInfo> {
    let endpoint = |method: &str, path: &str| EndpointInfo {
        method: method.to_string(),
        path: path.to_string(),
    };
    Json(ServiceInfo {
        name: "Comfort & Pondlike Content Service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec![
            endpoint("POST", "/api/login"),
            endpoint("GET", "/api/social-icons"),
            endpoint("GET", "/api/slider-content"),
            endpoint("POST", "/api/upload"),
            endpoint("GET", "/api/dashboard/stats"),
            endpoint("GET", "/embed/slider"),
        ],
    })
}

async fn not_found() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(ErrorCode::NotFound, "endpoint not found")),
    )
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = server_api::login(&state.api, &req.username, &req.password)
        .await
        .map_err(reject)?;
    Ok(Json(response))
}

async fn logout() -> Json<serde_json::Value> {
    // Tokens are stateless; logout is an acknowledgement for the client.
    Json(serde_json::json!({ "message": "logout successful" }))
}

async fn public_social_icons(State(state): State<Arc<AppState>>) -> Json<Vec<SocialIconRecord>> {
    Json(server_api::list_social_icons(&state.api).await)
}

async fn admin_social_icons(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<SocialIconRecord>>> {
    require_auth(&state, &headers)?;
    Ok(Json(server_api::list_social_icons(&state.api).await))
}

async fn create_social_icon(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<NewSocialIcon>,
) -> ApiResult<Json<SocialIconRecord>> {
    require_auth(&state, &headers)?;
    let icon = server_api::add_social_icon(&state.api, req)
        .await
        .map_err(reject)?;
    Ok(Json(icon))
}

async fn update_social_icon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<SocialIconPatch>,
) -> ApiResult<Json<SocialIconRecord>> {
    require_auth(&state, &headers)?;
    let icon = server_api::update_social_icon(&state.api, IconId(id), req)
        .await
        .map_err(reject)?;
    Ok(Json(icon))
}

async fn delete_social_icon(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    require_auth(&state, &headers)?;
    server_api::delete_social_icon(&state.api, IconId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn public_slider_content(State(state): State<Arc<AppState>>) -> Json<Vec<SlideRecord>> {
    Json(server_api::list_slider_content(&state.api).await)
}

async fn admin_slider_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<SlideRecord>>> {
    require_auth(&state, &headers)?;
    Ok(Json(server_api::list_all_slider_content(&state.api).await))
}

async fn create_slider_content(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<SlideRecord>> {
    require_auth(&state, &headers)?;
    let draft = collect_slide_form(&state, multipart).await?;
    let slide = server_api::create_slide(&state.api, draft)
        .await
        .map_err(reject)?;
    Ok(Json(slide))
}

async fn update_slider_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    multipart: Multipart,
) -> ApiResult<Json<SlideRecord>> {
    require_auth(&state, &headers)?;
    let draft = collect_slide_form(&state, multipart).await?;
    let slide = server_api::update_slide(&state.api, SlideId(id), draft)
        .await
        .map_err(reject)?;
    Ok(Json(slide))
}

async fn delete_slider_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    require_auth(&state, &headers)?;
    server_api::delete_slide(&state.api, SlideId(id))
        .await
        .map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    require_auth(&state, &headers)?;

    let mut bucket = AssetBucket::Images;
    let mut file: Option<(Option<String>, String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "upload_type" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                bucket = AssetBucket::parse(&raw).ok_or_else(|| {
                    reject(ApiError::new(
                        ErrorCode::Validation,
                        format!("unknown upload type '{raw}'"),
                    ))
                })?;
            }
            "file" => {
                let filename = field.file_name().map(str::to_string);
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some((filename, mime_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let Some((filename, mime_type, bytes)) = file else {
        return Err(reject(ApiError::new(
            ErrorCode::Validation,
            "no file uploaded",
        )));
    };
    let response =
        server_api::store_upload(&state.api, bucket, filename.as_deref(), &mime_type, &bytes)
            .await
            .map_err(reject)?;
    Ok(Json(response))
}

async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<DashboardStats>> {
    require_auth(&state, &headers)?;
    Ok(Json(server_api::dashboard_stats(&state.api).await))
}

async fn embed_slider(
    State(state): State<Arc<AppState>>,
    Query(options): Query<EmbedOptions>,
) -> Html<String> {
    let slides = server_api::list_slider_content(&state.api).await;
    Html(embed::render_slider_fragment(&slides, &options))
}

/// Gather slide fields from a multipart form; an `image` part is stored as
/// an upload and its public URL lands on the draft.
async fn collect_slide_form(
    state: &Arc<AppState>,
    mut multipart: Multipart,
) -> Result<SlideDraft, (StatusCode, Json<ApiError>)> {
    let mut draft = SlideDraft::default();
    let mut bucket = AssetBucket::Images;
    let mut image: Option<(Option<String>, String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "kind" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                draft.kind = Some(SlideKind::parse(&raw).ok_or_else(|| {
                    reject(ApiError::new(
                        ErrorCode::Validation,
                        format!("unknown slide kind '{raw}'"),
                    ))
                })?);
            }
            "title" => draft.title = Some(field.text().await.map_err(bad_multipart)?),
            "description" => draft.description = Some(field.text().await.map_err(bad_multipart)?),
            "order" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                draft.position = raw.trim().parse::<i64>().ok();
            }
            "enabled" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                draft.enabled = Some(raw.trim() != "false");
            }
            "upload_type" => {
                let raw = field.text().await.map_err(bad_multipart)?;
                if let Some(parsed) = AssetBucket::parse(&raw) {
                    bucket = parsed;
                }
            }
            "image" => {
                let filename = field.file_name().map(str::to_string);
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                if !bytes.is_empty() {
                    image = Some((filename, mime_type, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    if let Some((filename, mime_type, bytes)) = image {
        let stored =
            server_api::store_upload(&state.api, bucket, filename.as_deref(), &mime_type, &bytes)
                .await
                .map_err(reject)?;
        draft.image = Some(stored.url);
    }
    Ok(draft)
}

fn require_auth(
    state: &Arc<AppState>,
    headers: &HeaderMap,
) -> Result<server_api::Claims, (StatusCode, Json<ApiError>)> {
    let authorization = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    server_api::authenticate(&state.api, authorization).map_err(reject)
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error))
}

fn bad_multipart(error: axum::extract::multipart::MultipartError) -> (StatusCode, Json<ApiError>) {
    reject(ApiError::new(
        ErrorCode::Validation,
        format!("malformed multipart body: {error}"),
    ))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
