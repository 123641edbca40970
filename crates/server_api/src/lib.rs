use shared::{
    domain::{AssetBucket, IconId, Role, SlideId},
    error::{ApiError, ErrorCode},
    protocol::{
        DashboardStats, LoginResponse, NewSocialIcon, SlideDraft, SlideRecord, SocialIconPatch,
        SocialIconRecord, UploadResponse, UserProfile,
    },
};
use storage::{IconChanges, SlideChanges, Storage};
use tracing::{info, warn};

pub mod auth;

pub use auth::{AuthConfig, Claims};

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub auth: AuthConfig,
}

/// Create the admin account the service boots with. Content is in-memory, so
/// this runs on every start.
pub async fn seed_admin(ctx: &ApiContext, username: &str, password: &str) -> anyhow::Result<()> {
    let digest = auth::password_digest(password);
    ctx.storage
        .create_user(username, &digest, Role::Admin)
        .await?;
    info!(%username, "seeded admin user");
    Ok(())
}

pub async fn login(ctx: &ApiContext, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
    let user = ctx.storage.user_by_username(username.trim()).await;
    let Some(user) = user else {
        warn!(%username, "login attempt for unknown user");
        return Err(invalid_credentials());
    };
    if !auth::verify_password(&user.password_digest, password) {
        warn!(%username, "login attempt with wrong password");
        return Err(invalid_credentials());
    }
    let token = mint(ctx, &user)?;
    Ok(LoginResponse {
        token,
        user: UserProfile {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
        },
    })
}

/// Resolve an `Authorization` header value to verified claims. Mutation
/// endpoints call this before touching the store.
pub fn authenticate(ctx: &ApiContext, authorization: Option<&str>) -> Result<Claims, ApiError> {
    let header = authorization
        .ok_or_else(|| ApiError::new(ErrorCode::Unauthorized, "access token required"))?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::new(ErrorCode::Unauthorized, "access token required"))?;
    auth::verify_token(&ctx.auth, token)
        .map_err(|_| ApiError::new(ErrorCode::Unauthorized, "invalid or expired token"))
}

pub async fn list_social_icons(ctx: &ApiContext) -> Vec<SocialIconRecord> {
    ctx.storage.list_social_icons().await
}

pub async fn add_social_icon(
    ctx: &ApiContext,
    icon: NewSocialIcon,
) -> Result<SocialIconRecord, ApiError> {
    ctx.storage
        .add_social_icon(&icon.platform, &icon.url, icon.enabled.unwrap_or(true))
        .await
        .map_err(validation)
}

pub async fn update_social_icon(
    ctx: &ApiContext,
    id: IconId,
    patch: SocialIconPatch,
) -> Result<SocialIconRecord, ApiError> {
    ctx.storage
        .update_social_icon(
            id,
            IconChanges {
                platform: patch.platform,
                url: patch.url,
                enabled: patch.enabled,
            },
        )
        .await
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "social media icon not found"))
}

pub async fn delete_social_icon(ctx: &ApiContext, id: IconId) -> Result<(), ApiError> {
    if ctx.storage.delete_social_icon(id).await {
        Ok(())
    } else {
        Err(ApiError::new(
            ErrorCode::NotFound,
            "social media icon not found",
        ))
    }
}

/// Public listing: enabled slides only, already ordered by position.
pub async fn list_slider_content(ctx: &ApiContext) -> Vec<SlideRecord> {
    ctx.storage.list_slides(false).await
}

pub async fn list_all_slider_content(ctx: &ApiContext) -> Vec<SlideRecord> {
    ctx.storage.list_slides(true).await
}

pub async fn create_slide(ctx: &ApiContext, draft: SlideDraft) -> Result<SlideRecord, ApiError> {
    ctx.storage
        .add_slide(slide_changes(draft))
        .await
        .map_err(validation)
}

pub async fn update_slide(
    ctx: &ApiContext,
    id: SlideId,
    draft: SlideDraft,
) -> Result<SlideRecord, ApiError> {
    ctx.storage
        .update_slide(id, slide_changes(draft))
        .await
        .ok_or_else(|| ApiError::new(ErrorCode::NotFound, "slider content not found"))
}

pub async fn delete_slide(ctx: &ApiContext, id: SlideId) -> Result<(), ApiError> {
    if ctx.storage.delete_slide(id).await {
        Ok(())
    } else {
        Err(ApiError::new(ErrorCode::NotFound, "slider content not found"))
    }
}

/// Validate and store one uploaded file. Only images and videos are
/// accepted, capped at [`MAX_UPLOAD_BYTES`].
pub async fn store_upload(
    ctx: &ApiContext,
    bucket: AssetBucket,
    original_name: Option<&str>,
    mime_type: &str,
    bytes: &[u8],
) -> Result<UploadResponse, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, "no file uploaded"));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::new(
            ErrorCode::PayloadTooLarge,
            format!("file too large, maximum size is {MAX_UPLOAD_BYTES} bytes"),
        ));
    }
    if !(mime_type.starts_with("image/") || mime_type.starts_with("video/")) {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "only image and video files are allowed",
        ));
    }

    let asset = ctx
        .storage
        .store_asset(bucket, original_name, mime_type, bytes)
        .await
        .map_err(internal)?;
    Ok(UploadResponse {
        filename: asset.filename,
        url: asset.url,
        size_bytes: asset.size_bytes,
        mime_type: asset.mime_type,
        uploaded_at: asset.uploaded_at,
    })
}

pub async fn dashboard_stats(ctx: &ApiContext) -> DashboardStats {
    ctx.storage.stats().await
}

fn slide_changes(draft: SlideDraft) -> SlideChanges {
    SlideChanges {
        kind: draft.kind,
        title: draft.title,
        description: draft.description,
        image: draft.image,
        position: draft.position,
        enabled: draft.enabled,
    }
}

fn mint(ctx: &ApiContext, user: &storage::StoredUser) -> Result<String, ApiError> {
    auth::mint_token(&ctx.auth, user)
        .map_err(|e| ApiError::new(ErrorCode::Internal, format!("token mint failed: {e}")))
}

fn invalid_credentials() -> ApiError {
    ApiError::new(ErrorCode::Unauthorized, "invalid credentials")
}

fn validation(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Validation, err.to_string())
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
