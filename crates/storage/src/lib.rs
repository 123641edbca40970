use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use shared::{
    domain::{AssetBucket, AssetId, IconId, Role, SlideId, SlideKind, UserId},
    protocol::{DashboardStats, SlideRecord, SocialIconRecord},
};

/// In-memory content store with a disk-backed asset directory.
///
/// Content (users, slides, social icons) lives behind one `RwLock` and is
/// rebuilt from the seed on every start; nothing about it is durable.
/// Uploaded assets are the exception: they are written under the upload root
/// and served from there.
#[derive(Clone)]
pub struct Storage {
    inner: Arc<RwLock<Inner>>,
    upload_root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct StoredUser {
    pub user_id: UserId,
    pub username: String,
    pub password_digest: String,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub asset_id: AssetId,
    pub bucket: AssetBucket,
    pub filename: String,
    pub url: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Field set for slide creation and partial update; `None` keeps the current
/// value on update and falls back to a default on create.
#[derive(Debug, Clone, Default)]
pub struct SlideChanges {
    pub kind: Option<SlideKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub position: Option<i64>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct IconChanges {
    pub platform: Option<String>,
    pub url: Option<String>,
    pub enabled: Option<bool>,
}

struct Inner {
    users: Vec<StoredUser>,
    slides: Vec<SlideRecord>,
    icons: Vec<SocialIconRecord>,
    next_user_id: i64,
    next_slide_id: i64,
    next_icon_id: i64,
    next_asset_id: i64,
}

impl Storage {
    /// Open the store: make sure the upload directory tree exists and seed
    /// the brand's default content.
    pub async fn open(upload_root: impl AsRef<Path>) -> Result<Self> {
        let upload_root = upload_root.as_ref().to_path_buf();
        for bucket in [AssetBucket::Images, AssetBucket::Videos, AssetBucket::Hero] {
            let dir = upload_root.join(bucket.dir_name());
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("failed to create upload directory '{}'", dir.display()))?;
        }

        let storage = Self {
            inner: Arc::new(RwLock::new(Inner::seeded())),
            upload_root,
        };
        Ok(storage)
    }

    pub fn upload_root(&self) -> &Path {
        &self.upload_root
    }

    // ---- users ----

    pub async fn create_user(
        &self,
        username: &str,
        password_digest: &str,
        role: Role,
    ) -> Result<UserId> {
        let username = username.trim();
        if username.is_empty() {
            bail!("username cannot be empty");
        }
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|user| user.username == username) {
            bail!("username '{username}' is already taken");
        }
        let user_id = UserId(inner.next_user_id);
        inner.next_user_id += 1;
        inner.users.push(StoredUser {
            user_id,
            username: username.to_string(),
            password_digest: password_digest.to_string(),
            role,
        });
        Ok(user_id)
    }

    pub async fn user_by_username(&self, username: &str) -> Option<StoredUser> {
        let inner = self.inner.read().await;
        inner
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }

    // ---- social icons ----

    pub async fn list_social_icons(&self) -> Vec<SocialIconRecord> {
        self.inner.read().await.icons.clone()
    }

    pub async fn add_social_icon(
        &self,
        platform: &str,
        url: &str,
        enabled: bool,
    ) -> Result<SocialIconRecord> {
        if platform.trim().is_empty() {
            bail!("platform cannot be empty");
        }
        if url.trim().is_empty() {
            bail!("url cannot be empty");
        }
        let mut inner = self.inner.write().await;
        let icon = SocialIconRecord {
            id: IconId(inner.next_icon_id),
            platform: platform.trim().to_string(),
            url: url.trim().to_string(),
            enabled,
        };
        inner.next_icon_id += 1;
        inner.icons.push(icon.clone());
        Ok(icon)
    }

    pub async fn update_social_icon(
        &self,
        id: IconId,
        changes: IconChanges,
    ) -> Option<SocialIconRecord> {
        let mut inner = self.inner.write().await;
        let icon = inner.icons.iter_mut().find(|icon| icon.id == id)?;
        if let Some(platform) = changes.platform {
            icon.platform = platform;
        }
        if let Some(url) = changes.url {
            icon.url = url;
        }
        if let Some(enabled) = changes.enabled {
            icon.enabled = enabled;
        }
        Some(icon.clone())
    }

    pub async fn delete_social_icon(&self, id: IconId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.icons.len();
        inner.icons.retain(|icon| icon.id != id);
        inner.icons.len() != before
    }

    // ---- slides ----

    /// Slides ordered by position. `include_disabled` distinguishes the admin
    /// listing from the public one.
    pub async fn list_slides(&self, include_disabled: bool) -> Vec<SlideRecord> {
        let inner = self.inner.read().await;
        inner
            .slides
            .iter()
            .filter(|slide| include_disabled || slide.enabled)
            .cloned()
            .collect()
    }

    pub async fn slide(&self, id: SlideId) -> Option<SlideRecord> {
        let inner = self.inner.read().await;
        inner.slides.iter().find(|slide| slide.id == id).cloned()
    }

    pub async fn add_slide(&self, changes: SlideChanges) -> Result<SlideRecord> {
        let title = changes.title.unwrap_or_default();
        if title.trim().is_empty() {
            bail!("slide title cannot be empty");
        }
        let mut inner = self.inner.write().await;
        let position = changes
            .position
            .unwrap_or(inner.slides.len() as i64 + 1);
        let slide = SlideRecord {
            id: SlideId(inner.next_slide_id),
            kind: changes.kind.unwrap_or(SlideKind::Hero),
            title: title.trim().to_string(),
            description: changes.description.unwrap_or_default(),
            image: changes.image,
            position,
            enabled: changes.enabled.unwrap_or(true),
        };
        inner.next_slide_id += 1;
        inner.slides.push(slide.clone());
        inner.sort_slides();
        Ok(slide)
    }

    pub async fn update_slide(&self, id: SlideId, changes: SlideChanges) -> Option<SlideRecord> {
        let mut inner = self.inner.write().await;
        let slide = inner.slides.iter_mut().find(|slide| slide.id == id)?;
        if let Some(kind) = changes.kind {
            slide.kind = kind;
        }
        if let Some(title) = changes.title {
            slide.title = title;
        }
        if let Some(description) = changes.description {
            slide.description = description;
        }
        if let Some(image) = changes.image {
            slide.image = Some(image);
        }
        if let Some(position) = changes.position {
            slide.position = position;
        }
        if let Some(enabled) = changes.enabled {
            slide.enabled = enabled;
        }
        let updated = slide.clone();
        inner.sort_slides();
        Some(updated)
    }

    pub async fn delete_slide(&self, id: SlideId) -> bool {
        let mut inner = self.inner.write().await;
        let before = inner.slides.len();
        inner.slides.retain(|slide| slide.id != id);
        inner.slides.len() != before
    }

    pub async fn stats(&self) -> DashboardStats {
        let inner = self.inner.read().await;
        DashboardStats {
            total_slides: inner.slides.len(),
            active_slides: inner.slides.iter().filter(|slide| slide.enabled).count(),
            social_icons: inner.icons.len(),
            active_social_icons: inner.icons.iter().filter(|icon| icon.enabled).count(),
        }
    }

    // ---- assets ----

    /// Write an uploaded file under the bucket's directory with a
    /// non-guessable name, keeping the original extension.
    pub async fn store_asset(
        &self,
        bucket: AssetBucket,
        original_name: Option<&str>,
        mime_type: &str,
        bytes: &[u8],
    ) -> Result<StoredAsset> {
        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let filename = format!("{}{extension}", uuid::Uuid::new_v4());
        let path = self.upload_root.join(bucket.dir_name()).join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to store asset at '{}'", path.display()))?;

        let asset_id = {
            let mut inner = self.inner.write().await;
            let id = AssetId(inner.next_asset_id);
            inner.next_asset_id += 1;
            id
        };
        Ok(StoredAsset {
            asset_id,
            bucket,
            url: format!("/uploads/{}/{filename}", bucket.dir_name()),
            filename,
            size_bytes: bytes.len() as u64,
            mime_type: mime_type.to_string(),
            uploaded_at: Utc::now(),
        })
    }
}

impl Inner {
    /// Seed content matching the live site: three hero slides and the
    /// brand's three social profiles. The admin user is seeded by the server
    /// because the password digest is an auth-layer concern.
    fn seeded() -> Self {
        let slides = vec![
            SlideRecord {
                id: SlideId(1),
                kind: SlideKind::Hero,
                title: "Welcome to Comfort & Pondlike".to_string(),
                description: "Discover premium health and wellness products for a better lifestyle"
                    .to_string(),
                image: Some("/images/hero1.jpg".to_string()),
                position: 1,
                enabled: true,
            },
            SlideRecord {
                id: SlideId(2),
                kind: SlideKind::Hero,
                title: "Natural Wellness Solutions".to_string(),
                description: "Organic and natural products for your health journey".to_string(),
                image: Some("/images/hero2.jpg".to_string()),
                position: 2,
                enabled: true,
            },
            SlideRecord {
                id: SlideId(3),
                kind: SlideKind::Hero,
                title: "Transform Your Lifestyle".to_string(),
                description: "Join thousands who trust Comfort & Pondlike for their wellness needs"
                    .to_string(),
                image: Some("/images/hero3.jpg".to_string()),
                position: 3,
                enabled: true,
            },
        ];
        let icons = vec![
            SocialIconRecord {
                id: IconId(1),
                platform: "facebook".to_string(),
                url: "https://facebook.com/comfortpondlike".to_string(),
                enabled: true,
            },
            SocialIconRecord {
                id: IconId(2),
                platform: "instagram".to_string(),
                url: "https://instagram.com/comfortpondlike".to_string(),
                enabled: true,
            },
            SocialIconRecord {
                id: IconId(3),
                platform: "linkedin".to_string(),
                url: "https://linkedin.com/company/comfortpondlike".to_string(),
                enabled: true,
            },
        ];
        Self {
            next_user_id: 1,
            next_slide_id: slides.len() as i64 + 1,
            next_icon_id: icons.len() as i64 + 1,
            next_asset_id: 1,
            users: Vec::new(),
            slides,
            icons,
        }
    }

    fn sort_slides(&mut self) {
        self.slides
            .sort_by_key(|slide| (slide.position, slide.id.0));
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
