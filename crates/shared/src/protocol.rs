use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{IconId, Role, SlideId, SlideKind, UserId};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialIconRecord {
    pub id: IconId,
    pub platform: String,
    pub url: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewSocialIcon {
    pub platform: String,
    pub url: String,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SocialIconPatch {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideRecord {
    pub id: SlideId,
    pub kind: SlideKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "order")]
    pub position: i64,
    pub enabled: bool,
}

/// Fields of a slide create/update form. Collected from multipart parts on the
/// server side, so every field is optional at this layer; `SlideDraft` carries
/// validation, the API layer decides which absences are errors.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SlideDraft {
    #[serde(default)]
    pub kind: Option<SlideKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub position: Option<i64>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_slides: usize,
    pub active_slides: usize,
    pub social_icons: usize,
    pub active_social_icons: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
}
