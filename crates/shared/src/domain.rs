use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(UserId);
id_newtype!(SlideId);
id_newtype!(IconId);
id_newtype!(AssetId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Hero,
    Product,
    Featured,
}

impl SlideKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "hero" => Some(Self::Hero),
            "product" => Some(Self::Product),
            "featured" => Some(Self::Featured),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Editor,
}

/// Destination bucket for an uploaded asset. Maps onto a subdirectory of the
/// upload root, so the variant set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetBucket {
    Images,
    Videos,
    Hero,
}

impl AssetBucket {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "images" => Some(Self::Images),
            "videos" => Some(Self::Videos),
            "hero" => Some(Self::Hero),
            _ => None,
        }
    }

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Videos => "videos",
            Self::Hero => "hero",
        }
    }
}
