//! HTTP client for the content service: the page pulls its slider records
//! and social icons at load time and rebuilds everything from scratch.

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::{ApiError, ApiException},
    protocol::{SlideRecord, SocialIconRecord},
};
use tracing::info;
use url::Url;

#[derive(Debug, Clone)]
pub struct SiteClient {
    base_url: Url,
    http: Client,
}

impl SiteClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid content service url '{base_url}'"))?;
        Ok(Self {
            base_url,
            http: Client::new(),
        })
    }

    pub async fn fetch_slider_content(&self) -> Result<Vec<SlideRecord>> {
        let slides: Vec<SlideRecord> = self.get_json("api/slider-content").await?;
        info!(count = slides.len(), "fetched slider content");
        Ok(slides)
    }

    pub async fn fetch_social_icons(&self) -> Result<Vec<SocialIconRecord>> {
        self.get_json("api/social-icons").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("cannot build endpoint url for '{path}'"))?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .with_context(|| format!("request to '{path}' failed"))?;

        let status = response.status();
        if !status.is_success() {
            // The service sends a structured error body; surface it typed
            // when it parses, fall back to the bare status otherwise.
            if let Ok(error) = response.json::<ApiError>().await {
                return Err(ApiException::new(error.code, error.message).into());
            }
            bail!("request to '{path}' failed with status {status}");
        }
        response
            .json()
            .await
            .with_context(|| format!("response from '{path}' was not valid JSON"))
    }
}

#[cfg(test)]
#[path = "tests/content_tests.rs"]
mod tests;
