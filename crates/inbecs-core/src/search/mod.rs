pub mod cache;

pub use cache::{SearchCache, DEFAULT_SEARCH_TTL};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{InputError, SearchError};
use crate::settings::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_NAVER_SEARCH_URL};

pub const MIN_DISPLAY: u32 = 1;
pub const MAX_DISPLAY: u32 = 100;
pub const DEFAULT_DISPLAY: u32 = 30;

/// A blog post returned by the search API, with markup removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub link: Url,
    pub summary: String,
}

#[derive(Deserialize)]
struct NaverSearchResponse {
    #[serde(default)]
    items: Vec<NaverSearchItem>,
}

#[derive(Deserialize)]
struct NaverSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    description: String,
}

/// Clamp a requested result count into the range the API accepts.
pub fn clamp_display(limit: u32) -> u32 {
    limit.clamp(MIN_DISPLAY, MAX_DISPLAY)
}

/// Remove the emphasis tags the search API wraps around matched terms.
pub fn strip_markup(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "")
}

#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    endpoint: String,
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl SearchClient {
    pub fn new(client_id: Option<String>, client_secret: Option<String>) -> Self {
        Self::with_options(
            client_id,
            client_secret,
            DEFAULT_NAVER_SEARCH_URL,
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        )
    }

    pub fn with_options(
        client_id: Option<String>,
        client_secret: Option<String>,
        endpoint: &str,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            endpoint: endpoint.to_string(),
            client_id,
            client_secret,
        }
    }

    /// Search blog posts for `keyword`, returning at most `limit` (clamped to 1..=100).
    pub async fn search(&self, keyword: &str, limit: u32) -> Result<Vec<Post>, SearchError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(InputError::EmptyKeyword.into());
        }

        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(SearchError::MissingCredentials);
        };

        let count = clamp_display(limit);
        tracing::debug!("Naver blog search: query={:?} display={}", keyword, count);

        let response = self
            .client
            .get(&self.endpoint)
            .header("X-Naver-Client-Id", client_id)
            .header("X-Naver-Client-Secret", client_secret)
            .query(&[
                ("query", keyword.to_string()),
                ("display", count.to_string()),
                ("sort", "sim".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Naver search API error ({}): {}", status, body);
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: NaverSearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;

        let posts: Vec<Post> = parsed
            .items
            .into_iter()
            .filter_map(|item| match Url::parse(&item.link) {
                Ok(link) => Some(Post {
                    title: strip_markup(&item.title),
                    link,
                    summary: strip_markup(&item.description),
                }),
                Err(e) => {
                    tracing::warn!("Skipping search item with invalid link {:?}: {}", item.link, e);
                    None
                }
            })
            .collect();

        tracing::info!("Naver search for {:?} returned {} posts", keyword, posts.len());
        Ok(posts)
    }
}
