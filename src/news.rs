use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Placeholder titles the upstream substitutes when it redacts content.
/// Articles carrying one of these are unusable and get filtered out.
const REMOVAL_SENTINELS: &[&str] = &["[removed]", "removed", "deleted", "untitled"];

/// One normalized news item. Constructed per-request from the upstream JSON,
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Raw upstream timestamp (ISO-8601); parsed lazily at formatting time.
    pub published_at: String,
    pub source: String,
    pub url_to_image: Option<String>,
}

impl Article {
    /// Usable means the title is present and not a removal sentinel.
    pub fn is_usable(&self) -> bool {
        let title = self.title.trim().to_lowercase();
        !title.is_empty() && !REMOVAL_SENTINELS.iter().any(|s| title.contains(s))
    }
}

/// Keeps the first occurrence of each URL, preserving list order.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = std::collections::HashSet::new();
    articles
        .into_iter()
        .filter(|a| !a.url.is_empty() && seen.insert(a.url.clone()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PublishedAt,
    Popularity,
    Relevancy,
}

impl SortBy {
    fn as_str(self) -> &'static str {
        match self {
            SortBy::PublishedAt => "publishedAt",
            SortBy::Popularity => "popularity",
            SortBy::Relevancy => "relevancy",
        }
    }
}

/// Parameters for one outbound news-search request. Built fresh per request
/// and immutable once issued.
#[derive(Debug, Clone)]
pub enum QuerySpec {
    TopHeadlines {
        country: Option<String>,
        category: Option<String>,
        page_size: u32,
    },
    Everything {
        query: String,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        sort_by: SortBy,
        page_size: u32,
        language: String,
    },
}

impl QuerySpec {
    fn endpoint(&self) -> &'static str {
        match self {
            QuerySpec::TopHeadlines { .. } => "top-headlines",
            QuerySpec::Everything { .. } => "everything",
        }
    }

    fn params(&self, api_key: &str) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        match self {
            QuerySpec::TopHeadlines {
                country,
                category,
                page_size,
            } => {
                if let Some(country) = country {
                    params.push(("country", country.clone()));
                }
                if let Some(category) = category {
                    params.push(("category", category.clone()));
                }
                params.push(("pageSize", page_size.to_string()));
            }
            QuerySpec::Everything {
                query,
                from,
                to,
                sort_by,
                page_size,
                language,
            } => {
                params.push(("q", query.clone()));
                if let Some(from) = from {
                    params.push(("from", from.format("%Y-%m-%d").to_string()));
                }
                if let Some(to) = to {
                    params.push(("to", to.format("%Y-%m-%d").to_string()));
                }
                params.push(("sortBy", sort_by.as_str().to_string()));
                params.push(("language", language.clone()));
                params.push(("pageSize", page_size.to_string()));
            }
        }
        params.push(("apiKey", api_key.to_string()));
        params
    }
}

// Upstream JSON shapes. Every article field is optional so a sparse payload
// never fails parsing; normalization fills in defaults.
#[derive(Deserialize)]
struct ApiEnvelope {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Deserialize)]
struct RawArticle {
    #[serde(default)]
    source: RawSource,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Deserialize, Default)]
struct RawSource {
    name: Option<String>,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            url: raw.url.unwrap_or_default(),
            published_at: raw.published_at.unwrap_or_default(),
            source: raw.source.name.unwrap_or_else(|| "Unknown".to_string()),
            url_to_image: raw.url_to_image,
        }
    }
}

/// Thin client for the news search API. Holds the API credential as an
/// explicit constructor argument rather than ambient global state.
pub struct NewsClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, REQUEST_TIMEOUT)
    }

    /// Same client with a custom per-request deadline.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        NewsClient {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn top_headlines(
        &self,
        country: Option<&str>,
        category: Option<&str>,
        page_size: u32,
    ) -> Result<Vec<Article>, FetchError> {
        self.fetch(&QuerySpec::TopHeadlines {
            country: country.map(str::to_string),
            category: category.map(str::to_string),
            page_size,
        })
        .await
    }

    pub async fn search_everything(
        &self,
        query: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        sort_by: SortBy,
        page_size: u32,
    ) -> Result<Vec<Article>, FetchError> {
        self.fetch(&QuerySpec::Everything {
            query: query.to_string(),
            from,
            to,
            sort_by,
            page_size,
            language: "en".to_string(),
        })
        .await
    }

    /// Issues a single request and classifies the outcome. A failed call
    /// surfaces immediately as an error value; retrying is the caller's call.
    pub async fn fetch(&self, spec: &QuerySpec) -> Result<Vec<Article>, FetchError> {
        let url = format!("{}/{}", self.base_url, spec.endpoint());
        let params = spec.params(&self.api_key);

        debug!(endpoint = spec.endpoint(), "querying news API");

        let response = self.http.get(&url).query(&params).send().await?;

        match response.status() {
            StatusCode::OK => {
                let envelope: ApiEnvelope = response
                    .json()
                    .await
                    .map_err(|e| FetchError::Unknown(format!("malformed response body: {e}")))?;

                if envelope.status == "ok" {
                    Ok(envelope.articles.into_iter().map(Article::from).collect())
                } else {
                    Err(FetchError::ApiRejected(
                        envelope
                            .message
                            .unwrap_or_else(|| "unknown error".to_string()),
                    ))
                }
            }
            StatusCode::UNAUTHORIZED => Err(FetchError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited),
            other => Err(FetchError::UnexpectedStatus(other.as_u16())),
        }
    }
}
