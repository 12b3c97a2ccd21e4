use serde::{Deserialize, Serialize};

use crate::news::Article;

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChatResponse {
    pub fn success(bot_response: String) -> Self {
        ChatResponse {
            status: "success",
            bot_response: Some(bot_response),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ChatResponse {
            status: "error",
            bot_response: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Deserialize)]
pub struct TopicQuery {
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_days")]
    pub days: i64,
}

fn default_topic() -> String {
    "India".to_string()
}

fn default_days() -> i64 {
    10
}

#[derive(Serialize)]
pub struct TopicResponse {
    pub status: &'static str,
    pub topic: String,
    pub news: String,
    pub article_count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            status: "error",
            message: message.into(),
        }
    }
}

/// Compact article shape served to the sidebar widgets.
#[derive(Serialize)]
pub struct SidebarItem {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub source: String,
    #[serde(rename = "urlToImage", skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
}

impl SidebarItem {
    pub fn from_article(article: Article, desc_limit: usize) -> Self {
        let description = if article.description.trim().is_empty() {
            "No description available.".to_string()
        } else {
            crate::format::truncate(&crate::format::clean_text(&article.description), desc_limit)
        };

        SidebarItem {
            title: article.title,
            description,
            url: article.url,
            published_at: article.published_at,
            source: article.source,
            url_to_image: article.url_to_image,
        }
    }
}

#[derive(Serialize)]
pub struct TrendingResponse {
    pub status: &'static str,
    pub trending: Vec<SidebarItem>,
}

#[derive(Serialize)]
pub struct RecentResponse {
    pub status: &'static str,
    pub recent: Vec<SidebarItem>,
}
