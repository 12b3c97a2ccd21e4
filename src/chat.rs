//! Chat orchestration: classify the message, build the matching news query,
//! fetch, and shape the reply. Every failure path degrades to readable text;
//! `respond` never errors from the caller's perspective.

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::error::FetchError;
use crate::format::{self, DEFAULT_DESC_LIMIT, DEFAULT_MAX_ITEMS};
use crate::intent::{Intent, classify};
use crate::news::{Article, NewsClient, SortBy, dedup_by_url};

pub const EMPTY_MESSAGE_PROMPT: &str = "Please provide a message";

const DEFAULT_COUNTRY: &str = "us";
const SEARCH_WINDOW_DAYS: i64 = 30;
const TRENDING_FEED_WINDOW_DAYS: i64 = 3;
const MAX_TOPIC_WINDOW_DAYS: i64 = 30;
const SIDEBAR_ITEMS: usize = 6;

/// Per-topic dispatch data: the headlines category when the upstream has one,
/// the keyword query used as fallback, and the reply header.
struct TopicProfile {
    name: &'static str,
    category: Option<&'static str>,
    fallback_query: &'static str,
    header: &'static str,
}

fn topic_profile(intent: &Intent) -> Option<TopicProfile> {
    let profile = match intent {
        Intent::Sports => TopicProfile {
            name: "sports",
            category: Some("sports"),
            fallback_query: "sports cricket football",
            header: "⚽ **Sports News**",
        },
        // The upstream has no politics category, so this goes straight to
        // keyword search.
        Intent::Politics => TopicProfile {
            name: "politics",
            category: None,
            fallback_query: "politics government election",
            header: "🏛️ **Politics News**",
        },
        Intent::Entertainment => TopicProfile {
            name: "entertainment",
            category: Some("entertainment"),
            fallback_query: "bollywood entertainment movies",
            header: "🎬 **Entertainment News**",
        },
        Intent::Technology => TopicProfile {
            name: "technology",
            category: Some("technology"),
            fallback_query: "technology gadgets innovation",
            header: "💻 **Technology News**",
        },
        Intent::Business => TopicProfile {
            name: "business",
            category: Some("business"),
            fallback_query: "business economy finance",
            header: "💼 **Business News**",
        },
        Intent::Health => TopicProfile {
            name: "health",
            category: Some("health"),
            fallback_query: "health medicine",
            header: "🏥 **Health News**",
        },
        _ => return None,
    };
    Some(profile)
}

pub struct ChatResponder {
    client: NewsClient,
    recent_window_days: i64,
}

impl ChatResponder {
    pub fn new(client: NewsClient, recent_window_days: i64) -> Self {
        ChatResponder {
            client,
            recent_window_days,
        }
    }

    /// Handles one chat message end to end. Always returns displayable text.
    pub async fn respond(&self, message: &str) -> String {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return EMPTY_MESSAGE_PROMPT.to_string();
        }

        let intent = classify(trimmed);
        info!(user_message = trimmed, intent = intent.label(), "handling chat message");

        // Greetings are answered from a canned help text, no network needed.
        if intent == Intent::Greeting {
            return help_text();
        }

        // Cheap probe so connectivity problems surface as one readable
        // diagnostic instead of a per-intent apology.
        if let Err(err) = self.probe_connectivity().await {
            warn!(intent = intent.label(), error = %err, "news API probe failed");
            return connection_issue_text(&err);
        }

        match intent {
            Intent::Trending => self.trending_response().await,
            Intent::Recent => self.recent_response().await,
            Intent::Search(query) => self.search_response(&query).await,
            other => match topic_profile(&other) {
                Some(profile) => self.topical_response(&profile).await,
                None => help_text(),
            },
        }
    }

    async fn probe_connectivity(&self) -> Result<(), FetchError> {
        self.client
            .top_headlines(Some(DEFAULT_COUNTRY), None, 1)
            .await
            .map(|_| ())
    }

    async fn trending_response(&self) -> String {
        match self
            .client
            .top_headlines(Some(DEFAULT_COUNTRY), None, DEFAULT_MAX_ITEMS as u32)
            .await
        {
            Ok(articles) if articles.iter().any(|a| a.is_usable()) => format::format_articles(
                &articles,
                "🔥 **Trending News**",
                DEFAULT_MAX_ITEMS,
                DEFAULT_DESC_LIMIT,
            ),
            Ok(_) => "📰 No trending articles found at the moment. \
                      Try searching for specific topics instead!"
                .to_string(),
            Err(err) => {
                warn!(error = %err, "trending fetch failed");
                apology("trending news")
            }
        }
    }

    async fn recent_response(&self) -> String {
        let articles = match self
            .client
            .top_headlines(Some(DEFAULT_COUNTRY), None, DEFAULT_MAX_ITEMS as u32)
            .await
        {
            Ok(articles) if articles.iter().any(|a| a.is_usable()) => articles,
            Ok(_) => {
                // Headlines came back empty; widen to the configured window.
                let from = (Utc::now() - Duration::days(self.recent_window_days)).date_naive();
                match self
                    .client
                    .search_everything(
                        "news",
                        Some(from),
                        None,
                        SortBy::PublishedAt,
                        DEFAULT_MAX_ITEMS as u32,
                    )
                    .await
                {
                    Ok(articles) if articles.iter().any(|a| a.is_usable()) => articles,
                    Ok(_) => {
                        return "No recent news found. Try asking about trending news instead!"
                            .to_string();
                    }
                    Err(err) => {
                        warn!(error = %err, "recent fallback fetch failed");
                        return apology("recent news");
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "recent fetch failed");
                return apology("recent news");
            }
        };

        format::format_articles(
            &articles,
            "⏰ **Latest News**",
            DEFAULT_MAX_ITEMS,
            DEFAULT_DESC_LIMIT,
        )
    }

    async fn topical_response(&self, profile: &TopicProfile) -> String {
        if let Some(category) = profile.category {
            match self
                .client
                .top_headlines(Some(DEFAULT_COUNTRY), Some(category), DEFAULT_MAX_ITEMS as u32)
                .await
            {
                Ok(articles) if articles.iter().any(|a| a.is_usable()) => {
                    return format::format_articles(
                        &articles,
                        profile.header,
                        DEFAULT_MAX_ITEMS,
                        DEFAULT_DESC_LIMIT,
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(category, error = %err, "category headlines failed, falling back to search");
                }
            }
        }

        let from = (Utc::now() - Duration::days(SEARCH_WINDOW_DAYS)).date_naive();
        match self
            .client
            .search_everything(
                profile.fallback_query,
                Some(from),
                None,
                SortBy::PublishedAt,
                DEFAULT_MAX_ITEMS as u32,
            )
            .await
        {
            Ok(articles) if articles.iter().any(|a| a.is_usable()) => format::format_articles(
                &articles,
                profile.header,
                DEFAULT_MAX_ITEMS,
                DEFAULT_DESC_LIMIT,
            ),
            Ok(_) => format!(
                "Sorry, no {} news found at the moment. Try again later!",
                profile.name
            ),
            Err(err) => {
                warn!(topic = profile.name, error = %err, "topical fetch failed");
                apology(&format!("{} news", profile.name))
            }
        }
    }

    async fn search_response(&self, message: &str) -> String {
        let query = extract_search_topic(message);
        let from = (Utc::now() - Duration::days(SEARCH_WINDOW_DAYS)).date_naive();
        match self
            .client
            .search_everything(
                &query,
                Some(from),
                None,
                SortBy::PublishedAt,
                DEFAULT_MAX_ITEMS as u32,
            )
            .await
        {
            Ok(articles) if articles.iter().any(|a| a.is_usable()) => format::format_articles(
                &articles,
                &format!("🔍 **Search Results for: {query}**"),
                DEFAULT_MAX_ITEMS,
                DEFAULT_DESC_LIMIT,
            ),
            Ok(_) => no_results_text(&query),
            Err(err) => {
                warn!(query = %query, error = %err, "search fetch failed");
                apology("news")
            }
        }
    }

    /// Sidebar trending feed: two popularity-sorted keyword queries combined
    /// first-source-then-second, deduplicated by URL (first occurrence wins).
    pub async fn trending_feed(&self) -> Result<Vec<Article>, FetchError> {
        let from = (Utc::now() - Duration::days(TRENDING_FEED_WINDOW_DAYS)).date_naive();

        let queries = [
            "trending OR viral OR popular",
            "breaking OR major OR important",
        ];

        let mut combined = Vec::new();
        let mut last_err = None;
        for query in queries {
            match self
                .client
                .search_everything(query, Some(from), None, SortBy::Popularity, 10)
                .await
            {
                Ok(mut articles) => combined.append(&mut articles),
                Err(err) => {
                    warn!(query, error = %err, "trending feed query failed");
                    last_err = Some(err);
                }
            }
        }

        if combined.is_empty() {
            if let Some(err) = last_err {
                return Err(err);
            }
        }

        let usable: Vec<Article> = combined.into_iter().filter(|a| a.is_usable()).collect();
        Ok(dedup_by_url(usable)
            .into_iter()
            .take(SIDEBAR_ITEMS)
            .collect())
    }

    /// Sidebar recent feed: top headlines, widening to the configured day
    /// window when headlines come back empty.
    pub async fn recent_feed(&self) -> Result<Vec<Article>, FetchError> {
        let headlines = self
            .client
            .top_headlines(Some(DEFAULT_COUNTRY), None, 10)
            .await?;

        let usable: Vec<Article> = headlines.into_iter().filter(|a| a.is_usable()).collect();
        if !usable.is_empty() {
            return Ok(usable.into_iter().take(SIDEBAR_ITEMS).collect());
        }

        let from = (Utc::now() - Duration::days(self.recent_window_days)).date_naive();
        let fallback = self
            .client
            .search_everything("news", Some(from), None, SortBy::PublishedAt, 10)
            .await?;
        Ok(fallback
            .into_iter()
            .filter(|a| a.is_usable())
            .take(SIDEBAR_ITEMS)
            .collect())
    }

    /// Direct topic query for the `/api/news` endpoint.
    pub async fn topic_news(&self, topic: &str, days: i64) -> Result<(String, usize), FetchError> {
        // `days` is caller-supplied; clamp it so the date arithmetic stays in
        // range (the upstream only serves about a month of history anyway).
        let days = days.clamp(1, MAX_TOPIC_WINDOW_DAYS);
        let now = Utc::now();
        let from = (now - Duration::days(days)).date_naive();
        let articles = self
            .client
            .search_everything(
                topic,
                Some(from),
                Some(now.date_naive()),
                SortBy::PublishedAt,
                10,
            )
            .await?;

        let count = articles.iter().filter(|a| a.is_usable()).count();
        let text = format::format_articles(
            &articles,
            &format!("📰 **Latest {topic} News:**"),
            DEFAULT_MAX_ITEMS,
            150,
        );
        Ok((text, count))
    }
}

/// Trims conversational lead-ins ("tell me about ...") and a trailing "news"
/// so the upstream query carries just the topic. Falls back to the whole
/// message when nothing recognizable is found.
fn extract_search_topic(message: &str) -> String {
    const LEAD_INS: &[&str] = &[
        "tell me about",
        "news about",
        "what is",
        "what about",
        "show me",
        "latest on",
    ];

    let mut topic = message.trim();
    for lead in LEAD_INS {
        // Only strip at a word boundary: "what island" is not "what is" + rest.
        if let Some(rest) = strip_prefix_ci(topic, lead) {
            if rest.starts_with(' ') && !rest.trim_start().is_empty() {
                topic = rest.trim_start();
                break;
            }
        }
    }

    if let Some(rest) = strip_suffix_ci(topic, " news") {
        let rest = rest.trim_end();
        if !rest.is_empty() {
            topic = rest;
        }
    }

    topic.to_string()
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

fn strip_suffix_ci<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let start = s.len().checked_sub(suffix.len())?;
    if s.is_char_boundary(start) && s[start..].eq_ignore_ascii_case(suffix) {
        Some(&s[..start])
    } else {
        None
    }
}

fn help_text() -> String {
    "👋 **Welcome to TrendLine News Chat!**\n\n\
     I can help you with:\n\
     • 🔥 Trending news\n\
     • ⚽ Sports updates\n\
     • 🎬 Entertainment gossip\n\
     • 💻 Tech news\n\
     • 💼 Business updates\n\
     • 🏥 Health news\n\n\
     Just ask me about any topic!"
        .to_string()
}

fn connection_issue_text(err: &FetchError) -> String {
    format!(
        "🔧 **API Connection Issue**\n\n{}\n\nPlease check:\n\
         • API key validity\n• Internet connection\n• News API service status",
        err.user_hint()
    )
}

fn no_results_text(query: &str) -> String {
    format!(
        "Sorry, I couldn't find any news about '{query}'. Try asking about:\n\
         • Trending news\n• Sports updates\n• Bollywood news\n• Technology news\n• Political updates"
    )
}

fn apology(what: &str) -> String {
    format!("Sorry, there was an error fetching {what}. Please try again.")
}
