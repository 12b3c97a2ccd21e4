//! Pure text shaping for fetched articles. No network calls, no mutation.

use chrono::DateTime;

use crate::news::Article;

pub const DEFAULT_MAX_ITEMS: usize = 5;
pub const DEFAULT_DESC_LIMIT: usize = 120;

pub const NO_VALID_ARTICLES: &str = "📰 No valid articles found in the results.";
pub const CLOSING_SUGGESTION: &str =
    "💡 Try asking about specific topics like 'tech news', 'sports updates', or 'business news'!";
const EMPTY_DESCRIPTION: &str = "Click to read more...";
const UNKNOWN_TIME: &str = "Unknown time";

/// Renders up to `max_items` usable articles as a numbered markdown block
/// under `header`. Unusable articles (empty or sentinel titles) are dropped
/// before the cap applies. Returns a fixed message when nothing survives.
pub fn format_articles(
    articles: &[Article],
    header: &str,
    max_items: usize,
    desc_limit: usize,
) -> String {
    let usable: Vec<&Article> = articles
        .iter()
        .filter(|a| a.is_usable())
        .take(max_items)
        .collect();

    if usable.is_empty() {
        return NO_VALID_ARTICLES.to_string();
    }

    let mut out = String::new();
    out.push_str(header);
    out.push_str("\n\n");

    for (i, article) in usable.iter().enumerate() {
        let title = clean_text(&article.title);
        let description = if article.description.trim().is_empty() {
            EMPTY_DESCRIPTION.to_string()
        } else {
            truncate(&clean_text(&article.description), desc_limit)
        };

        out.push_str(&format!("**{}. {}**\n", i + 1, title));
        out.push_str(&format!(
            "📰 {} • ⏰ {}\n",
            article.source,
            format_publish_time(&article.published_at)
        ));
        out.push_str(&description);
        out.push('\n');
        if !article.url.is_empty() {
            out.push_str(&format!("🔗 [Read full article]({})\n", article.url));
        }
        out.push('\n');
    }

    out.push_str(CLOSING_SUGGESTION);
    out
}

/// Human-formatted publish time; a malformed or missing timestamp degrades to
/// a placeholder instead of failing the whole response.
pub fn format_publish_time(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_TIME.to_string();
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%b %d, %I:%M %p").to_string())
        .unwrap_or_else(|_| UNKNOWN_TIME.to_string())
}

/// Caps text at `limit` characters, marking the cut with an ellipsis. The
/// result is never longer than `limit + 3` characters.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

/// Collapses runs of whitespace and normalizes typographic punctuation that
/// upstream articles frequently carry.
pub fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2013}', '\u{2014}'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str, published_at: &str) -> Article {
        Article {
            title: title.to_string(),
            description: description.to_string(),
            url: format!("https://example.com/{}", title.replace(' ', "-")),
            published_at: published_at.to_string(),
            source: "Example Wire".to_string(),
            url_to_image: None,
        }
    }

    #[test]
    fn empty_input_yields_fixed_message() {
        assert_eq!(format_articles(&[], "📰 News", 5, 100), NO_VALID_ARTICLES);
    }

    #[test]
    fn all_sentinels_yield_fixed_message() {
        let articles = vec![
            article("[Removed]", "gone", ""),
            article("", "blank", ""),
        ];
        assert_eq!(format_articles(&articles, "📰 News", 5, 100), NO_VALID_ARTICLES);
    }

    #[test]
    fn renders_numbered_entries_and_closing_line() {
        let articles = vec![
            article("First story", "Something happened", "2024-01-15T10:00:00Z"),
            article("Second story", "Something else", "2024-01-15T11:00:00Z"),
            article("Third story", "", "2024-01-15T12:00:00Z"),
        ];

        let text = format_articles(&articles, "🔥 Trending News", 5, 120);
        assert!(text.starts_with("🔥 Trending News"));
        assert!(text.contains("**1. First story**"));
        assert!(text.contains("**2. Second story**"));
        assert!(text.contains("**3. Third story**"));
        assert!(!text.contains("**4."));
        assert!(text.contains("Click to read more..."));
        assert!(text.ends_with(CLOSING_SUGGESTION));
    }

    #[test]
    fn sentinel_articles_do_not_consume_the_cap() {
        let mut articles = vec![article("[removed]", "x", "")];
        for i in 0..5 {
            articles.push(article(&format!("Story {i}"), "desc", ""));
        }

        let text = format_articles(&articles, "📰 News", 5, 120);
        assert!(text.contains("**5. Story 4**"));
        assert!(!text.contains("[removed]"));
    }

    #[test]
    fn description_never_exceeds_limit_plus_ellipsis() {
        let long = "x".repeat(500);
        let articles = vec![article("Long one", &long, "")];

        let text = format_articles(&articles, "📰 News", 5, 100);
        let desc_line = text
            .lines()
            .find(|l| l.starts_with('x'))
            .expect("description line");
        assert!(desc_line.chars().count() <= 103);
        assert!(desc_line.ends_with("..."));
    }

    #[test]
    fn malformed_timestamp_degrades_to_placeholder() {
        assert_eq!(format_publish_time("not-a-date"), "Unknown time");
        assert_eq!(format_publish_time(""), "Unknown time");
        assert_eq!(format_publish_time("2024-01-15T10:30:00Z"), "Jan 15, 10:30 AM");
    }

    #[test]
    fn clean_text_collapses_whitespace_and_quotes() {
        assert_eq!(clean_text("a  b\n\tc"), "a b c");
        assert_eq!(clean_text("It\u{2019}s \u{201c}big\u{201d}"), "It's \"big\"");
    }

    #[test]
    fn short_text_is_not_truncated() {
        assert_eq!(truncate("short", 100), "short");
    }
}
