//! Keyword-based intent classification for inbound chat messages.
//!
//! The table is checked in declaration order and the first match wins, so a
//! message like "trending tech news" lands on `Trending` even though it also
//! carries a technology keyword. Greetings outrank every topic.

/// The classified purpose of one chat message. Closed set; `Search` is the
/// fallback and carries the raw trimmed message as the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Trending,
    Recent,
    Sports,
    Politics,
    Entertainment,
    Technology,
    Business,
    Health,
    Search(String),
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Trending => "trending",
            Intent::Recent => "recent",
            Intent::Sports => "sports",
            Intent::Politics => "politics",
            Intent::Entertainment => "entertainment",
            Intent::Technology => "technology",
            Intent::Business => "business",
            Intent::Health => "health",
            Intent::Search(_) => "search",
        }
    }
}

type KeywordSet = &'static [&'static str];

const GREETING_KEYWORDS: KeywordSet = &["hello", "hi", "hey", "help", "start"];
const TRENDING_KEYWORDS: KeywordSet = &["trending", "popular", "hot", "viral", "breaking", "top news"];
const RECENT_KEYWORDS: KeywordSet = &["recent", "latest", "today", "fresh", "headlines"];
const SPORTS_KEYWORDS: KeywordSet = &[
    "sports", "sport", "cricket", "football", "tennis", "soccer", "basketball", "match", "player",
];
const POLITICS_KEYWORDS: KeywordSet = &[
    "politics", "political", "election", "government", "minister", "parliament",
];
const ENTERTAINMENT_KEYWORDS: KeywordSet = &[
    "bollywood", "movie", "movies", "entertainment", "celebrity", "actor", "actress", "film",
];
const TECHNOLOGY_KEYWORDS: KeywordSet = &[
    "technology", "tech", "gadget", "gadgets", "ai", "software", "startup", "innovation",
];
const BUSINESS_KEYWORDS: KeywordSet = &[
    "business", "economy", "market", "finance", "stock", "company",
];
const HEALTH_KEYWORDS: KeywordSet = &[
    "health", "medical", "medicine", "doctor", "hospital", "covid", "vaccine",
];

// Priority order is significant: greeting first, then topics in declaration
// order. Only non-payload variants appear here; `Search` is the fallthrough.
const INTENT_TABLE: &[(Intent, KeywordSet)] = &[
    (Intent::Greeting, GREETING_KEYWORDS),
    (Intent::Trending, TRENDING_KEYWORDS),
    (Intent::Recent, RECENT_KEYWORDS),
    (Intent::Sports, SPORTS_KEYWORDS),
    (Intent::Politics, POLITICS_KEYWORDS),
    (Intent::Entertainment, ENTERTAINMENT_KEYWORDS),
    (Intent::Technology, TECHNOLOGY_KEYWORDS),
    (Intent::Business, BUSINESS_KEYWORDS),
    (Intent::Health, HEALTH_KEYWORDS),
];

/// Maps a free-text message to an intent. Total: always returns a value,
/// never errors, no side effects.
pub fn classify(message: &str) -> Intent {
    let trimmed = message.trim();
    let lowered = trimmed.to_lowercase();

    // Single-word keywords match whole tokens so "shipping" does not trigger
    // the "hi" greeting; multi-word keywords fall back to substring search.
    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for (intent, keywords) in INTENT_TABLE {
        let matched = keywords.iter().any(|kw| {
            if kw.contains(' ') {
                lowered.contains(kw)
            } else {
                tokens.iter().any(|t| t == kw)
            }
        });
        if matched {
            return intent.clone();
        }
    }

    Intent::Search(trimmed.to_string())
}
