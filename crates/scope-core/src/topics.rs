//! Candidate topic intake and the core-topic gap catalogue.

use std::collections::HashSet;
use tracing::{debug, warn};

use crate::inventory::ContentInventory;
use crate::model::{CandidateTopic, Category, KeywordSet, is_valid_slug};

/// Parse the discovery step's output into candidate topics.
///
/// Accepts a JSON array, optionally wrapped in a markdown code fence. A
/// document that is not a JSON array yields no candidates; individual
/// records that do not describe a topic are dropped. Both cases log a
/// warning and never fail.
#[must_use]
pub fn parse_candidates(raw: &str) -> Vec<CandidateTopic> {
    let body = strip_code_fence(raw);
    let values: Vec<serde_json::Value> = match serde_json::from_str(body) {
        Ok(values) => values,
        Err(e) => {
            warn!(error = %e, "candidate document is not a JSON array; no candidates");
            return Vec::new();
        }
    };

    let total = values.len();
    let candidates: Vec<CandidateTopic> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            match serde_json::from_value::<CandidateTopic>(value) {
                Ok(topic) if topic.slug.trim().is_empty() || topic.title.trim().is_empty() => {
                    warn!(index = idx, "dropping candidate with empty slug or title");
                    None
                }
                Ok(topic) if !is_valid_slug(&topic.slug) => {
                    warn!(index = idx, slug = %topic.slug, "dropping candidate with invalid slug");
                    None
                }
                Ok(topic) => Some(topic),
                Err(e) => {
                    warn!(index = idx, error = %e, "dropping malformed candidate");
                    None
                }
            }
        })
        .collect();

    debug!(total, kept = candidates.len(), "candidates parsed");
    candidates
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let Some((_, rest)) = trimmed.split_once('\n') else {
        return "";
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

struct CoreTopic {
    slug: &'static str,
    title: &'static str,
    priority: i64,
    keywords: [&'static str; 2],
}

const CORE_TOPICS: [CoreTopic; 12] = [
    CoreTopic {
        slug: "what-are-prediction-markets",
        title: "What Are Prediction Markets? A Complete Guide",
        priority: 10,
        keywords: ["what are prediction markets", "prediction markets explained"],
    },
    CoreTopic {
        slug: "how-prediction-markets-work",
        title: "How Do Prediction Markets Work?",
        priority: 10,
        keywords: ["how prediction markets work", "prediction market mechanics"],
    },
    CoreTopic {
        slug: "prediction-markets-vs-polls",
        title: "Prediction Markets vs. Polls: Which Is More Accurate?",
        priority: 9,
        keywords: ["prediction markets vs polls", "are prediction markets accurate"],
    },
    CoreTopic {
        slug: "are-prediction-markets-legal",
        title: "Are Prediction Markets Legal in the US?",
        priority: 9,
        keywords: ["are prediction markets legal", "prediction market regulation"],
    },
    CoreTopic {
        slug: "how-to-read-prediction-market-odds",
        title: "How to Read Prediction Market Odds (Beginner's Guide)",
        priority: 9,
        keywords: ["prediction market odds", "how to read prediction markets"],
    },
    CoreTopic {
        slug: "what-is-kalshi",
        title: "What Is Kalshi? Everything You Need to Know",
        priority: 8,
        keywords: ["what is kalshi", "kalshi explained"],
    },
    CoreTopic {
        slug: "what-is-polymarket",
        title: "What Is Polymarket? A Complete Beginner's Guide",
        priority: 8,
        keywords: ["what is polymarket", "polymarket explained"],
    },
    CoreTopic {
        slug: "prediction-markets-history",
        title: "The History of Prediction Markets: From Iowa to Kalshi",
        priority: 6,
        keywords: ["prediction market history", "history of prediction markets"],
    },
    CoreTopic {
        slug: "prediction-markets-vs-sports-betting",
        title: "Prediction Markets vs. Sports Betting: What's the Difference?",
        priority: 7,
        keywords: ["prediction markets vs sports betting", "prediction markets gambling"],
    },
    CoreTopic {
        slug: "cftc-prediction-markets",
        title: "The CFTC and Prediction Markets: Regulation Explained",
        priority: 6,
        keywords: ["cftc prediction markets", "prediction market regulation"],
    },
    CoreTopic {
        slug: "prediction-market-strategies",
        title: "Prediction Market Trading Strategies for Beginners",
        priority: 7,
        keywords: ["prediction market strategies", "how to trade prediction markets"],
    },
    CoreTopic {
        slug: "prediction-market-taxes",
        title: "Prediction Market Taxes: What You Need to Know",
        priority: 7,
        keywords: ["prediction market taxes", "do i pay taxes on prediction markets"],
    },
];

/// The evergreen `learn` pages every site in this niche needs.
#[must_use]
pub fn core_topics() -> Vec<CandidateTopic> {
    CORE_TOPICS
        .iter()
        .map(|topic| CandidateTopic {
            category: Category::Learn,
            slug: topic.slug.to_string(),
            title: topic.title.to_string(),
            description: String::new(),
            target_keywords: topic.keywords.iter().collect::<KeywordSet>(),
            priority: topic.priority,
            reasoning: "core educational topic".to_string(),
            data_requirements: Vec::new(),
        })
        .collect()
}

/// Core topics with no item in the inventory yet, in any status.
#[must_use]
pub fn content_gaps(inventory: &ContentInventory) -> Vec<CandidateTopic> {
    core_topics()
        .into_iter()
        .filter(|topic| !inventory.contains_url(&topic.url()))
        .collect()
}

/// Append `extra` topics whose URL is not already among `candidates`.
#[must_use]
pub fn merge_candidates(
    mut candidates: Vec<CandidateTopic>,
    extra: impl IntoIterator<Item = CandidateTopic>,
) -> Vec<CandidateTopic> {
    let mut seen: HashSet<String> = candidates.iter().map(CandidateTopic::url).collect();
    for topic in extra {
        if seen.insert(topic.url()) {
            candidates.push(topic);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentItem, Status};

    #[test]
    fn parses_plain_array() {
        let raw = r#"[
            {"bucket": "markets", "slug": "fed-odds", "title": "Fed Odds", "priority": 8},
            {"bucket": "best", "slug": "best-apps", "title": "Best Apps"}
        ]"#;
        let topics = parse_candidates(raw);
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].category, Category::Markets);
        assert_eq!(topics[1].priority, 0);
    }

    #[test]
    fn strips_code_fence() {
        let raw = "```json\n[{\"category\": \"learn\", \"slug\": \"a\", \"title\": \"A\"}]\n```\n";
        assert_eq!(parse_candidates(raw).len(), 1);
    }

    #[test]
    fn garbage_document_yields_nothing() {
        assert!(parse_candidates("Sorry, I cannot help with that.").is_empty());
        assert!(parse_candidates(r#"{"slug": "not-an-array"}"#).is_empty());
        assert!(parse_candidates("").is_empty());
    }

    #[test]
    fn bad_records_are_dropped_individually() {
        let raw = r#"[
            {"category": "news", "slug": "a", "title": "A"},
            {"category": "learn", "title": "missing slug"},
            {"category": "learn", "slug": "  ", "title": "blank slug"},
            {"category": "learn", "slug": "ok", "title": "Ok"}
        ]"#;
        let topics = parse_candidates(raw);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].slug, "ok");
    }

    #[test]
    fn path_like_slugs_are_dropped() {
        let raw = r#"[
            {"category": "learn", "slug": "../x", "title": "Up"},
            {"category": "markets", "slug": "a/b", "title": "Nested"},
            {"category": "best", "slug": "Best-Apps", "title": "Upper"},
            {"category": "best", "slug": "best-apps", "title": "Fine"}
        ]"#;
        let topics = parse_candidates(raw);
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].slug, "best-apps");
    }

    #[test]
    fn catalogue_has_twelve_learn_topics() {
        let topics = core_topics();
        assert_eq!(topics.len(), 12);
        assert!(topics.iter().all(|t| t.category == Category::Learn));
        let unique: HashSet<String> = topics.iter().map(CandidateTopic::url).collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn gaps_exclude_existing_urls_in_any_status() {
        let existing = ContentItem {
            slug: "what-is-kalshi".to_string(),
            category: Category::Learn,
            title: "Kalshi".to_string(),
            status: Status::Draft,
            target_keywords: KeywordSet::new(),
            outbound_links: Vec::new(),
            word_count: 0,
        };
        let inventory = ContentInventory::from_items([existing]);
        let gaps = content_gaps(&inventory);
        assert_eq!(gaps.len(), 11);
        assert!(gaps.iter().all(|g| g.slug != "what-is-kalshi"));
    }

    #[test]
    fn merge_skips_duplicate_urls() {
        let base = parse_candidates(
            r#"[{"category": "learn", "slug": "what-is-kalshi", "title": "Mine", "priority": 1}]"#,
        );
        let merged = merge_candidates(base, core_topics());
        assert_eq!(merged.len(), 12);
        assert_eq!(merged[0].title, "Mine");
    }
}
