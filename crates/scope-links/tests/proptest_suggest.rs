use proptest::prelude::*;
use scope_core::config::LinkingConfig;
use scope_core::inventory::ContentInventory;
use scope_core::model::{Category, ContentItem, KeywordSet, Status};
use scope_links::{LinkReason, suggest_links};
use std::collections::HashSet;

const KEYWORDS: [&str; 5] = ["odds", "kalshi", "fed", "polls", "apps"];

fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Learn),
        Just(Category::Markets),
        Just(Category::Best)
    ]
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        3 => Just(Status::Published),
        1 => Just(Status::Draft),
        1 => Just(Status::Rejected)
    ]
}

fn arb_keywords() -> impl Strategy<Value = KeywordSet> {
    proptest::sample::subsequence(KEYWORDS.to_vec(), 0..=KEYWORDS.len())
        .prop_map(|kws| kws.into_iter().collect())
}

fn arb_item() -> impl Strategy<Value = ContentItem> {
    (arb_category(), 0u8..12, arb_status(), arb_keywords()).prop_map(
        |(category, n, status, target_keywords)| ContentItem {
            slug: format!("page-{n}"),
            category,
            title: format!("Page {n}"),
            status,
            target_keywords,
            outbound_links: Vec::new(),
            word_count: 0,
        },
    )
}

fn arb_config() -> impl Strategy<Value = LinkingConfig> {
    (
        proptest::collection::vec((arb_category(), 0u8..12), 0..4),
        1usize..12,
        0usize..5,
        0usize..3,
    )
        .prop_map(|(core, max, edu, com)| LinkingConfig {
            always_link_to: core
                .into_iter()
                .map(|(c, n)| format!("/{c}/page-{n}"))
                .collect(),
            max_internal_links_per_article: max,
            educational_cap: edu,
            commercial_cap: com,
            ..LinkingConfig::default()
        })
}

proptest! {
    #[test]
    fn suggestions_never_repeat_a_target(
        items in proptest::collection::vec(arb_item(), 0..30),
        category in arb_category(),
        keywords in arb_keywords(),
        config in arb_config(),
    ) {
        let inventory = ContentInventory::from_items(items);
        let list = suggest_links(&inventory, category, &keywords, &config);

        let unique: HashSet<&str> = list.iter().map(|s| s.target_url.as_str()).collect();
        prop_assert_eq!(unique.len(), list.len());
        prop_assert!(list.len() <= config.max_internal_links_per_article);
        for s in &list {
            let item = inventory.get(&s.target_url);
            prop_assert!(item.is_some_and(ContentItem::is_published));
        }
    }

    #[test]
    fn cross_category_targets_come_from_the_leading_window(
        items in proptest::collection::vec(arb_item(), 0..30),
        keywords in arb_keywords(),
        config in arb_config(),
    ) {
        let inventory = ContentInventory::from_items(items);
        let list = suggest_links(&inventory, Category::Markets, &keywords, &config);

        for (category, cap, reason) in [
            (Category::Learn, config.educational_cap, LinkReason::CrossCategoryPrimary),
            (Category::Best, config.commercial_cap, LinkReason::CrossCategorySecondary),
        ] {
            let window: HashSet<String> = inventory
                .published()
                .filter(|i| i.category == category)
                .take(cap)
                .map(ContentItem::url)
                .collect();
            for s in list.iter().filter(|s| s.reason == reason) {
                prop_assert!(window.contains(&s.target_url), "{} outside window", s.target_url);
            }
        }
    }

    #[test]
    fn suggestions_are_deterministic(
        items in proptest::collection::vec(arb_item(), 0..30),
        category in arb_category(),
        keywords in arb_keywords(),
        config in arb_config(),
    ) {
        let inventory = ContentInventory::from_items(items);
        let first = suggest_links(&inventory, category, &keywords, &config);
        let second = suggest_links(&inventory, category, &keywords, &config);
        prop_assert_eq!(first, second);
    }
}
