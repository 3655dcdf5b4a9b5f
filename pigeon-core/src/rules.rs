//! Merchant auto-categorisation.
//!
//! An ordered table of case-insensitive patterns; the first rule whose
//! pattern matches anywhere in the merchant text decides the category.
//! Order is the tie-break: "Coles Cafe" is groceries, not dining.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::finance::Category;

/// Reason reported when nothing in the table matches
pub const NO_MATCH_REASON: &str = "No rule matched";

/// Result of classifying a merchant string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub reason: &'static str,
}

impl Classification {
    /// True when a rule fired rather than the fallback
    pub fn matched(&self) -> bool {
        self.reason != NO_MATCH_REASON
    }
}

struct Rule {
    pattern: Regex,
    category: Category,
    reason: &'static str,
}

const RULE_TABLE: &[(&str, Category, &str)] = &[
    (
        // ASCII word boundaries: a trailing accented letter does not extend the word
        r"(?i)(?-u:\b)coles(?-u:\b)|(?-u:\b)woolworths(?-u:\b)|(?-u:\b)aldi(?-u:\b)",
        Category::Groceries,
        "Matched supermarket keyword",
    ),
    (
        r"(?i)7[- ]?eleven|cafe|coffee|macca|kfc|starbucks|hungry jacks",
        Category::Dining,
        "Matched cafe/fast food keyword",
    ),
    (
        r"(?i)uber|ola|ptv|myki|tram|train|bus|fuel|bp|caltex",
        Category::Transport,
        "Matched transport keyword",
    ),
    (
        r"(?i)netflix|spotify|steam|cinema|movie",
        Category::Entertainment,
        "Matched entertainment keyword",
    ),
    (r"(?i)rent|landlord", Category::Rent, "Matched rent keyword"),
    (
        r"(?i)aglc|electric|water|gas|internet|telstra|optus|vodafone",
        Category::Bills,
        "Matched utilities/telecom keyword",
    ),
    (
        r"(?i)salary|payroll|employer|wage|stipend",
        Category::Salary,
        "Matched salary keyword",
    ),
];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    RULE_TABLE
        .iter()
        .map(|&(pattern, category, reason)| Rule {
            pattern: Regex::new(pattern).expect("classifier patterns are static and valid"),
            category,
            reason,
        })
        .collect()
});

/// Classify free-text merchant input. Total over all strings, including "".
pub fn classify(merchant: &str) -> Classification {
    let hit = RULES.iter().find(|r| r.pattern.is_match(merchant));

    let result = match hit {
        Some(rule) => Classification {
            category: rule.category,
            reason: rule.reason,
        },
        None => Classification {
            category: Category::Other,
            reason: NO_MATCH_REASON,
        },
    };

    debug!(merchant, category = %result.category, reason = result.reason, "classified merchant");
    result
}
