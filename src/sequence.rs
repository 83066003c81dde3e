//! Standard construction phase order.
//!
//! Category labels are matched after [`normalize_category`], so keywords here
//! are lowercase ASCII letters only.

use crate::config::EstimatorConfig;
use std::cmp::Ordering;

pub const UNMATCHED_ORDER: u32 = 999;
pub const UNMATCHED_WEIGHT: f64 = 10.0;

/// `(keyword, order, nominal weight)`. First match wins.
pub const SEQUENCE_RULES: &[(&str, u32, f64)] = &[
    ("persiapan", 1, 5.0),
    ("tanah", 2, 10.0),
    ("galian", 2, 10.0),
    ("pondasi", 3, 15.0),
    ("struktur", 4, 25.0),
    ("beton", 4, 25.0),
    ("dinding", 5, 15.0),
    ("pasangan", 5, 15.0),
    ("kusen", 6, 8.0),
    ("pintu", 6, 8.0),
    ("jendela", 6, 8.0),
    ("atap", 7, 12.0),
    ("plafon", 8, 8.0),
    ("lantai", 9, 10.0),
    ("keramik", 9, 10.0),
    ("sanitasi", 10, 8.0),
    ("plumbing", 10, 8.0),
    ("listrik", 10, 8.0),
    ("elektrikal", 10, 8.0),
    ("mekanikal", 10, 8.0),
    ("finishing", 11, 10.0),
    ("pengecatan", 11, 10.0),
    ("lainlain", 12, 5.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencePosition {
    pub order: u32,
    /// Nominal share of the project duration. Superseded by workload weighting.
    pub weight: f64,
}

/// Lowercases the label and keeps ASCII letters only.
pub fn normalize_category(category: &str) -> String {
    category
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect()
}

pub fn sequence_for(category: &str, config: &EstimatorConfig) -> SequencePosition {
    let normalized = normalize_category(category);
    config
        .sequence_rules
        .iter()
        .find(|rule| !rule.keyword.is_empty() && normalized.contains(rule.keyword.as_str()))
        .map(|rule| SequencePosition {
            order: rule.order,
            weight: rule.weight,
        })
        .unwrap_or(SequencePosition {
            order: config.unmatched_order,
            weight: config.unmatched_weight,
        })
}

/// Phase order first, raw label second.
pub fn compare_categories(a: (u32, &str), b: (u32, &str)) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1))
}
