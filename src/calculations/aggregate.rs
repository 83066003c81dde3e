use super::duration::estimate_team_days;
use crate::config::EstimatorConfig;
use crate::item::WorkItem;
use crate::sequence::{compare_categories, sequence_for};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summed workload of all items sharing one category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWorkload {
    pub category: String,
    pub order: u32,
    pub weight: f64,
    pub team_days: u32,
    pub item_count: usize,
}

/// Groups items by exact category label and returns the groups in phase order.
pub fn aggregate_categories(items: &[WorkItem], config: &EstimatorConfig) -> Vec<CategoryWorkload> {
    let mut by_category: HashMap<&str, CategoryWorkload> = HashMap::new();
    for item in items {
        let team_days = estimate_team_days(item, config);
        let entry = by_category
            .entry(item.category.as_str())
            .or_insert_with(|| {
                let position = sequence_for(&item.category, config);
                CategoryWorkload {
                    category: item.category.clone(),
                    order: position.order,
                    weight: position.weight,
                    team_days: 0,
                    item_count: 0,
                }
            });
        entry.team_days = entry.team_days.saturating_add(team_days);
        entry.item_count += 1;
    }

    let mut workloads: Vec<CategoryWorkload> = by_category.into_values().collect();
    workloads.sort_by(|a, b| {
        compare_categories((a.order, &a.category), (b.order, &b.category))
    });
    tracing::debug!(categories = workloads.len(), "aggregated category workloads");
    workloads
}

pub fn total_team_days(workloads: &[CategoryWorkload]) -> u64 {
    workloads.iter().map(|w| u64::from(w.team_days)).sum()
}
