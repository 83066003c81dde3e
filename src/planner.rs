//! Full-schedule mode: workload estimate, slot allocation and date assignment
//! in one call.

use crate::calculations::{CategorySlot, aggregate_categories, allocate_slots, assign_item_dates};
use crate::config::EstimatorConfig;
use crate::item::WorkItem;
use crate::metadata::ProjectWindow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleOptions {
    /// Leave items that already carry both dates as they are.
    #[serde(default)]
    pub keep_existing: bool,
}

impl ScheduleOptions {
    pub fn preserving_existing() -> Self {
        Self {
            keep_existing: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub item_count: usize,
    pub category_count: usize,
    pub rescheduled_count: usize,
    pub kept_count: usize,
    pub unscheduled_count: usize,
    pub finish: Option<NaiveDate>,
}

impl ScheduleSummary {
    fn from_items(items: &[WorkItem], category_count: usize, kept_count: usize) -> Self {
        let unscheduled_count = items.iter().filter(|item| !item.has_schedule()).count();
        Self {
            item_count: items.len(),
            category_count,
            rescheduled_count: items
                .len()
                .saturating_sub(unscheduled_count + kept_count),
            kept_count,
            unscheduled_count,
            finish: items.iter().filter_map(|item| item.end_date).max(),
        }
    }

    /// Summary of a run that left every item as it was.
    fn untouched(items: &[WorkItem], keep_existing: bool) -> Self {
        let dated = items.iter().filter(|item| item.has_schedule()).count();
        Self {
            item_count: items.len(),
            category_count: 0,
            rescheduled_count: 0,
            kept_count: if keep_existing { dated } else { 0 },
            unscheduled_count: items.len() - dated,
            finish: items.iter().filter_map(|item| item.end_date).max(),
        }
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("items={}", self.item_count));
        parts.push(format!("categories={}", self.category_count));
        parts.push(format!("scheduled={}", self.rescheduled_count));
        if self.kept_count > 0 {
            parts.push(format!("kept={}", self.kept_count));
        }
        if self.unscheduled_count > 0 {
            parts.push(format!("unscheduled={}", self.unscheduled_count));
        }
        if let Some(date) = self.finish {
            parts.push(format!("finish={}", date));
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePlan {
    pub items: Vec<WorkItem>,
    pub slots: Vec<CategorySlot>,
    pub summary: ScheduleSummary,
}

/// Schedules `items` inside `window`.
///
/// An unschedulable window or an empty item list yields the items unchanged
/// and no slots.
pub fn plan(
    window: &ProjectWindow,
    items: &[WorkItem],
    config: &EstimatorConfig,
    options: ScheduleOptions,
) -> SchedulePlan {
    if !window.is_schedulable() || items.is_empty() {
        tracing::debug!(
            start = %window.start,
            end = %window.end,
            items = items.len(),
            "schedule skipped, returning items unchanged"
        );
        return SchedulePlan {
            items: items.to_vec(),
            slots: Vec::new(),
            summary: ScheduleSummary::untouched(items, options.keep_existing),
        };
    }

    let workloads = aggregate_categories(items, config);
    let slots = allocate_slots(&workloads, window);
    let scheduled = assign_item_dates(items, &slots, options.keep_existing);

    let kept_count = if options.keep_existing {
        items.iter().filter(|item| item.has_schedule()).count()
    } else {
        0
    };
    let summary = ScheduleSummary::from_items(&scheduled, slots.len(), kept_count);
    tracing::info!(
        items = summary.item_count,
        categories = summary.category_count,
        kept = summary.kept_count,
        "schedule generated"
    );

    SchedulePlan {
        items: scheduled,
        slots,
        summary,
    }
}

/// Scheduled copy of `items`, sorted by assigned start date.
pub fn generate_schedule(
    window: &ProjectWindow,
    items: &[WorkItem],
    config: &EstimatorConfig,
    options: ScheduleOptions,
) -> Vec<WorkItem> {
    plan(window, items, config, options).items
}

/// Category slots only, without touching the items.
pub fn category_slots(
    window: &ProjectWindow,
    items: &[WorkItem],
    config: &EstimatorConfig,
) -> Vec<CategorySlot> {
    let workloads = aggregate_categories(items, config);
    allocate_slots(&workloads, window)
}
