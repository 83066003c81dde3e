use super::aggregate::{CategoryWorkload, total_team_days};
use crate::clamp;
use crate::metadata::ProjectWindow;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Calendar range assigned to one category for a single scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub category: String,
    pub order: u32,
    pub team_days: u32,
    pub item_count: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CategorySlot {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn duration_days(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / MILLIS_PER_DAY
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

/// Splits the project window across categories in proportion to their team-days.
///
/// `workloads` must already be in phase order (see
/// [`aggregate_categories`](super::aggregate::aggregate_categories)). Slots are
/// contiguous and the last one ends exactly at the project end. Returns an
/// empty list when the window is not schedulable.
pub fn allocate_slots(workloads: &[CategoryWorkload], window: &ProjectWindow) -> Vec<CategorySlot> {
    if !window.is_schedulable() || workloads.is_empty() {
        tracing::debug!(
            start = %window.start,
            end = %window.end,
            categories = workloads.len(),
            "nothing to allocate"
        );
        return Vec::new();
    }

    let total_ms = window.total_duration().num_milliseconds() as f64;
    let total_team_days = total_team_days(workloads) as f64;
    let project_end = window.end_instant();
    let last_idx = workloads.len() - 1;

    let mut cursor = window.start_instant();
    let mut slots = Vec::with_capacity(workloads.len());
    for (idx, workload) in workloads.iter().enumerate() {
        let ratio = clamp::share_of(f64::from(workload.team_days), total_team_days, workloads.len());
        let end = if idx == last_idx {
            project_end
        } else {
            // truncated to whole milliseconds, then kept inside the window
            let duration = TimeDelta::milliseconds((total_ms * ratio) as i64);
            (cursor + duration).min(project_end)
        };
        slots.push(CategorySlot {
            category: workload.category.clone(),
            order: workload.order,
            team_days: workload.team_days,
            item_count: workload.item_count,
            start: cursor,
            end,
        });
        cursor = end;
    }
    slots
}
