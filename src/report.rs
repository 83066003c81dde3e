use crate::calculations::{
    CrewRecommendation, aggregate_categories, allocate_slots, recommend_crew,
    recommend_project_crew, total_team_days,
};
use crate::config::EstimatorConfig;
use crate::item::WorkItem;
use crate::metadata::ProjectWindow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub order: u32,
    pub team_days: u32,
    pub allocated_days: f64,
    pub crew: CrewRecommendation,
}

impl CategoryBreakdown {
    pub fn weeks(&self) -> f64 {
        self.allocated_days / 7.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub window: ProjectWindow,
    pub total_days: i64,
    pub total_team_days: u64,
    pub crew: CrewRecommendation,
    pub categories: Vec<CategoryBreakdown>,
}

impl ScheduleReport {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.categories.len() + 4);
        lines.push(format!(
            "Total duration: {} days ({:.1} weeks)",
            self.total_days,
            self.total_days as f64 / 7.0
        ));
        lines.push(format!("Total workload: {} team-days", self.total_team_days));
        lines.push(format!("Recommended average crew: {}", self.crew));
        lines.push("Breakdown by category:".to_string());
        for category in &self.categories {
            lines.push(format!(
                "- {}: {:.1} weeks, {} team-days, {}",
                category.category,
                category.weeks(),
                category.team_days,
                category.crew
            ));
        }
        lines
    }
}

/// Outcome of a preview run. Never an error: degenerate input becomes a
/// one-line explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SchedulePreview {
    Report(ScheduleReport),
    NoItems,
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}

impl SchedulePreview {
    pub fn lines(&self) -> Vec<String> {
        match self {
            SchedulePreview::Report(report) => report.lines(),
            SchedulePreview::NoItems => vec!["No work items to schedule.".to_string()],
            SchedulePreview::InvalidWindow { start, end } => vec![format!(
                "Project end date {end} must be after start date {start}."
            )],
        }
    }

    pub fn report(&self) -> Option<&ScheduleReport> {
        match self {
            SchedulePreview::Report(report) => Some(report),
            _ => None,
        }
    }
}

pub fn preview_schedule(
    window: &ProjectWindow,
    items: &[WorkItem],
    config: &EstimatorConfig,
) -> SchedulePreview {
    if !window.is_schedulable() {
        return SchedulePreview::InvalidWindow {
            start: window.start,
            end: window.end,
        };
    }
    if items.is_empty() {
        return SchedulePreview::NoItems;
    }

    let workloads = aggregate_categories(items, config);
    let slots = allocate_slots(&workloads, window);
    let categories = slots
        .iter()
        .map(|slot| {
            let allocated_days = slot.duration_days();
            CategoryBreakdown {
                category: slot.category.clone(),
                order: slot.order,
                team_days: slot.team_days,
                allocated_days,
                crew: recommend_crew(f64::from(slot.team_days), allocated_days, config.team_size),
            }
        })
        .collect();

    let total_team_days = total_team_days(&workloads);
    let total_days = window.total_days();
    SchedulePreview::Report(ScheduleReport {
        window: *window,
        total_days,
        total_team_days,
        crew: recommend_project_crew(total_team_days, total_days, config.team_size),
        categories,
    })
}
