use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            name: "New Project".to_string(),
            description: "No description".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default(),
        }
    }
}

impl ProjectMetadata {
    pub fn window(&self) -> ProjectWindow {
        ProjectWindow::new(self.start_date, self.end_date)
    }

    pub fn validate(&self) -> Result<(), ProjectMetadataError> {
        if self.start_date >= self.end_date {
            return Err(ProjectMetadataError::StartNotBeforeEnd {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectMetadataError {
    #[error("Project start date {start} must be before project end date {end}.")]
    StartNotBeforeEnd { start: NaiveDate, end: NaiveDate },
}

/// Calendar span available for scheduling. Both ends are taken at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWindow {
    #[serde(rename = "startDate")]
    pub start: NaiveDate,
    #[serde(rename = "endDate")]
    pub end: NaiveDate,
}

impl ProjectWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_schedulable(&self) -> bool {
        self.end > self.start
    }

    pub fn start_instant(&self) -> NaiveDateTime {
        self.start.and_time(chrono::NaiveTime::MIN)
    }

    pub fn end_instant(&self) -> NaiveDateTime {
        self.end.and_time(chrono::NaiveTime::MIN)
    }

    pub fn total_duration(&self) -> TimeDelta {
        self.end_instant() - self.start_instant()
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
