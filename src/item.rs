use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_UNIT: &str = "ls";

/// A single line of a project's bill of quantities (RAB).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub name: String,
    /// Free-text category label. Composite "Main - Sub" labels are kept as-is.
    pub category: String,
    pub volume: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Progress percentage, 0 to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl WorkItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        volume: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            volume,
            unit: Some(unit.into()),
            start_date: None,
            end_date: None,
            progress: None,
        }
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Unit label with blank or missing units treated as lump sum.
    pub fn unit_or_default(&self) -> &str {
        match self.unit.as_deref() {
            Some(unit) if !unit.trim().is_empty() => unit,
            _ => DEFAULT_UNIT,
        }
    }

    pub fn has_schedule(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }
}
