use crate::calculations::{CategorySlot, estimate_team_days};
use crate::config::EstimatorConfig;
use crate::item::WorkItem;
use crate::item_validation::{self, ItemValidationError};
use crate::metadata::{ProjectMetadata, ProjectMetadataError};
use crate::planner::{self, ScheduleOptions, ScheduleSummary};
use crate::report::{self, SchedulePreview};
use chrono::NaiveDate;
use polars::prelude::*;

/// A project's item list plus the window and estimator tables it is scheduled with.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    metadata: ProjectMetadata,
    config: EstimatorConfig,
    items: Vec<WorkItem>,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new() -> Self {
        Self::new_with_metadata(ProjectMetadata::default())
    }

    pub fn new_with_metadata(metadata: ProjectMetadata) -> Self {
        Self::from_parts(metadata, EstimatorConfig::default(), Vec::new())
    }

    /// Assembles a project without validation. Used by the loaders, which
    /// validate before calling.
    pub fn from_parts(
        metadata: ProjectMetadata,
        config: EstimatorConfig,
        items: Vec<WorkItem>,
    ) -> Self {
        Self {
            metadata,
            config,
            items,
        }
    }

    pub fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn set_config(&mut self, config: EstimatorConfig) {
        self.config = config;
    }

    pub fn set_metadata(&mut self, metadata: ProjectMetadata) -> Result<(), ProjectMetadataError> {
        metadata.validate()?;
        self.metadata = metadata;
        Ok(())
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.metadata.name = name.into();
    }

    pub fn set_project_description(&mut self, description: impl Into<String>) {
        self.metadata.description = description.into();
    }

    pub fn set_project_dates(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), ProjectMetadataError> {
        let mut metadata = self.metadata.clone();
        metadata.start_date = start;
        metadata.end_date = end;
        self.set_metadata(metadata)
    }

    pub fn find_item(&self, id: &str) -> Option<&WorkItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Inserts a new item or replaces the one with the same id in place.
    pub fn upsert_item(&mut self, item: WorkItem) -> Result<(), ItemValidationError> {
        item_validation::validate_item(&item)?;
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
        Ok(())
    }

    pub fn delete_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn set_item_dates(
        &mut self,
        id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool, ItemValidationError> {
        let Some(existing) = self.find_item(id) else {
            return Ok(false);
        };
        let updated = existing.clone().with_dates(start, end);
        self.upsert_item(updated)?;
        Ok(true)
    }

    pub fn clear_item_dates(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.start_date = None;
                item.end_date = None;
                true
            }
            None => false,
        }
    }

    /// Next free `item-<n>` identifier.
    pub fn next_item_id(&self) -> String {
        let mut n = self.items.len() + 1;
        loop {
            let candidate = format!("item-{n}");
            if self.find_item(&candidate).is_none() {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn estimate_item(&self, id: &str) -> Option<u32> {
        self.find_item(id)
            .map(|item| estimate_team_days(item, &self.config))
    }

    /// Replaces the item list with its scheduled version.
    pub fn schedule(&mut self, options: ScheduleOptions) -> ScheduleSummary {
        let plan = planner::plan(&self.metadata.window(), &self.items, &self.config, options);
        self.items = plan.items;
        plan.summary
    }

    pub fn slots(&self) -> Vec<CategorySlot> {
        planner::category_slots(&self.metadata.window(), &self.items, &self.config)
    }

    pub fn preview(&self) -> SchedulePreview {
        report::preview_schedule(&self.metadata.window(), &self.items, &self.config)
    }

    /// Item table with estimated team-days, in current item order.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let ids: Vec<&str> = self.items.iter().map(|i| i.id.as_str()).collect();
        let names: Vec<&str> = self.items.iter().map(|i| i.name.as_str()).collect();
        let categories: Vec<&str> = self.items.iter().map(|i| i.category.as_str()).collect();
        let volumes: Vec<f64> = self.items.iter().map(|i| i.volume).collect();
        let units: Vec<&str> = self.items.iter().map(|i| i.unit_or_default()).collect();
        let team_days: Vec<i64> = self
            .items
            .iter()
            .map(|i| i64::from(estimate_team_days(i, &self.config)))
            .collect();
        let progress: Vec<Option<f64>> = self.items.iter().map(|i| i.progress).collect();

        let columns = vec![
            Series::new(PlSmallStr::from_static("id"), ids).into_column(),
            Series::new(PlSmallStr::from_static("name"), names).into_column(),
            Series::new(PlSmallStr::from_static("category"), categories).into_column(),
            Series::new(PlSmallStr::from_static("volume"), volumes).into_column(),
            Series::new(PlSmallStr::from_static("unit"), units).into_column(),
            Series::new(PlSmallStr::from_static("team_days"), team_days).into_column(),
            Self::date_series("start_date", self.items.iter().map(|i| i.start_date))?
                .into_column(),
            Self::date_series("end_date", self.items.iter().map(|i| i.end_date))?.into_column(),
            Series::new(PlSmallStr::from_static("progress"), progress).into_column(),
        ];
        DataFrame::new(columns)
    }

    fn date_series(
        name: &str,
        dates: impl Iterator<Item = Option<NaiveDate>>,
    ) -> PolarsResult<Series> {
        let data: Vec<Option<i32>> = dates.map(|d| d.map(Self::date_to_i32)).collect();
        Series::new(name.into(), data).cast(&DataType::Date)
    }

    fn date_to_i32(date: NaiveDate) -> i32 {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default();
        (date - epoch).num_days() as i32
    }
}
