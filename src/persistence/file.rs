use super::{PersistenceError, PersistenceResult};
use crate::{EstimatorConfig, Project, ProjectMetadata, WorkItem};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const METADATA_ROW_NAME: &str = "__metadata__";

#[derive(Serialize, Deserialize)]
struct ProjectSnapshot {
    metadata: ProjectMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<EstimatorConfig>,
    items: Vec<WorkItem>,
}

impl ProjectSnapshot {
    fn from_project(project: &Project) -> PersistenceResult<Self> {
        super::validate_items(project.items())?;
        Ok(Self {
            metadata: project.metadata().clone(),
            config: Some(project.config().clone()),
            items: project.items().to_vec(),
        })
    }

    fn into_project(self) -> PersistenceResult<Project> {
        build_project(self.metadata, self.config, self.items)
    }
}

fn build_project(
    metadata: ProjectMetadata,
    config: Option<EstimatorConfig>,
    items: Vec<WorkItem>,
) -> PersistenceResult<Project> {
    metadata
        .validate()
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    let config = config.unwrap_or_default();
    config
        .validate()
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    super::validate_items(&items)?;
    Ok(Project::from_parts(metadata, config, items))
}

pub fn save_project_to_json<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    let snapshot = ProjectSnapshot::from_project(project)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_project_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let file = File::open(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_reader(file)?;
    snapshot.into_project()
}

/// One spreadsheet row. Every column is text so blank cells survive a round trip.
#[derive(Default, Serialize, Deserialize)]
struct ItemCsvRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    volume: String,
    #[serde(default)]
    unit: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    progress: String,
    #[serde(default)]
    metadata_json: String,
    #[serde(default)]
    config_json: String,
}

impl From<&WorkItem> for ItemCsvRecord {
    fn from(item: &WorkItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            volume: item.volume.to_string(),
            unit: item.unit.clone().unwrap_or_default(),
            start_date: format_date(item.start_date),
            end_date: format_date(item.end_date),
            progress: item.progress.map(|p| p.to_string()).unwrap_or_default(),
            ..Self::default()
        }
    }
}

impl ItemCsvRecord {
    fn metadata_row(project: &Project) -> PersistenceResult<Self> {
        Ok(Self {
            name: METADATA_ROW_NAME.to_string(),
            metadata_json: serde_json::to_string(project.metadata())?,
            config_json: serde_json::to_string(project.config())?,
            ..Self::default()
        })
    }

    fn is_metadata_row(&self) -> bool {
        !self.metadata_json.trim().is_empty()
    }

    fn explicit_id(&self) -> Option<&str> {
        let id = self.id.trim();
        (!id.is_empty()).then_some(id)
    }

    /// `taken` holds every id already in use; a generated `item-<n>` starts
    /// at `row + offset` and moves past taken ids.
    fn into_item(
        self,
        row: usize,
        offset: usize,
        taken: &mut HashSet<String>,
    ) -> PersistenceResult<WorkItem> {
        let volume = self.volume.trim().parse::<f64>().map_err(|_| {
            PersistenceError::InvalidData(format!(
                "row {row}: invalid volume '{}'",
                self.volume
            ))
        })?;
        let id = match self.explicit_id() {
            Some(id) => id.to_string(),
            None => {
                let mut n = row + offset;
                while taken.contains(&format!("item-{n}")) {
                    n += 1;
                }
                let id = format!("item-{n}");
                taken.insert(id.clone());
                id
            }
        };
        let unit = self.unit.trim();
        Ok(WorkItem {
            id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            volume,
            unit: (!unit.is_empty()).then(|| unit.to_string()),
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            progress: parse_f64(&self.progress)?,
        })
    }
}

pub fn save_project_to_csv<P: AsRef<Path>>(project: &Project, path: P) -> PersistenceResult<()> {
    super::validate_items(project.items())?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.serialize(ItemCsvRecord::metadata_row(project)?)?;
    for item in project.items() {
        writer.serialize(ItemCsvRecord::from(item))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_project_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Project> {
    let file = File::open(path)?;
    let (metadata_row, items) = read_csv(file)?;
    if items.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no items".into(),
        ));
    }

    let (metadata, config) = match metadata_row {
        Some(record) => {
            let metadata = serde_json::from_str(&record.metadata_json).map_err(|err| {
                PersistenceError::InvalidData(format!("invalid metadata json: {err}"))
            })?;
            let config = if record.config_json.trim().is_empty() {
                None
            } else {
                Some(serde_json::from_str(&record.config_json).map_err(|err| {
                    PersistenceError::InvalidData(format!("invalid config json: {err}"))
                })?)
            };
            (metadata, config)
        }
        None => (ProjectMetadata::default(), None),
    };
    build_project(metadata, config, items)
}

/// Reads a plain item list (a RAB export). A metadata row, if present, is ignored.
pub fn load_items_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<WorkItem>> {
    let file = File::open(path)?;
    load_items_from_csv_reader(file)
}

pub fn load_items_from_csv_reader<R: Read>(reader: R) -> PersistenceResult<Vec<WorkItem>> {
    let (_, items) = read_csv(reader)?;
    super::validate_items(&items)?;
    Ok(items)
}

/// Adds an item list to `project`.
///
/// Rows without an id get `item-<n>` numbers after the project's own items.
/// An explicit id that already exists in the project rejects the whole file,
/// and nothing is added. Returns the number of imported items.
pub fn import_items_from_csv<P: AsRef<Path>>(
    project: &mut Project,
    path: P,
) -> PersistenceResult<usize> {
    let file = File::open(path)?;
    import_items_from_csv_reader(project, file)
}

pub fn import_items_from_csv_reader<R: Read>(
    project: &mut Project,
    reader: R,
) -> PersistenceResult<usize> {
    let (_, records) = read_records(reader)?;
    if let Some(id) = records
        .iter()
        .filter_map(ItemCsvRecord::explicit_id)
        .find(|id| project.find_item(id).is_some())
    {
        return Err(PersistenceError::InvalidData(format!(
            "item {id} already exists in the project"
        )));
    }

    let reserved = project.items().iter().map(|item| item.id.clone());
    let items = records_into_items(records, project.items().len(), reserved)?;
    super::validate_items(&items)?;
    let count = items.len();
    for item in items {
        project
            .upsert_item(item)
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    }
    tracing::info!(items = count, "imported items into project");
    Ok(count)
}

fn read_csv<R: Read>(reader: R) -> PersistenceResult<(Option<ItemCsvRecord>, Vec<WorkItem>)> {
    let (metadata_row, records) = read_records(reader)?;
    let items = records_into_items(records, 0, std::iter::empty())?;
    tracing::debug!(items = items.len(), "read items from csv");
    Ok((metadata_row, items))
}

fn read_records<R: Read>(
    reader: R,
) -> PersistenceResult<(Option<ItemCsvRecord>, Vec<ItemCsvRecord>)> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut metadata_row = None;
    let mut records = Vec::new();
    for record in reader.deserialize::<ItemCsvRecord>() {
        let record = record?;
        if record.is_metadata_row() {
            if metadata_row.is_some() {
                return Err(PersistenceError::InvalidData(
                    "CSV file contained multiple metadata rows".into(),
                ));
            }
            metadata_row = Some(record);
            continue;
        }
        records.push(record);
    }
    Ok((metadata_row, records))
}

fn records_into_items(
    records: Vec<ItemCsvRecord>,
    offset: usize,
    reserved: impl Iterator<Item = String>,
) -> PersistenceResult<Vec<WorkItem>> {
    let mut taken: HashSet<String> = reserved.collect();
    taken.extend(
        records
            .iter()
            .filter_map(ItemCsvRecord::explicit_id)
            .map(str::to_string),
    );
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| record.into_item(idx + 1, offset, &mut taken))
        .collect()
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn parse_date(value: &str) -> PersistenceResult<Option<NaiveDate>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|err| PersistenceError::InvalidData(format!("invalid date '{trimmed}': {err}")))
}

fn parse_f64(value: &str) -> PersistenceResult<Option<f64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|err| PersistenceError::InvalidData(format!("invalid number '{trimmed}': {err}")))
}
