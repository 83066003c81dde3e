pub mod batch;
pub mod calculations;
pub mod clamp;
pub mod config;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod item;
pub mod item_validation;
pub mod metadata;
pub mod persistence;
pub mod planner;
pub mod rates;
pub mod report;
pub mod schedule;
pub mod sequence;

pub use batch::{BatchOutcome, plan_projects};
pub use calculations::{CategorySlot, CategoryWorkload, CrewRecommendation, estimate_team_days};
pub use config::{ConfigError, EstimatorConfig, ProductivityRate, SequenceRule, UnitRate};
pub use item::WorkItem;
pub use item_validation::ItemValidationError;
pub use metadata::{ProjectMetadata, ProjectMetadataError, ProjectWindow};
pub use persistence::{
    PersistenceError, import_items_from_csv, import_items_from_csv_reader, load_items_from_csv,
    load_items_from_csv_reader, load_project_from_csv, load_project_from_json,
    save_project_to_csv, save_project_to_json,
};
pub use planner::{SchedulePlan, ScheduleOptions, ScheduleSummary, generate_schedule, plan};
pub use report::{CategoryBreakdown, SchedulePreview, ScheduleReport, preview_schedule};
pub use schedule::Project;
pub use sequence::{SequencePosition, sequence_for};
