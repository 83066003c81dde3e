use crate::item::WorkItem;
use crate::item_validation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn validate_items(items: &[WorkItem]) -> PersistenceResult<()> {
    item_validation::validate_item_collection(items)
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))
}

pub mod file;

pub use file::{
    import_items_from_csv, import_items_from_csv_reader, load_items_from_csv,
    load_items_from_csv_reader, load_project_from_csv, load_project_from_json,
    save_project_to_csv, save_project_to_json,
};
