use crate::item::WorkItem;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ItemValidationError {
    message: String,
}

impl ItemValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn validate_item(item: &WorkItem) -> Result<(), ItemValidationError> {
    if item.id.trim().is_empty() {
        return Err(ItemValidationError::new(format!(
            "item '{}' requires a non-empty id",
            item.name
        )));
    }

    if !item.volume.is_finite() || item.volume < 0.0 {
        return Err(ItemValidationError::new(format!(
            "item {} has invalid volume {}",
            item.id, item.volume
        )));
    }

    if let Some(progress) = item.progress {
        if !progress.is_finite() || !(0.0..=100.0).contains(&progress) {
            return Err(ItemValidationError::new(format!(
                "item {} has invalid progress {} (must be between 0 and 100)",
                item.id, progress
            )));
        }
    }

    if let (Some(start), Some(end)) = (item.start_date, item.end_date) {
        if start > end {
            return Err(ItemValidationError::new(format!(
                "item {} starts {} after it ends {}",
                item.id, start, end
            )));
        }
    }

    Ok(())
}

pub fn validate_item_collection(items: &[WorkItem]) -> Result<(), ItemValidationError> {
    let mut seen_ids = HashSet::with_capacity(items.len());
    for item in items {
        if !seen_ids.insert(item.id.as_str()) {
            return Err(ItemValidationError::new(format!(
                "duplicate item id {}",
                item.id
            )));
        }
        validate_item(item)?;
    }
    Ok(())
}
