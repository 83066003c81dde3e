use super::allocation::CategorySlot;
use crate::item::WorkItem;
use std::collections::HashMap;

/// Gives every item its category slot's dates.
///
/// All items of a category share the slot's start and end. With
/// `keep_existing`, items that already have both dates are left untouched.
/// Items whose category has no slot pass through unchanged. The result is
/// stably sorted by start date with undated items last.
pub fn assign_item_dates(
    items: &[WorkItem],
    slots: &[CategorySlot],
    keep_existing: bool,
) -> Vec<WorkItem> {
    let by_category: HashMap<&str, &CategorySlot> = slots
        .iter()
        .map(|slot| (slot.category.as_str(), slot))
        .collect();

    let mut assigned: Vec<WorkItem> = items
        .iter()
        .map(|item| {
            if keep_existing && item.has_schedule() {
                return item.clone();
            }
            match by_category.get(item.category.as_str()) {
                Some(slot) => {
                    let mut item = item.clone();
                    item.start_date = Some(slot.start_date());
                    item.end_date = Some(slot.end_date());
                    item
                }
                None => {
                    tracing::warn!(
                        item = %item.id,
                        category = %item.category,
                        "no slot for category, leaving item unscheduled"
                    );
                    item.clone()
                }
            }
        })
        .collect();

    // Vec::sort_by_key is stable, so equal start dates keep input order
    assigned.sort_by_key(|item| (item.start_date.is_none(), item.start_date));
    assigned
}
