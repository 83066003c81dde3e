use crate::clamp;
use crate::config::EstimatorConfig;
use crate::item::WorkItem;

/// Team-days one standard team needs to complete the item's volume. Always >= 1.
pub fn estimate_team_days(item: &WorkItem, config: &EstimatorConfig) -> u32 {
    let rate = clamp::positive_rate(productivity_rate(&item.name, item.unit_or_default(), config));
    let volume = if item.volume.is_finite() { item.volume } else { 0.0 };
    clamp::at_least_one_day(volume / rate)
}

/// Daily output for an item name and unit.
///
/// A keyword match in the name gets the safety factor applied. Otherwise the
/// unit-based generic rate is used as-is.
pub fn productivity_rate(name: &str, unit: &str, config: &EstimatorConfig) -> f64 {
    let name = name.to_lowercase();
    let matched = config
        .keyword_rate(&name)
        .map(|rate| rate * config.safety_factor)
        .unwrap_or(0.0);
    if matched > 0.0 {
        return matched;
    }
    unit_rate(unit, config)
}

pub fn unit_rate(unit: &str, config: &EstimatorConfig) -> f64 {
    let unit = unit.to_lowercase();
    let unit = unit.trim();
    if let Some(rate) = config.exact_unit_rate(unit) {
        return rate;
    }
    config
        .fragment_unit_rate(unit)
        .unwrap_or(config.default_rate)
}
