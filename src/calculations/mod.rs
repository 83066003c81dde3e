pub mod aggregate;
pub mod allocation;
pub mod assign;
pub mod crew;
pub mod duration;

pub use aggregate::{CategoryWorkload, aggregate_categories, total_team_days};
pub use allocation::{CategorySlot, allocate_slots};
pub use assign::assign_item_dates;
pub use crew::{CrewRecommendation, recommend_crew, recommend_project_crew};
pub use duration::{estimate_team_days, productivity_rate, unit_rate};
