use crate::clamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many people should work a category (or the whole project) concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CrewRecommendation {
    /// A single team suffices and will not be fully used.
    PartTime { team_size: u32 },
    Crew { people: u32, teams_needed: f64 },
}

impl CrewRecommendation {
    pub fn people(&self) -> u32 {
        match self {
            CrewRecommendation::PartTime { team_size } => *team_size,
            CrewRecommendation::Crew { people, .. } => *people,
        }
    }

    pub fn is_part_time(&self) -> bool {
        matches!(self, CrewRecommendation::PartTime { .. })
    }
}

impl fmt::Display for CrewRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrewRecommendation::PartTime { team_size } => {
                write!(f, "1 team ({team_size} people), part-time")
            }
            CrewRecommendation::Crew {
                people,
                teams_needed,
            } => write!(f, "{people} people ({teams_needed:.1} teams)"),
        }
    }
}

/// Crew size for `team_days` of work squeezed into `allocated_days` of calendar.
pub fn recommend_crew(team_days: f64, allocated_days: f64, team_size: u32) -> CrewRecommendation {
    let team_size = team_size.max(1);
    let teams_needed = team_days.max(0.0) / clamp::nonzero_days(allocated_days);
    if !teams_needed.is_finite() || teams_needed < 1.0 {
        return CrewRecommendation::PartTime { team_size };
    }
    let people = (teams_needed * f64::from(team_size)).ceil() as u32;
    CrewRecommendation::Crew {
        people,
        teams_needed,
    }
}

/// Average headcount over the whole project window.
pub fn recommend_project_crew(
    total_team_days: u64,
    total_days: i64,
    team_size: u32,
) -> CrewRecommendation {
    recommend_crew(total_team_days as f64, total_days as f64, team_size)
}
