use crate::planner::{self, SchedulePlan, ScheduleOptions};
use crate::schedule::Project;
use rayon::prelude::*;

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub project_name: String,
    pub plan: SchedulePlan,
}

/// Schedules several projects in parallel. Output order matches input order.
pub fn plan_projects(projects: &[Project], options: ScheduleOptions) -> Vec<BatchOutcome> {
    projects
        .par_iter()
        .map(|project| BatchOutcome {
            project_name: project.metadata().name.clone(),
            plan: planner::plan(
                &project.metadata().window(),
                project.items(),
                project.config(),
                options,
            ),
        })
        .collect()
}
