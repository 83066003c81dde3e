use chrono::NaiveDate;
use rab_scheduler::calculations::{recommend_crew, recommend_project_crew};
use rab_scheduler::{
    CrewRecommendation, EstimatorConfig, ProjectWindow, SchedulePreview, WorkItem,
    preview_schedule,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lump(id: &str, category: &str, volume: f64) -> WorkItem {
    WorkItem::new(id, "Pekerjaan Khusus", category, volume, "ls")
}

#[test]
fn light_workload_needs_one_part_time_team() {
    let crew = recommend_crew(3.0, 10.0, 2);
    assert_eq!(crew, CrewRecommendation::PartTime { team_size: 2 });
    assert!(crew.is_part_time());
    assert_eq!(crew.people(), 2);
    assert_eq!(crew.to_string(), "1 team (2 people), part-time");
}

#[test]
fn heavy_workload_rounds_people_up() {
    let crew = recommend_crew(10.0, 28.0 / 3.0, 2);
    assert_eq!(crew.people(), 3);
    assert!(!crew.is_part_time());

    let exact = recommend_crew(5.0, 5.0, 2);
    assert_eq!(exact.people(), 2);
    assert!(!exact.is_part_time());
}

#[test]
fn zero_allocated_days_counts_as_one() {
    assert_eq!(recommend_crew(4.0, 0.0, 2).people(), 8);
    assert_eq!(recommend_crew(4.0, -3.0, 2).people(), 8);
}

#[test]
fn project_crew_uses_total_window() {
    let crew = recommend_project_crew(15, 14, 2);
    assert_eq!(crew.people(), 3);
    assert_eq!(crew.to_string(), "3 people (1.1 teams)");
}

#[test]
fn preview_reports_totals_and_categories() {
    let config = EstimatorConfig::default();
    let window = ProjectWindow::new(d(2025, 1, 1), d(2025, 1, 15));
    let items = vec![
        lump("f1", "Finishing", 5.0),
        lump("s1", "Struktur", 6.0),
        lump("s2", "Struktur", 4.0),
    ];

    let preview = preview_schedule(&window, &items, &config);
    let report = preview.report().expect("report");
    assert_eq!(report.total_days, 14);
    assert_eq!(report.total_team_days, 15);
    assert_eq!(report.categories.len(), 2);

    let lines = preview.lines();
    assert_eq!(
        lines,
        vec![
            "Total duration: 14 days (2.0 weeks)".to_string(),
            "Total workload: 15 team-days".to_string(),
            "Recommended average crew: 3 people (1.1 teams)".to_string(),
            "Breakdown by category:".to_string(),
            "- Struktur: 1.3 weeks, 10 team-days, 3 people (1.1 teams)".to_string(),
            "- Finishing: 0.7 weeks, 5 team-days, 3 people (1.1 teams)".to_string(),
        ]
    );
}

#[test]
fn preview_flags_part_time_categories() {
    let config = EstimatorConfig::default();
    let window = ProjectWindow::new(d(2025, 1, 1), d(2025, 3, 1));
    let preview = preview_schedule(&window, &[lump("p1", "Persiapan", 2.0)], &config);
    let report = preview.report().unwrap();
    assert!(report.categories[0].crew.is_part_time());
    assert!(report.crew.is_part_time());
}

#[test]
fn degenerate_input_yields_single_line() {
    let config = EstimatorConfig::default();
    let window = ProjectWindow::new(d(2025, 1, 1), d(2025, 1, 15));
    assert_eq!(
        preview_schedule(&window, &[], &config),
        SchedulePreview::NoItems
    );
    assert_eq!(
        preview_schedule(&window, &[], &config).lines(),
        vec!["No work items to schedule.".to_string()]
    );

    let backwards = ProjectWindow::new(d(2025, 1, 15), d(2025, 1, 1));
    let lines = preview_schedule(&backwards, &[lump("a", "Struktur", 1.0)], &config).lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("must be after start date"));
}
