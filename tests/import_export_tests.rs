use chrono::NaiveDate;
use rab_scheduler::{
    EstimatorConfig, PersistenceError, Project, ProjectMetadata, WorkItem,
    import_items_from_csv_reader, load_items_from_csv, load_items_from_csv_reader,
    load_project_from_csv, load_project_from_json, save_project_to_csv, save_project_to_json,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn build_sample_project() -> Project {
    let metadata = ProjectMetadata {
        name: "Export Project".into(),
        description: "Testing persistence helpers".into(),
        start_date: d(2025, 1, 6),
        end_date: d(2025, 2, 28),
    };
    let mut project = Project::new_with_metadata(metadata);

    let mut sloof = WorkItem::new("1", "Cor Beton Sloof", "Struktur - Sloof", 6.5, "m3");
    sloof.progress = Some(25.0);
    project
        .upsert_item(sloof.with_dates(d(2025, 1, 6), d(2025, 1, 20)))
        .unwrap();

    let mut paint = WorkItem::new("2", "Cat Dinding, Interior", "Finishing", 120.0, "m2");
    paint.unit = None;
    project.upsert_item(paint).unwrap();

    let mut config = EstimatorConfig::default();
    config.safety_factor = 0.9;
    project.set_config(config);
    project
}

#[test]
fn json_round_trip_preserves_project() {
    let project = build_sample_project();
    let file = NamedTempFile::new().unwrap();

    save_project_to_json(&project, file.path()).unwrap();
    let loaded = load_project_from_json(file.path()).unwrap();

    assert_eq!(loaded, project);
    assert_eq!(loaded.config().safety_factor, 0.9);
}

#[test]
fn json_uses_camel_case_dates() {
    let project = build_sample_project();
    let file = NamedTempFile::new().unwrap();
    save_project_to_json(&project, file.path()).unwrap();

    let text = std::fs::read_to_string(file.path()).unwrap();
    assert!(text.contains("\"startDate\": \"2025-01-06\""));
    assert!(text.contains("\"endDate\": \"2025-01-20\""));
}

#[test]
fn csv_round_trip_preserves_project() {
    let project = build_sample_project();
    let file = NamedTempFile::new().unwrap();

    save_project_to_csv(&project, file.path()).unwrap();
    let loaded = load_project_from_csv(file.path()).unwrap();

    assert_eq!(loaded.metadata(), project.metadata());
    assert_eq!(loaded.config(), project.config());
    assert_eq!(loaded.items(), project.items());
}

#[test]
fn plain_item_list_import_generates_missing_ids() {
    let csv = "\
name,category,volume,unit,start_date,end_date
Galian Tanah Pondasi,Pekerjaan Tanah,12.5,m3,,
Pasangan Bata Ringan,Dinding,80,m2,2025-02-01,2025-02-10
Mobilisasi,Persiapan,1,,,
";
    let items = load_items_from_csv_reader(csv.as_bytes()).unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].id, "item-1");
    assert_eq!(items[0].volume, 12.5);
    assert_eq!(items[1].start_date, Some(d(2025, 2, 1)));
    assert_eq!(items[1].end_date, Some(d(2025, 2, 10)));
    assert_eq!(items[2].id, "item-3");
    assert_eq!(items[2].unit, None);
    assert_eq!(items[2].unit_or_default(), "ls");
}

#[test]
fn item_list_import_from_file_skips_metadata_row() {
    let project = build_sample_project();
    let file = NamedTempFile::new().unwrap();
    save_project_to_csv(&project, file.path()).unwrap();

    let items = load_items_from_csv(file.path()).unwrap();
    assert_eq!(items, project.items());
}

#[test]
fn invalid_volume_is_reported_with_row() {
    let csv = "id,name,category,volume,unit\na,Plester,Dinding,lots,m2\n";
    match load_items_from_csv_reader(csv.as_bytes()) {
        Err(PersistenceError::InvalidData(msg)) => assert!(msg.contains("row 1")),
        other => panic!("expected invalid data, got {other:?}"),
    }
}

#[test]
fn duplicate_ids_are_rejected() {
    let csv = "id,name,category,volume,unit\na,Plester,Dinding,10,m2\na,Acian,Dinding,10,m2\n";
    let err = load_items_from_csv_reader(csv.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("duplicate item id a"));
}

#[test]
fn csv_without_items_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id,name,category,volume,unit").unwrap();
    assert!(matches!(
        load_project_from_csv(file.path()),
        Err(PersistenceError::InvalidData(_))
    ));
}

#[test]
fn json_with_backwards_window_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"metadata":{{"name":"Bad","startDate":"2025-03-01","endDate":"2025-01-01"}},"items":[]}}"#
    )
    .unwrap();
    let err = load_project_from_json(file.path()).unwrap_err();
    assert!(err.to_string().contains("must be before project end date"));
}

#[test]
fn partial_config_file_keeps_builtin_tables() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"safety_factor": 0.75, "team_size": 3}}"#).unwrap();

    let config = EstimatorConfig::from_json_file(file.path()).unwrap();
    let builtin = EstimatorConfig::default();
    assert_eq!(config.safety_factor, 0.75);
    assert_eq!(config.team_size, 3);
    assert_eq!(config.productivity_rates, builtin.productivity_rates);
    assert_eq!(config.sequence_rules, builtin.sequence_rules);
    assert_eq!(config.unit_fragment_rates, builtin.unit_fragment_rates);
}

#[test]
fn invalid_config_file_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"sequence_rules": [{{"keyword": "Struktur", "order": 4, "weight": 25.0}}]}}"#
    )
    .unwrap();
    assert!(EstimatorConfig::from_json_file(file.path()).is_err());
}

#[test]
fn config_round_trips_through_file() {
    let file = NamedTempFile::new().unwrap();
    let mut config = EstimatorConfig::default();
    config.default_rate = 5.0;
    config.to_json_file(file.path()).unwrap();
    assert_eq!(EstimatorConfig::from_json_file(file.path()).unwrap(), config);
}

#[test]
fn generated_ids_skip_explicit_ids_in_same_file() {
    let csv = "\
id,name,category,volume,unit
,Plester,Dinding,10,m2
item-1,Acian,Dinding,10,m2
,Cat Dinding,Finishing,40,m2
";
    let items = load_items_from_csv_reader(csv.as_bytes()).unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["item-2", "item-1", "item-3"]);
}

#[test]
fn import_into_project_keeps_existing_items() {
    let mut project = Project::new();
    let id = project.next_item_id();
    project
        .upsert_item(WorkItem::new(id, "Cor Beton Sloof", "Struktur", 6.0, "m3"))
        .unwrap();

    let csv = "name,category,volume,unit\nPasangan Bata Ringan,Dinding,80,m2\n";
    let count = import_items_from_csv_reader(&mut project, csv.as_bytes()).unwrap();

    assert_eq!(count, 1);
    assert_eq!(project.items().len(), 2);
    assert_eq!(project.find_item("item-1").unwrap().name, "Cor Beton Sloof");
    assert_eq!(project.find_item("item-2").unwrap().name, "Pasangan Bata Ringan");
}

#[test]
fn import_rejects_ids_already_in_project() {
    let mut project = Project::new();
    project
        .upsert_item(WorkItem::new("a", "Cor Beton Sloof", "Struktur", 6.0, "m3"))
        .unwrap();

    let csv = "id,name,category,volume,unit\nb,Plester,Dinding,10,m2\na,Acian,Dinding,10,m2\n";
    let err = import_items_from_csv_reader(&mut project, csv.as_bytes()).unwrap_err();

    assert!(err.to_string().contains("item a already exists"));
    assert_eq!(project.items().len(), 1);
    assert_eq!(project.items()[0].name, "Cor Beton Sloof");
}
