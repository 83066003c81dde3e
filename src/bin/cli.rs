use chrono::NaiveDate;
use polars::prelude::{AnyValue, DataFrame};
use rab_scheduler::{
    EstimatorConfig, Project, ScheduleOptions, WorkItem, import_items_from_csv,
    load_project_from_csv, load_project_from_json, plan_projects, save_project_to_csv,
    save_project_to_json,
};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float64(v) => format!("{v}"),
        _ => av.to_string(),
    }
}

fn render_df_as_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect::<Vec<_>>();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, s) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(s.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let render_row = |values: &[String]| {
        let mut line = String::from("|");
        for (ci, value) in values.iter().enumerate() {
            let pad = widths[ci].saturating_sub(value.chars().count());
            line.push(' ');
            line.push_str(value);
            line.push_str(&" ".repeat(pad));
            line.push_str(" |");
        }
        line
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_row(&col_names));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show current items\n  add <name> | <category> | <volume> | <unit>\n                                     Add a work item (fields separated by '|')\n  delete <id>                        Delete an item\n  dates <id> <YYYY-MM-DD> <YYYY-MM-DD>\n                                     Set an item's start and end dates\n  undate <id>                        Clear an item's dates\n  estimate <id>                      Show an item's estimated team-days\n  meta show                          Show project metadata\n  meta name <text...>                Update project name\n  meta desc <text...>                Update project description\n  meta dates <start> <end>           Update project window (YYYY-MM-DD)\n  config show                        Show estimator settings\n  config default                     Restore built-in rate tables\n  config load <json_path>            Load estimator config from JSON file\n  config save <json_path>            Save estimator config to JSON file\n  slots                              Show category time slots\n  schedule [keep]                    Assign dates (keep: preserve dated items)\n  preview                            Show workload and crew report\n  save <json|csv> <path>             Persist project to disk\n  load <json|csv> <path>             Load project from disk\n  import <csv_path>                  Add items from a RAB item list\n  batch <dir> [keep]                 Schedule every project JSON in a directory\n  quit|exit                          Exit"
    );
}

fn print_metadata(project: &Project) {
    let metadata = project.metadata();
    println!("Project name       : {}", metadata.name);
    println!("Project description: {}", metadata.description);
    println!("Project start date : {}", metadata.start_date);
    println!("Project end date   : {}", metadata.end_date);
}

fn print_config(config: &EstimatorConfig) {
    println!("Safety factor      : {}", config.safety_factor);
    println!("Team size          : {}", config.team_size);
    println!("Default rate       : {}", config.default_rate);
    println!("Keyword rates      : {}", config.productivity_rates.len());
    println!("Unit rates         : {}", config.unit_rates.len());
    println!("Sequence rules     : {}", config.sequence_rules.len());
}

fn show_items(project: &Project) {
    match project.to_dataframe() {
        Ok(df) => println!("{}", render_df_as_text_table(&df)),
        Err(e) => println!("Error rendering items: {}", e),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn rest_of_line<'a>(input: &'a str, skip_words: usize) -> &'a str {
    let mut rest = input.trim_start();
    for _ in 0..skip_words {
        rest = rest
            .split_once(char::is_whitespace)
            .map(|(_, tail)| tail.trim_start())
            .unwrap_or("");
    }
    rest.trim()
}

fn add_item(project: &mut Project, args: &str) {
    let fields: Vec<&str> = args.split('|').map(str::trim).collect();
    let [name, category, volume_s, unit] = fields.as_slice() else {
        println!("Usage: add <name> | <category> | <volume> | <unit>");
        return;
    };
    let volume: f64 = match volume_s.parse() {
        Ok(v) => v,
        Err(_) => {
            println!("Invalid volume");
            return;
        }
    };
    let id = project.next_item_id();
    let item = WorkItem::new(id.clone(), *name, *category, volume, *unit);
    match project.upsert_item(item) {
        Ok(()) => {
            let team_days = project.estimate_item(&id).unwrap_or_default();
            println!("Added item {id} ({team_days} team-days).");
        }
        Err(e) => println!("Error: {}", e),
    }
}

fn run_batch(dir: &str, options: ScheduleOptions) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            println!("Error reading {}: {}", dir, e);
            return;
        }
    };
    let mut paths: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut projects = Vec::with_capacity(paths.len());
    for path in &paths {
        match load_project_from_json(path) {
            Ok(project) => projects.push(project),
            Err(e) => println!("Skipping {}: {}", path.display(), e),
        }
    }

    for outcome in plan_projects(&projects, options) {
        println!(
            "{}: {}",
            outcome.project_name,
            outcome.plan.summary.to_cli_summary()
        );
    }
}

fn save_or_load(project: &mut Project, cmd: &str, format: Option<&str>, path: Option<&str>) {
    let (Some(format), Some(path)) = (format, path) else {
        println!("Usage: {cmd} <json|csv> <path>");
        return;
    };
    match (cmd, format) {
        ("save", "json") => match save_project_to_json(project, path) {
            Ok(()) => println!("Project saved to {path}."),
            Err(e) => println!("Error saving project: {}", e),
        },
        ("save", "csv") => match save_project_to_csv(project, path) {
            Ok(()) => println!("Project saved to {path}."),
            Err(e) => println!("Error saving project: {}", e),
        },
        ("load", "json") | ("load", "csv") => {
            let loaded = if format == "json" {
                load_project_from_json(path)
            } else {
                load_project_from_csv(path)
            };
            match loaded {
                Ok(loaded) => {
                    *project = loaded;
                    println!("Project loaded from {path}.");
                }
                Err(e) => println!("Error loading project: {}", e),
            }
        }
        _ => println!("Unknown format '{format}' (expected json or csv)"),
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    let mut project = Project::new();

    println!("RAB Scheduler (CLI) - type 'help' for commands\n");
    print_metadata(&project);

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => show_items(&project),
            "add" => add_item(&mut project, rest_of_line(input, 1)),
            "delete" => match parts.next() {
                Some(id) => {
                    if project.delete_item(id) {
                        println!("Deleted item {id}.");
                    } else {
                        println!("Item {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "dates" => {
                let (Some(id), Some(start_s), Some(end_s)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    println!("Usage: dates <id> <YYYY-MM-DD> <YYYY-MM-DD>");
                    continue;
                };
                let (Some(start), Some(end)) = (parse_date(start_s), parse_date(end_s)) else {
                    println!("Invalid date (YYYY-MM-DD)");
                    continue;
                };
                match project.set_item_dates(id, start, end) {
                    Ok(true) => println!("Item {id} dated {start} to {end}."),
                    Ok(false) => println!("Item {id} not found."),
                    Err(e) => println!("Error: {}", e),
                }
            }
            "undate" => match parts.next() {
                Some(id) => {
                    if project.clear_item_dates(id) {
                        println!("Cleared dates of item {id}.");
                    } else {
                        println!("Item {id} not found.");
                    }
                }
                None => println!("Usage: undate <id>"),
            },
            "estimate" => match parts.next() {
                Some(id) => match project.estimate_item(id) {
                    Some(days) => println!("Item {id}: {days} team-days"),
                    None => println!("Item {id} not found."),
                },
                None => println!("Usage: estimate <id>"),
            },
            "meta" => match parts.next() {
                Some("show") => print_metadata(&project),
                Some("name") => {
                    project.set_project_name(rest_of_line(input, 2));
                    println!("Project name updated.");
                }
                Some("desc") => {
                    project.set_project_description(rest_of_line(input, 2));
                    println!("Project description updated.");
                }
                Some("dates") => {
                    let start = parts.next().and_then(parse_date);
                    let end = parts.next().and_then(parse_date);
                    match (start, end) {
                        (Some(start), Some(end)) => match project.set_project_dates(start, end) {
                            Ok(()) => println!("Project dates updated."),
                            Err(e) => println!("{}", e),
                        },
                        _ => println!("Usage: meta dates <YYYY-MM-DD> <YYYY-MM-DD>"),
                    }
                }
                _ => println!("Usage: meta <show|name|desc|dates> ..."),
            },
            "config" => match (parts.next(), parts.next()) {
                (Some("show"), _) => print_config(project.config()),
                (Some("default"), _) => {
                    project.set_config(EstimatorConfig::default());
                    println!("Estimator config reset to built-in tables.");
                }
                (Some("load"), Some(path)) => match EstimatorConfig::from_json_file(path) {
                    Ok(config) => {
                        project.set_config(config);
                        println!("Estimator config loaded from {path}.");
                    }
                    Err(e) => println!("Error loading config: {}", e),
                },
                (Some("save"), Some(path)) => match project.config().to_json_file(path) {
                    Ok(()) => println!("Estimator config saved to {path}."),
                    Err(e) => println!("Error saving config: {}", e),
                },
                _ => println!("Usage: config <show|default|load <path>|save <path>>"),
            },
            "slots" => {
                let slots = project.slots();
                if slots.is_empty() {
                    println!("No slots (add items and set a valid project window).");
                }
                for slot in slots {
                    println!(
                        "{:>3} {}: {} -> {} ({:.1} days, {} team-days)",
                        slot.order,
                        slot.category,
                        slot.start_date(),
                        slot.end_date(),
                        slot.duration_days(),
                        slot.team_days
                    );
                }
            }
            "schedule" => {
                let options = ScheduleOptions {
                    keep_existing: parts.next() == Some("keep"),
                };
                let summary = project.schedule(options);
                println!("Scheduled ({})", summary.to_cli_summary());
                show_items(&project);
            }
            "preview" => {
                for line in project.preview().lines() {
                    println!("{line}");
                }
            }
            "save" | "load" => save_or_load(&mut project, cmd, parts.next(), parts.next()),
            "import" => match parts.next() {
                Some(path) => match import_items_from_csv(&mut project, Path::new(path)) {
                    Ok(count) => println!("Imported {count} items from {path}."),
                    Err(e) => println!("Error importing items: {}", e),
                },
                None => println!("Usage: import <csv_path>"),
            },
            "batch" => match parts.next() {
                Some(dir) => run_batch(
                    dir,
                    ScheduleOptions {
                        keep_existing: parts.next() == Some("keep"),
                    },
                ),
                None => println!("Usage: batch <dir> [keep]"),
            },
            _ => println!("Unknown command. Type 'help'."),
        }
    }
}
