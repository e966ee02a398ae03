//src/main.rs
mod cli; // Keep cli module for parsing args

use anyhow::{bail, Context, Result};
use chrono::Local;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::{self, stdout};
use tracing::Level;

use gymflow_lib::{
    AppService, LogSetParams, LoggedSet, Program, SettingsError, SubmitError, SyncStatus, Units,
    ValidationError,
};

fn main() -> Result<()> {
    let cli_args = cli::parse_args();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli_args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    // --- Check for completion generation request FIRST ---
    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command();
        let bin_name = cmd.get_name().to_string();
        eprintln!("Generating completion script for {shell}...");
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout());
        return Ok(());
    }

    let mut service =
        AppService::initialize().context("Failed to initialize application service")?;
    let header_color = service.config.theme.header_color();

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::Programs => {
            let programs: Vec<&Program> = service.catalog.list_programs().map(|(_, p)| p).collect();
            print_program_table(&programs, header_color);
        }
        cli::Commands::Show { program } => {
            let program = match program {
                Some(key) => service.get_program(key.trim())?,
                None => service.catalog.default_program(),
            };
            println!("{} {}", program.icon, program.display_name);
            print_exercise_table(program, header_color);
        }
        cli::Commands::Log {
            program,
            exercise,
            weight,
            reps,
            notes,
        } => {
            let program = service.get_program(program.trim())?;
            let selected = match exercise.as_deref() {
                Some(ident) => match program.exercise(ident) {
                    Some(found) => Some(found),
                    None => bail!(
                        "Exercise '{}' not found in {}. Use 'show {}' to list exercises.",
                        ident,
                        program.display_name,
                        program.key
                    ),
                },
                // Single-exercise programs (weigh-in) need no selection
                None if program.exercises.len() == 1 => program.exercises.first(),
                None => None,
            };

            let params = LogSetParams {
                exercise: selected,
                weight: &weight,
                reps: &reps,
                notes: &notes,
                category: program.key,
            };
            let units = service.config.units;
            match service.log_set(params) {
                Ok(entry) => {
                    println!(
                        "Logged {}: {} {} x {} reps",
                        entry.exercise_name,
                        entry.weight,
                        units.weight_label(),
                        entry.reps
                    );
                    print_sync_status(service.last_sync_status());
                }
                Err(SubmitError::Validation(e)) => bail!(validation_hint(&e)),
                Err(e) => bail!("Error logging set: {}", e),
            }
        }
        cli::Commands::Recent { limit } => {
            let n = limit.unwrap_or(service.config.recent_limit);
            let entries = service.recent(n);
            if entries.is_empty() {
                println!("No sets logged yet.");
            } else {
                print_recent_table(entries, service.config.units, header_color);
            }
        }
        cli::Commands::Export => {
            service.export_history_csv(io::stdout())?;
        }
        cli::Commands::Settings => {
            let settings = service.settings();
            if settings.has_sheet_url() {
                println!("Google Sheets URL: {}", settings.sheet_url);
                match gymflow_lib::extract_id(&settings.sheet_url) {
                    Ok(id) => println!("Sheet ID: {id}"),
                    Err(e) => println!("Warning: {e}"),
                }
            } else {
                println!("Google Sheets URL: (not set, sets are stored locally only)");
            }
        }
        cli::Commands::SetSheetUrl { url } => match service.set_sheet_url(&url) {
            Ok(Some(id)) => println!("Settings saved. Sheet ID: {id}"),
            Ok(None) => println!("Settings saved. Sheet URL cleared."),
            Err(SettingsError::InvalidUrl(e)) => bail!(
                "{}. Paste the full sheet URL, e.g. https://docs.google.com/spreadsheets/d/<id>/edit",
                e
            ),
            Err(e) => bail!("Error saving settings: {}", e),
        },
        cli::Commands::ClearSheetUrl => {
            service.clear_sheet_url()?;
            println!("Sheet URL cleared. Sets will be stored locally only.");
        }
        cli::Commands::SetUnits { units } => {
            let units = match units {
                cli::UnitsCli::Metric => Units::Metric,
                cli::UnitsCli::Imperial => Units::Imperial,
            };
            service.set_units(units)?;
            println!("Units set to {}.", units.weight_label());
        }
        cli::Commands::SetRecentLimit { limit } => {
            service.set_recent_limit(limit)?;
            println!("Recent limit set to {limit}.");
        }
        cli::Commands::ConfigPath => {
            println!("Config file is located at: {:?}", service.get_config_path());
        }
        cli::Commands::DbPath => {
            println!("Database file is located at: {:?}", service.get_db_path());
        }
    }

    Ok(())
}

fn validation_hint(e: &ValidationError) -> String {
    match e {
        ValidationError::MissingExercise => {
            "Please choose an exercise with --exercise <name or number>.".to_string()
        }
        other => format!("Please fill in all required fields. {other}"),
    }
}

fn print_sync_status(status: Option<SyncStatus>) {
    match status {
        Some(SyncStatus::Sent) => println!("Synced to Google Sheets."),
        Some(SyncStatus::Skipped) => {
            println!("No Google Sheets URL configured; saved locally only.");
        }
        Some(SyncStatus::InvalidTarget) => {
            println!("Invalid Google Sheets URL in settings; saved locally only.");
        }
        Some(SyncStatus::Failed(reason)) => {
            println!("Sync failed ({reason}); saved locally.");
        }
        None => {}
    }
}

fn print_program_table(programs: &[&Program], header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Key").fg(header_color),
            Cell::new("Program").fg(header_color),
            Cell::new("Exercises").fg(header_color),
        ]);

    for program in programs {
        table.add_row(vec![
            Cell::new(program.key),
            Cell::new(format!("{} {}", program.icon, program.display_name)),
            Cell::new(program.exercises.len().to_string()),
        ]);
    }
    println!("{table}");
}

fn print_exercise_table(program: &Program, header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Kind").fg(header_color),
            Cell::new("Sets").fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Rest").fg(header_color),
        ]);

    for (idx, exercise) in program.exercises.iter().enumerate() {
        table.add_row(vec![
            Cell::new((idx + 1).to_string()),
            Cell::new(exercise.name),
            Cell::new(exercise.kind.to_string()),
            Cell::new(exercise.sets.to_string()),
            Cell::new(exercise.reps_spec),
            Cell::new(if exercise.has_rest() {
                format!("{}s", exercise.rest_seconds)
            } else {
                "-".to_string()
            }),
        ]);
    }
    println!("{table}");
}

fn print_recent_table(entries: &[LoggedSet], units: Units, header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Date (Local)").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new(format!("Weight ({})", units.weight_label())).fg(header_color),
            Cell::new("Reps").fg(header_color),
            Cell::new("Program").fg(header_color),
            Cell::new("Notes").fg(header_color),
        ]);

    for entry in entries {
        table.add_row(vec![
            Cell::new(
                entry
                    .timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ),
            Cell::new(&entry.exercise_name),
            Cell::new(entry.weight.to_string()),
            Cell::new(entry.reps.to_string()),
            Cell::new(&entry.category),
            Cell::new(if entry.notes.is_empty() { "-" } else { entry.notes.as_str() }),
        ]);
    }
    println!("{table}");
}
