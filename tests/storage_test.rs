use anyhow::Result;
use gymflow_lib::{
    AppService, Config, HistoryStore, KeyValueStore, LogSetParams, ProgramCatalog, SqliteStore,
    WorkoutLogger,
};
use std::rc::Rc;

fn open_service(db_path: &std::path::Path) -> Result<AppService> {
    let store = SqliteStore::open(db_path)?;
    Ok(AppService::with_backend(
        Config::default(),
        db_path.with_file_name("config.toml"),
        db_path.to_path_buf(),
        Rc::new(store),
        WorkoutLogger::default(),
    ))
}

#[test]
fn test_sqlite_store_get_set() -> Result<()> {
    let store = SqliteStore::open_in_memory()?;
    assert_eq!(store.get("settings.sheetUrl")?, None);

    store.set("settings.sheetUrl", "first")?;
    store.set("settings.sheetUrl", "second")?;
    assert_eq!(store.get("settings.sheetUrl")?.as_deref(), Some("second"));
    Ok(())
}

#[test]
fn test_state_survives_reopening_database() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("gymflow.sqlite");
    let legs = ProgramCatalog::reference().get_program("legs")?;

    {
        let mut service = open_service(&db_path)?;
        service.set_sheet_url("https://docs.google.com/spreadsheets/d/sheet_42/edit")?;
        service.log_set(LogSetParams {
            exercise: legs.exercise("Hack Squat"),
            weight: "225",
            reps: "12",
            notes: "",
            category: legs.key,
        })?;
    }

    let mut reopened = open_service(&db_path)?;
    assert_eq!(
        reopened.settings().sheet_url,
        "https://docs.google.com/spreadsheets/d/sheet_42/edit"
    );
    let recent = reopened.recent(5);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].exercise_name, "Hack Squat");
    assert_eq!(recent[0].weight, 225.0);
    assert_eq!(recent[0].category, "legs");
    Ok(())
}

#[test]
fn test_history_load_after_append_matches_view() -> Result<()> {
    let backend: Rc<dyn KeyValueStore> = Rc::new(SqliteStore::open_in_memory()?);
    let weigh = ProgramCatalog::reference().get_program("weigh")?;
    let mut history = HistoryStore::new(Rc::clone(&backend));
    let logger = WorkoutLogger::default();

    for weight in ["181.2", "180.8", "180.4"] {
        logger.submit(
            &mut history,
            &Default::default(),
            LogSetParams {
                exercise: weigh.exercises.first(),
                weight,
                reps: "1",
                notes: "",
                category: weigh.key,
            },
        )?;
    }

    let view = history.entries().to_vec();
    let mut fresh = HistoryStore::new(backend);
    assert_eq!(fresh.load(), view);
    assert_eq!(fresh.recent(1)[0].weight, 180.4);
    Ok(())
}
