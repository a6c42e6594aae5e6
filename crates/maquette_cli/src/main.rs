//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `maquette_core` linkage without a UI shell.
//! - Replay a JSON command script against an in-memory gateway.
//!
//! Usage: `maquette_cli [commands.json]`. Without a script, a built-in
//! sequence creates, fills and saves one maquette.

use maquette_core::{
    Command, CommandOutcome, FieldValue, InMemoryGateway, MaquetteStore, NodeId,
    RecordingNavigator,
};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    println!("maquette_core version={}", maquette_core::core_version());

    if let Ok(dir) = std::env::var("MAQUETTE_LOG_DIR") {
        if let Err(err) = maquette_core::init_logging(maquette_core::default_log_level(), &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut store = MaquetteStore::new(InMemoryGateway::new(), RecordingNavigator::new());
    let result = match std::env::args().nth(1) {
        Some(path) => replay(&mut store, &path).await,
        None => smoke(&mut store).await,
    };

    match result {
        Ok(()) => {
            for document in store.all() {
                println!(
                    "maquette id={} years={} dirty={}",
                    document.id,
                    document.years.len(),
                    store.is_dirty(&document.id)
                );
            }
            if let Some(route) = store.navigator().last_route() {
                println!("route=/{}", route.join("/"));
            }
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

type Store = MaquetteStore<InMemoryGateway, RecordingNavigator>;

async fn replay(store: &mut Store, path: &str) -> Result<(), String> {
    let raw = std::fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
    let commands: Vec<Command> =
        serde_json::from_str(&raw).map_err(|err| format!("{path}: {err}"))?;
    for command in commands {
        run(store, command).await?;
    }
    Ok(())
}

async fn smoke(store: &mut Store) -> Result<(), String> {
    let draft = created(
        run(
            store,
            Command::NewMaquette {
                master: "informatique".to_string(),
                school_year: "2019-2020".to_string(),
            },
        )
        .await?,
    )?;
    let year = created(
        run(
            store,
            Command::NewYear {
                maquette_id: draft,
                level: "M1".to_string(),
            },
        )
        .await?,
    )?;
    let semester = created(run(store, Command::AddSemester { year_id: year }).await?)?;
    let module = created(
        run(
            store,
            Command::AddModule {
                semester_id: semester,
            },
        )
        .await?,
    )?;
    let course = created(run(store, Command::AddCourse { module_id: module }).await?)?;
    run(
        store,
        Command::EditCourseField {
            course_id: course,
            field: "name".to_string(),
            value: FieldValue::from("Compilation"),
        },
    )
    .await?;
    run(store, Command::SaveNewMaquette).await?;
    Ok(())
}

async fn run(store: &mut Store, command: Command) -> Result<CommandOutcome, String> {
    let name = command.name();
    let outcome = store
        .dispatch(command)
        .await
        .map_err(|err| format!("{name}: {err}"))?;
    println!("command={name} outcome={outcome:?}");
    Ok(outcome)
}

fn created(outcome: CommandOutcome) -> Result<NodeId, String> {
    match outcome {
        CommandOutcome::Created(id) => Ok(id),
        other => Err(format!("expected a created node, got {other:?}")),
    }
}
