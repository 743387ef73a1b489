use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock, SeedOutcome, seed_default_program};
use storage::repository::Storage;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};
use workout_core::model::ProgramId;

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Parser, Debug)]
#[command(name = "workout")]
#[command(version, about = "Workout tracker with a todo list", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Launch the desktop UI (default)
    Ui,
    /// Insert the built-in program if it is missing, then exit
    Seed,
}

#[derive(clap::Args, Debug)]
struct Options {
    /// SQLite URL or file path
    #[arg(
        long = "db",
        env = "WORKOUT_DB_URL",
        default_value = "sqlite://workout.sqlite3",
        global = true
    )]
    db_url: String,

    /// Program shown first in the workout list
    #[arg(long, env = "WORKOUT_PROGRAM_ID", default_value_t = 1, global = true)]
    program_id: u64,

    /// Log filter, e.g. `debug` or `services=debug,info`; overrides RUST_LOG
    #[arg(long, env = "WORKOUT_LOG_LEVEL", global = true)]
    log_level: Option<String>,
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Turn a path or relative `sqlite:` URL into an absolute `sqlite://` URL.
fn normalize_sqlite_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("invalid --db value: {raw:?}");
    }
    if trimmed == MEMORY_URL || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_owned());
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    if path_str.is_empty() {
        bail!("invalid --db value: {raw:?}");
    }
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

/// Create the database file and its parent directories so sqlx can open it.
fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == MEMORY_URL {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }
    Ok(())
}

async fn launch_ui(db_url: &str, program_id: ProgramId) -> Result<()> {
    let services = AppServices::new_sqlite(db_url, Clock::default(), program_id)
        .await
        .context("starting services")?;
    info!(program_id = %services.program_id(), "launching ui");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // Some desktop setups default to always-on-top; keep a normal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Workout")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

async fn seed(db_url: &str) -> Result<()> {
    let storage = Storage::sqlite(db_url)
        .await
        .context("opening database")?;
    let outcome = seed_default_program(storage.programs.as_ref())
        .await
        .context("seeding program")?;

    match outcome {
        SeedOutcome::Created {
            program_id,
            days,
            exercises,
        } => println!("Seeded program {program_id}: {days} days, {exercises} exercises"),
        SeedOutcome::AlreadyPresent { program_id } => {
            println!("Program {program_id} already present; nothing to seed");
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Ui);
    let db_url = normalize_sqlite_url(&cli.options.db_url)?;
    prepare_sqlite_file(&db_url)?;
    info!(%db_url, ?command, "opening database");

    match command {
        Command::Ui => launch_ui(&db_url, ProgramId::new(cli.options.program_id)).await,
        Command::Seed => seed(&db_url).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.options.log_level.as_deref());

    if let Err(err) = run(cli).await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
