// wfh-tracker - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration + platform path resolution
// 3. Logging initialisation (debug mode support)
// 4. Store hydration and subcommand dispatch
//
// The CLI is a thin consumer of the library: it translates subcommands into
// store intents and renders results. All tracking, persistence, and
// import/export logic lives in the library crate.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use wfh_tracker::app::storage;
use wfh_tracker::app::store::ProjectStore;
use wfh_tracker::core::export::{export_csv, export_filename, export_json, ExportFormat};
use wfh_tracker::core::import::import_projects;
use wfh_tracker::core::time_format::format_hms;
use wfh_tracker::platform;
use wfh_tracker::util;
use wfh_tracker::util::error::{ImportError, TrackerError};

/// wfh-tracker - Local per-project work-time tracker.
///
/// Tracks elapsed work time per named project, persists the project set
/// locally, and exports/imports the data set as JSON or CSV.
#[derive(Parser, Debug)]
#[command(name = "wfh-tracker", version, about)]
struct Cli {
    /// Override the data directory holding the project collection.
    #[arg(long = "data-dir", global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new project.
    Add {
        /// Project name (case-sensitive).
        name: String,
    },

    /// Delete the first project with a matching name.
    Delete { name: String },

    /// Move a project to a new position (positions as shown by `list`, 1-based).
    Move { from: usize, to: usize },

    /// List all projects with elapsed time, rate, and earnings.
    List,

    /// Set a project's hourly rate (negative values clamp to 0).
    Rate { name: String, rate: f64 },

    /// Stop the timer (if running) and zero a project's elapsed time.
    Reset { name: String },

    /// Track a project interactively: ticks once per second until Enter.
    Track { name: String },

    /// Export all projects to a JSON or CSV file.
    Export {
        /// Output format.
        #[arg(value_enum)]
        format: CliFormat,

        /// Output path (defaults to wfh-projects-YYYY-MM-DD.<ext> in the
        /// current directory).
        path: Option<PathBuf>,
    },

    /// Import projects from a JSON or CSV file, replacing the current set.
    Import { path: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CliFormat {
    Json,
    Csv,
}

impl From<CliFormat> for ExportFormat {
    fn from(f: CliFormat) -> Self {
        match f {
            CliFormat::Json => ExportFormat::Json,
            CliFormat::Csv => ExportFormat::Csv,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and configuration before logging is up; both
    // fall back to safe defaults on any problem.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(cli.debug, config.logging.level.as_deref());

    tracing::debug!(
        version = util::constants::APP_VERSION,
        "wfh-tracker starting"
    );

    // Data directory: CLI override > config.toml > platform default.
    let data_dir = cli
        .data_dir
        .clone()
        .or(config.storage.data_dir.clone())
        .unwrap_or(platform_paths.data_dir);

    let mut store = ProjectStore::open(storage::storage_path(&data_dir));

    if let Err(e) = run(&cli.command, &mut store) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: &Command, store: &mut ProjectStore) -> Result<(), TrackerError> {
    match command {
        Command::Add { name } => {
            store.add(name.clone());
            println!("Added project '{name}'.");
        }

        Command::Delete { name } => {
            let existed = store.find(name).is_some();
            store.delete(name, Instant::now());
            if existed {
                println!("Deleted project '{name}'.");
            } else {
                println!("No project named '{name}' — nothing deleted.");
            }
        }

        Command::Move { from, to } => {
            // `list` shows 1-based positions; the store is 0-based.
            let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
                eprintln!("Positions are 1-based.");
                return Ok(());
            };
            store.reorder(from, to);
            print_list(store);
        }

        Command::List => print_list(store),

        Command::Rate { name, rate } => {
            if store.set_hourly_rate(name, *rate) {
                println!("Set hourly rate for '{name}'.");
            } else {
                eprintln!("No project named '{name}'.");
            }
        }

        Command::Reset { name } => {
            if store.reset(name, Instant::now()) {
                println!("Reset '{name}' to 00:00:00.");
            } else {
                eprintln!("No project named '{name}'.");
            }
        }

        Command::Track { name } => track(store, name),

        Command::Export { format, path } => export(store, (*format).into(), path.as_deref())?,

        Command::Import { path } => {
            let content =
                std::fs::read_to_string(path).map_err(|e| ImportError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let projects = import_projects(&content, &filename, None)?;
            let count = projects.len();
            store.replace_all(projects, Instant::now());
            println!("Imported {count} projects from '{}'.", path.display());
        }
    }

    Ok(())
}

/// Render the collection as a table, 1-based positions, earnings rounded to
/// two decimals for display only.
fn print_list(store: &ProjectStore) {
    if store.projects().is_empty() {
        println!("No projects. Add one with `wfh-tracker add <name>`.");
        return;
    }

    println!("{:>3}  {:<30} {:>10} {:>10} {:>8} {:>10}", "#", "Project", "Time", "Seconds", "Rate", "Earnings");
    for (i, project) in store.projects().iter().enumerate() {
        println!(
            "{:>3}  {:<30} {:>10} {:>10} {:>8.2} {:>10.2}",
            i + 1,
            project.name,
            format_hms(project.elapsed_seconds),
            project.elapsed_seconds,
            project.hourly_rate,
            project.earnings()
        );
    }
}

/// Interactive tracking session: the once-per-second tick loop runs on the
/// main thread; a helper thread blocks on stdin and signals stop over a
/// channel when the user presses Enter.
///
/// Every tick write-through persists, so a killed session loses at most one
/// second of tracked time.
fn track(store: &mut ProjectStore, name: &str) {
    if !store.start(name, Instant::now()) {
        eprintln!("No project named '{name}'. Add it with `wfh-tracker add`.");
        return;
    }

    println!("Tracking '{name}' — press Enter to stop.");

    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        // A send failure means the main loop already exited.
        let _ = stop_tx.send(());
    });

    loop {
        match stop_rx.recv_timeout(Duration::from_millis(util::constants::TICK_INTERVAL_MS)) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                store.tick(Instant::now());
                if let Some(project) = store.running_project() {
                    print!("\r  {}  ", format_hms(project.elapsed_seconds));
                    let _ = std::io::stdout().flush();
                }
            }
            // Enter pressed, or the stdin thread went away: stop either way.
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    if let Some(stopped) = store.stop(Instant::now()) {
        let elapsed = store
            .projects()
            .iter()
            .find(|p| p.name == stopped)
            .map(|p| p.elapsed_seconds)
            .unwrap_or(0);
        println!("\nStopped '{stopped}' at {}.", format_hms(elapsed));
    }
}

/// Encode the collection to `path` (or the dated default file name) in the
/// requested format.
fn export(
    store: &ProjectStore,
    format: ExportFormat,
    path: Option<&std::path::Path>,
) -> Result<(), TrackerError> {
    let path: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(export_filename(format)),
    };

    let file = std::fs::File::create(&path).map_err(|e| TrackerError::Io {
        path: path.clone(),
        operation: "create",
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let count = match format {
        ExportFormat::Json => export_json(store.projects(), writer)?,
        ExportFormat::Csv => export_csv(store.projects(), writer)?,
    };

    println!(
        "Exported {count} projects to '{}' ({}).",
        path.display(),
        format.mime_type()
    );
    Ok(())
}
